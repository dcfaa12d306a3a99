/*
 * vSMTP mail transfer agent
 * Copyright (C) 2022 viridIT SAS
 *
 * This program is free software: you can redistribute it and/or modify it under
 * the terms of the GNU General Public License as published by the Free Software
 * Foundation, either version 3 of the License, or any later version.
 *
 * This program is distributed in the hope that it will be useful, but WITHOUT
 * ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
 * FOR A PARTICULAR PURPOSE.  See the GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License along with
 * this program. If not, see https://www.gnu.org/licenses/.
 *
*/

use crate::{
    config::field::{FieldLogs, FieldParser, FieldTable},
    Config,
};

impl Config {
    /// A configuration without any table nor rule: every phase proceeds.
    ///
    /// # Panics
    ///
    /// * the version of the crate is not a valid semver version
    #[must_use]
    pub fn new_default() -> Self {
        Self {
            version_requirement: semver::VersionReq::parse(&format!(
                ">={}",
                env!("CARGO_PKG_VERSION")
            ))
            .expect("the package version is valid"),
            logs: FieldLogs::default(),
            parser: FieldParser::default(),
            tables: std::collections::BTreeMap::default(),
            filters: std::collections::BTreeMap::default(),
            rules: std::collections::BTreeMap::default(),
        }
    }
}

impl Default for FieldLogs {
    fn default() -> Self {
        Self {
            level: Self::default_level(),
            filepath: None,
        }
    }
}

impl FieldLogs {
    pub(crate) fn default_level() -> Vec<tracing_subscriber::filter::Directive> {
        vec!["warn".parse().expect("hardcoded value is valid")]
    }
}

impl Default for FieldParser {
    fn default() -> Self {
        Self {
            header_name_max: Self::default_header_name_max(),
            value_max: Self::default_value_max(),
        }
    }
}

impl FieldParser {
    pub(crate) const fn default_header_name_max() -> usize {
        1024
    }

    pub(crate) const fn default_value_max() -> usize {
        65536
    }
}

impl FieldTable {
    pub(crate) const fn default_delimiter() -> char {
        ','
    }
}
