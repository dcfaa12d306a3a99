//! vSMTP filter configuration
//!
//! The filters are configured with a TOML file, given with the
//! `-c, --config` flag of `vfilter`.
//!
//! The file declares the lookup tables, the external filters, and the
//! ordered list of rules of each phase of the SMTP transaction. Every field
//! is optional except `version_requirement`.
//!
//! The configuration is validated right after being parsed: a rule naming
//! an unknown table or filter, or a rule without outcome, is an error.
//!
//! # Example
//!
//! ```toml
//! version_requirement = ">=2.1.0"
//!
//! [tables.blocklist]
//! type = "static"
//! values = ["spammer@example.com", "@spam.example.net"]
//!
//! [[rules.rcpt-to]]
//! table = "blocklist"
//! reject = "550 recipient refused"
//! ```

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

#![doc(html_no_source)]
#![deny(missing_docs)]
#![forbid(unsafe_code)]
//
#![warn(rust_2018_idioms)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(clippy::cargo)]
//
#![allow(clippy::use_self)] // false positive

#[cfg(test)]
mod tests;

mod parser {
    pub mod tracing_directive;
}

mod config;
mod default;
mod ensure;

pub use config::{field, Config};

impl Config {
    /// Parse a [`Config`] with [TOML] format
    ///
    /// # Errors
    ///
    /// * data is not a valid [TOML]
    /// * one field is unknown
    /// * the version requirement are not fulfilled
    /// * a mandatory field is not provided (no default value)
    /// * a rule is invalid, see [`Config::ensure`]
    ///
    /// [TOML]: https://github.com/toml-lang/toml
    pub fn from_toml(input: &str) -> anyhow::Result<Self> {
        #[derive(serde::Serialize, serde::Deserialize)]
        struct VersionRequirement {
            version_requirement: semver::VersionReq,
        }

        let version_requirement = toml::from_str::<VersionRequirement>(input)?.version_requirement;
        let pkg_version = semver::Version::parse(env!("CARGO_PKG_VERSION"))?;

        if !version_requirement.matches(&pkg_version) {
            anyhow::bail!(
                "Version requirement not fulfilled: expected '{version_requirement}' but got '{pkg_version}'"
            );
        }

        toml::from_str::<Self>(input)
            .map(Self::ensure)
            .map_err(anyhow::Error::new)?
    }

    /// Read and parse the configuration file at `path`.
    ///
    /// # Errors
    ///
    /// * the file cannot be read
    /// * see [`Config::from_toml`]
    pub fn from_path(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let input = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("cannot read file '{}': {e}", path.display()))?;

        Self::from_toml(&input)
            .map_err(|e| e.context(format!("in configuration file '{}'", path.display())))
    }

    /// Produce a pretty JSON representation of the configuration.
    ///
    /// # Errors
    ///
    /// * a field cannot be serialized
    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
