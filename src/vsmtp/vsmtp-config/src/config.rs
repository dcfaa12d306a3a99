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

use vsmtp_common::FilterPhase;

/// This structure contains all the field to configure the filters.
///
/// This structure will be loaded from a configuration file `-c, --config`
/// argument of the program. See [`crate::Config::from_toml`].
///
/// All field are optional and defaulted if missing, except the version
/// requirement.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// vSMTP's version requirement to parse this configuration file.
    pub version_requirement: semver::VersionReq,
    /// see [`field::FieldLogs`]
    #[serde(default)]
    pub logs: field::FieldLogs,
    /// see [`field::FieldParser`]
    #[serde(default)]
    pub parser: field::FieldParser,
    /// Lookup tables, by name.
    #[serde(default)]
    pub tables: std::collections::BTreeMap<String, field::FieldTable>,
    /// External filters, by name.
    #[serde(default)]
    pub filters: std::collections::BTreeMap<String, field::FieldFilter>,
    /// Ordered rules of each phase.
    #[serde(default)]
    pub rules: std::collections::BTreeMap<FilterPhase, Vec<field::FieldRule>>,
}

/// The inner field of the filters' configuration.
#[allow(clippy::module_name_repetitions)]
pub mod field {

    /// Logging configuration.
    #[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
    #[serde(deny_unknown_fields)]
    pub struct FieldLogs {
        /// Customize the log level of the different part of the program.
        ///
        /// See <https://docs.rs/tracing-subscriber/0.3.15/tracing_subscriber/filter/struct.EnvFilter.html>
        #[serde(
            default = "FieldLogs::default_level",
            serialize_with = "crate::parser::tracing_directive::serialize",
            deserialize_with = "crate::parser::tracing_directive::deserialize"
        )]
        pub level: Vec<tracing_subscriber::filter::Directive>,
        /// File where the logs are written, in addition of the standard output.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub filepath: Option<std::path::PathBuf>,
    }

    /// Limits of the message parser.
    #[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
    #[serde(deny_unknown_fields)]
    pub struct FieldParser {
        /// Maximum length of a header name, in bytes.
        #[serde(default = "FieldParser::default_header_name_max")]
        pub header_name_max: usize,
        /// Maximum length of a bufferized header value, in bytes.
        #[serde(default = "FieldParser::default_value_max")]
        pub value_max: usize,
    }

    /// A lookup table.
    #[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
    #[serde(tag = "type", rename_all = "lowercase", deny_unknown_fields)]
    pub enum FieldTable {
        /// Entries listed in the configuration.
        Static {
            /// entries of the table.
            values: Vec<String>,
        },
        /// Entries read from a CSV file, the key is the first column.
        File {
            /// path of the file.
            path: std::path::PathBuf,
            /// field separator.
            #[serde(default = "FieldTable::default_delimiter")]
            delimiter: char,
        },
        /// Regular expressions, searched anywhere in the key (use `^` and `$`
        /// to match the whole key).
        Regex {
            /// the expressions.
            patterns: Vec<String>,
        },
    }

    impl FieldTable {
        /// Is this table made of regular expressions ?
        #[must_use]
        pub const fn is_regex(&self) -> bool {
            matches!(self, Self::Regex { .. })
        }
    }

    /// An external filter process, the rules delegate their decision to it by name.
    ///
    /// The process is spawned and connected outside of the filters.
    #[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
    #[serde(deny_unknown_fields)]
    pub struct FieldFilter {
        /// Command line of the process.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub command: Option<String>,
    }

    /// A rule of a phase.
    ///
    /// Either delegate the decision to `filter`, or check the parameter of
    /// the phase against `table` and/or `regex`. A match (or a miss if
    /// negated) blocks the phase with the outcome of the rule.
    #[derive(Debug, Default, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
    #[serde(deny_unknown_fields)]
    pub struct FieldRule {
        /// Name of a table the parameter is looked up in.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub table: Option<String>,
        /// Name of a regex table the parameter is matched against.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub regex: Option<String>,
        /// Block when the parameter is *not* in `table`.
        #[serde(default)]
        pub not_table: bool,
        /// Block when the parameter does *not* match `regex`.
        #[serde(default)]
        pub not_regex: bool,
        /// Message of the rejection.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub reject: Option<String>,
        /// Parameter replacing the one of the client.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub rewrite: Option<String>,
        /// Message sent before closing the connection.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub disconnect: Option<String>,
        /// Name of the external filter taking the decision.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub filter: Option<String>,
    }

    impl FieldRule {
        /// Does the rule check the parameter itself ?
        #[must_use]
        pub const fn has_predicate(&self) -> bool {
            self.table.is_some() || self.regex.is_some()
        }

        /// Does the rule produce a verdict when it blocks ?
        #[must_use]
        pub const fn has_outcome(&self) -> bool {
            self.reject.is_some() || self.rewrite.is_some() || self.disconnect.is_some()
        }
    }
}
