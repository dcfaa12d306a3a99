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

use vsmtp_common::{FilterPhase, Verdict};
use vsmtp_config::field::FieldRule;

/// Ordered rules of each phase.
pub type Rules = std::collections::BTreeMap<FilterPhase, Vec<FilterRule>>;

/// Check of the parameter of a phase, against a table and/or a regex table.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Predicate {
    /// Table the parameter is looked up in.
    pub table: Option<String>,
    /// Invert the result of the table lookup.
    pub not_table: bool,
    /// Regex table the parameter is matched against.
    pub regex: Option<String>,
    /// Invert the result of the regex match.
    pub not_regex: bool,
}

impl Predicate {
    /// Block when `key` is in `table`.
    #[must_use]
    pub fn table(table: impl Into<String>) -> Self {
        Self {
            table: Some(table.into()),
            ..Self::default()
        }
    }

    /// Block when `key` matches a pattern of `regex`.
    #[must_use]
    pub fn regex(regex: impl Into<String>) -> Self {
        Self {
            regex: Some(regex.into()),
            ..Self::default()
        }
    }

    /// Invert the table lookup.
    #[must_use]
    pub const fn not_table(mut self) -> Self {
        self.not_table = true;
        self
    }

    /// Invert the regex match.
    #[must_use]
    pub const fn not_regex(mut self) -> Self {
        self.not_regex = true;
        self
    }
}

/// What happens when a rule blocks a phase.
#[derive(Debug, Clone, PartialEq, Eq, strum::AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum Outcome {
    /// Refuse the step with this message.
    Reject(String),
    /// Replace the parameter of the step.
    Rewrite(String),
    /// Close the connection with this message.
    Disconnect(String),
}

impl Outcome {
    /// The verdict produced by this outcome.
    #[must_use]
    pub fn to_verdict(&self) -> Verdict {
        match self {
            Self::Reject(message) => Verdict::Reject(message.clone()),
            Self::Rewrite(param) => Verdict::Rewrite(param.clone()),
            Self::Disconnect(message) => Verdict::Disconnect(message.clone()),
        }
    }
}

/// A rule of a phase.
#[derive(Debug, Clone, PartialEq, Eq, strum::AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum FilterRule {
    /// Check the parameter, and produce `outcome` if it is blocked.
    Check {
        ///
        predicate: Predicate,
        ///
        outcome: Outcome,
    },
    /// Let an external filter take the decision.
    Delegate {
        /// name of the filter.
        filter: String,
    },
}

impl FilterRule {
    /// Convert a rule of the configuration.
    ///
    /// When several outcomes are configured, a rewrite wins over a
    /// disconnection, which wins over a rejection.
    #[must_use]
    pub fn from_field(field: &FieldRule) -> Self {
        if let Some(filter) = &field.filter {
            return Self::Delegate {
                filter: filter.clone(),
            };
        }

        let outcome = match (&field.rewrite, &field.disconnect, &field.reject) {
            (Some(param), _, _) => Outcome::Rewrite(param.clone()),
            (None, Some(message), _) => Outcome::Disconnect(message.clone()),
            (None, None, message) => Outcome::Reject(message.clone().unwrap_or_default()),
        };

        Self::Check {
            predicate: Predicate {
                table: field.table.clone(),
                not_table: field.not_table,
                regex: field.regex.clone(),
                not_regex: field.not_regex,
            },
            outcome,
        }
    }
}
