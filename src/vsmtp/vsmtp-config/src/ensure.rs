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

use crate::{config::field::FieldRule, Config};
use vsmtp_common::FilterPhase;

const PHASES_ALWAYS_PASSING: [FilterPhase; 6] = [
    FilterPhase::Auth,
    FilterPhase::Data,
    FilterPhase::StartTls,
    FilterPhase::Noop,
    FilterPhase::Quit,
    FilterPhase::Rset,
];

impl Config {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// * a parser limit is 0
    /// * a rule names an unknown table or filter
    /// * a rule uses a non-regex table as `regex`
    /// * a rule both delegates and checks the parameter
    /// * a checking rule has no outcome, or neither `table` nor `regex`
    pub(crate) fn ensure(config: Self) -> anyhow::Result<Self> {
        anyhow::ensure!(
            config.parser.header_name_max != 0 && config.parser.value_max != 0,
            "Parser limits cannot be set to 0"
        );

        for (phase, rules) in &config.rules {
            for (index, rule) in rules.iter().enumerate() {
                config
                    .ensure_rule(*phase, rule)
                    .map_err(|e| e.context(format!("in rule #{index} of phase '{phase}'")))?;
            }
        }

        Ok(config)
    }

    fn ensure_rule(&self, phase: FilterPhase, rule: &FieldRule) -> anyhow::Result<()> {
        if let Some(filter) = &rule.filter {
            anyhow::ensure!(
                !rule.has_predicate() && !rule.has_outcome() && !rule.not_table && !rule.not_regex,
                "a rule delegating to the filter '{filter}' cannot check the parameter"
            );
            anyhow::ensure!(
                self.filters.contains_key(filter),
                "unknown filter '{filter}'"
            );
            return Ok(());
        }

        anyhow::ensure!(
            rule.has_predicate(),
            "the rule must have a 'table', a 'regex' or a 'filter'"
        );
        anyhow::ensure!(
            rule.has_outcome(),
            "the rule must have a 'reject', a 'rewrite' or a 'disconnect' outcome"
        );

        if let Some(table) = &rule.table {
            anyhow::ensure!(self.tables.contains_key(table), "unknown table '{table}'");
        }
        if let Some(regex) = &rule.regex {
            match self.tables.get(regex) {
                None => anyhow::bail!("unknown table '{regex}'"),
                Some(table) if !table.is_regex() => {
                    anyhow::bail!("the table '{regex}' is not a regex table")
                }
                Some(_) => (),
            }
        }

        if PHASES_ALWAYS_PASSING.contains(&phase) {
            tracing::warn!(%phase, "This phase always passes, the rule will never block.");
        }

        Ok(())
    }
}
