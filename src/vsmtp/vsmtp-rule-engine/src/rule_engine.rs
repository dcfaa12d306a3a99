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
    bridge::FilterBridge, BridgeError, Evaluator, FilterRule, Rules, TableError, Tables,
};
use vsmtp_common::{FilterPhase, FilterResponse, Lookup, Verdict};
use vsmtp_config::Config;

/// Channel of the session receiving the verdicts.
pub type VerdictSender = tokio::sync::mpsc::UnboundedSender<FilterResponse>;

/// Result of the local evaluation of a phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Evaluation {
    /// The rules took the decision.
    Decided(Verdict),
    /// The decision belongs to an external filter.
    Deferred {
        /// name of the filter.
        filter: String,
    },
}

/// The ordered rules of each phase, with the tables they consult.
///
/// Built once at startup, and shared by all the sessions.
pub struct RuleEngine {
    rules: Rules,
    lookup: std::sync::Arc<dyn Lookup>,
}

impl std::fmt::Debug for RuleEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleEngine")
            .field("rules", &self.rules)
            .finish_non_exhaustive()
    }
}

impl RuleEngine {
    /// Create an engine with a custom lookup service.
    #[must_use]
    pub fn new(rules: Rules, lookup: std::sync::Arc<dyn Lookup>) -> Self {
        Self { rules, lookup }
    }

    /// Build the rules and load the tables of the configuration.
    ///
    /// # Errors
    ///
    /// * a table cannot be loaded, see [`Tables::from_config`]
    #[tracing::instrument(name = "building-rules", skip_all)]
    pub fn from_config(config: &Config) -> Result<Self, TableError> {
        let tables = Tables::from_config(&config.tables)?;

        let rules = config
            .rules
            .iter()
            .map(|(phase, rules)| (*phase, rules.iter().map(FilterRule::from_field).collect()))
            .collect::<Rules>();

        tracing::info!(
            tables = config.tables.len(),
            rules = rules.values().map(Vec::len).sum::<usize>(),
            "Rule engine initialized."
        );

        Ok(Self::new(rules, std::sync::Arc::new(tables)))
    }

    /// Rules of a phase, in declaration order.
    #[must_use]
    pub fn rules(&self, phase: FilterPhase) -> &[FilterRule] {
        self.rules
            .get(&phase)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Run the rules of `phase` on its parameter, until one blocks it or
    /// delegates the decision.
    #[must_use]
    pub fn evaluate(&self, phase: FilterPhase, param: &str) -> Evaluation {
        let evaluator = Evaluator::for_phase(phase);

        for (index, rule) in self.rules(phase).iter().enumerate() {
            match rule {
                FilterRule::Delegate { filter } => {
                    tracing::debug!(index, %filter, "Decision delegated.");
                    return Evaluation::Deferred {
                        filter: filter.clone(),
                    };
                }
                FilterRule::Check { predicate, outcome } => {
                    if !evaluator.passes(predicate, param, &*self.lookup) {
                        tracing::debug!(index, outcome = outcome.as_ref(), "Phase blocked.");
                        return Evaluation::Decided(outcome.to_verdict());
                    }
                }
            }
        }

        Evaluation::Decided(Verdict::Proceed(param.to_string()))
    }

    /// Filter a phase of the transaction `reqid`.
    ///
    /// The verdict is delivered on the channel of `bridge`: right away for a
    /// local decision, once the filter answers for a delegated one.
    ///
    /// # Errors
    ///
    /// * see [`FilterBridge::deliver`]
    /// * see [`FilterBridge::send_request`]
    #[tracing::instrument(name = "filter", skip(self, bridge), err)]
    pub fn filter(
        &self,
        reqid: u64,
        phase: FilterPhase,
        param: &str,
        bridge: &FilterBridge,
    ) -> Result<(), BridgeError> {
        match self.evaluate(phase, param) {
            Evaluation::Decided(verdict) => bridge.deliver(FilterResponse {
                reqid,
                phase,
                verdict,
            }),
            Evaluation::Deferred { filter } => bridge.send_request(&filter, reqid, phase, param),
        }
    }
}
