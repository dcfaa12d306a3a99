//! vSMTP rule engine
//!
//! Decide the fate of each phase of an SMTP transaction: the ordered rules
//! of the phase check its parameter against lookup tables, or delegate the
//! decision to an external filter process reached through the
//! [`bridge::FilterBridge`].
//!
//! Verdicts are delivered as [`vsmtp_common::FilterResponse`] on a channel
//! owned by the session.

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
#![allow(clippy::use_self)]

mod error;
mod evaluator;
mod rule;
mod rule_engine;
mod tables;

/// Line protocol spoken with the external filters.
pub mod bridge;

pub use error::{BridgeError, ProtocolViolation, TableError};
pub use evaluator::{strip_envelope, Evaluator};
pub use rule::{FilterRule, Outcome, Predicate, Rules};
pub use rule_engine::{Evaluation, RuleEngine, VerdictSender};
pub use tables::{Table, Tables};

#[cfg(test)]
mod tests;
