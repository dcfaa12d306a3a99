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

use crate::FilterPhase;

/// Kind of decision taken for a phase, as named on the filter protocol.
#[derive(
    Debug,
    Copy,
    Clone,
    PartialEq,
    Eq,
    Hash,
    serde::Deserialize,
    serde::Serialize,
    strum::EnumString,
    strum::Display,
    strum::AsRefStr,
)]
#[strum(serialize_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum Decision {
    /// allow the step with its parameter unchanged.
    Proceed,
    /// refuse this step.
    Reject,
    /// allow the step with a modified parameter.
    Rewrite,
    /// terminate the connection.
    Disconnect,
}

/// Decision of the filters for a phase, with its payload.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub enum Verdict {
    /// the parameter of the phase, unchanged.
    Proceed(String),
    /// the message sent back to the client.
    Reject(String),
    /// the parameter replacing the one of the client.
    Rewrite(String),
    /// the message sent back to the client before closing.
    Disconnect(String),
}

impl Verdict {
    /// Build a verdict from its kind and payload.
    #[must_use]
    pub fn new(decision: Decision, payload: impl Into<String>) -> Self {
        let payload = payload.into();
        match decision {
            Decision::Proceed => Self::Proceed(payload),
            Decision::Reject => Self::Reject(payload),
            Decision::Rewrite => Self::Rewrite(payload),
            Decision::Disconnect => Self::Disconnect(payload),
        }
    }

    ///
    #[must_use]
    pub const fn decision(&self) -> Decision {
        match self {
            Self::Proceed(_) => Decision::Proceed,
            Self::Reject(_) => Decision::Reject,
            Self::Rewrite(_) => Decision::Rewrite,
            Self::Disconnect(_) => Decision::Disconnect,
        }
    }

    ///
    #[must_use]
    pub fn payload(&self) -> &str {
        match self {
            Self::Proceed(payload)
            | Self::Reject(payload)
            | Self::Rewrite(payload)
            | Self::Disconnect(payload) => payload,
        }
    }

    /// Can the session continue with this verdict ?
    #[must_use]
    pub const fn is_accepted(&self) -> bool {
        matches!(self, Self::Proceed(_) | Self::Rewrite(_))
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.decision(), self.payload())
    }
}

/// Message sent to the owning session once the filters of a phase are done.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct FilterResponse {
    /// Identifier of the transaction, as given by the session.
    pub reqid: u64,
    /// Phase the verdict applies to.
    pub phase: FilterPhase,
    /// Outcome of the filters.
    pub verdict: Verdict,
}

impl std::fmt::Display for FilterResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:016x} {} {}", self.reqid, self.phase, self.verdict)
    }
}
