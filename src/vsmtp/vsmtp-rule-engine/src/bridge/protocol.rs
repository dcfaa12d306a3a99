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

use crate::ProtocolViolation;
use vsmtp_common::{Decision, FilterPhase, FilterResponse, Verdict};

/// Maximum length of a line sent by a filter.
pub const LINE_MAX: usize = 4096;

const PREFIX: &str = "FILTER ";

/// Line sent to a filter to ask for the verdict of a phase.
///
/// ```
/// use vsmtp_common::FilterPhase;
///
/// assert_eq!(
///     vsmtp_rule_engine::bridge::format_request(42, FilterPhase::RcptTo, "<john@example.com>"),
///     "FILTER 000000000000002a rcpt-to <john@example.com>\n"
/// );
/// ```
#[must_use]
pub fn format_request(reqid: u64, phase: FilterPhase, param: &str) -> String {
    format!("{PREFIX}{reqid:016x} {phase} {param}\n")
}

/// Parse a line (without its terminator) sent by a filter:
/// `FILTER <reqid> <phase> <result> <response>`.
///
/// The response is everything after the fourth space, possibly empty.
///
/// # Errors
///
/// * see [`ProtocolViolation`]
pub fn parse_response(line: &str) -> Result<FilterResponse, ProtocolViolation> {
    let line = line
        .strip_prefix(PREFIX)
        .ok_or(ProtocolViolation::MissingPrefix)?;

    let (reqid, line) = line
        .split_once(' ')
        .ok_or(ProtocolViolation::MissingField("phase"))?;
    let (phase, line) = line
        .split_once(' ')
        .ok_or(ProtocolViolation::MissingField("result"))?;
    let (result, response) = line
        .split_once(' ')
        .ok_or(ProtocolViolation::MissingField("response"))?;

    let reqid = Some(reqid)
        .filter(|reqid| !reqid.is_empty() && reqid.bytes().all(|b| b.is_ascii_hexdigit()))
        .and_then(|reqid| u64::from_str_radix(reqid, 16).ok())
        .ok_or_else(|| ProtocolViolation::InvalidRequestId(reqid.to_string()))?;

    let phase = phase
        .parse::<FilterPhase>()
        .map_err(|_| ProtocolViolation::UnknownPhase(phase.to_string()))?;

    let decision = result
        .parse::<Decision>()
        .map_err(|_| ProtocolViolation::UnknownResult(result.to_string()))?;

    Ok(FilterResponse {
        reqid,
        phase,
        verdict: Verdict::new(decision, response),
    })
}
