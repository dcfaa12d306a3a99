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
use vsmtp_rule_engine::{Evaluation, RuleEngine};

/// Run the rules of `phase` on `param`, and print the verdict, or the
/// filter the decision is delegated to.
///
/// # Errors
///
/// * `output` cannot be written
pub fn check<OUT: std::io::Write>(
    engine: &RuleEngine,
    phase: FilterPhase,
    param: &str,
    output: &mut OUT,
) -> anyhow::Result<()> {
    match engine.evaluate(phase, param) {
        Evaluation::Decided(verdict) => writeln!(output, "{phase} {verdict}")?,
        Evaluation::Deferred { filter } => {
            writeln!(output, "{phase} delegated to the filter '{filter}'")?;
        }
    }

    Ok(())
}
