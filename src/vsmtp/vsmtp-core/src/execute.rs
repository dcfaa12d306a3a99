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

use crate::{check, print_mbox, print_message, Commands, ParseOptions};
use anyhow::Context;
use vsmtp_config::Config;
use vsmtp_mail_parser::MessageParser;
use vsmtp_rule_engine::RuleEngine;

impl Commands {
    /// Execute the command, writing its result to `output`.
    ///
    /// # Errors
    ///
    /// * a file cannot be read or parsed
    /// * the rule engine cannot be built from `config`
    /// * `output` cannot be written
    pub fn execute<OUT: std::io::Write>(
        self,
        config: &Config,
        output: &mut OUT,
    ) -> anyhow::Result<()> {
        match self {
            Self::ConfigShow => {
                writeln!(output, "Loaded configuration: {}", config.to_json()?)?;
            }
            Self::Parse {
                mbox,
                bufferize,
                verbose,
                files,
            } => {
                let options = ParseOptions {
                    mbox,
                    bufferize,
                    verbose,
                };
                let mut parser = MessageParser::with_limits(
                    config.parser.header_name_max,
                    config.parser.value_max,
                );

                for file in &files {
                    let input = std::fs::File::open(file)
                        .map(std::io::BufReader::new)
                        .with_context(|| format!("Cannot read file '{}'", file.display()))?;

                    let printed = if mbox {
                        print_mbox(&mut parser, input, options, output)
                    } else {
                        print_message(&mut parser, input, options, output)
                    };

                    printed.with_context(|| format!("Cannot parse file '{}'", file.display()))?;
                }
            }
            Self::Check { phase, param } => {
                let engine =
                    RuleEngine::from_config(config).context("Cannot build the rule engine")?;

                check(&engine, phase, &param, output)?;
            }
        }

        Ok(())
    }
}
