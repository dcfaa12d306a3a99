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

///
#[non_exhaustive]
#[derive(clap::Parser)]
#[cfg_attr(test, derive(Debug, PartialEq, Eq))]
#[clap(about, author)]
pub struct Args {
    /// Print the version and exit.
    #[clap(short, long, action)]
    pub version: bool,

    /// Path of the filter configuration file (toml format)
    #[clap(short, long, action, global = true)]
    pub config: Option<String>,

    /// Write the logs to stdout instead of stderr
    #[clap(long, action, global = true)]
    pub stdout: bool,

    ///
    #[clap(subcommand)]
    pub command: Option<Commands>,
}

///
#[non_exhaustive]
#[derive(clap::Subcommand)]
#[cfg_attr(test, derive(Debug, PartialEq, Eq))]
pub enum Commands {
    /// Show the loaded config (as serialized json format)
    ConfigShow,
    /// Decode messages and print them back
    Parse {
        /// The files are mbox, each one holding several messages
        #[clap(short, long, action)]
        mbox: bool,
        /// Bufferize every header, folded headers are printed whole
        #[clap(short, long, action)]
        bufferize: bool,
        /// Print the name of each event before its content
        #[clap(short, long, action)]
        verbose: bool,
        /// Files to decode
        #[clap(value_parser, required = true)]
        files: Vec<std::path::PathBuf>,
    },
    /// Run the rules of a phase on its parameter
    Check {
        /// Phase of the transaction (connected, helo, mail-from, ...)
        #[clap(value_parser)]
        phase: FilterPhase,
        /// Parameter of the phase, as received from the client
        #[clap(value_parser)]
        param: String,
    },
}
