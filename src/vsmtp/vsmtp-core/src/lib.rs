//! vfilter: the vSMTP message parser and filter rules, from the command line.
//!
//! * `vfilter parse` decodes messages (or mbox files) and prints them back,
//!   event by event.
//! * `vfilter check` runs the rules of a phase on a parameter.
//! * `vfilter config-show` prints the loaded configuration.

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
#![allow(clippy::doc_markdown)]
#![allow(clippy::multiple_crate_versions)]
//
#![cfg_attr(test, allow(clippy::unwrap_used))]

mod args;
mod check;
mod execute;
mod parse;
pub mod tracing_subscriber;

pub use args::{Args, Commands};
pub use check::check;
pub use parse::{print_mbox, print_message, ParseOptions};
