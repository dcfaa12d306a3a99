//! vSMTP mail parser
//!
//! Incremental RFC 5322 decoder: the message is pushed line by line and
//! decoded into a sequence of [`Event`], without keeping the message in memory.

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
#![allow(clippy::use_self)] // false positive with enums

mod buffer;
mod error;
mod event;
mod parser;

pub mod mbox;

pub use buffer::{GrowableBuffer, CHUNK_SIZE};
pub use error::{ParserError, ParserResult};
pub use event::Event;
pub use parser::{Events, MessageParser, HEADER_NAME_MAX, HEADER_VALUE_MAX};

#[cfg(test)]
mod tests;
