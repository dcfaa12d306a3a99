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

/// A line received from an external filter that does not follow the protocol.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ProtocolViolation {
    /// The line does not start with `FILTER `.
    #[error("the line does not start with 'FILTER '")]
    MissingPrefix,
    /// Less than 4 space separated fields.
    #[error("missing field '{0}'")]
    MissingField(&'static str),
    /// The request id is not a 64 bits hexadecimal number.
    #[error("invalid request id '{0}'")]
    InvalidRequestId(String),
    ///
    #[error("unknown phase '{0}'")]
    UnknownPhase(String),
    ///
    #[error("unknown result '{0}'")]
    UnknownResult(String),
    /// The line is not valid UTF-8.
    #[error("the line is not valid utf-8")]
    InvalidUtf8,
    /// No line terminator found before the limit.
    #[error("line is not supposed to be longer than {expected} bytes but got {got}")]
    LineTooLong {
        /// Maximum size expected.
        expected: usize,
        /// Size received without a line terminator.
        got: usize,
    },
}

/// Error of the external filter subsystem, every variant is fatal to it.
#[allow(clippy::module_name_repetitions)]
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    /// The filter sent a line that does not follow the protocol.
    #[error("misbehaving filter '{filter}': {violation}, line: {line:?}")]
    MisbehavingFilter {
        ///
        filter: String,
        ///
        line: String,
        ///
        #[source]
        violation: ProtocolViolation,
    },
    /// A rule delegates to a filter that has not been attached.
    #[error("unknown filter '{0}'")]
    UnknownFilter(String),
    /// The connection with the filter is closed.
    #[error("filter '{0}' closed the connection")]
    FilterClosed(String),
    /// The session stopped listening for verdicts.
    #[error("the verdict channel is closed")]
    SessionClosed,
    /// Reading from or writing to the filter failed.
    #[error("i/o error with filter '{filter}': {source}")]
    Io {
        ///
        filter: String,
        ///
        #[source]
        source: std::io::Error,
    },
}

/// Error while loading the lookup tables.
#[allow(clippy::module_name_repetitions)]
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    /// The csv file of a table cannot be read.
    #[error("cannot read table '{table}' at {path:?}: {source}")]
    Csv {
        ///
        table: String,
        ///
        path: std::path::PathBuf,
        ///
        #[source]
        source: csv::Error,
    },
    /// The delimiter of a csv table is not a single byte.
    #[error("invalid delimiter {delimiter:?} for table '{table}', expected an ascii character")]
    InvalidDelimiter {
        ///
        table: String,
        ///
        delimiter: char,
    },
    /// A pattern of a regex table does not compile.
    #[error("invalid pattern in table '{table}': {source}")]
    Regex {
        ///
        table: String,
        ///
        #[source]
        source: regex::Error,
    },
}
