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

/// Errors produced while feeding a message to the [`crate::MessageParser`].
#[allow(clippy::module_name_repetitions)]
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParserError {
    /// A line was pushed while the previous one is not fully consumed.
    #[error("a line is already pending, drain the events before pushing")]
    LinePending,
    /// The terminal event has already been produced.
    #[error("end of message")]
    EndOfMessage,
    /// No header has just been started.
    #[error("no header to bufferize")]
    NoCurrentHeader,
    /// The current header is already bufferized.
    #[error("header is already bufferized")]
    AlreadyBufferized,
    /// A buffer would grow past its limit.
    #[error("buffer is not supposed to be longer than {expected} bytes but got {got}")]
    BufferTooLong {
        /// Maximum size expected.
        expected: usize,
        /// Size required.
        got: usize,
    },
    /// A previous error stopped the parsing of this message.
    #[error("parsing of the message was aborted")]
    Aborted,
}

///
pub type ParserResult<T> = Result<T, ParserError>;
