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

/// A step of the message decoding, produced by [`crate::MessageParser`].
#[derive(Debug, Clone, PartialEq, Eq, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum Event {
    /// First line of a header. `value` is everything after the first colon,
    /// not trimmed.
    Header {
        ///
        name: String,
        ///
        value: String,
    },
    /// A folded line of the current header, starting with a space or a tab.
    HeaderContinuation {
        ///
        name: String,
        ///
        line: String,
    },
    /// The current header is complete.
    ///
    /// `value` is only set if the header has been bufferized: the first
    /// value and every continuation line, joined with `\n`.
    HeaderEnd {
        ///
        name: String,
        ///
        value: Option<String>,
    },
    /// The header section is over.
    HeadersEnd,
    /// A line of the body.
    Body(String),
    /// The end of the stream has been reached, this is the last event.
    MessageEnd,
}

impl Event {
    /// Name of the header this event belongs to, if any.
    #[must_use]
    pub fn header_name(&self) -> Option<&str> {
        match self {
            Self::Header { name, .. }
            | Self::HeaderContinuation { name, .. }
            | Self::HeaderEnd { name, .. } => Some(name),
            Self::HeadersEnd | Self::Body(_) | Self::MessageEnd => None,
        }
    }
}
