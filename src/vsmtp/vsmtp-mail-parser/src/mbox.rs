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

//! Line level handling of the mbox format (mboxrd quoting is not handled,
//! only the `>From ` form).

const SEPARATOR: &str = "From ";

/// Meaning of a line read from a mbox file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MboxLine<'a> {
    /// `From ` line, starts a new message. Not part of the message.
    Separator(&'a str),
    /// A line of the current message, `>From ` unquoted.
    Message(&'a str),
}

/// Classify a line (without its line terminator) of a mbox file.
#[must_use]
pub fn classify(line: &str) -> MboxLine<'_> {
    if line.starts_with(SEPARATOR) {
        MboxLine::Separator(line)
    } else if line.starts_with(">From ") {
        MboxLine::Message(&line[1..])
    } else {
        MboxLine::Message(line)
    }
}

/// Does this body line have to be quoted when written in a mbox ?
#[must_use]
pub fn needs_quoting(line: &str) -> bool {
    line.starts_with(SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::{classify, needs_quoting, MboxLine};

    #[rstest::rstest]
    #[case("From john@example.com Thu Jan  1 00:00:00 1970", MboxLine::Separator("From john@example.com Thu Jan  1 00:00:00 1970"))]
    #[case(">From the start", MboxLine::Message("From the start"))]
    #[case(">>From the start", MboxLine::Message(">>From the start"))]
    #[case("From: john", MboxLine::Message("From: john"))]
    #[case("", MboxLine::Message(""))]
    fn classification(#[case] line: &str, #[case] expected: MboxLine<'_>) {
        assert_eq!(classify(line), expected);
    }

    #[test]
    fn quoting() {
        assert!(needs_quoting("From here"));
        assert!(!needs_quoting("From: here"));
        assert!(!needs_quoting(" From here"));
    }
}
