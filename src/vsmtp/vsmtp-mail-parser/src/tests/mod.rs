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
use crate::{Event, MessageParser, ParserResult};

mod errors;

/// Push every line, then the end of the stream, and collect all the events.
/// If `bufferize` is set, every header is bufferized.
pub fn parse_lines(
    parser: &mut MessageParser,
    lines: &[&str],
    bufferize: bool,
) -> ParserResult<Vec<Event>> {
    let mut out = vec![];

    for line in lines.iter().copied().map(Some).chain(std::iter::once(None)) {
        let mut events = parser.feed(line)?;

        while let Some(event) = events.next() {
            let event = event?;
            if bufferize && matches!(event, Event::Header { .. }) {
                events.bufferize_current_header()?;
            }
            out.push(event);
        }
    }

    Ok(out)
}

pub fn header(name: &str, value: &str) -> Event {
    Event::Header {
        name: name.to_string(),
        value: value.to_string(),
    }
}

pub fn continuation(name: &str, line: &str) -> Event {
    Event::HeaderContinuation {
        name: name.to_string(),
        line: line.to_string(),
    }
}

pub fn header_end(name: &str, value: Option<&str>) -> Event {
    Event::HeaderEnd {
        name: name.to_string(),
        value: value.map(str::to_string),
    }
}

pub fn body(line: &str) -> Event {
    Event::Body(line.to_string())
}
