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
use super::{header, parse_lines};
use crate::{MessageParser, ParserError};

#[test]
fn line_pending() {
    let mut parser = MessageParser::default();
    parser.push(Some("Subject: a")).unwrap();

    assert_eq!(
        parser.push(Some("From: b")),
        Err(ParserError::LinePending)
    );
    assert_eq!(parser.push(None), Err(ParserError::LinePending));
}

#[test]
fn next_after_the_end() {
    let mut parser = MessageParser::default();
    parse_lines(&mut parser, &["Subject: a"], false).unwrap();
    assert!(parser.is_finished());

    assert_eq!(parser.next_event(), Err(ParserError::EndOfMessage));

    parser.push(Some("late line")).unwrap();
    assert_eq!(parser.next_event(), Err(ParserError::EndOfMessage));
}

#[test]
fn bufferize_without_header() {
    let mut parser = MessageParser::default();
    assert_eq!(
        parser.bufferize_current_header(),
        Err(ParserError::NoCurrentHeader)
    );

    parser.push(Some("body line")).unwrap();
    parser.next_event().unwrap();
    assert_eq!(
        parser.bufferize_current_header(),
        Err(ParserError::NoCurrentHeader)
    );
}

#[test]
fn bufferize_after_the_line_is_consumed() {
    let mut parser = MessageParser::default();
    parser.push(Some("Subject: a")).unwrap();
    assert_eq!(parser.next_event().unwrap(), Some(header("Subject", " a")));
    assert_eq!(parser.next_event().unwrap(), None);

    assert_eq!(
        parser.bufferize_current_header(),
        Err(ParserError::NoCurrentHeader)
    );
}

#[test]
fn bufferize_twice() {
    let mut parser = MessageParser::default();
    let mut events = parser.feed(Some("Subject: a")).unwrap();
    events.next().unwrap().unwrap();

    events.bufferize_current_header().unwrap();
    assert_eq!(
        events.bufferize_current_header(),
        Err(ParserError::AlreadyBufferized)
    );
}

#[test]
fn iterator_stops_after_an_error() {
    let mut parser = MessageParser::default();
    parse_lines(&mut parser, &[], false).unwrap();

    let mut events = parser.events();
    assert_eq!(events.next(), Some(Err(ParserError::EndOfMessage)));
    assert!(events.next().is_none());
}
