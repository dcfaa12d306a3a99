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

use crate::{buffer::GrowableBuffer, Event, ParserError, ParserResult};

/// Default limit of the header name buffer.
pub const HEADER_NAME_MAX: usize = 1024;

/// Default limit of the bufferized header value.
pub const HEADER_VALUE_MAX: usize = 65536;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum State {
    /// in the header section, between two headers.
    Headers,
    /// a header has been started and may be folded.
    Header,
    Body,
    /// the terminal event has been produced.
    Ended,
    /// an error stopped the parsing, only [`MessageParser::clear`] recovers.
    Aborted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Input {
    Line(String),
    End,
}

/// Push-driven RFC 5322 message decoder.
///
/// Each physical line (without its line terminator) is given with
/// [`MessageParser::push`], then [`MessageParser::next_event`] is called until
/// it returns `None`, before the next line can be pushed. `push(None)` marks
/// the end of the stream.
///
/// ```
/// use vsmtp_mail_parser::{Event, MessageParser};
///
/// let mut parser = MessageParser::default();
/// let mut events = vec![];
///
/// for line in ["Subject: hello", "", "body"].map(Some).into_iter().chain([None]) {
///     for event in parser.feed(line).unwrap() {
///         events.push(event.unwrap());
///     }
/// }
///
/// assert_eq!(events.first(), Some(&Event::Header {
///     name: "Subject".to_string(),
///     value: " hello".to_string(),
/// }));
/// assert_eq!(events.last(), Some(&Event::MessageEnd));
/// ```
#[derive(Debug, Clone)]
pub struct MessageParser {
    pending: Option<Input>,
    state: State,
    // set when the pushed line has been consumed, the next call yields nothing.
    replay: bool,
    bufferize: bool,
    // value of the header produced by the last call, valid until the next one.
    current_value: Option<String>,
    name: GrowableBuffer,
    value: GrowableBuffer,
}

impl Default for MessageParser {
    fn default() -> Self {
        Self::with_limits(HEADER_NAME_MAX, HEADER_VALUE_MAX)
    }
}

impl MessageParser {
    /// Create a parser with custom limits for the header name and the
    /// bufferized header values.
    #[must_use]
    pub const fn with_limits(header_name_max: usize, header_value_max: usize) -> Self {
        Self {
            pending: None,
            state: State::Headers,
            replay: false,
            bufferize: false,
            current_value: None,
            name: GrowableBuffer::with_max_capacity(header_name_max),
            value: GrowableBuffer::with_max_capacity(header_value_max),
        }
    }

    /// Reset the parser to handle a new message, the buffers are kept.
    pub fn clear(&mut self) {
        self.pending = None;
        self.state = State::Headers;
        self.replay = false;
        self.bufferize = false;
        self.current_value = None;
        self.name.clear();
        self.value.clear();
    }

    /// Has the terminal event been produced ?
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.state == State::Ended
    }

    /// Supply the next line of the message, or `None` at the end of the stream.
    ///
    /// # Errors
    ///
    /// * [`ParserError::LinePending`] the previous line has not been consumed
    pub fn push(&mut self, line: Option<&str>) -> ParserResult<()> {
        if self.pending.is_some() {
            return Err(ParserError::LinePending);
        }

        self.pending = Some(line.map_or(Input::End, |line| Input::Line(line.to_string())));
        Ok(())
    }

    /// Push a line and iterate over the events it produces.
    ///
    /// # Errors
    ///
    /// * see [`MessageParser::push`]
    pub fn feed(&mut self, line: Option<&str>) -> ParserResult<Events<'_>> {
        self.push(line)?;
        Ok(self.events())
    }

    /// Iterate over the events available for the pushed line.
    pub fn events(&mut self) -> Events<'_> {
        Events {
            parser: self,
            done: false,
        }
    }

    /// Accumulate the header started by the last event, and deliver it whole
    /// in [`Event::HeaderEnd`].
    ///
    /// Only valid right after an [`Event::Header`].
    ///
    /// # Errors
    ///
    /// * [`ParserError::AlreadyBufferized`] called twice for the same header
    /// * [`ParserError::NoCurrentHeader`] the last event was not a [`Event::Header`]
    /// * [`ParserError::BufferTooLong`] the value exceeds the limit
    pub fn bufferize_current_header(&mut self) -> ParserResult<()> {
        if self.bufferize {
            return Err(ParserError::AlreadyBufferized);
        }

        let value = self
            .current_value
            .as_deref()
            .ok_or(ParserError::NoCurrentHeader)?;

        if let Err(error) = self.value.push_str(value) {
            self.abort(&error);
            return Err(error);
        }
        self.bufferize = true;

        Ok(())
    }

    fn abort(&mut self, error: &ParserError) {
        tracing::warn!(%error, header = self.name.as_str(), "Message parsing aborted.");

        self.state = State::Aborted;
        self.pending = None;
        self.replay = false;
        self.bufferize = false;
        self.value.clear();
    }

    fn consume(&mut self) {
        self.pending = None;
        self.replay = true;
    }

    /// Advance the state machine by one step.
    ///
    /// Returns `Ok(None)` once the pushed line has produced all its events.
    ///
    /// # Errors
    ///
    /// * [`ParserError::EndOfMessage`] called after [`Event::MessageEnd`]
    /// * [`ParserError::Aborted`] a previous error stopped the parsing
    /// * [`ParserError::BufferTooLong`] a header name or a bufferized value
    ///   exceeds its limit, the parsing is aborted
    pub fn next_event(&mut self) -> ParserResult<Option<Event>> {
        self.current_value = None;

        if self.replay {
            self.replay = false;
            return Ok(None);
        }

        match self.state {
            State::Ended => return Err(ParserError::EndOfMessage),
            State::Aborted => return Err(ParserError::Aborted),
            State::Headers | State::Header | State::Body => (),
        }

        let input = match self.pending.take() {
            Some(input) => input,
            None => return Ok(None),
        };

        match (self.state, input) {
            (State::Header, Input::Line(line))
                if line.starts_with(|c: char| c == ' ' || c == '\t') =>
            {
                self.on_continuation(line)
            }
            (State::Header, input) => {
                self.pending = Some(input);
                Ok(Some(self.on_header_end()))
            }
            (State::Headers, Input::Line(line)) if line.contains(':') => self.on_header(line),
            (State::Headers, input) => {
                self.pending = Some(input);
                self.state = State::Body;
                Ok(Some(Event::HeadersEnd))
            }
            (State::Body, Input::Line(line)) => {
                self.consume();
                Ok(Some(Event::Body(line)))
            }
            (State::Body, Input::End) => {
                self.consume();
                self.state = State::Ended;
                Ok(Some(Event::MessageEnd))
            }
            (State::Ended | State::Aborted, _) => unreachable!("checked above"),
        }
    }

    fn on_header(&mut self, line: String) -> ParserResult<Option<Event>> {
        let (name, value) = line.split_once(':').unwrap_or((line.as_str(), ""));

        if let Err(error) = self.name.set(name) {
            self.abort(&error);
            return Err(error);
        }

        let value = value.to_string();
        self.consume();
        self.state = State::Header;
        self.current_value = Some(value.clone());

        Ok(Some(Event::Header {
            name: self.name.as_str().to_string(),
            value,
        }))
    }

    fn on_continuation(&mut self, line: String) -> ParserResult<Option<Event>> {
        if self.bufferize {
            if let Err(error) = self.value.extend(&["\n", &line]) {
                self.abort(&error);
                return Err(error);
            }
        }

        self.consume();

        Ok(Some(Event::HeaderContinuation {
            name: self.name.as_str().to_string(),
            line,
        }))
    }

    fn on_header_end(&mut self) -> Event {
        self.state = State::Headers;

        let value = if self.bufferize {
            self.bufferize = false;
            let value = self.value.as_str().to_string();
            self.value.clear();
            Some(value)
        } else {
            None
        };

        Event::HeaderEnd {
            name: self.name.as_str().to_string(),
            value,
        }
    }
}

/// Events produced by the line pushed in a [`MessageParser`].
///
/// The iteration stops when the line is fully consumed, or after the first
/// error.
pub struct Events<'p> {
    parser: &'p mut MessageParser,
    done: bool,
}

impl Events<'_> {
    /// See [`MessageParser::bufferize_current_header`].
    ///
    /// # Errors
    ///
    /// * see [`MessageParser::bufferize_current_header`]
    pub fn bufferize_current_header(&mut self) -> ParserResult<()> {
        self.parser.bufferize_current_header()
    }
}

impl Iterator for Events<'_> {
    type Item = ParserResult<Event>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        match self.parser.next_event() {
            Ok(Some(event)) => Some(Ok(event)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(error) => {
                self.done = true;
                Some(Err(error))
            }
        }
    }
}

impl std::iter::FusedIterator for Events<'_> {}
