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

use vsmtp_mail_parser::{
    mbox::{self, MboxLine},
    Event, MessageParser,
};

/// How the decoded messages are printed back.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct ParseOptions {
    /// Body lines starting with `From ` are quoted with `>`.
    pub mbox: bool,
    /// Headers are bufferized and printed once complete.
    pub bufferize: bool,
    /// The name of each event is printed before its content.
    pub verbose: bool,
}

/// Read the next line of `input` without its terminator ("\n" or "\r\n").
///
/// Bytes that are not valid utf-8 (8-bit mail) are replaced with U+FFFD.
fn read_line<IN: std::io::BufRead>(
    input: &mut IN,
    buffer: &mut Vec<u8>,
) -> std::io::Result<Option<String>> {
    buffer.clear();
    if input.read_until(b'\n', buffer)? == 0 {
        return Ok(None);
    }

    if buffer.last() == Some(&b'\n') {
        buffer.pop();
        if buffer.last() == Some(&b'\r') {
            buffer.pop();
        }
    }

    Ok(Some(String::from_utf8_lossy(buffer).into_owned()))
}

/// Push a line, or the end of the message, and print the events it produces.
fn print_events<OUT: std::io::Write>(
    parser: &mut MessageParser,
    line: Option<&str>,
    options: ParseOptions,
    output: &mut OUT,
) -> anyhow::Result<()> {
    let mut events = parser.feed(line)?;

    while let Some(event) = events.next() {
        let event = event?;

        if options.verbose {
            let name: &str = event.as_ref();
            writeln!(output, "{name}")?;
        }

        match &event {
            Event::Header { name, value } => {
                if options.bufferize {
                    events.bufferize_current_header()?;
                } else {
                    writeln!(output, "{name}:{value}")?;
                }
            }
            Event::HeaderContinuation { line, .. } => {
                if !options.bufferize {
                    writeln!(output, "{line}")?;
                }
            }
            Event::HeaderEnd {
                name,
                value: Some(value),
            } => writeln!(output, "{name}:{value}")?,
            Event::Body(line) => {
                if options.mbox && mbox::needs_quoting(line) {
                    output.write_all(b">")?;
                }
                writeln!(output, "{line}")?;
            }
            Event::HeaderEnd { value: None, .. } | Event::HeadersEnd | Event::MessageEnd => {}
        }
    }

    Ok(())
}

/// Decode a single message read line by line from `input`, and print it back
/// to `output`.
///
/// Without bufferization the output reproduces the input line for line.
///
/// # Errors
///
/// * `input` cannot be read
/// * the parser failed, see [`vsmtp_mail_parser::ParserError`]
/// * `output` cannot be written
pub fn print_message<IN: std::io::BufRead, OUT: std::io::Write>(
    parser: &mut MessageParser,
    mut input: IN,
    options: ParseOptions,
    output: &mut OUT,
) -> anyhow::Result<()> {
    parser.clear();

    let mut buffer = vec![];
    while let Some(line) = read_line(&mut input, &mut buffer)? {
        print_events(parser, Some(&line), options, output)?;
    }

    print_events(parser, None, options, output)
}

/// Decode the messages of a mbox read line by line from `input`, and print
/// each one back after its separator line.
///
/// A separator ends the current message and starts the next one. Lines
/// before the first separator are ignored.
///
/// # Errors
///
/// * see [`print_message`]
pub fn print_mbox<IN: std::io::BufRead, OUT: std::io::Write>(
    parser: &mut MessageParser,
    mut input: IN,
    options: ParseOptions,
    output: &mut OUT,
) -> anyhow::Result<()> {
    let mut buffer = vec![];
    let mut current: Option<usize> = None;

    while let Some(line) = read_line(&mut input, &mut buffer)? {
        match mbox::classify(&line) {
            MboxLine::Separator(separator) => {
                if current.is_some() {
                    print_events(parser, None, options, output)?;
                }

                let index = current.map_or(0, |index| index + 1);
                tracing::debug!(index, separator, "Parsing message.");

                writeln!(output, "{separator}")?;
                parser.clear();
                current = Some(index);
            }
            MboxLine::Message(line) if current.is_some() => {
                print_events(parser, Some(line), options, output)?;
            }
            MboxLine::Message(_) => {}
        }
    }

    if current.is_some() {
        print_events(parser, None, options, output)?;
    }

    Ok(())
}
