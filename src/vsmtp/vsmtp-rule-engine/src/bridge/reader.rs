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

use crate::ProtocolViolation;
use tokio::io::AsyncReadExt;

/// Error while reading the lines of a filter.
#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    ///
    #[error("{0}")]
    Io(#[from] std::io::Error),
    ///
    #[error("{0}")]
    Violation(#[from] ProtocolViolation),
}

/// Stream for reading the responses of a filter.
pub struct Reader<R: tokio::io::AsyncRead + Unpin + Send> {
    inner: R,
    initial_capacity: usize,
    additional_reserve: usize,
    line_max: usize,
}

fn decode_line(mut line: bytes::BytesMut, line_max: usize) -> Result<String, ProtocolViolation> {
    if line.last() == Some(&b'\r') {
        line.truncate(line.len() - 1);
    }

    if line.len() > line_max {
        return Err(ProtocolViolation::LineTooLong {
            expected: line_max,
            got: line.len(),
        });
    }

    String::from_utf8(line.to_vec()).map_err(|_| ProtocolViolation::InvalidUtf8)
}

// a trailing "\r" may be the start of the terminator, it is not counted.
fn check_pending(pending: &[u8], line_max: usize) -> Result<(), ProtocolViolation> {
    let len = match pending.last() {
        Some(b'\r') => pending.len() - 1,
        _ => pending.len(),
    };

    if len > line_max {
        Err(ProtocolViolation::LineTooLong {
            expected: line_max,
            got: len,
        })
    } else {
        Ok(())
    }
}

impl<R: tokio::io::AsyncRead + Unpin + Send> Reader<R> {
    /// Create a new stream.
    #[must_use]
    #[inline]
    pub const fn new(inner: R, line_max: usize) -> Self {
        Self {
            inner,
            initial_capacity: 80,
            additional_reserve: 100,
            line_max,
        }
    }

    /// Produce a stream of "\n" terminated lines, the terminator (and a
    /// preceding "\r") removed.
    ///
    /// The stream ends with the connection, an incomplete last line is dropped.
    #[inline]
    pub fn as_line_stream(
        &mut self,
    ) -> impl tokio_stream::Stream<Item = Result<String, ReadError>> + '_ {
        async_stream::try_stream! {
            let mut buffer = bytes::BytesMut::with_capacity(self.initial_capacity);

            loop {
                if let Some(pos) = buffer.iter().position(|b| *b == b'\n') {
                    let mut line = buffer.split_to(pos + 1);
                    line.truncate(pos);

                    let line = decode_line(line, self.line_max)?;
                    tracing::trace!("<< {:?}", line);

                    yield line;
                } else {
                    check_pending(&buffer, self.line_max)?;

                    buffer.reserve(self.additional_reserve);
                    let read_size = self.inner.read_buf(&mut buffer).await?;
                    if read_size == 0 {
                        if !buffer.is_empty() {
                            tracing::warn!(pending = buffer.len(), "Connection closed in the middle of a line.");
                        }
                        return;
                    }
                }
            }
        }
    }
}
