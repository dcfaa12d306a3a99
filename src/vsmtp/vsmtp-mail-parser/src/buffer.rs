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

use crate::{ParserError, ParserResult};

/// Allocation granularity of a [`GrowableBuffer`].
pub const CHUNK_SIZE: usize = 256;

/// Append-only string buffer with a hard size limit.
///
/// The capacity grows by chunks of [`CHUNK_SIZE`] bytes, and never past
/// `max_capacity`: `len() <= capacity() <= max_capacity()` always holds.
/// A failed append leaves the buffer untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrowableBuffer {
    data: String,
    capacity: usize,
    max_capacity: usize,
}

impl GrowableBuffer {
    /// Create an empty buffer, nothing is allocated until the first append.
    #[must_use]
    pub const fn with_max_capacity(max_capacity: usize) -> Self {
        Self {
            data: String::new(),
            capacity: 0,
            max_capacity,
        }
    }

    ///
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.data
    }

    ///
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    ///
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Number of bytes reserved so far.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    ///
    #[must_use]
    pub const fn max_capacity(&self) -> usize {
        self.max_capacity
    }

    fn reserve(&mut self, additional: usize) -> ParserResult<()> {
        let need = self
            .data
            .len()
            .checked_add(additional)
            .ok_or(ParserError::BufferTooLong {
                expected: self.max_capacity,
                got: usize::MAX,
            })?;

        if need <= self.capacity {
            return Ok(());
        }

        if need > self.max_capacity {
            return Err(ParserError::BufferTooLong {
                expected: self.max_capacity,
                got: need,
            });
        }

        let alloc = ((need + CHUNK_SIZE - 1) / CHUNK_SIZE * CHUNK_SIZE).min(self.max_capacity);
        self.data.reserve_exact(alloc - self.data.len());
        self.capacity = alloc;

        Ok(())
    }

    /// Append all the parts, or none of them if the limit would be exceeded.
    ///
    /// # Errors
    ///
    /// * [`ParserError::BufferTooLong`] if the buffer would grow past its limit.
    pub fn extend(&mut self, parts: &[&str]) -> ParserResult<()> {
        self.reserve(parts.iter().map(|part| part.len()).sum())?;
        for part in parts {
            self.data.push_str(part);
        }
        Ok(())
    }

    /// Append a string.
    ///
    /// # Errors
    ///
    /// * [`ParserError::BufferTooLong`] if the buffer would grow past its limit.
    pub fn push_str(&mut self, s: &str) -> ParserResult<()> {
        self.extend(&[s])
    }

    /// Replace the content of the buffer.
    ///
    /// # Errors
    ///
    /// * [`ParserError::BufferTooLong`] if `s` is longer than the limit,
    ///   the buffer is left empty.
    pub fn set(&mut self, s: &str) -> ParserResult<()> {
        self.data.clear();
        self.push_str(s)
    }

    /// Empty the buffer, keeping its allocation.
    pub fn clear(&mut self) {
        self.data.clear();
    }
}
