//! Content buffer shared by text and comment nodes.
//!
//! The buffer is raw bytes. Offsets and counts address bytes, not code
//! points, so an edit may split a multi-byte sequence; [`CharacterData::data`]
//! then shows the damaged sequence as U+FFFD.

use std::borrow::Cow;

use crate::error::{Error, Result};
use crate::xml::escape;

/// The data of a text or comment node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CharacterData {
    content: Vec<u8>,
}

impl CharacterData {
    /// Creates a buffer holding `data`.
    pub fn new(data: impl Into<Vec<u8>>) -> Self {
        CharacterData {
            content: data.into(),
        }
    }

    /// Returns the buffer as text, replacing invalid UTF-8 with U+FFFD.
    pub fn data(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.content)
    }

    /// Returns the raw buffer.
    pub fn as_bytes(&self) -> &[u8] {
        &self.content
    }

    /// Replaces the whole buffer.
    pub fn set_data(&mut self, data: impl Into<Vec<u8>>) {
        self.content = data.into();
    }

    /// Returns the buffer length in bytes.
    pub fn length(&self) -> usize {
        self.content.len()
    }

    /// Returns `count` bytes starting at `offset`.
    ///
    /// If `offset + count` reaches past the end, the tail starting at
    /// `offset` is returned. An `offset` past the end is an error.
    pub fn substring_data(&self, offset: usize, count: usize) -> Result<&[u8]> {
        self.check_offset(offset)?;
        Ok(&self.content[offset..self.clamped_end(offset, count)])
    }

    /// Appends `data` to the end of the buffer.
    pub fn append_data(&mut self, data: impl AsRef<[u8]>) {
        self.content.extend_from_slice(data.as_ref());
    }

    /// Inserts `data` at `offset`.
    pub fn insert_data(&mut self, offset: usize, data: impl AsRef<[u8]>) -> Result<()> {
        self.replace_data(offset, 0, data)
    }

    /// Removes `count` bytes at `offset`, clamping `count` to what remains.
    pub fn delete_data(&mut self, offset: usize, count: usize) -> Result<()> {
        self.replace_data(offset, count, b"")
    }

    /// Removes `count` bytes at `offset` and inserts `data` in their place.
    pub fn replace_data(&mut self, offset: usize, count: usize, data: impl AsRef<[u8]>) -> Result<()> {
        self.check_offset(offset)?;
        let end = self.clamped_end(offset, count);
        let tail = self.content.split_off(end);
        self.content.truncate(offset);
        self.content.extend_from_slice(data.as_ref());
        self.content.extend_from_slice(&tail);
        Ok(())
    }

    /// Returns the buffer passed through the markup escaping routine.
    pub fn escaped(&self) -> String {
        escape(&self.data())
    }

    fn check_offset(&self, offset: usize) -> Result<()> {
        if offset > self.content.len() {
            return Err(Error::IndexSize {
                offset,
                length: self.content.len(),
            });
        }
        Ok(())
    }

    fn clamped_end(&self, offset: usize, count: usize) -> usize {
        offset.saturating_add(count).min(self.content.len())
    }
}
