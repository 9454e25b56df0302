//! Byte-slice utilities for fixed-offset parsing.
//!
//! There are two layers:
//! - **Option layer** (`read_*`): return `Option<T>`, `None` when the range is out of bounds.
//! - **Result layer** (`*_r`): wrappers that map `None` to `NhdError::TruncatedRecord`.
//!
//! All numeric reads are **little-endian**. Offsets are relative to the slice you pass in.
//!
//! ```ignore
//! use crate::utils::bytes;
//!
//! let town_id = bytes::read_u32_le_r(buf, 0x38, "town id")?;
//! ```

use byteorder::{ByteOrder, LittleEndian};

use crate::err::NhdError;

/// Borrow `len` bytes at `offset`.
pub(crate) fn slice(buf: &[u8], offset: usize, len: usize) -> Option<&[u8]> {
    let end = offset.checked_add(len)?;
    buf.get(offset..end)
}

/// Read a `u16` (little-endian) at `offset`.
pub(crate) fn read_u16_le(buf: &[u8], offset: usize) -> Option<u16> {
    slice(buf, offset, 2).map(LittleEndian::read_u16)
}

/// Read a `u32` (little-endian) at `offset`.
pub(crate) fn read_u32_le(buf: &[u8], offset: usize) -> Option<u32> {
    slice(buf, offset, 4).map(LittleEndian::read_u32)
}

#[inline]
fn truncated(what: &'static str, offset: usize, need: usize, len: usize) -> NhdError {
    NhdError::TruncatedRecord {
        what,
        offset: offset as u64,
        need,
        have: len.saturating_sub(offset),
    }
}

/// Read a `u32` (little-endian) at `offset`, or return `NhdError::TruncatedRecord`.
pub(crate) fn read_u32_le_r(buf: &[u8], offset: usize, what: &'static str) -> Result<u32, NhdError> {
    read_u32_le(buf, offset).ok_or_else(|| truncated(what, offset, 4, buf.len()))
}
