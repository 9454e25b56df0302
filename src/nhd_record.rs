use crate::err::{NhdError, Result};
use crate::utils::{bytes, decode_utf16le_window};

use log::debug;
use std::path::Path;

pub const PATTERN_NAME_OFFSET: usize = 0x10;
/// 20 UTF-16 code units.
pub const PATTERN_NAME_MAX_LEN: usize = 40;
pub const TOWN_ID_OFFSET: usize = 0x38;
pub const PLAYER_ID_OFFSET: usize = 0x54;
/// Smallest buffer that covers every fixed field.
pub const NHD_MIN_RECORD_SIZE: usize = PLAYER_ID_OFFSET + 4;

/// Metadata embedded in an NHD pattern file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NhdRecord {
    /// Display name, trimmed, never contains NUL.
    pub pattern_name: String,
    pub town_id: u32,
    pub player_id: u32,
}

impl NhdRecord {
    /// Decode the fixed fields out of a raw record.
    ///
    /// The name field is lenient (it ends early on short buffers), the identifiers are not:
    /// a buffer shorter than [`NHD_MIN_RECORD_SIZE`] yields [`NhdError::TruncatedRecord`].
    /// Identifier values are never range checked.
    pub fn from_bytes(buf: &[u8]) -> Result<NhdRecord> {
        let pattern_name = decode_utf16le_window(buf, PATTERN_NAME_OFFSET, PATTERN_NAME_MAX_LEN)
            .trim()
            .to_string();
        let town_id = bytes::read_u32_le_r(buf, TOWN_ID_OFFSET, "town id")?;
        let player_id = bytes::read_u32_le_r(buf, PLAYER_ID_OFFSET, "player id")?;

        let record = NhdRecord {
            pattern_name,
            town_id,
            player_id,
        };
        debug!("Decoded NHD record ({} bytes) - {:?}", buf.len(), record);

        Ok(record)
    }

    /// Read the whole file into memory and decode it. The handle is closed before returning.
    pub fn from_path(path: impl AsRef<Path>) -> Result<NhdRecord> {
        let path = path.as_ref();
        let data = std::fs::read(path).map_err(|source| NhdError::FailedToReadFile {
            path: path.to_path_buf(),
            source,
        })?;

        NhdRecord::from_bytes(&data)
    }

    /// `"{town_id}-{player_id}_{pattern_name}"`, before sanitization.
    pub fn candidate_name(&self) -> String {
        format!("{}-{}_{}", self.town_id, self.player_id, self.pattern_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn record_bytes(name: &str, town_id: u32, player_id: u32) -> Vec<u8> {
        let mut buf = vec![0_u8; 0x60];
        for (i, unit) in name.encode_utf16().enumerate() {
            let at = PATTERN_NAME_OFFSET + i * 2;
            buf[at..at + 2].copy_from_slice(&unit.to_le_bytes());
        }
        buf[TOWN_ID_OFFSET..TOWN_ID_OFFSET + 4].copy_from_slice(&town_id.to_le_bytes());
        buf[PLAYER_ID_OFFSET..PLAYER_ID_OFFSET + 4].copy_from_slice(&player_id.to_le_bytes());
        buf
    }

    #[test]
    fn test_parses_nhd_record() {
        let buf = record_bytes("Ivy", 1, 5);

        assert_eq!(
            NhdRecord::from_bytes(&buf).unwrap(),
            NhdRecord {
                pattern_name: "Ivy".to_string(),
                town_id: 1,
                player_id: 5,
            }
        );
    }

    #[test]
    fn test_name_is_trimmed() {
        let buf = record_bytes("  Sunflower \t", 7, 8);
        assert_eq!(NhdRecord::from_bytes(&buf).unwrap().pattern_name, "Sunflower");
    }

    #[test]
    fn test_full_window_name_round_trips() {
        let name = "ABCDEFGHIJKLMNOPQRST";
        assert_eq!(name.encode_utf16().count(), 20);

        let buf = record_bytes(name, 0, 0);
        assert_eq!(NhdRecord::from_bytes(&buf).unwrap().pattern_name, name);
    }

    #[test]
    fn test_identifiers_are_not_range_checked() {
        let buf = record_bytes("x", u32::MAX, 0x8000_0000);
        let record = NhdRecord::from_bytes(&buf).unwrap();

        assert_eq!(record.town_id, u32::MAX);
        assert_eq!(record.player_id, 0x8000_0000);
        assert_eq!(record.candidate_name(), "4294967295-2147483648_x");
    }

    #[test]
    fn test_every_short_buffer_is_truncated() {
        let full = record_bytes("Ivy", 1, 5);

        for len in 0..NHD_MIN_RECORD_SIZE {
            let err = NhdRecord::from_bytes(&full[..len]).unwrap_err();
            assert!(
                matches!(err, NhdError::TruncatedRecord { .. }),
                "length {len} produced {err:?}"
            );
        }

        assert!(NhdRecord::from_bytes(&full[..NHD_MIN_RECORD_SIZE]).is_ok());
    }

    #[test]
    fn test_empty_name() {
        let buf = record_bytes("", 12, 34);
        let record = NhdRecord::from_bytes(&buf).unwrap();

        assert_eq!(record.pattern_name, "");
        assert_eq!(record.candidate_name(), "12-34_");
    }
}
