use log::trace;

use crate::utils::bytes::read_u16_le;

/// Decode a UTF-16LE string from a fixed window of `max_len` bytes starting at `offset`.
///
/// Stops at the first NUL (0x0000), at the end of the window, or when fewer than two bytes
/// remain in `buf`. A dangling odd byte is dropped. Every code unit becomes one `char`;
/// surrogates are never paired and decode to U+FFFD.
pub(crate) fn decode_utf16le_window(buf: &[u8], offset: usize, max_len: usize) -> String {
    let mut out = String::with_capacity(max_len / 2);

    for pos in (offset..offset.saturating_add(max_len)).step_by(2) {
        let Some(unit) = read_u16_le(buf, pos) else {
            trace!("Offset `0x{pos:02x}`: buffer exhausted before NUL");
            break;
        };

        if unit == 0 {
            break;
        }

        out.push(char::from_u32(u32::from(unit)).unwrap_or(char::REPLACEMENT_CHARACTER));
    }

    out
}
