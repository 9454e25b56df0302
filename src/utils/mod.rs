pub(crate) mod bytes;
mod utf16;

pub(crate) use self::utf16::decode_utf16le_window;
