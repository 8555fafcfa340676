use std::string::{FromUtf8Error, FromUtf16Error};
use thiserror::Error;

/// Reasons archive bytes could not be decoded as text.
#[derive(Error, Debug)]
pub(crate) enum UtfError {
    #[error("UTF-16 data needs to contain an even amount of bytes")]
    UnevenByteCount,
    #[error(transparent)]
    InvalidUtf8(FromUtf8Error),
    #[error(transparent)]
    InvalidUtf16(FromUtf16Error),
}

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Decodes UTF-8 (an optional BOM is stripped) or BOM-marked UTF-16.
pub(crate) fn into_utf8_str(mut data: Vec<u8>) -> Result<String, UtfError> {
    if is_utf16(&data) {
        return from_utf16(&data);
    }
    if data.starts_with(UTF8_BOM) {
        data.drain(..UTF8_BOM.len());
    }
    String::from_utf8(data).map_err(UtfError::InvalidUtf8)
}

/// Checks if a UTF-16 byte order mark (BOM) exists
fn is_utf16(data: &[u8]) -> bool {
    data.starts_with(b"\xFF\xFE") || data.starts_with(b"\xFE\xFF")
}

fn from_utf16(data: &[u8]) -> Result<String, UtfError> {
    // Determine byte order for little endian (le) and big endian (be)
    let endian = if data.starts_with(b"\xFF") {
        u16::from_le_bytes
    } else {
        u16::from_be_bytes
    };

    let utf16 = data[2..]
        .chunks(2)
        .map(|chunk| chunk.try_into().map(endian))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| UtfError::UnevenByteCount)?;

    String::from_utf16(utf16.as_ref()).map_err(UtfError::InvalidUtf16)
}
