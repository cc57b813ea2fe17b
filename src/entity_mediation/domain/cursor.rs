use crate::shared::error::HyperionError;
use crate::shared::Result;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

const CURSOR_PREFIX: &str = "arrayconnection:";

/// Encodes a 0-based row offset as an opaque Relay cursor.
pub fn offset_to_cursor(offset: usize) -> String {
    STANDARD.encode(format!("{}{}", CURSOR_PREFIX, offset))
}

/// Decodes a cursor produced by [`offset_to_cursor`].
pub fn cursor_to_offset(cursor: &str) -> Result<usize> {
    let invalid = || HyperionError::invalid_input(format!("Invalid cursor '{}'", cursor));

    let decoded = STANDARD.decode(cursor).map_err(|_| invalid())?;
    let text = String::from_utf8(decoded).map_err(|_| invalid())?;
    let offset = text
        .strip_prefix(CURSOR_PREFIX)
        .and_then(|value| value.parse::<usize>().ok())
        .ok_or_else(invalid)?;

    Ok(offset)
}
