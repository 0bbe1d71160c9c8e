//! The keyed offset cipher behind the container wire format.
//!
//! Every plaintext byte is shifted by a per-store "real offset" derived from
//! the key and a configurable base offset, then written out as its decimal
//! digits with no padding or delimiter. With base offsets near the minimum,
//! every shifted byte lands in `[100, 999]` and so occupies exactly
//! [`ENCODED_CHAR_WIDTH`] digits on the wire, which is what decoding relies
//! on.

use crate::error::{CofferError, Result};

/// Smallest accepted base offset.
pub const MIN_OFFSET: u64 = 100;

/// Number of decimal digits one encoded byte occupies on the wire.
pub const ENCODED_CHAR_WIDTH: usize = 3;

/// Reversible substitution cipher parameterized by a key string and a base
/// offset.
///
/// The cipher is stateless per call: the real offset is recomputed from the
/// current key and base offset on every encode and decode, so changing
/// either affects only future calls.
///
/// Known limitation: the fixed 3-digit window assumes every shifted byte
/// stays within `[100, 999]`. A base offset or key large enough to push
/// values past 999 desynchronizes the windowing and the wire text becomes
/// undecodable. This is inherent to the wire format and deliberately not
/// repaired, since widening the window would break every existing container
/// file.
#[derive(Debug, Clone)]
pub struct Cipher {
    offset: u64,
    key: String,
}

impl Cipher {
    /// Creates a cipher from a base offset and key.
    ///
    /// # Errors
    ///
    /// Returns `CofferError::InvalidInput` if `offset` is below
    /// [`MIN_OFFSET`] or `key` is empty.
    pub fn new(offset: u64, key: impl Into<String>) -> Result<Self> {
        let key = key.into();
        validate_offset(offset)?;
        validate_key(&key)?;
        Ok(Self { offset, key })
    }

    /// Returns the current key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Replaces the key, revalidating the construction invariants.
    pub fn set_key(&mut self, new_key: impl Into<String>) -> Result<()> {
        let new_key = new_key.into();
        validate_key(&new_key)?;
        self.key = new_key;
        Ok(())
    }

    /// Replaces the base offset, revalidating the construction invariants.
    pub fn set_offset(&mut self, offset: u64) -> Result<()> {
        validate_offset(offset)?;
        self.offset = offset;
        Ok(())
    }

    /// Encodes plaintext into the delimiter-free decimal wire form.
    ///
    /// Pure function of the cipher state and input; an empty input encodes
    /// to an empty string.
    pub fn encode(&self, plaintext: &str) -> String {
        let offset = self.real_offset();
        let mut encoded = String::with_capacity(plaintext.len() * ENCODED_CHAR_WIDTH);
        for byte in plaintext.bytes() {
            encoded.push_str(&(u64::from(byte) + offset).to_string());
        }
        encoded
    }

    /// Decodes wire text back into plaintext.
    ///
    /// Consumes the input in fixed windows of [`ENCODED_CHAR_WIDTH`]
    /// characters. Each window must parse as an unsigned integer; after
    /// subtracting the real offset the recovered value must be a tab, a
    /// newline, or a printable ASCII character. Anything else fails, which
    /// is also how a wrong key or offset is detected.
    pub fn decode(&self, wiretext: &str) -> Result<String> {
        let offset = self.real_offset();
        let mut decoded = String::with_capacity(wiretext.len() / ENCODED_CHAR_WIDTH);

        for window in wiretext.as_bytes().chunks(ENCODED_CHAR_WIDTH) {
            let digits = std::str::from_utf8(window)
                .map_err(|_| CofferError::Decode("wire text is not ASCII".to_string()))?;
            let value: u64 = digits.parse().map_err(|_| {
                CofferError::Decode(format!("cannot read \"{}\" as an encoded character", digits))
            })?;

            let candidate = value.checked_sub(offset).filter(|&code| is_valid_char(code));
            match candidate {
                Some(code) => decoded.push(code as u8 as char),
                None => return Err(CofferError::Decode("bad string data".to_string())),
            }
        }

        Ok(decoded)
    }

    /// Calculates the shift applied to every byte: the base offset plus the
    /// average byte value of the key, truncated by integer division.
    ///
    /// The key is guaranteed non-empty by construction, so the division is
    /// safe.
    fn real_offset(&self) -> u64 {
        let key_total: u64 = self.key.bytes().map(u64::from).sum();
        let key_len = self.key.len() as u64;
        (key_total + self.offset * key_len) / key_len
    }
}

/// Whether a decoded value maps back to a character the wire format can
/// carry: tab, newline, or printable ASCII.
fn is_valid_char(code: u64) -> bool {
    code == u64::from(b'\t') || code == u64::from(b'\n') || (0x20..=0x7E).contains(&code)
}

fn validate_offset(offset: u64) -> Result<()> {
    if offset < MIN_OFFSET {
        return Err(CofferError::InvalidInput(format!(
            "offset must be at least {} (got {})",
            MIN_OFFSET, offset
        )));
    }
    Ok(())
}

fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(CofferError::InvalidInput(
            "key must not be empty".to_string(),
        ));
    }
    Ok(())
}
