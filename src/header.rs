//! Header byte of a compact recoverable signature.
//!
//! One byte in `27..=34` packs the recovery id (low two bits above the base)
//! and whether the signing key is serialized compressed (`+4`).

use crate::error::{Result, SignedMessageError};

const HEADER_BASE: u8 = 27;
const COMPRESSED_OFFSET: u8 = 4;

/// Smallest valid header byte
pub const HEADER_MIN: u8 = HEADER_BASE;
/// Largest valid header byte
pub const HEADER_MAX: u8 = HEADER_BASE + COMPRESSED_OFFSET + 3;

/// Recovery id and compression flag. Only constructible in range, so
/// [`RecoveryHeader::to_byte`] always lands in `27..=34`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecoveryHeader {
    recovery_id: u8,
    compressed: bool,
}

impl RecoveryHeader {
    /// Create a header, rejecting recovery ids above 3
    pub fn new(recovery_id: u8, compressed: bool) -> Result<Self> {
        if recovery_id > 3 {
            return Err(SignedMessageError::MalformedSignature(format!(
                "Recovery id {recovery_id} out of range"
            )));
        }
        Ok(RecoveryHeader {
            recovery_id,
            compressed,
        })
    }

    /// The header values tried while signing, in search order
    pub fn candidates(compressed: bool) -> impl Iterator<Item = RecoveryHeader> {
        (0..4).map(move |recovery_id| RecoveryHeader {
            recovery_id,
            compressed,
        })
    }

    /// Which of the candidate nonce points produced `r` (0..=3)
    #[must_use]
    pub const fn recovery_id(self) -> u8 {
        self.recovery_id
    }

    /// Whether the address is derived from the compressed public key
    #[must_use]
    pub const fn is_compressed(self) -> bool {
        self.compressed
    }

    #[must_use]
    pub const fn to_byte(self) -> u8 {
        let offset = if self.compressed { COMPRESSED_OFFSET } else { 0 };
        HEADER_BASE + offset + self.recovery_id
    }

    pub fn from_byte(byte: u8) -> Result<Self> {
        if !(HEADER_MIN..=HEADER_MAX).contains(&byte) {
            return Err(SignedMessageError::MalformedSignature(format!(
                "Header byte {byte} outside {HEADER_MIN}..={HEADER_MAX}"
            )));
        }
        let value = byte - HEADER_BASE;
        Ok(RecoveryHeader {
            recovery_id: value % COMPRESSED_OFFSET,
            compressed: value >= COMPRESSED_OFFSET,
        })
    }
}
