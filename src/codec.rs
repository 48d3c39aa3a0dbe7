//! Compact recoverable signatures: `header || r || s`, 65 bytes, carried as base64

use std::fmt;
use std::str::FromStr;

use base64::{Engine, prelude::BASE64_STANDARD};
use num_bigint::{BigInt, Sign};

use crate::ecdsa::Signature;
use crate::error::{Result, SignedMessageError};
use crate::header::RecoveryHeader;
use crate::keys::scalar_to_32_bytes;

/// Size of the raw signature layout
pub const SIGNATURE_LEN: usize = 65;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecoverableSignature {
    pub header: RecoveryHeader,
    r: [u8; 32],
    s: [u8; 32],
}

impl RecoverableSignature {
    /// Pack `(r, s)` under `header`, left-padding each scalar to 32 bytes
    pub fn new(header: RecoveryHeader, signature: &Signature) -> Result<Self> {
        let pad = |value: &BigInt, name: &str| {
            scalar_to_32_bytes(value).ok_or_else(|| {
                SignedMessageError::MalformedSignature(format!("{name} does not fit in 32 bytes"))
            })
        };
        Ok(RecoverableSignature {
            header,
            r: pad(&signature.r, "r")?,
            s: pad(&signature.s, "s")?,
        })
    }

    /// The `(r, s)` pair this signature carries
    #[must_use]
    pub fn signature(&self) -> Signature {
        Signature::new(
            BigInt::from_bytes_be(Sign::Plus, &self.r),
            BigInt::from_bytes_be(Sign::Plus, &self.s),
        )
    }

    /// Same `(r, s)` under a different header
    #[must_use]
    pub const fn with_header(mut self, header: RecoveryHeader) -> Self {
        self.header = header;
        self
    }

    #[must_use]
    pub fn to_bytes(&self) -> [u8; SIGNATURE_LEN] {
        let mut out = [0u8; SIGNATURE_LEN];
        out[0] = self.header.to_byte();
        out[1..33].copy_from_slice(&self.r);
        out[33..].copy_from_slice(&self.s);
        out
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let raw: &[u8; SIGNATURE_LEN] = bytes.try_into().map_err(|_| {
            SignedMessageError::MalformedSignature(format!(
                "Expected {SIGNATURE_LEN} bytes, got {}",
                bytes.len()
            ))
        })?;
        let header = RecoveryHeader::from_byte(raw[0])?;
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&raw[1..33]);
        s.copy_from_slice(&raw[33..]);
        Ok(RecoverableSignature { header, r, s })
    }

    #[must_use]
    pub fn to_base64(&self) -> String {
        BASE64_STANDARD.encode(self.to_bytes())
    }

    pub fn from_base64(encoded: &str) -> Result<Self> {
        let bytes = BASE64_STANDARD.decode(encoded.trim())?;
        Self::from_bytes(&bytes)
    }
}

impl fmt::Display for RecoverableSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_base64())
    }
}

impl FromStr for RecoverableSignature {
    type Err = SignedMessageError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_base64(s)
    }
}
