//! Canonical signed message digest
//!
//! The signed buffer is `varint(len(MAGIC)) || MAGIC || varint(len(msg)) || msg`,
//! and the digest is double SHA-256 of that buffer.

use std::fmt;

use num_bigint::{BigInt, Sign};

use crate::error::Result;
use crate::sha256::hash256;
use crate::varint::encode_varint;

/// Prefix every signed message is tagged with
pub const MESSAGE_MAGIC: &str = "Bitcoin Signed Message:\n";

/// 32-byte digest of a signed message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Digest([u8; 32]);

impl Digest {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Digest(bytes)
    }

    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Interpret the digest as an unsigned big-endian integer
    #[must_use]
    pub fn to_scalar(&self) -> BigInt {
        BigInt::from_bytes_be(Sign::Plus, &self.0)
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

fn length_prefixed(data: &[u8]) -> Result<Vec<u8>> {
    let mut out = encode_varint(data.len())?;
    out.extend_from_slice(data);
    Ok(out)
}

/// Build the exact byte sequence that gets hashed for `message`
pub fn signed_message_bytes(message: &str) -> Result<Vec<u8>> {
    let mut buf = length_prefixed(MESSAGE_MAGIC.as_bytes())?;
    buf.extend(length_prefixed(message.as_bytes())?);
    Ok(buf)
}

/// Digest a message the way wallets do before signing it
pub fn message_digest(message: &str) -> Result<Digest> {
    let digest = Digest(hash256(&signed_message_bytes(message)?));
    tracing::trace!(%digest, len = message.len(), "computed signed message digest");
    Ok(digest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SignedMessageError;
    use crate::sha256::sha256;

    #[test]
    fn test_signed_message_layout() {
        let buf = signed_message_bytes("test message").unwrap();
        assert_eq!(
            hex::encode(&buf),
            "18426974636f696e205369676e6564204d6573736167653a0a0c74657374206d657373616765"
        );
    }

    #[test]
    fn test_known_digest() {
        let digest = message_digest("test message").unwrap();
        assert_eq!(
            digest.to_string(),
            "1226179ddf6383fbcf5102c9492538b7206c739ae79eb064408c2abd67d39bed"
        );

        let buf = signed_message_bytes("test message").unwrap();
        assert_eq!(digest.as_bytes(), &sha256(&sha256(&buf)));
    }

    #[test]
    fn test_empty_message() {
        let digest = message_digest("").unwrap();
        assert_eq!(
            digest.to_string(),
            "80e795d4a4caadd7047af389d9f7f220562feb6196032e2131e10563352c4bcc"
        );
    }

    #[test]
    fn test_digest_deterministic_and_distinct() {
        let a = message_digest("pay bob").unwrap();
        assert_eq!(a, message_digest("pay bob").unwrap());
        assert_ne!(a, message_digest("pay bob ").unwrap());
    }

    #[test]
    fn test_length_counts_utf8_bytes() {
        // Two characters, six bytes
        let buf = signed_message_bytes("€€").unwrap();
        let msg_part = &buf[1 + MESSAGE_MAGIC.len()..];
        assert_eq!(msg_part[0], 6);
        assert_eq!(&msg_part[1..], "€€".as_bytes());
    }

    #[test]
    fn test_long_message_uses_three_byte_prefix() {
        let message = "a".repeat(300);
        let buf = signed_message_bytes(&message).unwrap();
        let msg_part = &buf[1 + MESSAGE_MAGIC.len()..];
        assert_eq!(&msg_part[..3], &[0xfd, 0x2c, 0x01]);
    }

    #[test]
    fn test_oversized_message_rejected() {
        let message = "a".repeat(0x10000);
        assert!(matches!(
            message_digest(&message),
            Err(SignedMessageError::LengthTooLarge(0x10000))
        ));
    }
}
