//! Bitcoin compact-size integers, limited to the 16-bit range used for
//! signed message lengths.

use crate::error::{Result, SignedMessageError};

/// Marker byte announcing a two-byte little-endian length
const MARKER_U16: u8 = 0xfd;

/// Largest length a signed message buffer may carry
pub const MAX_LENGTH: usize = 0xffff;

/// Encode a length as a compact-size integer.
///
/// Lengths below `0xfd` take one byte, lengths up to `0xffff` take the
/// `0xfd` marker followed by two little-endian bytes. Anything larger is
/// rejected rather than truncated.
pub fn encode_varint(len: usize) -> Result<Vec<u8>> {
    if len < MARKER_U16 as usize {
        Ok(vec![len as u8])
    } else if len <= MAX_LENGTH {
        let mut result = vec![MARKER_U16];
        result.extend_from_slice(&(len as u16).to_le_bytes());
        Ok(result)
    } else {
        Err(SignedMessageError::LengthTooLarge(len))
    }
}

/// Decode a compact-size integer from the front of `bytes`.
///
/// Returns the value and the number of bytes consumed.
pub fn decode_varint(bytes: &[u8]) -> Result<(usize, usize)> {
    match bytes.first() {
        None => Err(SignedMessageError::InvalidFormat("Empty varint".into())),
        Some(&MARKER_U16) => {
            let raw: [u8; 2] = bytes
                .get(1..3)
                .and_then(|s| s.try_into().ok())
                .ok_or_else(|| SignedMessageError::InvalidFormat("Truncated varint".into()))?;
            let value = u16::from_le_bytes(raw) as usize;
            // values below the marker must use the one-byte form
            if value < MARKER_U16 as usize {
                return Err(SignedMessageError::InvalidFormat("Non-canonical varint".into()));
            }
            Ok((value, 3))
        }
        // 0xfe and 0xff announce 32/64-bit lengths
        Some(&marker) if marker > MARKER_U16 => {
            Err(SignedMessageError::LengthTooLarge(MAX_LENGTH + 1))
        }
        Some(&n) => Ok((n as usize, 1)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_encode_boundaries() {
        assert_eq!(encode_varint(0).unwrap(), vec![0x00]);
        assert_eq!(encode_varint(24).unwrap(), vec![0x18]);
        assert_eq!(encode_varint(0xfc).unwrap(), vec![0xfc]);
        assert_eq!(encode_varint(0xfd).unwrap(), vec![0xfd, 0xfd, 0x00]);
        assert_eq!(encode_varint(0x1234).unwrap(), vec![0xfd, 0x34, 0x12]);
        assert_eq!(encode_varint(0xffff).unwrap(), vec![0xfd, 0xff, 0xff]);
    }

    #[test]
    fn test_encode_too_large() {
        assert!(matches!(
            encode_varint(0x10000),
            Err(SignedMessageError::LengthTooLarge(0x10000))
        ));
    }

    #[test]
    fn test_decode_rejects_non_canonical() {
        for bytes in [[0xfd, 0x10, 0x00], [0xfd, 0x00, 0x00], [0xfd, 0xfc, 0x00]] {
            assert!(matches!(
                decode_varint(&bytes),
                Err(SignedMessageError::InvalidFormat(_))
            ));
        }
        assert_eq!(decode_varint(&[0xfd, 0xfd, 0x00]).unwrap(), (0xfd, 3));
    }

    #[test]
    fn test_decode_rejects_wide_markers() {
        assert!(matches!(
            decode_varint(&[0xfe, 0, 0, 1, 0]),
            Err(SignedMessageError::LengthTooLarge(_))
        ));
        assert!(matches!(
            decode_varint(&[0xff; 9]),
            Err(SignedMessageError::LengthTooLarge(_))
        ));
    }

    #[test]
    fn test_decode_truncated() {
        assert!(decode_varint(&[]).is_err());
        assert!(decode_varint(&[0xfd, 0x01]).is_err());
    }

    proptest! {
        #[test]
        fn prop_varint_roundtrip(len in 0usize..=MAX_LENGTH) {
            let encoded = encode_varint(len).unwrap();
            let (decoded, consumed) = decode_varint(&encoded).unwrap();
            prop_assert_eq!(decoded, len);
            prop_assert_eq!(consumed, encoded.len());
        }

        #[test]
        fn prop_varint_rejects_large(len in (MAX_LENGTH + 1)..usize::MAX) {
            prop_assert!(encode_varint(len).is_err());
        }
    }
}
