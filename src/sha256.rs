//! Hash primitives used by signed messages and addresses.
//! Backed by the RustCrypto `sha2` and `ripemd` crates.

use ripemd::Ripemd160;
use sha2::{Digest, Sha256};

/// Compute SHA-256 hash
pub fn sha256(data: &[u8]) -> [u8; 32] {
    Sha256::digest(data).into()
}

/// Double SHA-256, as applied to signed message buffers and checksums
pub fn hash256(data: &[u8]) -> [u8; 32] {
    sha256(&sha256(data))
}

/// RIPEMD-160 of SHA-256, the public key hash inside P2PKH addresses
pub fn hash160(data: &[u8]) -> [u8; 20] {
    Ripemd160::digest(sha256(data)).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_vectors() {
        let test_cases = [
            (
                b"".as_slice(),
                "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855",
            ),
            (
                b"abc".as_slice(),
                "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad",
            ),
        ];

        for (input, expected) in test_cases {
            assert_eq!(hex::encode(sha256(input)), expected);
        }
    }

    #[test]
    fn test_hash256_is_two_passes() {
        assert_eq!(hash256(b"hello"), sha256(&sha256(b"hello")));
        assert_eq!(
            hex::encode(hash256(b"hello")),
            "9595c9df90075148eb06860365df33584b75bff782a510c6cd4883a419833d50"
        );
    }

    #[test]
    fn test_hash160_generator_point() {
        // Compressed SEC encoding of G
        let sec = hex::decode("0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798")
            .unwrap();
        assert_eq!(
            hex::encode(hash160(&sec)),
            "751e76e8199196d454941c45d1b3a323f1433bd6"
        );
    }
}
