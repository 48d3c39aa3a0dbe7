//! Secret/public keys, WIF import/export and P2PKH addresses

use std::fmt;

use k256::ProjectivePoint;
use k256::elliptic_curve::sec1::ToEncodedPoint;
use num_bigint::{BigInt, Sign};
use rand::RngCore;

use crate::backend::CurveBackend;
use crate::bitcoin::Secp256k1;
use crate::codec::RecoverableSignature;
use crate::error::{Result, SignedMessageError};
use crate::message::sign_message;
use crate::sha256::{hash160, hash256};

/// Bitcoin network type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Network {
    #[default]
    Main,
    Test,
}

impl Network {
    /// Version byte for P2PKH addresses
    #[inline]
    pub const fn version_byte(self) -> u8 {
        match self {
            Network::Main => 0x00,
            Network::Test => 0x6f,
        }
    }

    /// Version byte for WIF private keys
    #[inline]
    pub const fn wif_byte(self) -> u8 {
        match self {
            Network::Main => 0x80,
            Network::Test => 0xef,
        }
    }

    pub fn from_wif_byte(byte: u8) -> Result<Self> {
        match byte {
            0x80 => Ok(Network::Main),
            0xef => Ok(Network::Test),
            _ => Err(SignedMessageError::InvalidFormat(format!(
                "Unknown WIF version byte 0x{byte:02x}"
            ))),
        }
    }

    #[inline]
    pub const fn name(self) -> &'static str {
        match self {
            Network::Main => "main",
            Network::Test => "test",
        }
    }
}

impl TryFrom<&str> for Network {
    type Error = SignedMessageError;

    fn try_from(s: &str) -> Result<Self> {
        match s {
            "main" | "mainnet" => Ok(Network::Main),
            "test" | "testnet" => Ok(Network::Test),
            _ => Err(SignedMessageError::InvalidFormat(format!("Unknown network: {s}"))),
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Draw a uniformly random scalar in [1, n), for fresh private keys
pub fn gen_secret_key(n: &BigInt) -> BigInt {
    let mut rng = rand::rng();
    let bits = n.bits();
    let mut bytes = vec![0u8; bits.div_ceil(8) as usize];
    let excess = bytes.len() as u64 * 8 - bits;
    loop {
        rng.fill_bytes(&mut bytes);
        bytes[0] &= 0xff >> excess;
        let key = BigInt::from_bytes_be(Sign::Plus, &bytes);
        if key.sign() == Sign::Plus && key < *n {
            return key;
        }
    }
}

/// Left-pad a non-negative integer to 32 big-endian bytes.
/// Returns `None` when it does not fit.
pub fn scalar_to_32_bytes(n: &BigInt) -> Option<[u8; 32]> {
    let (sign, bytes) = n.to_bytes_be();
    if sign == Sign::Minus || bytes.len() > 32 {
        return None;
    }
    let mut result = [0u8; 32];
    result[32 - bytes.len()..].copy_from_slice(&bytes);
    Some(result)
}

/// Base58 with a four-byte double SHA-256 checksum
pub fn b58check_encode(payload: &[u8]) -> String {
    let mut data = payload.to_vec();
    data.extend_from_slice(&hash256(payload)[..4]);
    bs58::encode(data).into_string()
}

/// Decode Base58Check and strip the verified checksum
pub fn b58check_decode(s: &str) -> Result<Vec<u8>> {
    let mut data = bs58::decode(s).into_vec()?;
    if data.len() < 4 {
        return Err(SignedMessageError::InvalidFormat("Base58Check payload too short".into()));
    }
    let checksum = data.split_off(data.len() - 4);
    if hash256(&data)[..4] != checksum[..] {
        return Err(SignedMessageError::Validation("Invalid checksum".into()));
    }
    Ok(data)
}

/// Public key: a point on secp256k1 with SEC encoding and address helpers
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PublicKey {
    pub point: ProjectivePoint,
}

impl PublicKey {
    pub fn from_point(point: ProjectivePoint) -> Self {
        PublicKey { point }
    }

    /// Derive the public key of a secret scalar
    pub fn from_secret(secret: &BigInt) -> Self {
        PublicKey::from_point(Secp256k1.public_point(secret))
    }

    /// Decode from SEC binary format (compressed or uncompressed)
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        if bytes.is_empty() {
            return Err(SignedMessageError::InvalidFormat("Empty public key".into()));
        }
        let key = k256::PublicKey::from_sec1_bytes(bytes)
            .map_err(|_| SignedMessageError::InvalidFormat("Invalid SEC public key".into()))?;
        Ok(PublicKey::from_point(key.to_projective()))
    }

    /// Encode to SEC format. The identity has no encoding.
    pub fn encode(&self, compressed: bool) -> Vec<u8> {
        if self.point == ProjectivePoint::IDENTITY {
            return Vec::new();
        }
        self.point
            .to_affine()
            .to_encoded_point(compressed)
            .as_bytes()
            .to_vec()
    }

    /// Encode and hash with HASH160
    pub fn encode_hash160(&self, compressed: bool) -> [u8; 20] {
        hash160(&self.encode(compressed))
    }

    /// P2PKH address for a network
    pub fn address(&self, net: Network, compressed: bool) -> String {
        self.address_with_version(compressed, net.version_byte())
    }

    /// P2PKH address under an arbitrary version byte
    pub fn address_with_version(&self, compressed: bool, version: u8) -> String {
        let mut payload = vec![version];
        payload.extend_from_slice(&self.encode_hash160(compressed));
        b58check_encode(&payload)
    }
}

/// Extract public key hash from a Base58Check address
pub fn address_to_pkb_hash(b58check_address: &str) -> Result<[u8; 20]> {
    let payload = b58check_decode(b58check_address)?;
    payload
        .get(1..)
        .and_then(|hash| hash.try_into().ok())
        .ok_or_else(|| SignedMessageError::InvalidFormat("Invalid address length".into()))
}

/// A secret key together with how its public key is serialized
#[derive(Clone, PartialEq, Eq)]
pub struct PrivateKey {
    pub secret: BigInt,
    pub compressed: bool,
    pub network: Network,
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKey")
            .field("compressed", &self.compressed)
            .field("network", &self.network)
            .finish_non_exhaustive()
    }
}

impl PrivateKey {
    pub fn new(secret: BigInt, compressed: bool, network: Network) -> Result<Self> {
        if !Secp256k1.is_valid_scalar(&secret) {
            return Err(SignedMessageError::MissingKey);
        }
        Ok(PrivateKey {
            secret,
            compressed,
            network,
        })
    }

    /// Generate a fresh compressed key
    pub fn generate(network: Network) -> Self {
        PrivateKey {
            secret: gen_secret_key(Secp256k1.order()),
            compressed: true,
            network,
        }
    }

    /// Parse Wallet Import Format: version, 32-byte secret, optional 0x01
    /// compression marker, checksum
    pub fn from_wif(wif: &str) -> Result<Self> {
        let payload = b58check_decode(wif)?;
        let compressed = match payload.len() {
            33 => false,
            34 if payload[33] == 0x01 => true,
            34 => {
                return Err(SignedMessageError::InvalidFormat(
                    "Invalid WIF compression marker".into(),
                ));
            }
            len => {
                return Err(SignedMessageError::InvalidFormat(format!(
                    "Invalid WIF payload length {len}"
                )));
            }
        };
        let network = Network::from_wif_byte(payload[0])?;
        let secret = BigInt::from_bytes_be(Sign::Plus, &payload[1..33]);
        PrivateKey::new(secret, compressed, network)
    }

    pub fn to_wif(&self) -> String {
        let mut payload = vec![self.network.wif_byte()];
        payload.extend_from_slice(&scalar_to_32_bytes(&self.secret).unwrap_or_default());
        if self.compressed {
            payload.push(0x01);
        }
        b58check_encode(&payload)
    }

    pub fn public_key(&self) -> PublicKey {
        PublicKey::from_secret(&self.secret)
    }

    pub fn address(&self) -> String {
        self.public_key().address(self.network, self.compressed)
    }

    /// Sign a message for this key's own address
    pub fn sign_message(&self, message: &str) -> Result<RecoverableSignature> {
        sign_message(
            &Secp256k1,
            Some(&self.secret),
            message,
            self.compressed,
            self.network.version_byte(),
        )
    }
}
