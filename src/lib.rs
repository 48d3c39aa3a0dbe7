//! Bitcoin signed messages
//!
//! Sign arbitrary text with a Bitcoin private key and verify such signatures
//! against an address, using the compact recoverable format wallets exchange
//! as base64 strings.

pub mod backend;
pub mod bitcoin;
pub mod codec;
pub mod digest;
pub mod ecdsa;
pub mod error;
pub mod header;
pub mod keys;
pub mod message;
pub mod recover;
pub mod sha256;
pub mod varint;

pub use error::{Result, SignedMessageError};

pub use backend::CurveBackend;
pub use bitcoin::Secp256k1;
pub use codec::RecoverableSignature;
pub use digest::{Digest, MESSAGE_MAGIC, message_digest, signed_message_bytes};
pub use ecdsa::{Signature, verify_digest};
pub use header::RecoveryHeader;
pub use keys::{Network, PrivateKey, PublicKey, address_to_pkb_hash};
pub use message::{recover_message_address, sign_message, sign_message_with, verify_message};
pub use recover::recover_public_key;
pub use varint::{decode_varint, encode_varint};
