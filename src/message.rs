//! Signing and verifying "Bitcoin Signed Message" texts.
//!
//! A signer produces a raw `(r, s)` over the message digest, then tries each
//! recovery id until the encoded signature resolves back to its own address.
//! A verifier recovers the key named by the header, checks the ECDSA
//! equation against it and derives the address it hashes to.

use num_bigint::BigInt;
use tracing::{debug, warn};

use crate::backend::CurveBackend;
use crate::codec::RecoverableSignature;
use crate::digest::{Digest, message_digest};
use crate::ecdsa::{Signature, verify_digest};
use crate::error::{Result, SignedMessageError};
use crate::header::RecoveryHeader;
use crate::recover::recover_public_key;

/// Sign `message` with `secret`, producing a compact recoverable signature.
///
/// `compressed` picks which serialization of the public key the signature
/// commits to; only the four recovery ids under that flag are searched.
pub fn sign_message<B: CurveBackend>(
    backend: &B,
    secret: Option<&BigInt>,
    message: &str,
    compressed: bool,
    version: u8,
) -> Result<RecoverableSignature> {
    let secret = secret.ok_or(SignedMessageError::MissingKey)?;
    sign_message_with(backend, Some(secret), message, compressed, version, |digest| {
        backend.sign_prehash(secret, digest)
    })
}

/// [`sign_message`] with the raw ECDSA step supplied by the caller
pub fn sign_message_with<B, F>(
    backend: &B,
    secret: Option<&BigInt>,
    message: &str,
    compressed: bool,
    version: u8,
    raw_sign: F,
) -> Result<RecoverableSignature>
where
    B: CurveBackend,
    F: FnOnce(&Digest) -> Result<Signature>,
{
    let secret = secret
        .filter(|secret| backend.is_valid_scalar(secret))
        .ok_or(SignedMessageError::MissingKey)?;

    let digest = message_digest(message)?;
    let signature = raw_sign(&digest)?;

    let expected = backend.address(&backend.public_point(secret), compressed, version);

    for header in RecoveryHeader::candidates(compressed) {
        let candidate = RecoverableSignature::new(header, &signature)?;
        let encoded = candidate.to_base64();
        let resolved = recover_message_address(backend, &encoded, message, version)?;
        debug!(
            header = header.to_byte(),
            resolved = resolved.as_deref().unwrap_or("<none>"),
            "tried recovery candidate"
        );
        if resolved.as_deref() == Some(expected.as_str()) {
            return Ok(candidate);
        }
    }

    warn!(%expected, "no recovery id reproduced the signing address");
    Err(SignedMessageError::RecoveryExhausted)
}

/// Resolve a base64 signature over `message` to the address that produced it.
///
/// Malformed input is an error. A well-formed signature that recovers no key,
/// or whose recovered key fails verification, yields `Ok(None)`.
pub fn recover_message_address<B: CurveBackend>(
    backend: &B,
    signature: &str,
    message: &str,
    version: u8,
) -> Result<Option<String>> {
    let decoded = RecoverableSignature::from_base64(signature)?;
    let digest = message_digest(message)?;
    let rs = decoded.signature();

    let header = decoded.header;
    let Some(public_point) = recover_public_key(backend, &rs, &digest, header.recovery_id())
    else {
        return Ok(None);
    };
    if !verify_digest(backend, &rs, &digest, &public_point) {
        return Ok(None);
    }
    Ok(Some(backend.address(
        &public_point,
        header.is_compressed(),
        version,
    )))
}

/// Whether `signature` proves that the holder of `address` signed `message`.
///
/// Any failure, malformed input included, is reported as `false`.
pub fn verify_message<B: CurveBackend>(
    backend: &B,
    address: &str,
    signature: &str,
    message: &str,
    version: u8,
) -> bool {
    match recover_message_address(backend, signature, message, version) {
        Ok(Some(recovered)) => recovered == address,
        Ok(None) => false,
        Err(e) => {
            debug!(error = %e, "rejecting unparseable signed message");
            false
        }
    }
}
