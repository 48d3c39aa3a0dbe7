//! secp256k1 backed by `k256`, with P2PKH addresses

use std::sync::LazyLock;

use k256::ecdsa::SigningKey;
use k256::elliptic_curve::ops::Reduce;
use k256::elliptic_curve::point::{AffineCoordinates, DecompressPoint};
use k256::elliptic_curve::subtle::Choice;
use k256::{AffinePoint, FieldBytes, ProjectivePoint, Scalar, U256};
use num_bigint::{BigInt, Sign};
use num_integer::Integer;

use crate::backend::CurveBackend;
use crate::digest::Digest;
use crate::ecdsa::Signature;
use crate::error::{Result, SignedMessageError};
use crate::keys::{PublicKey, scalar_to_32_bytes};

static GENERATOR: ProjectivePoint = ProjectivePoint::GENERATOR;

/// Group order n, recovered from the scalar field as (n - 1) + 1
static ORDER: LazyLock<BigInt> = LazyLock::new(|| scalar_to_bigint(&-Scalar::ONE) + 1);

fn bytes_to_bigint(bytes: &[u8]) -> BigInt {
    BigInt::from_bytes_be(Sign::Plus, bytes)
}

fn scalar_to_bigint(scalar: &Scalar) -> BigInt {
    bytes_to_bigint(&scalar.to_bytes())
}

/// Reduce an integer into the scalar field
fn to_scalar(k: &BigInt) -> Scalar {
    let reduced = k.mod_floor(&ORDER);
    // reduced < n < 2^256, so it always fits
    let bytes = scalar_to_32_bytes(&reduced).unwrap_or_default();
    <Scalar as Reduce<U256>>::reduce_bytes(&FieldBytes::from(bytes))
}

/// The Bitcoin curve with P2PKH Base58Check addresses
#[derive(Debug, Clone, Copy, Default)]
pub struct Secp256k1;

impl CurveBackend for Secp256k1 {
    type Point = ProjectivePoint;

    fn order(&self) -> &BigInt {
        &ORDER
    }

    fn generator(&self) -> &ProjectivePoint {
        &GENERATOR
    }

    fn add(&self, lhs: &ProjectivePoint, rhs: &ProjectivePoint) -> ProjectivePoint {
        *lhs + *rhs
    }

    fn mul(&self, k: &BigInt, point: &ProjectivePoint) -> ProjectivePoint {
        *point * to_scalar(k)
    }

    fn x_coordinate(&self, point: &ProjectivePoint) -> Option<BigInt> {
        if *point == ProjectivePoint::IDENTITY {
            return None;
        }
        Some(bytes_to_bigint(&point.to_affine().x()))
    }

    fn lift_x(&self, x: &BigInt, odd_y: bool) -> Option<ProjectivePoint> {
        let bytes = scalar_to_32_bytes(x)?;
        let affine: Option<AffinePoint> =
            AffinePoint::decompress(&FieldBytes::from(bytes), Choice::from(u8::from(odd_y))).into();
        affine.map(ProjectivePoint::from)
    }

    fn address(&self, point: &ProjectivePoint, compressed: bool, version: u8) -> String {
        PublicKey::from_point(*point).address_with_version(compressed, version)
    }

    fn invert(&self, k: &BigInt) -> Option<BigInt> {
        Option::<Scalar>::from(to_scalar(k).invert()).map(|inv| scalar_to_bigint(&inv))
    }

    /// RFC 6979 deterministic nonce, low-S
    fn sign_prehash(&self, secret: &BigInt, digest: &Digest) -> Result<Signature> {
        let secret_bytes = scalar_to_32_bytes(secret).ok_or(SignedMessageError::MissingKey)?;
        let signing_key = SigningKey::from_bytes(&FieldBytes::from(secret_bytes))
            .map_err(|_| SignedMessageError::MissingKey)?;
        let (signature, _) = signing_key
            .sign_prehash_recoverable(digest.as_bytes())
            .map_err(|e| SignedMessageError::Signing(e.to_string()))?;
        let (r, s) = signature.split_bytes();
        Ok(Signature::new(bytes_to_bigint(&r), bytes_to_bigint(&s)))
    }

    fn public_point(&self, secret: &BigInt) -> ProjectivePoint {
        GENERATOR * to_scalar(secret)
    }
}
