//! The curve and address capabilities signing and verification are built on.
//!
//! Everything that needs real elliptic-curve math or an address format goes
//! through [`CurveBackend`], so the message protocol can be driven by the
//! bundled secp256k1 implementation or by a stand-in group in tests.

use std::fmt;

use num_bigint::BigInt;
use num_traits::One;

use crate::digest::Digest;
use crate::ecdsa::Signature;
use crate::error::Result;

pub trait CurveBackend {
    type Point: Clone + fmt::Debug;

    /// Order `n` of the generator
    fn order(&self) -> &BigInt;

    fn generator(&self) -> &Self::Point;

    fn add(&self, lhs: &Self::Point, rhs: &Self::Point) -> Self::Point;

    /// `k * point`, with `k` taken modulo the group order
    fn mul(&self, k: &BigInt, point: &Self::Point) -> Self::Point;

    /// Affine x coordinate, `None` for the identity
    fn x_coordinate(&self, point: &Self::Point) -> Option<BigInt>;

    /// Point with the given x coordinate and y parity, if one exists
    fn lift_x(&self, x: &BigInt, odd_y: bool) -> Option<Self::Point>;

    /// Address of a public key point under the given version byte
    fn address(&self, point: &Self::Point, compressed: bool, version: u8) -> String;

    /// Inverse modulo the group order, `None` for zero
    fn invert(&self, k: &BigInt) -> Option<BigInt>;

    /// Raw ECDSA signature of a prehashed digest. `secret` is in `[1, n-1]`.
    fn sign_prehash(&self, secret: &BigInt, digest: &Digest) -> Result<Signature>;

    /// Whether `value` is a usable scalar, i.e. in `[1, n-1]`
    fn is_valid_scalar(&self, value: &BigInt) -> bool {
        *value >= BigInt::one() && value < self.order()
    }

    fn public_point(&self, secret: &BigInt) -> Self::Point {
        self.mul(secret, self.generator())
    }
}
