//! Elliptic Curve Digital Signature Algorithm (ECDSA)
//! Verification over a prepared digest, plus DER parsing.
//! Raw signing is a [`CurveBackend`] capability.

use num_bigint::{BigInt, Sign};
use num_integer::Integer;

use crate::backend::CurveBackend;
use crate::digest::Digest;
use crate::error::{Result, SignedMessageError};

/// ECDSA Signature (r, s)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    pub r: BigInt,
    pub s: BigInt,
}

fn der_error(reason: &str) -> SignedMessageError {
    SignedMessageError::InvalidFormat(format!("DER signature: {reason}"))
}

/// Read one `0x02 len value` INTEGER, returning it and the remaining input
fn read_der_int(input: &[u8]) -> Result<(BigInt, &[u8])> {
    let (&marker, rest) = input.split_first().ok_or_else(|| der_error("missing integer"))?;
    if marker != 0x02 {
        return Err(der_error("invalid integer marker"));
    }
    let (&len, rest) = rest.split_first().ok_or_else(|| der_error("missing integer length"))?;
    let len = len as usize;
    if len == 0 || rest.len() < len {
        return Err(der_error("truncated integer"));
    }
    let (value, rest) = rest.split_at(len);
    Ok((BigInt::from_bytes_be(Sign::Plus, value), rest))
}

/// Largest INTEGER body `to_der` emits: a 32-byte scalar plus a sign pad
const MAX_DER_INT_LEN: usize = 33;

/// Minimal positive DER integer body
fn der_int_body(n: &BigInt) -> Result<Vec<u8>> {
    let (sign, mut bytes) = n.to_bytes_be();
    if sign == Sign::Minus {
        return Err(der_error("negative integer"));
    }
    if bytes.is_empty() {
        bytes.push(0);
    }
    if bytes[0] >= 0x80 {
        bytes.insert(0, 0x00);
    }
    if bytes.len() > MAX_DER_INT_LEN {
        return Err(der_error("integer wider than 256 bits"));
    }
    Ok(bytes)
}

impl Signature {
    pub fn new(r: BigInt, s: BigInt) -> Self {
        Signature { r, s }
    }

    /// Decode from DER format
    /// Format: 0x30 [total-length] 0x02 [R-length] [R] 0x02 [S-length] [S]
    pub fn from_der(der: &[u8]) -> Result<Self> {
        let (&marker, rest) = der.split_first().ok_or_else(|| der_error("empty input"))?;
        if marker != 0x30 {
            return Err(der_error("invalid sequence marker"));
        }
        let (&total_len, body) = rest.split_first().ok_or_else(|| der_error("missing length"))?;
        if total_len as usize != body.len() {
            return Err(der_error("length mismatch"));
        }

        let (r, rest) = read_der_int(body)?;
        let (s, rest) = read_der_int(rest)?;
        if !rest.is_empty() {
            return Err(der_error("trailing bytes"));
        }
        Ok(Signature { r, s })
    }

    /// Encode to DER format. Both values must be non-negative and fit in
    /// 256 bits, which keeps every length within one byte.
    pub fn to_der(&self) -> Result<Vec<u8>> {
        let mut content = Vec::with_capacity(2 * (MAX_DER_INT_LEN + 2));
        for value in [&self.r, &self.s] {
            let body = der_int_body(value)?;
            content.push(0x02);
            content.push(body.len() as u8);
            content.extend(body);
        }

        let mut result = vec![0x30, content.len() as u8];
        result.extend(content);
        Ok(result)
    }

    /// Whether both scalars lie in `[1, n-1]`
    #[must_use]
    pub fn in_range<B: CurveBackend>(&self, backend: &B) -> bool {
        backend.is_valid_scalar(&self.r) && backend.is_valid_scalar(&self.s)
    }
}

/// Verify `signature` over `digest` against a known public key point.
///
/// Out-of-range scalars and a sum at infinity are plain rejections.
#[must_use]
pub fn verify_digest<B: CurveBackend>(
    backend: &B,
    signature: &Signature,
    digest: &Digest,
    public_point: &B::Point,
) -> bool {
    if !signature.in_range(backend) {
        return false;
    }
    let n = backend.order();
    let z = digest.to_scalar();

    let Some(w) = backend.invert(&signature.s) else {
        return false;
    };
    let u1 = (&z * &w).mod_floor(n);
    let u2 = (&signature.r * &w).mod_floor(n);

    let p1 = backend.mul(&u1, backend.generator());
    let p2 = backend.mul(&u2, public_point);
    match backend.x_coordinate(&backend.add(&p1, &p2)) {
        Some(x) => x.mod_floor(n) == signature.r,
        None => false,
    }
}
