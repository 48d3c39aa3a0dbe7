//! Public key recovery from a signature, its digest and a recovery id

use num_bigint::BigInt;
use num_integer::Integer;

use crate::backend::CurveBackend;
use crate::digest::Digest;
use crate::ecdsa::Signature;

/// Recover the public key point that would make `signature` valid for `digest`.
///
/// Bit 1 of `recovery_id` selects `x = r + n`, bit 0 the parity of the nonce
/// point's y. The key is `r^-1 * (s*R - e*G)`, computed as
/// `(-e * r^-1) * G + (s * r^-1) * R` so only non-negative scalars are used.
/// Returns `None` when the candidate nonce point does not exist.
pub fn recover_public_key<B: CurveBackend>(
    backend: &B,
    signature: &Signature,
    digest: &Digest,
    recovery_id: u8,
) -> Option<B::Point> {
    if !signature.in_range(backend) || recovery_id > 3 {
        return None;
    }
    let n = backend.order();

    let mut x = signature.r.clone();
    if recovery_id & 2 != 0 {
        x += n;
    }
    let nonce_point = backend.lift_x(&x, recovery_id & 1 == 1)?;

    let r_inv = backend.invert(&signature.r)?;
    let e = digest.to_scalar();
    let u1 = (-(e * &r_inv)).mod_floor(n);
    let u2 = (&signature.s * &r_inv).mod_floor(n);

    let point = backend.add(
        &backend.mul(&u1, backend.generator()),
        &backend.mul(&u2, &nonce_point),
    );
    // the identity is not a public key
    backend.x_coordinate(&point)?;
    Some(point)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::toy::ToyGroup;
    use crate::bitcoin::Secp256k1;
    use crate::codec::RecoverableSignature;
    use crate::digest::message_digest;
    use crate::keys::PrivateKey;

    #[test]
    fn test_recover_known_signature() {
        let key = PrivateKey::from_wif("5JeWZ1z6sRcLTJXdQEDdB986E6XfLAkj9CgNE4EHzr5GmjrVFpf")
            .unwrap();
        let sig = RecoverableSignature::from_base64(
            "HDiv4Oe9SjM1FFVbKk4m3N34efYiRgkQGGoEm564ldYt44jHVTuX23+WnihNMi4vujvpUs1M529P3kftjDezn9E=",
        )
        .unwrap();
        let digest = message_digest("test message").unwrap();

        let recovered = recover_public_key(&Secp256k1, &sig.signature(), &digest, 1).unwrap();
        assert_eq!(recovered, key.public_key().point);

        let other = recover_public_key(&Secp256k1, &sig.signature(), &digest, 0).unwrap();
        assert_ne!(other, key.public_key().point);

        // r + n exceeds the field size
        assert!(recover_public_key(&Secp256k1, &sig.signature(), &digest, 2).is_none());
        assert!(recover_public_key(&Secp256k1, &sig.signature(), &digest, 3).is_none());
    }

    #[test]
    fn test_toy_group_recovery() {
        let backend = ToyGroup::new();
        let secret = BigInt::from(987_654_321);
        let public = backend.public_point(&secret);
        let digest = message_digest("recover me").unwrap();
        let sig = backend.sign_prehash(&secret, &digest).unwrap();

        let matches: Vec<u8> = (0..4)
            .filter(|&id| recover_public_key(&backend, &sig, &digest, id) == Some(public.clone()))
            .collect();
        assert_eq!(matches.len(), 1);
        assert!(matches[0] < 2);
    }

    #[test]
    fn test_invalid_inputs() {
        let backend = ToyGroup::new();
        let digest = message_digest("x").unwrap();
        let zero_r = Signature::new(BigInt::from(0), BigInt::from(5));
        assert!(recover_public_key(&backend, &zero_r, &digest, 0).is_none());
        let sig = Signature::new(BigInt::from(3), BigInt::from(5));
        assert!(recover_public_key(&backend, &sig, &digest, 4).is_none());
    }
}
