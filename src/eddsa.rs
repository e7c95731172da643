//! Ed25519 signatures ([EdDSA]) as specified by [RFC 8032]: key derivation,
//! signing, and verification.
//!
//! Verification is available under two predicates. [`VerificationMode::Zip215`]
//! (the default) follows [ZIP 215], the permissive rule set that guarantees
//! agreement between implementations in consensus-critical systems.
//! [`VerificationMode::Strict`] follows RFC 8032 / FIPS 186-5 and
//! additionally rejects small-order public keys and non-canonical point
//! encodings. The signing path is identical under both.
//!
//! Every operation exists in a synchronous and an asynchronous flavor over
//! the same primitive steps; only the SHA-512 invocations differ. The
//! [`Sha512Builder`] default can be swapped for any [`BuildDigest`] /
//! [`AsyncDigest512`] implementation.
//!
//! [EdDSA]: https://en.wikipedia.org/wiki/EdDSA
//! [RFC 8032]: https://www.rfc-editor.org/rfc/rfc8032
//! [ZIP 215]: https://zips.z.cash/zip-0215

#![allow(non_snake_case)]

use alloc::string::String;

use num_traits::Zero;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::{
    arithmetic::{
        uint::{U256, WideUint},
        BigInteger,
    },
    curve::{
        scalar_mul,
        te::{Affine, Projective},
        PrimeGroup,
    },
    encoding,
    encoding::Input,
    error::{Error, Result},
    field::prime::PrimeField,
    hash::{AsyncDigest512, BuildDigest, Sha512Builder},
};

pub use crate::curve::te::instance::ed25519::{
    CompressedPointY, Ed25519Config, Fq, Fr, SQRT_MINUS_ONE,
};

/// The length of an Ed25519 secret seed in bytes.
pub const SECRET_KEY_LENGTH: usize = 32;
/// The length of an Ed25519 compressed public key in bytes.
pub const PUBLIC_KEY_LENGTH: usize = 32;
/// The length of an Ed25519 signature in bytes.
pub const SIGNATURE_LENGTH: usize = 64;

/// Ed25519 secret key as defined in [RFC 8032 §5.1.5]: 32 octets of
/// cryptographically secure random data.
///
/// [RFC 8032 §5.1.5]: https://www.rfc-editor.org/rfc/rfc8032#section-5.1.5
pub type SecretKey = [u8; SECRET_KEY_LENGTH];

/// Ed25519 scalar, an integer modulo the prime group order.
pub type Scalar = Fr;

/// Ed25519 point in extended twisted Edwards coordinates.
pub type EdwardsPoint = Projective<Ed25519Config>;

/// Ed25519 point in affine coordinates.
pub type AffinePoint = Affine<Ed25519Config>;

/// The predicate applied when verifying a signature.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum VerificationMode {
    /// The [ZIP 215] rules: non-canonical point encodings are tolerated and
    /// small-order public keys are accepted. Use this wherever multiple
    /// implementations must agree on validity.
    ///
    /// [ZIP 215]: https://zips.z.cash/zip-0215
    #[default]
    Zip215,
    /// The strict RFC 8032 / FIPS 186-5 rules: point encodings must be
    /// canonical and small-order public keys are rejected, which makes
    /// signatures strongly bind their public key.
    Strict,
}

/// Clamps the given little-endian representation of a 32-byte integer.
///
/// Clamping clears the three least significant bits, forcing the scalar to
/// be a multiple of the cofactor, and replaces the two most significant
/// bits by `01`, fixing the scalar's bit length.
#[must_use]
pub const fn clamp_integer(mut bytes: [u8; 32]) -> [u8; 32] {
    bytes[0] &= 0b1111_1000;
    bytes[31] &= 0b0111_1111;
    bytes[31] |= 0b0100_0000;
    bytes
}

/// Interpret a 64-byte digest as a little-endian integer and reduce it
/// modulo the group order.
fn reduce_wide(digest: [u8; 64]) -> Scalar {
    let low = U256::from_bytes_le(&digest[..32]);
    let high = U256::from_bytes_le(&digest[32..]);
    let wide = WideUint::new(low, high);
    Scalar::from_bigint(wide.ct_rem(&<Scalar as PrimeField>::MODULUS))
}

/// The secret scalar and domain separator derived from the SHA-512 digest
/// of the seed, as in [RFC 8032 §5.1.5].
///
/// In the usual Ed25519 signing algorithm, `head || prefix = H(seed)`;
/// `head` is clamped and reduced into the secret scalar, while `prefix`
/// separates the pseudorandom nonce from the scalar.
///
/// Instances are overwritten with zeroes when they fall out of scope.
///
/// [RFC 8032 §5.1.5]: https://www.rfc-editor.org/rfc/rfc8032#section-5.1.5
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct ExpandedSecretKey {
    /// The clamped first half of the seed digest.
    pub head: [u8; 32],
    /// The domain separator hashed in front of the message when deriving
    /// the nonce.
    pub prefix: [u8; 32],
    /// The secret scalar used for signing: `head` as a little-endian
    /// integer, reduced modulo the group order.
    pub scalar: Scalar,
}

impl ExpandedSecretKey {
    pub(crate) fn from_seed_digest(digest: [u8; 64]) -> Self {
        let mut head = [0u8; 32];
        let mut prefix = [0u8; 32];
        head.copy_from_slice(&digest[..32]);
        prefix.copy_from_slice(&digest[32..]);

        let head = clamp_integer(head);
        let scalar = Scalar::from_bigint(U256::from_bytes_le(&head));
        Self { head, prefix, scalar }
    }
}

/// An Ed25519 public key.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct VerifyingKey {
    /// Edwards point used for curve arithmetic operations.
    point: EdwardsPoint,
    /// The 32-byte compressed form, kept verbatim so verification can apply
    /// mode-specific canonicality rules to the original encoding.
    compressed: CompressedPointY,
}

/// The mode-dependent parsing half of verification. Holds everything needed
/// to finish once the challenge digest is available.
struct VerificationTask {
    A: EdwardsPoint,
    R: EdwardsPoint,
    s: Scalar,
}

impl VerificationTask {
    /// Accept iff `[8] (R + k * A - s * B)` is the identity.
    fn accepts(&self, challenge: [u8; 64]) -> bool {
        let k = reduce_wide(challenge);
        let sB = scalar_mul::basepoint_mul_unrestricted(&self.s);
        let kA = scalar_mul::mul_unrestricted(&self.A, &k);
        (self.R + kA - sB).mul_by_cofactor().is_zero()
    }
}

impl VerifyingKey {
    /// Parse a public key from its 32-byte compressed form.
    ///
    /// Decoding is permissive (ZIP 215); strict verification re-checks the
    /// stored encoding against the canonical rules.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPoint`] if the bytes decode to no curve
    /// point.
    pub fn from_bytes(bytes: &[u8; PUBLIC_KEY_LENGTH]) -> Result<Self> {
        let compressed = CompressedPointY::from_bytes(*bytes);
        Ok(Self { point: compressed.decode()?, compressed })
    }

    /// Parse a public key from a 64-digit hex string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidEncoding`] on malformed hex and
    /// [`Error::InvalidPoint`] if the bytes decode to no curve point.
    pub fn from_hex(hex: &str) -> Result<Self> {
        Self::from_bytes(&encoding::normalize(Input::Hex(hex))?)
    }

    /// Build a public key from a curve point.
    #[must_use]
    pub fn from_point(point: EdwardsPoint) -> Self {
        Self { point, compressed: point.compress() }
    }

    /// The public key as a curve point.
    #[must_use]
    pub fn point(&self) -> &EdwardsPoint {
        &self.point
    }

    /// The 32-byte compressed form.
    #[must_use]
    pub fn to_bytes(&self) -> [u8; PUBLIC_KEY_LENGTH] {
        *self.compressed.as_bytes()
    }

    /// Borrow the 32-byte compressed form.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_LENGTH] {
        self.compressed.as_bytes()
    }

    /// The compressed form as lowercase hex.
    #[must_use]
    pub fn to_hex(&self) -> String {
        self.compressed.to_hex()
    }

    /// Verify a signature on a message under the given mode.
    #[must_use]
    pub fn verify(
        &self,
        message: &[u8],
        signature: &Signature,
        mode: VerificationMode,
    ) -> bool {
        self.verify_with(&Sha512Builder, message, signature, mode)
    }

    /// Verify a signature, hashing through the supplied digest builder.
    #[must_use]
    pub fn verify_with<D: BuildDigest>(
        &self,
        digest: &D,
        message: &[u8],
        signature: &Signature,
        mode: VerificationMode,
    ) -> bool {
        let Some(task) = self.prepare_verification(signature, mode) else {
            return false;
        };
        let challenge = digest.digest_parts(&[
            signature.r_bytes().as_slice(),
            self.compressed.as_ref(),
            message,
        ]);
        task.accepts(challenge)
    }

    /// Verify a signature, hashing through the supplied asynchronous
    /// digest.
    pub async fn verify_async<D: AsyncDigest512>(
        &self,
        digest: &D,
        message: &[u8],
        signature: &Signature,
        mode: VerificationMode,
    ) -> bool {
        let Some(task) = self.prepare_verification(signature, mode) else {
            return false;
        };
        let challenge = digest
            .digest(&[
                signature.r_bytes().as_slice(),
                self.compressed.as_ref(),
                message,
            ])
            .await;
        task.accepts(challenge)
    }

    /// Apply the mode-specific parsing rules. `None` means the signature
    /// cannot verify, whatever the message.
    fn prepare_verification(
        &self,
        signature: &Signature,
        mode: VerificationMode,
    ) -> Option<VerificationTask> {
        let (A, R) = match mode {
            VerificationMode::Zip215 => {
                (self.point, signature.R.decode().ok()?)
            }
            VerificationMode::Strict => {
                let A = self.compressed.decode_strict().ok()?;
                if A.is_small_order() {
                    return None;
                }
                (A, signature.R.decode_strict().ok()?)
            }
        };
        Some(VerificationTask { A, R, s: signature.s })
    }
}

impl From<&ExpandedSecretKey> for VerifyingKey {
    fn from(expanded: &ExpandedSecretKey) -> Self {
        Self::from_point(EdwardsPoint::generator() * expanded.scalar)
    }
}

/// Ed25519 signing key which can be used to produce signatures.
///
/// Invariant: `verifying_key` is always the public key of `signing_key`.
/// Deriving both from the seed up front prevents signing-oracle misuse
/// where a caller supplies a mismatched public key.
#[derive(Clone)]
pub struct SigningKey {
    /// The secret half of this signing key.
    signing_key: ExpandedSecretKey,
    /// The public half of this signing key.
    verifying_key: VerifyingKey,
}

impl SigningKey {
    /// Derive a signing key from a 32-byte seed, per [RFC 8032 §5.1.5].
    ///
    /// [RFC 8032 §5.1.5]: https://www.rfc-editor.org/rfc/rfc8032#section-5.1.5
    #[must_use]
    pub fn from_bytes(secret_key: &SecretKey) -> Self {
        Self::from_bytes_with(&Sha512Builder, secret_key)
    }

    /// Derive a signing key, hashing through the supplied digest builder.
    #[must_use]
    pub fn from_bytes_with<D: BuildDigest>(
        digest: &D,
        secret_key: &SecretKey,
    ) -> Self {
        Self::from_seed_digest(digest.digest_parts(&[secret_key.as_slice()]))
    }

    /// Derive a signing key, hashing through the supplied asynchronous
    /// digest.
    pub async fn from_bytes_async<D: AsyncDigest512>(
        digest: &D,
        secret_key: &SecretKey,
    ) -> Self {
        Self::from_seed_digest(
            digest.digest(&[secret_key.as_slice()]).await,
        )
    }

    /// Derive a signing key from a 64-digit hex seed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidEncoding`] on malformed hex.
    pub fn from_hex(hex: &str) -> Result<Self> {
        Ok(Self::from_bytes(&encoding::normalize(Input::Hex(hex))?))
    }

    fn from_seed_digest(digest: [u8; 64]) -> Self {
        let signing_key = ExpandedSecretKey::from_seed_digest(digest);
        let verifying_key = VerifyingKey::from(&signing_key);
        Self { signing_key, verifying_key }
    }

    /// Get the [`VerifyingKey`] for this [`SigningKey`].
    #[must_use]
    pub fn verifying_key(&self) -> VerifyingKey {
        self.verifying_key
    }

    /// Borrow the expanded secret key backing this signing key.
    #[must_use]
    pub fn expanded(&self) -> &ExpandedSecretKey {
        &self.signing_key
    }

    /// Sign a message, per [RFC 8032 §5.1.6]. Signing is deterministic: no
    /// randomness is sampled, and equal inputs produce byte-identical
    /// signatures.
    ///
    /// [RFC 8032 §5.1.6]: https://www.rfc-editor.org/rfc/rfc8032#section-5.1.6
    #[must_use]
    pub fn sign(&self, message: &[u8]) -> Signature {
        self.sign_with(&Sha512Builder, message)
    }

    /// Sign a message, hashing through the supplied digest builder.
    #[must_use]
    pub fn sign_with<D: BuildDigest>(
        &self,
        digest: &D,
        message: &[u8],
    ) -> Signature {
        let nonce = digest
            .digest_parts(&[self.signing_key.prefix.as_slice(), message]);
        let (r, R) = self.commit_nonce(nonce);

        let challenge = digest.digest_parts(&[
            R.as_bytes().as_slice(),
            self.verifying_key.as_bytes().as_slice(),
            message,
        ]);
        self.issue(r, R, challenge)
    }

    /// Sign a message, hashing through the supplied asynchronous digest.
    pub async fn sign_async<D: AsyncDigest512>(
        &self,
        digest: &D,
        message: &[u8],
    ) -> Signature {
        let nonce = digest
            .digest(&[self.signing_key.prefix.as_slice(), message])
            .await;
        let (r, R) = self.commit_nonce(nonce);

        let challenge = digest
            .digest(&[
                R.as_bytes().as_slice(),
                self.verifying_key.as_bytes().as_slice(),
                message,
            ])
            .await;
        self.issue(r, R, challenge)
    }

    /// Reduce the nonce digest into `r` and commit to `R = r * B`.
    fn commit_nonce(&self, nonce: [u8; 64]) -> (Scalar, CompressedPointY) {
        let r = reduce_wide(nonce);
        let R = (EdwardsPoint::generator() * r).compress();
        (r, R)
    }

    /// Finish the signature: `s = r + H(R || A || M) * scalar mod l`.
    fn issue(
        &self,
        r: Scalar,
        R: CompressedPointY,
        challenge: [u8; 64],
    ) -> Signature {
        let k = reduce_wide(challenge);
        let s = (k * self.signing_key.scalar) + r;
        Signature { R, s }
    }
}

/// Ed25519 signature: a commitment point `R` and a response scalar `s`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Signature {
    /// The compressed commitment `R = r * B`, where `r` is the nonce
    /// derived by hashing the prefix with the message. Kept in compressed
    /// form; verification decodes it under the selected mode.
    R: CompressedPointY,
    /// The response scalar, always below the group order.
    s: Scalar,
}

impl Signature {
    /// Parse a signature from its 64-byte wire form, `R || s` with `s` in
    /// little-endian order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidScalar`] when `s` is not below the group
    /// order; such encodings are malleable and rejected under every
    /// verification mode.
    pub fn from_bytes(bytes: &[u8; SIGNATURE_LENGTH]) -> Result<Self> {
        let mut r_bytes = [0u8; 32];
        r_bytes.copy_from_slice(&bytes[..32]);

        let s_repr = U256::from_bytes_le(&bytes[32..]);
        if s_repr >= <Scalar as PrimeField>::MODULUS {
            return Err(Error::InvalidScalar);
        }

        Ok(Self {
            R: CompressedPointY::from_bytes(r_bytes),
            s: Scalar::from_bigint(s_repr),
        })
    }

    /// Parse a signature from a 128-digit hex string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidEncoding`] on malformed hex and
    /// [`Error::InvalidScalar`] on an out-of-range response scalar.
    pub fn from_hex(hex: &str) -> Result<Self> {
        Self::from_bytes(&encoding::normalize(Input::Hex(hex))?)
    }

    /// Serialize to the 64-byte wire form.
    #[must_use]
    pub fn to_bytes(&self) -> [u8; SIGNATURE_LENGTH] {
        let mut bytes = [0u8; SIGNATURE_LENGTH];
        bytes[..32].copy_from_slice(self.R.as_bytes());
        bytes[32..]
            .copy_from_slice(&self.s.into_bigint().into_bytes_le());
        bytes
    }

    /// Serialize to lowercase hex.
    #[must_use]
    pub fn to_hex(&self) -> String {
        encoding::bytes_to_hex(&self.to_bytes())
    }

    /// The compressed commitment half of the signature.
    #[must_use]
    pub fn r_bytes(&self) -> &[u8; 32] {
        self.R.as_bytes()
    }
}

/// The expanded key material of [RFC 8032 §5.1.5] together with the derived
/// public point, as returned by [`get_extended_public_key`].
///
/// [RFC 8032 §5.1.5]: https://www.rfc-editor.org/rfc/rfc8032#section-5.1.5
#[derive(Clone)]
pub struct ExtendedPublicKey {
    /// The clamped first half of the seed digest.
    pub head: [u8; 32],
    /// The nonce domain separator.
    pub prefix: [u8; 32],
    /// The secret scalar.
    pub scalar: Scalar,
    /// The public point `scalar * B`.
    pub point: EdwardsPoint,
    /// The compressed public point.
    pub point_bytes: [u8; PUBLIC_KEY_LENGTH],
}

/// Derive the 32-byte public key for a seed, per [RFC 8032 §5.1.5].
///
/// The seed is accepted as 32 raw bytes or 64 hex digits.
///
/// # Errors
///
/// Returns [`Error::InvalidEncoding`] for a malformed seed.
///
/// [RFC 8032 §5.1.5]: https://www.rfc-editor.org/rfc/rfc8032#section-5.1.5
pub fn get_public_key<'a>(
    seed: impl Into<Input<'a>>,
) -> Result<[u8; PUBLIC_KEY_LENGTH]> {
    let seed: SecretKey = encoding::normalize(seed.into())?;
    Ok(SigningKey::from_bytes(&seed).verifying_key().to_bytes())
}

/// Asynchronous counterpart of [`get_public_key`].
///
/// # Errors
///
/// Returns [`Error::InvalidEncoding`] for a malformed seed.
pub async fn get_public_key_async<'a>(
    seed: impl Into<Input<'a>>,
) -> Result<[u8; PUBLIC_KEY_LENGTH]> {
    let seed: SecretKey = encoding::normalize(seed.into())?;
    let key = SigningKey::from_bytes_async(&Sha512Builder, &seed).await;
    Ok(key.verifying_key().to_bytes())
}

/// Derive the expanded key material and public point for a seed.
///
/// # Errors
///
/// Returns [`Error::InvalidEncoding`] for a malformed seed.
pub fn get_extended_public_key<'a>(
    seed: impl Into<Input<'a>>,
) -> Result<ExtendedPublicKey> {
    let seed: SecretKey = encoding::normalize(seed.into())?;
    let key = SigningKey::from_bytes(&seed);
    Ok(ExtendedPublicKey {
        head: key.signing_key.head,
        prefix: key.signing_key.prefix,
        scalar: key.signing_key.scalar,
        point: key.verifying_key.point,
        point_bytes: key.verifying_key.to_bytes(),
    })
}

/// Sign a message with a seed, per [RFC 8032 §5.1.6]. Both inputs are
/// accepted as raw bytes or hex.
///
/// # Errors
///
/// Returns [`Error::InvalidEncoding`] for a malformed seed or message.
///
/// [RFC 8032 §5.1.6]: https://www.rfc-editor.org/rfc/rfc8032#section-5.1.6
pub fn sign<'m, 's>(
    message: impl Into<Input<'m>>,
    seed: impl Into<Input<'s>>,
) -> Result<[u8; SIGNATURE_LENGTH]> {
    let message = encoding::normalize_message(message.into())?;
    let seed: SecretKey = encoding::normalize(seed.into())?;
    Ok(SigningKey::from_bytes(&seed).sign(&message).to_bytes())
}

/// Asynchronous counterpart of [`sign`].
///
/// # Errors
///
/// Returns [`Error::InvalidEncoding`] for a malformed seed or message.
pub async fn sign_async<'m, 's>(
    message: impl Into<Input<'m>>,
    seed: impl Into<Input<'s>>,
) -> Result<[u8; SIGNATURE_LENGTH]> {
    let message = encoding::normalize_message(message.into())?;
    let seed: SecretKey = encoding::normalize(seed.into())?;
    let key = SigningKey::from_bytes_async(&Sha512Builder, &seed).await;
    Ok(key.sign_async(&Sha512Builder, &message).await.to_bytes())
}

/// Verify a signature over a message for a public key, per
/// [RFC 8032 §5.1.7] with the ZIP 215 option.
///
/// All inputs are accepted as raw bytes or hex. Malformed inputs of any
/// kind verify as `false`; this function does not fail.
///
/// [RFC 8032 §5.1.7]: https://www.rfc-editor.org/rfc/rfc8032#section-5.1.7
#[must_use]
pub fn verify<'s, 'm, 'p>(
    signature: impl Into<Input<'s>>,
    message: impl Into<Input<'m>>,
    public_key: impl Into<Input<'p>>,
    mode: VerificationMode,
) -> bool {
    let Ok(signature_bytes) =
        encoding::normalize::<SIGNATURE_LENGTH>(signature.into())
    else {
        return false;
    };
    let Ok(message) = encoding::normalize_message(message.into()) else {
        return false;
    };
    let Ok(key_bytes) =
        encoding::normalize::<PUBLIC_KEY_LENGTH>(public_key.into())
    else {
        return false;
    };

    let Ok(signature) = Signature::from_bytes(&signature_bytes) else {
        return false;
    };
    let Ok(key) = VerifyingKey::from_bytes(&key_bytes) else {
        return false;
    };

    key.verify(&message, &signature, mode)
}

/// Asynchronous counterpart of [`verify`].
pub async fn verify_async<'s, 'm, 'p>(
    signature: impl Into<Input<'s>>,
    message: impl Into<Input<'m>>,
    public_key: impl Into<Input<'p>>,
    mode: VerificationMode,
) -> bool {
    let Ok(signature_bytes) =
        encoding::normalize::<SIGNATURE_LENGTH>(signature.into())
    else {
        return false;
    };
    let Ok(message) = encoding::normalize_message(message.into()) else {
        return false;
    };
    let Ok(key_bytes) =
        encoding::normalize::<PUBLIC_KEY_LENGTH>(public_key.into())
    else {
        return false;
    };

    let Ok(signature) = Signature::from_bytes(&signature_bytes) else {
        return false;
    };
    let Ok(key) = VerifyingKey::from_bytes(&key_bytes) else {
        return false;
    };

    key.verify_async(&Sha512Builder, &message, &signature, mode).await
}

/// Sample a fresh secret seed from the platform CSPRNG.
///
/// # Errors
///
/// Returns [`Error::RandomSource`] when the platform randomness source is
/// unavailable.
#[cfg(feature = "rand")]
pub fn random_seed() -> Result<SecretKey> {
    use rand::TryRngCore;

    let mut seed = [0u8; SECRET_KEY_LENGTH];
    rand::rngs::OsRng
        .try_fill_bytes(&mut seed)
        .map_err(|_| Error::RandomSource)?;
    Ok(seed)
}

#[cfg(all(test, feature = "std"))]
mod tests {
    use futures::executor::block_on;
    use hex_literal::hex;
    use proptest::prelude::*;

    use super::*;

    // Test vectors from RFC 8032 §7.1.

    const SEED_1: [u8; 32] =
        hex!("9d61b19deffd5a60ba844af492ec2cc44449c5697b326919703bac031cae7f60");
    const PUBLIC_1: [u8; 32] =
        hex!("d75a980182b10ab7d54bfed3c964073a0ee172f3daa62325af021a68f707511a");
    const SIGNATURE_1: [u8; 64] = hex!(
        "e5564300c360ac729086e2cc806e828a84877f1eb8e5d974d873e06522490155"
        "5fb8821590a33bacc61e39701cf9b46bd25bf5f0595bbe24655141438e7a100b"
    );

    const SEED_2: [u8; 32] =
        hex!("4ccd089b28ff96da9db6c346ec114e0f5b8a319f35aba624da8cf6ed4fb8a6fb");
    const PUBLIC_2: [u8; 32] =
        hex!("3d4017c3e843895a92b70aa74d1b7ebc9c982ccf2ec4968cc0cd55f12af4660c");
    const MESSAGE_2: [u8; 1] = hex!("72");
    const SIGNATURE_2: [u8; 64] = hex!(
        "92a009a9f0d4cab8720e820b5f642540a2b27b5416503f8fb3762223ebdb69da"
        "085ac1e43e15996e458f3613d0f11d8c387b2eaeb4302aeeb00d291612bb0c00"
    );

    const SEED_3: [u8; 32] =
        hex!("c5aa8df43f9f837bedb7442f31dcb7b166d38535076f094b85ce3a2e0b4458f7");
    const PUBLIC_3: [u8; 32] =
        hex!("fc51cd8e6218a1a38da47ed00230f0580816ed13ba3303ac5deb911548908025");
    const MESSAGE_3: [u8; 2] = hex!("af82");
    const SIGNATURE_3: [u8; 64] = hex!(
        "6291d657deec24024827e69c3abe01a30ce548a284743a445e3680d7db5ac3ac"
        "18ff9b538d16f290ae67f760984dc6594a7c15e9716ed28dc027beceea1ec40a"
    );

    /// A small-order public key (order 8) and a signature over any message
    /// that the cofactored equation accepts: `R` is the identity and `s` is
    /// zero, so `[8](R + k * A - s * B) = k * [8]A = O`.
    const SMALL_ORDER_PUBLIC: [u8; 32] =
        hex!("c7176a703d4dd84fba3c0b760d10670f2a2053fa2c39ccc64ec7fd7792ac037a");
    const SMALL_ORDER_SIGNATURE: [u8; 64] = hex!(
        "0100000000000000000000000000000000000000000000000000000000000000"
        "0000000000000000000000000000000000000000000000000000000000000000"
    );

    #[test]
    fn rfc8032_public_keys() {
        assert_eq!(get_public_key(&SEED_1).unwrap(), PUBLIC_1);
        assert_eq!(get_public_key(&SEED_2).unwrap(), PUBLIC_2);
        assert_eq!(get_public_key(&SEED_3).unwrap(), PUBLIC_3);
    }

    #[test]
    fn rfc8032_signatures() {
        assert_eq!(sign(b"".as_slice(), &SEED_1).unwrap(), SIGNATURE_1);
        assert_eq!(sign(&MESSAGE_2, &SEED_2).unwrap(), SIGNATURE_2);
        assert_eq!(sign(&MESSAGE_3, &SEED_3).unwrap(), SIGNATURE_3);
    }

    #[test]
    fn rfc8032_signatures_verify_in_both_modes() {
        for mode in [VerificationMode::Zip215, VerificationMode::Strict] {
            assert!(verify(&SIGNATURE_1, b"".as_slice(), &PUBLIC_1, mode));
            assert!(verify(&SIGNATURE_2, &MESSAGE_2, &PUBLIC_2, mode));
            assert!(verify(&SIGNATURE_3, &MESSAGE_3, &PUBLIC_3, mode));
        }
    }

    #[test]
    fn hex_inputs_are_accepted_case_insensitively() {
        let seed_hex =
            "4CCD089B28FF96DA9DB6C346EC114E0F5B8A319F35ABA624DA8CF6ED4FB8A6FB";
        assert_eq!(get_public_key(seed_hex).unwrap(), PUBLIC_2);
        assert_eq!(sign("72", seed_hex).unwrap(), SIGNATURE_2);
    }

    #[test]
    fn tampered_message_fails_verification() {
        let mut message = MESSAGE_2;
        message[0] ^= 0x01;
        for mode in [VerificationMode::Zip215, VerificationMode::Strict] {
            assert!(!verify(&SIGNATURE_2, &message, &PUBLIC_2, mode));
        }
    }

    #[test]
    fn every_flipped_signature_byte_fails_verification() {
        for index in 0..SIGNATURE_LENGTH {
            let mut corrupted = SIGNATURE_2;
            corrupted[index] ^= 0x04;
            assert!(
                !verify(
                    &corrupted,
                    &MESSAGE_2,
                    &PUBLIC_2,
                    VerificationMode::Strict,
                ),
                "corrupting byte {index} should invalidate the signature",
            );
        }
    }

    #[test]
    fn response_scalar_above_group_order_is_rejected() {
        // Replace s by s + l, an equivalent residue with a non-canonical
        // encoding.
        let order = <Scalar as PrimeField>::MODULUS;
        let s = U256::from_bytes_le(&SIGNATURE_2[32..]);
        let (lifted, carry) = s.ct_adc(&order, 0);
        assert_eq!(carry, 0);

        let mut forged = SIGNATURE_2;
        forged[32..].copy_from_slice(&lifted.into_bytes_le());

        assert_eq!(
            Signature::from_bytes(&forged),
            Err(Error::InvalidScalar)
        );
        for mode in [VerificationMode::Zip215, VerificationMode::Strict] {
            assert!(!verify(&forged, &MESSAGE_2, &PUBLIC_2, mode));
        }
    }

    #[test]
    fn public_key_bytes_round_trip() {
        let key = VerifyingKey::from_bytes(&PUBLIC_1).unwrap();
        assert_eq!(key.to_bytes(), PUBLIC_1);
        assert_eq!(
            VerifyingKey::from_hex(&key.to_hex()).unwrap(),
            key,
        );
    }

    #[test]
    fn signature_encoding_round_trips() {
        let signature = Signature::from_bytes(&SIGNATURE_2).unwrap();
        assert_eq!(signature.to_bytes(), SIGNATURE_2);
        assert_eq!(
            Signature::from_hex(&signature.to_hex()).unwrap(),
            signature,
        );
    }

    #[test]
    fn signing_is_deterministic() {
        let key = SigningKey::from_bytes(&SEED_2);
        assert_eq!(
            key.sign(&MESSAGE_2).to_bytes(),
            key.sign(&MESSAGE_2).to_bytes(),
        );
    }

    #[test]
    fn small_order_public_key_splits_the_modes() {
        assert!(verify(
            &SMALL_ORDER_SIGNATURE,
            b"zcash ceremony".as_slice(),
            &SMALL_ORDER_PUBLIC,
            VerificationMode::Zip215,
        ));
        assert!(!verify(
            &SMALL_ORDER_SIGNATURE,
            b"zcash ceremony".as_slice(),
            &SMALL_ORDER_PUBLIC,
            VerificationMode::Strict,
        ));
    }

    #[test]
    fn non_canonical_public_key_splits_the_modes() {
        // y = p + 1: reduces to the identity point under ZIP 215 and is
        // rejected outright by the strict decoder.
        let mut key_bytes = [0xff_u8; 32];
        key_bytes[0] = 0xee;
        key_bytes[31] = 0x7f;

        let key = VerifyingKey::from_bytes(&key_bytes).unwrap();
        let signature =
            Signature::from_bytes(&SMALL_ORDER_SIGNATURE).unwrap();

        assert!(key.verify(b"", &signature, VerificationMode::Zip215));
        assert!(!key.verify(b"", &signature, VerificationMode::Strict));
    }

    #[test]
    fn undecodable_public_key_verifies_as_false() {
        // y = 2 has no square root; parsing fails, verification is false.
        let mut key_bytes = [0u8; 32];
        key_bytes[0] = 2;

        assert!(VerifyingKey::from_bytes(&key_bytes).is_err());
        assert!(!verify(
            &SIGNATURE_2,
            &MESSAGE_2,
            &key_bytes,
            VerificationMode::Zip215,
        ));
    }

    #[test]
    fn malformed_inputs_verify_as_false() {
        assert!(!verify(
            "zz",
            &MESSAGE_2,
            &PUBLIC_2,
            VerificationMode::Zip215,
        ));
        assert!(!verify(
            &SIGNATURE_2[..63],
            &MESSAGE_2,
            &PUBLIC_2,
            VerificationMode::Zip215,
        ));
    }

    #[test]
    fn extended_public_key_exposes_consistent_parts() {
        let extended = get_extended_public_key(&SEED_1).unwrap();

        // Clamping fixes the cofactor and top bits of the head.
        assert_eq!(extended.head[0] & 0b0000_0111, 0);
        assert_eq!(extended.head[31] & 0b1000_0000, 0);
        assert_eq!(extended.head[31] & 0b0100_0000, 0b0100_0000);

        assert_eq!(extended.point_bytes, PUBLIC_1);
        assert_eq!(
            EdwardsPoint::generator() * extended.scalar,
            extended.point,
        );
    }

    #[test]
    fn expanded_key_matches_signing_key_internals() {
        let key = SigningKey::from_bytes(&SEED_1);
        let extended = get_extended_public_key(&SEED_1).unwrap();
        assert_eq!(key.expanded().head, extended.head);
        assert_eq!(key.expanded().prefix, extended.prefix);
        assert_eq!(key.expanded().scalar, extended.scalar);
    }

    #[test]
    fn async_variants_match_sync_results() {
        assert_eq!(
            block_on(get_public_key_async(&SEED_2)).unwrap(),
            PUBLIC_2,
        );
        assert_eq!(
            block_on(sign_async(&MESSAGE_2, &SEED_2)).unwrap(),
            SIGNATURE_2,
        );
        assert!(block_on(verify_async(
            &SIGNATURE_2,
            &MESSAGE_2,
            &PUBLIC_2,
            VerificationMode::Strict,
        )));

        let key = SigningKey::from_bytes(&SEED_3);
        let signature =
            block_on(key.sign_async(&Sha512Builder, &MESSAGE_3));
        assert_eq!(signature.to_bytes(), SIGNATURE_3);
        assert!(block_on(key.verifying_key().verify_async(
            &Sha512Builder,
            &MESSAGE_3,
            &signature,
            VerificationMode::Strict,
        )));
    }

    #[test]
    fn sign_and_verify() {
        proptest!(|(seed: [u8; 32], message: Vec<u8>)| {
            let key = SigningKey::from_bytes(&seed);
            let signature = key.sign(&message);
            let verifying_key = key.verifying_key();

            for mode in
                [VerificationMode::Zip215, VerificationMode::Strict]
            {
                prop_assert!(
                    verifying_key.verify(&message, &signature, mode)
                );
            }

            // A different message must not verify.
            let mut other = message.clone();
            other.push(0x5a);
            prop_assert!(!verifying_key.verify(
                &other,
                &signature,
                VerificationMode::Zip215,
            ));
        });
    }

    #[cfg(feature = "rand")]
    #[test]
    fn random_seeds_produce_working_keys() {
        let seed_a = random_seed().unwrap();
        let seed_b = random_seed().unwrap();
        assert_ne!(seed_a, seed_b);

        let key = SigningKey::from_bytes(&seed_a);
        let signature = key.sign(b"fresh seed");
        assert!(key.verifying_key().verify(
            b"fresh seed",
            &signature,
            VerificationMode::default(),
        ));
    }
}
