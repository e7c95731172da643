//! This module contains the [Ed25519] curve configuration and the 32-byte
//! compressed point encoding of [RFC 8032 §5.1].
//!
//! [Ed25519]: https://www.rfc-editor.org/rfc/rfc8032
//! [RFC 8032 §5.1]: https://www.rfc-editor.org/rfc/rfc8032#section-5.1
use alloc::string::String;

use num_traits::Zero;

use crate::{
    arithmetic::{uint::U256, BigInteger},
    curve::{
        scalar_mul,
        te::{Affine, Projective, TECurveConfig},
        CurveConfig, CurveGroup, PrimeGroup,
    },
    encoding,
    error::{Error, Result},
    field::{
        fp::{Fp256, FpParams, LIMBS_256},
        group::AdditiveGroup,
        prime::PrimeField,
        Field,
    },
    fp_from_num, from_num,
};

const G_GENERATOR_X: Fq =
        fp_from_num!("15112221349535400772501151409588531511454012693041857206046113283949847762202");

const G_GENERATOR_Y: Fq =
        fp_from_num!("46316835694926478169428394003475163141307993866256225615783033603165251855960");

/// A square root of −1 modulo the base-field modulus.
pub const SQRT_MINUS_ONE: Fq =
        fp_from_num!("19681161376707505956807079304988542015446066515923890162744021073123829784752");

/// Base field for [`Ed25519Config`], with modulus `2^255 − 19`.
pub type Fq = Fp256<Ed25519FqParam>;
/// Base field parameters for [`Ed25519Config`].
pub struct Ed25519FqParam;

impl FpParams<LIMBS_256> for Ed25519FqParam {
    const GENERATOR: Fp256<Self> = fp_from_num!("2");
    const MODULUS: U256 = from_num!("57896044618658097711785492504343953926634992332820282019728792003956564819949");
}

/// Scalar field for [`Ed25519Config`], with modulus
/// `2^252 + 27742317777372353535851937790883648493`.
pub type Fr = Fp256<Ed25519FrParam>;
/// Scalar field parameters for [`Ed25519Config`].
pub struct Ed25519FrParam;

impl FpParams<LIMBS_256> for Ed25519FrParam {
    const GENERATOR: Fp256<Self> = fp_from_num!("2");
    const MODULUS: U256 = from_num!("7237005577332262213973186563042994240857116359379907606001950938285454250989");
}

/// Ed25519's curve details.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Ed25519Config;

impl CurveConfig for Ed25519Config {
    type BaseField = Fq;
    type ScalarField = Fr;

    const COFACTOR: &'static [u64] = &[8];
    const COFACTOR_INV: Fr = fp_from_num!("2713877091499598330239944961141122840321418634767465352250731601857045344121");
}

impl TECurveConfig for Ed25519Config {
    const COEFF_A: Self::BaseField = fp_from_num!("1").ct_neg();
    const COEFF_D: Self::BaseField = fp_from_num!("37095705934669439343138083508754565189542113879843219016388785533085940283555");
    const GENERATOR: Affine<Self> =
        Affine::new_unchecked(G_GENERATOR_X, G_GENERATOR_Y);

    #[inline(always)]
    fn mul_by_a(elem: Self::BaseField) -> Self::BaseField {
        -elem
    }

    /// Scalar multiplication, routed by the base point.
    ///
    /// Multiplications of the generator go through the precomputed window
    /// table; every other point takes the uniform double-and-add ladder.
    /// Zero scalars are rejected on this path.
    ///
    /// # Panics
    ///
    /// * If `scalar` is zero.
    fn mul_scalar(
        base: &Projective<Self>,
        scalar: &Self::ScalarField,
    ) -> Projective<Self> {
        assert!(!scalar.is_zero(), "scalar must be non-zero");
        let (point, decoy) = if *base == Projective::generator() {
            scalar_mul::basepoint_mul(scalar.into_bigint())
        } else {
            scalar_mul::mul_with_decoy(base, scalar.into_bigint(), true)
        };
        // Both accumulators flow through the shared batch normalization, so
        // the decoy additions stay observable.
        Projective::normalize_batch(&[point, decoy])[0].into()
    }
}

/// Raise `x` to the power `2^k` by repeated squaring.
fn pow2k(mut x: Fq, k: u32) -> Fq {
    for _ in 0..k {
        x.square_in_place();
    }
    x
}

/// Compute `x^((p − 5) / 8) = x^(2^252 − 3)`.
///
/// The addition chain reuses the `x^3` and `x^(2^10 − 1)` towers, for a
/// total of roughly 250 squarings and 11 multiplications.
pub(crate) fn pow_p58(x: &Fq) -> Fq {
    let x2 = x.square();
    let b2 = x2 * x; // x^3
    let b4 = pow2k(b2, 2) * b2; // x^(2^4 - 1)
    let b5 = pow2k(b4, 1) * x; // x^(2^5 - 1)
    let b10 = pow2k(b5, 5) * b5;
    let b20 = pow2k(b10, 10) * b10;
    let b40 = pow2k(b20, 20) * b20;
    let b80 = pow2k(b40, 40) * b40;
    let b160 = pow2k(b80, 80) * b80;
    let b240 = pow2k(b160, 80) * b80;
    let b250 = pow2k(b240, 10) * b10;
    pow2k(b250, 2) * x
}

/// Find `x` such that `v * x^2 = u`.
///
/// Returns whether a root exists together with the candidate, which is only
/// meaningful when a root exists. The √−1 correction is computed on both
/// outcomes so the failing branch performs the same multiplications.
pub(crate) fn sqrt_ratio(u: &Fq, v: &Fq) -> (bool, Fq) {
    let v3 = v.square() * v;
    let v7 = v3.square() * v;
    let candidate = *u * v3 * pow_p58(&(*u * v7));

    let vx2 = *v * candidate.square();
    let root1 = candidate;
    let root2 = candidate * SQRT_MINUS_ONE;

    let correct_sign = vx2 == *u;
    let flipped_sign = vx2 == -*u;

    let x = if correct_sign { root1 } else { root2 };
    (correct_sign || flipped_sign, x)
}

/// An Ed25519 point in its 32-byte compressed form.
///
/// The first 255 bits hold the y-coordinate in little-endian order; the top
/// bit of the last byte holds the sign (the low bit) of the x-coordinate.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct CompressedPointY([u8; 32]);

impl CompressedPointY {
    /// Wrap raw compressed bytes. No validation is performed until
    /// [`Self::decode`] is called.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Parse compressed bytes from a 64-digit hex string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidEncoding`] on malformed hex input.
    pub fn from_hex(hex: &str) -> Result<Self> {
        encoding::normalize(encoding::Input::Hex(hex)).map(Self)
    }

    /// Borrow the raw compressed bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Render the compressed bytes as lowercase hex.
    #[must_use]
    pub fn to_hex(&self) -> String {
        encoding::bytes_to_hex(&self.0)
    }

    /// Decode the point under the permissive ZIP 215 rules: the masked
    /// y-coordinate may be non-canonical (`y ≥ p`) and small-order points
    /// are accepted.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPoint`] if no x-coordinate satisfies the
    /// curve equation.
    pub fn decode(&self) -> Result<Projective<Ed25519Config>> {
        self.decompress(false).map(Into::into)
    }

    /// Decode the point under the strict RFC 8032 §5.1.3 rules: the
    /// y-coordinate must be canonical and the encoding `(x = 0, sign = 1)`
    /// is rejected.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPoint`] for a non-canonical y-coordinate, a
    /// y with no square root, or the forbidden zero-x sign.
    pub fn decode_strict(&self) -> Result<Projective<Ed25519Config>> {
        self.decompress(true).map(Into::into)
    }

    fn decompress(&self, strict: bool) -> Result<Affine<Ed25519Config>> {
        let mut y_bytes = self.0;
        let x_sign = y_bytes[31] >> 7 == 1;
        y_bytes[31] &= 0x7f;

        let y_repr = U256::from_bytes_le(&y_bytes);
        if strict && y_repr >= <Fq as PrimeField>::MODULUS {
            return Err(Error::InvalidPoint);
        }
        let y = Fq::from_bigint(y_repr);

        // The curve equation -x² + y² = 1 + d * x² * y² solved for x²
        // gives x² = (y² - 1) / (d * y² + 1).
        let y2 = y.square();
        let u = y2 - Fq::ONE;
        let v = Ed25519Config::COEFF_D * y2 + Fq::ONE;

        let (found, mut x) = sqrt_ratio(&u, &v);
        if !found {
            return Err(Error::InvalidPoint);
        }
        if strict && x.is_zero() && x_sign {
            return Err(Error::InvalidPoint);
        }
        if x.into_bigint().is_odd() != x_sign {
            x = -x;
        }

        Ok(Affine::new_unchecked(x, y))
    }
}

impl AsRef<[u8]> for CompressedPointY {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<Affine<Ed25519Config>> for CompressedPointY {
    fn from(point: Affine<Ed25519Config>) -> Self {
        let mut bytes: [u8; 32] = point
            .y
            .into_bigint()
            .into_bytes_le()
            .try_into()
            .expect("y-coordinate should be 32 bytes");

        let x_is_odd = point.x.into_bigint().is_odd();
        bytes[31] |= u8::from(x_is_odd) << 7;

        CompressedPointY(bytes)
    }
}

impl From<Projective<Ed25519Config>> for CompressedPointY {
    fn from(point: Projective<Ed25519Config>) -> Self {
        point.into_affine().into()
    }
}

impl Projective<Ed25519Config> {
    /// Serialize to the 32-byte compressed form.
    #[must_use]
    pub fn compress(&self) -> CompressedPointY {
        (*self).into()
    }

    /// Decode a point from a 64-digit hex string of its compressed form,
    /// under the permissive ZIP 215 rules.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidEncoding`] on malformed hex and
    /// [`Error::InvalidPoint`] if the bytes decode to no curve point.
    pub fn from_hex(hex: &str) -> Result<Self> {
        CompressedPointY::from_hex(hex)?.decode()
    }

    /// Render the compressed form as lowercase hex.
    #[must_use]
    pub fn to_hex(&self) -> String {
        self.compress().to_hex()
    }

    /// Multiply by the curve cofactor, `8`.
    #[must_use]
    pub fn mul_by_cofactor(&self) -> Self {
        let mut cleared = *self;
        cleared.double_in_place();
        cleared.double_in_place();
        cleared.double_in_place();
        cleared
    }

    /// Whether the order of this point divides the cofactor.
    #[must_use]
    pub fn is_small_order(&self) -> bool {
        self.mul_by_cofactor().is_zero()
    }

    /// Whether this point lies in the prime-order subgroup.
    #[must_use]
    pub fn is_torsion_free(&self) -> bool {
        self.mul_bigint(<Fr as PrimeField>::MODULUS).is_zero()
    }
}

#[cfg(all(test, feature = "std"))]
mod tests {
    use num_traits::One;
    use proptest::prelude::*;

    use super::*;
    use crate::curve::AffineRepr;

    /// Compressed encodings of the eight points of order dividing the
    /// cofactor.
    const SMALL_ORDER_POINTS: [&str; 8] = [
        "0100000000000000000000000000000000000000000000000000000000000000",
        "ecffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff7f",
        "0000000000000000000000000000000000000000000000000000000000000000",
        "0000000000000000000000000000000000000000000000000000000000000080",
        "26e8958fc2b227b045c3f489f2ef98f0d5dfac05d3c63339b13802886d53fc05",
        "26e8958fc2b227b045c3f489f2ef98f0d5dfac05d3c63339b13802886d53fc85",
        "c7176a703d4dd84fba3c0b760d10670f2a2053fa2c39ccc64ec7fd7792ac037a",
        "c7176a703d4dd84fba3c0b760d10670f2a2053fa2c39ccc64ec7fd7792ac03fa",
    ];

    #[test]
    fn generator_satisfies_curve_equation() {
        let generator = Affine::<Ed25519Config>::generator();
        assert!(generator.is_on_curve());
        assert!(generator.is_in_prime_order_subgroup());
    }

    #[test]
    fn sqrt_minus_one_squares_to_minus_one() {
        assert_eq!(SQRT_MINUS_ONE.square(), -Fq::one());
    }

    #[test]
    fn pow_p58_matches_generic_exponentiation() {
        // (p - 5) / 8 = 2^252 - 3.
        let exp: U256 = from_num!("7237005577332262213973186563042994240829374041602535252466099000494570602493");
        proptest!(|(a: u64)| {
            let x = Fq::from(a);
            prop_assert_eq!(pow_p58(&x), x.pow(exp));
        });
    }

    #[test]
    fn generator_compresses_to_known_bytes() {
        let generator = Projective::<Ed25519Config>::generator();
        assert_eq!(
            generator.to_hex(),
            "5866666666666666666666666666666666666666666666666666666666666666",
        );
        assert_eq!(
            Projective::from_hex(&generator.to_hex()).unwrap(),
            generator,
        );
    }

    #[test]
    fn decode_then_encode_is_identity() {
        proptest!(|(a: u64)| {
            prop_assume!(a != 0);
            let point = Projective::<Ed25519Config>::generator() * Fr::from(a);
            let bytes = *point.compress().as_bytes();
            let decoded = CompressedPointY::from_bytes(bytes).decode().unwrap();
            prop_assert_eq!(decoded, point);
            prop_assert_eq!(*decoded.compress().as_bytes(), bytes);

            // The top bit of the last byte carries the parity of x.
            let x_parity = point.into_affine().x.into_bigint().is_odd();
            prop_assert_eq!(bytes[31] >> 7 == 1, x_parity);
        });
    }

    #[test]
    fn generator_times_order_is_identity() {
        let generator = Projective::<Ed25519Config>::generator();
        assert!(generator.mul_bigint(<Fr as PrimeField>::MODULUS).is_zero());

        let order_plus_one =
            <Fr as PrimeField>::MODULUS.ct_add(&U256::ONE);
        assert_eq!(generator.mul_bigint(order_plus_one), generator);
    }

    #[test]
    fn small_order_points_decode_and_clear_to_identity() {
        for hex in SMALL_ORDER_POINTS {
            let point = Projective::from_hex(hex).unwrap();
            assert!(point.is_small_order(), "{hex} should have small order");
            assert!(
                !point.is_torsion_free() || point.is_zero(),
                "{hex} should not be torsion free",
            );
        }

        let generator = Projective::<Ed25519Config>::generator();
        assert!(!generator.is_small_order());
        assert!(generator.is_torsion_free());
    }

    #[test]
    fn strict_decoding_rejects_non_canonical_y() {
        // The base-field modulus plus one, i.e. y = 1 with a non-canonical
        // carry into the forbidden range.
        let mut bytes = [0xff_u8; 32];
        bytes[0] = 0xee;
        bytes[31] = 0x7f;

        let compressed = CompressedPointY::from_bytes(bytes);
        assert_eq!(compressed.decode_strict(), Err(Error::InvalidPoint));

        // ZIP 215 accepts the same bytes and reduces y modulo p.
        let permissive = compressed.decode().unwrap();
        assert!(permissive.is_zero());
    }

    #[test]
    fn strict_decoding_rejects_zero_x_with_sign_bit() {
        let mut bytes = [0u8; 32];
        bytes[0] = 1;
        bytes[31] = 0x80;

        let compressed = CompressedPointY::from_bytes(bytes);
        assert_eq!(compressed.decode_strict(), Err(Error::InvalidPoint));
        assert!(compressed.decode().unwrap().is_zero());
    }

    #[test]
    fn decoding_fails_when_no_root_exists() {
        // y = 2 gives x² = 3 / (4d + 1), which has no square root mod p.
        let mut bytes = [0u8; 32];
        bytes[0] = 2;
        let compressed = CompressedPointY::from_bytes(bytes);
        assert_eq!(compressed.decode(), Err(Error::InvalidPoint));
    }

    #[test]
    fn addition_laws_hold() {
        proptest!(|(a: u64, b: u64)| {
            prop_assume!(a != 0 && b != 0);
            let generator = Projective::<Ed25519Config>::generator();
            let p = generator * Fr::from(a);
            let q = generator * Fr::from(b);

            // Commutativity.
            prop_assert_eq!(p + q, q + p);
            // Identity is neutral.
            prop_assert_eq!(p + Projective::zero(), p);
            // Doubling equals self-addition.
            prop_assert_eq!(p.double(), p + p);
            // Negation is an involution and yields the inverse.
            prop_assert_eq!(-(-p), p);
            prop_assert!((p + (-p)).is_zero());
        });
    }

    #[test]
    fn addition_is_associative() {
        proptest!(|(a: u64, b: u64, c: u64)| {
            prop_assume!(a != 0 && b != 0 && c != 0);
            let generator = Projective::<Ed25519Config>::generator();
            let p = generator * Fr::from(a);
            let q = generator * Fr::from(b);
            let r = generator * Fr::from(c);

            prop_assert_eq!((p + q) + r, p + (q + r));
        });
    }

    #[test]
    fn scalar_multiplication_distributes() {
        proptest!(|(a: u64, b: u64)| {
            prop_assume!(a != 0 && b != 0);
            let generator = Projective::<Ed25519Config>::generator();
            let sum = Fr::from(a) + Fr::from(b);
            prop_assume!(!sum.is_zero());

            // (a + b) * G == a * G + b * G.
            prop_assert_eq!(
                generator * sum,
                generator * Fr::from(a) + generator * Fr::from(b)
            );

            // (a * b) * G == a * (b * G).
            let product = Fr::from(a) * Fr::from(b);
            prop_assume!(!product.is_zero());
            prop_assert_eq!(
                generator * product,
                (generator * Fr::from(b)) * Fr::from(a)
            );
        });
    }
}
