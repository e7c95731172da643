//! Scalar-multiplication strategies for twisted Edwards points.
//!
//! Two strategies are provided. Arbitrary points go through a double-and-add
//! ladder that performs one point addition per scalar bit regardless of the
//! bit's value, accumulating the additions for zero bits into a decoy point.
//! The Ed25519 generator goes through a signed windowed table built once on
//! first use.

use alloc::vec::Vec;

use num_traits::Zero;

use crate::{
    arithmetic::{uint::U256, BigInteger},
    curve::{
        te::{
            instance::ed25519::Ed25519Config, Affine, Projective,
            TECurveConfig,
        },
        CurveGroup, PrimeGroup,
    },
    field::{group::AdditiveGroup, prime::PrimeField},
};

/// Window width in bits for the fixed-base table.
const WINDOW: usize = 8;
/// Signed digits cover half the window range; the other half carries.
const HALF_WINDOW: usize = 1 << (WINDOW - 1);
/// Number of windows needed for a 256-bit scalar, plus one for the final
/// carry.
const WINDOW_COUNT: usize = 256 / WINDOW + 1;

/// Double-and-add over every bit of `scalar`, low bit first.
///
/// The accumulator collects the additions selected by one-bits. With `safe`
/// set, the additions skipped by zero-bits are performed anyway and
/// collected into the returned decoy point, so each iteration performs the
/// same work whatever the bit value. Both points are returned; callers must
/// keep the decoy observable.
///
/// # Panics
///
/// * If `safe` is set and `scalar` is zero.
pub fn mul_with_decoy<P: TECurveConfig>(
    base: &Projective<P>,
    scalar: <P::ScalarField as PrimeField>::BigInt,
    safe: bool,
) -> (Projective<P>, Projective<P>) {
    assert!(
        !safe || !scalar.is_zero(),
        "zero scalar on the hardened multiplication path"
    );

    let mut acc = Projective::<P>::zero();
    let mut decoy = Projective::<P>::generator();
    let mut runner = *base;

    let bits = <<P::ScalarField as PrimeField>::BigInt as BigInteger>::BITS;
    for i in 0..bits {
        if scalar.get_bit(i) {
            acc += &runner;
        } else if safe {
            decoy += &runner;
        }
        runner.double_in_place();
    }

    (acc, decoy)
}

/// Multiplication for public inputs: no decoy work, zero allowed.
pub(crate) fn mul_unrestricted<P: TECurveConfig>(
    base: &Projective<P>,
    scalar: &P::ScalarField,
) -> Projective<P> {
    mul_with_decoy(base, scalar.into_bigint(), false).0
}

/// The precomputed multiples of the Ed25519 generator used by the
/// fixed-base path.
///
/// For each of the [`WINDOW_COUNT`] windows `w` the table holds
/// `1 * P_w, 2 * P_w, ..., HALF_WINDOW * P_w` where `P_w = 2^(W * w) * B`.
/// The table is built once, on the first fixed-base multiplication, and is
/// immutable afterwards.
pub struct BasepointTable {
    points: Vec<Affine<Ed25519Config>>,
}

impl BasepointTable {
    fn build() -> Self {
        let mut running = Vec::with_capacity(WINDOW_COUNT * HALF_WINDOW);

        let mut window_base = Projective::<Ed25519Config>::generator();
        for _ in 0..WINDOW_COUNT {
            let mut sum = window_base;
            running.push(sum);
            for _ in 1..HALF_WINDOW {
                sum += &window_base;
                running.push(sum);
            }
            // Advance the window position: 2 * (2^(W-1) * P) = 2^W * P.
            window_base = sum.double();
        }

        Self { points: Projective::normalize_batch(&running) }
    }

    /// Evaluate `scalar * B` with signed window digits.
    ///
    /// Windows are consumed low to high. A digit above [`HALF_WINDOW`] is
    /// replaced by its negative complement with a carry into the remaining
    /// scalar, so every digit indexes the half-size table. Zero digits add a
    /// sign-alternating table entry into the decoy point, keeping the
    /// operation sequence independent of the scalar.
    fn mul(&self, scalar: U256) -> (Projective<Ed25519Config>, Projective<Ed25519Config>) {
        let mask = (1u64 << WINDOW) - 1;

        let mut n = scalar;
        let mut acc = Projective::zero();
        let mut decoy = Projective::generator();

        for w in 0..WINDOW_COUNT {
            let offset = w * HALF_WINDOW;
            let mut digit = (n.as_limbs()[0] & mask) as i64;
            n >>= WINDOW as u32;
            if digit > HALF_WINDOW as i64 {
                digit -= 1_i64 << WINDOW;
                n.add_with_carry(&U256::from(1u64));
            }

            if digit == 0 {
                let entry = self.points[offset];
                decoy += if w % 2 == 1 { -entry } else { entry };
            } else {
                let entry =
                    self.points[offset + digit.unsigned_abs() as usize - 1];
                acc += if digit < 0 { -entry } else { entry };
            }
        }

        (acc, decoy)
    }
}

#[cfg(feature = "std")]
lazy_static::lazy_static! {
    static ref BASEPOINT_TABLE: BasepointTable = BasepointTable::build();
}

/// Multiply the Ed25519 generator by `scalar` through the window table,
/// returning the result and the decoy accumulator.
#[cfg(feature = "std")]
pub fn basepoint_mul(
    scalar: U256,
) -> (Projective<Ed25519Config>, Projective<Ed25519Config>) {
    BASEPOINT_TABLE.mul(scalar)
}

/// Without a heap-backed lazy cell the table cannot be cached, so the
/// fixed-base path degrades to the uniform ladder.
#[cfg(not(feature = "std"))]
pub fn basepoint_mul(
    scalar: U256,
) -> (Projective<Ed25519Config>, Projective<Ed25519Config>) {
    let base = Projective::<Ed25519Config>::generator();
    let safe = !scalar.is_zero();
    mul_with_decoy(&base, scalar, safe)
}

/// Multiply the Ed25519 generator by a public scalar, zero allowed.
pub(crate) fn basepoint_mul_unrestricted(
    scalar: &<Ed25519Config as crate::curve::CurveConfig>::ScalarField,
) -> Projective<Ed25519Config> {
    let (point, decoy) = basepoint_mul(scalar.into_bigint());
    let affine = Projective::normalize_batch(&[point, decoy]);
    affine[0].into()
}

#[cfg(all(test, feature = "std"))]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::curve::te::instance::ed25519::Fr;

    #[test]
    fn ladder_matches_plain_double_and_add() {
        proptest!(|(a: u64, b: u64)| {
            prop_assume!(a != 0 && b != 0);
            let base =
                Projective::<Ed25519Config>::generator() * Fr::from(b);
            let scalar = Fr::from(a);

            let (with_decoy, _) =
                mul_with_decoy(&base, scalar.into_bigint(), true);
            let plain = base.mul_bigint(scalar.into_bigint());
            prop_assert_eq!(with_decoy, plain);

            let unrestricted = mul_unrestricted(&base, &scalar);
            prop_assert_eq!(unrestricted, plain);
        });
    }

    #[test]
    fn fixed_base_agrees_with_ladder() {
        proptest!(|(a: u64)| {
            prop_assume!(a != 0);
            let generator = Projective::<Ed25519Config>::generator();
            let scalar = Fr::from(a);

            let (windowed, _) = basepoint_mul(scalar.into_bigint());
            let (laddered, _) =
                mul_with_decoy(&generator, scalar.into_bigint(), true);
            prop_assert_eq!(windowed, laddered);
        });
    }

    #[test]
    fn fixed_base_handles_large_scalars() {
        // Scalars close to the group order exercise the signed-digit carry
        // through every window.
        let order_minus_one = Fr::from(0u64) - Fr::from(1u64);
        let generator = Projective::<Ed25519Config>::generator();

        let (windowed, _) = basepoint_mul(order_minus_one.into_bigint());
        let (laddered, _) =
            mul_with_decoy(&generator, order_minus_one.into_bigint(), true);
        assert_eq!(windowed, laddered);
        assert_eq!(windowed, -generator);
    }

    #[test]
    fn zero_scalar_is_identity_on_the_public_path() {
        assert!(basepoint_mul_unrestricted(&Fr::from(0u64)).is_zero());

        let base = Projective::<Ed25519Config>::generator();
        assert!(mul_unrestricted(&base, &Fr::from(0u64)).is_zero());
    }

    #[test]
    #[should_panic = "zero scalar"]
    fn zero_scalar_panics_on_the_hardened_path() {
        let base = Projective::<Ed25519Config>::generator();
        let _ = mul_with_decoy(&base, Fr::from(0u64).into_bigint(), true);
    }
}
