//! Fixed-width unsigned big integers stored as little-endian 64-bit limbs.

use core::{
    fmt::{Debug, Display},
    ops::{Shl, ShlAssign, Shr, ShrAssign},
};

use num_bigint::BigUint;
use num_traits::{ConstZero, Zero};
use zeroize::Zeroize;

use crate::{
    arithmetic::{
        limb,
        limb::{
            adc_for_add_with_carry, sbb, sbb_for_sub_with_borrow, Limb, Limbs,
        },
        BigInteger,
    },
    bits::BitIteratorBE,
    const_for,
    const_helpers::{R2Buffer, RBuffer},
    unroll6_for,
};

/// An unsigned integer of `N` 64-bit limbs, least significant limb first.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Zeroize)]
pub struct Uint<const N: usize> {
    pub(crate) limbs: Limbs<N>,
}

impl<const N: usize> Default for Uint<N> {
    fn default() -> Self {
        Self { limbs: [0u64; N] }
    }
}

/// Declare [`Uint`] types for different bit sizes.
macro_rules! declare_num {
    ($num:ident, $bits:expr) => {
        #[doc = "Unsigned integer with "]
        #[doc = stringify!($bits)]
        #[doc = "bits size."]
        pub type $num = $crate::arithmetic::uint::Uint<
            { usize::div_ceil($bits, $crate::arithmetic::Limb::BITS as usize) },
        >;
    };
}

declare_num!(U64, 64);
declare_num!(U256, 256);

impl<const N: usize> Uint<N> {
    /// Construct an integer from its limbs, least significant first.
    pub const fn new(value: [u64; N]) -> Self {
        Self { limbs: value }
    }

    /// Borrow the backing limbs, least significant first.
    pub const fn as_limbs(&self) -> &[Limb; N] {
        &self.limbs
    }

    /// Construct an integer from a `u32`.
    pub const fn from_u32(val: u32) -> Self {
        let mut repr = Self::new([0u64; N]);
        repr.limbs[0] = val as u64;
        repr
    }

    pub(crate) const fn ct_geq(&self, other: &Self) -> bool {
        const_for!((i in 0..N) {
            let a = self.limbs[N - i - 1];
            let b = other.limbs[N - i - 1];
            if a < b {
                return false;
            } else if a > b {
                return true;
            }
        });
        true
    }

    /// Return the minimum number of bits needed to encode this number.
    pub(crate) const fn ct_num_bits(self) -> usize {
        let mut num_bits = N * Limb::BITS as usize;
        let mut index = N - 1;
        loop {
            let leading = self.limbs[index].leading_zeros() as usize;
            num_bits -= leading;
            // A non-empty limb terminates the scan.
            if leading != 64 {
                break;
            }
            if index == 0 {
                break;
            }
            index -= 1;
        }
        num_bits
    }

    /// Find the `i`-th bit of `self`, where bit 0 is the least significant
    /// one. Bits past the width read as `false`.
    pub const fn ct_get_bit(&self, i: usize) -> bool {
        if i >= N * Limb::BITS as usize {
            return false;
        }
        let bits_in_limb = Limb::BITS as usize;
        let limb = i / bits_in_limb;
        let bit = i - bits_in_limb * limb;
        (self.limbs[limb] & (1 << bit)) != 0
    }

    #[inline]
    pub(crate) const fn ct_sub_with_borrow(
        mut self,
        other: &Self,
    ) -> (Self, bool) {
        let mut borrow = 0;

        const_for!((i in 0..N) {
            let (limb, b) = sbb(self.limbs[i], other.limbs[i], borrow);
            self.limbs[i] = limb;
            borrow = b;
        });

        (self, borrow != 0)
    }

    /// Double in place, returning whether the top bit was shifted out.
    #[inline]
    pub(crate) fn mul2(&mut self) -> bool {
        let mut last = 0;
        for i in 0..N {
            let a = &mut self.limbs[i];
            let tmp = *a >> 63;
            *a <<= 1;
            *a |= last;
            last = tmp;
        }
        last != 0
    }

    const fn ct_mul2_with_carry(mut self) -> (Self, bool) {
        let mut last = 0;
        const_for!((i in 0..N) {
            let a = self.limbs[i];
            let tmp = a >> 63;
            self.limbs[i] <<= 1;
            self.limbs[i] |= last;
            last = tmp;
        });
        (self, last != 0)
    }

    pub(crate) const fn ct_is_zero(&self) -> bool {
        let mut is_zero = true;
        const_for!((i in 0..N) {
            is_zero &= self.limbs[i] == 0;
        });
        is_zero
    }

    /// Halve in place, dropping the lowest bit.
    pub(crate) fn div2(&mut self) {
        let mut t = 0;
        for a in self.limbs.iter_mut().rev() {
            let t2 = *a << 63;
            *a >>= 1;
            *a |= t;
            t = t2;
        }
    }

    #[inline(always)]
    pub(crate) fn add_with_carry(&mut self, other: &Self) -> bool {
        let mut carry = false;

        unroll6_for!((i in 0..N) {
            carry = adc_for_add_with_carry(&mut self.limbs[i], other.limbs[i], carry);
        });

        carry
    }

    #[inline(always)]
    pub(crate) fn sub_with_borrow(&mut self, other: &Self) -> bool {
        let mut borrow = false;

        unroll6_for!((i in 0..N) {
            borrow =
                sbb_for_sub_with_borrow(&mut self.limbs[i], other.limbs[i], borrow);
        });

        borrow
    }

    /// Compute "wide" multiplication, with a product twice the size of the
    /// inputs, returned as `(lo, hi)`.
    #[inline(always)]
    pub const fn ct_mul_wide(&self, rhs: &Self) -> (Self, Self) {
        let (mut lo, mut hi) = ([0u64; N], [0u64; N]);
        unroll6_for!((i in 0..N) {
            let mut carry = 0;
            unroll6_for!((j in 0..N) {
                let k = i + j;
                if k >= N {
                    let (limb, c) = limb::carrying_mac(
                        hi[k - N],
                        self.limbs[i],
                        rhs.limbs[j],
                        carry
                    );
                    hi[k - N] = limb;
                    carry = c;
                } else {
                    let (limb, c) = limb::carrying_mac(
                        lo[k],
                        self.limbs[i],
                        rhs.limbs[j],
                        carry
                    );
                    lo[k] = limb;
                    carry = c;
                }
            });
            hi[i] = carry;
        });

        (Self::new(lo), Self::new(hi))
    }

    /// Multiply two numbers and panic on overflow.
    #[must_use]
    pub const fn ct_mul(&self, rhs: &Self) -> Self {
        let (low, high) = self.ct_mul_wide(rhs);
        assert!(high.ct_is_zero(), "overflow on multiplication");
        low
    }

    /// Add two numbers and panic on overflow.
    #[must_use]
    pub const fn ct_add(&self, rhs: &Self) -> Self {
        let (low, carry) = self.ct_adc(rhs, Limb::ZERO);
        assert!(carry == 0, "overflow on addition");
        low
    }

    pub(crate) const fn ct_eq(&self, rhs: &Self) -> bool {
        const_for!((i in 0..N) {
            if self.limbs[i] != rhs.limbs[i] {
                return false;
            }
        });
        true
    }

    /// Computes `self + rhs + carry`, returning the result along with the
    /// new carry.
    #[inline(always)]
    pub const fn ct_adc(&self, rhs: &Uint<N>, mut carry: Limb) -> (Self, Limb) {
        let mut limbs = [Limb::ZERO; N];
        let mut i = 0;

        while i < N {
            let (w, c) = limb::ct_adc(self.limbs[i], rhs.limbs[i], carry);
            limbs[i] = w;
            carry = c;
            i += 1;
        }

        (Self { limbs }, carry)
    }

    /// Create a new [`Uint`] from the provided little-endian bytes.
    ///
    /// # Panics
    ///
    /// Panics if the slice is not exactly `N * 8` bytes.
    pub const fn ct_from_le_slice(bytes: &[u8]) -> Self {
        const LIMB_BYTES: usize = Limb::BITS as usize / 8;
        assert!(
            bytes.len() == LIMB_BYTES * N,
            "bytes are not the expected size"
        );

        let mut res = [Limb::ZERO; N];
        let mut buf = [0u8; LIMB_BYTES];
        let mut i = 0;

        while i < N {
            let mut j = 0;
            while j < LIMB_BYTES {
                buf[j] = bytes[i * LIMB_BYTES + j];
                j += 1;
            }
            res[i] = Limb::from_le_bytes(buf);
            i += 1;
        }

        Self::new(res)
    }

    /// Compute the Montgomery constant `R = 2^(64 * N) mod self`.
    ///
    /// `self` is interpreted as a modulus and must be non-zero.
    pub const fn montgomery_r(&self) -> Self {
        assert!(!self.ct_is_zero(), "modulus must be non-zero");
        let value = RBuffer::<N>([0u64; N], 1);

        // Base-2 long division of the (N + 1)-limb power of two.
        let mut remainder = Self::new([0u64; N]);
        let mut i = value.num_bits();
        while i > 0 {
            i -= 1;
            let (doubled, carry) = remainder.ct_mul2_with_carry();
            remainder = doubled;
            remainder.limbs[0] |= value.get_bit(i) as u64;
            if remainder.ct_geq(self) || carry {
                let (r, borrow) = remainder.ct_sub_with_borrow(self);
                remainder = r;
                assert!(borrow == carry);
            }
        }
        remainder
    }

    /// Compute the Montgomery constant `R^2 = 2^(128 * N) mod self`.
    pub const fn montgomery_r2(&self) -> Self {
        assert!(!self.ct_is_zero(), "modulus must be non-zero");
        let value = R2Buffer::<N>([0u64; N], [0u64; N], 1);

        let mut remainder = Self::new([0u64; N]);
        let mut i = value.num_bits();
        while i > 0 {
            i -= 1;
            let (doubled, carry) = remainder.ct_mul2_with_carry();
            remainder = doubled;
            remainder.limbs[0] |= value.get_bit(i) as u64;
            if remainder.ct_geq(self) || carry {
                let (r, borrow) = remainder.ct_sub_with_borrow(self);
                remainder = r;
                assert!(borrow == carry);
            }
        }
        remainder
    }
}

// ----------- Traits Impls -----------

impl<const N: usize> Debug for Uint<N> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:?}", BigUint::from(*self))
    }
}

impl<const N: usize> Display for Uint<N> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", BigUint::from(*self))
    }
}

impl<const N: usize> Ord for Uint<N> {
    #[inline]
    fn cmp(&self, other: &Self) -> core::cmp::Ordering {
        use core::cmp::Ordering;
        unroll6_for!((i in 0..N) {
            let a = &self.limbs[N - i - 1];
            let b = &other.limbs[N - i - 1];
            match a.cmp(b) {
                Ordering::Equal => {}
                order => return order,
            };
        });

        Ordering::Equal
    }
}

impl<const N: usize> PartialOrd for Uint<N> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<const N: usize> From<u64> for Uint<N> {
    #[inline]
    fn from(val: u64) -> Uint<N> {
        let mut repr = Self::default();
        repr.limbs[0] = val;
        repr
    }
}

impl<const N: usize> From<u32> for Uint<N> {
    #[inline]
    fn from(val: u32) -> Uint<N> {
        let mut repr = Self::default();
        repr.limbs[0] = val.into();
        repr
    }
}

impl<const N: usize> From<u16> for Uint<N> {
    #[inline]
    fn from(val: u16) -> Uint<N> {
        let mut repr = Self::default();
        repr.limbs[0] = val.into();
        repr
    }
}

impl<const N: usize> From<u8> for Uint<N> {
    #[inline]
    fn from(val: u8) -> Uint<N> {
        let mut repr = Self::default();
        repr.limbs[0] = val.into();
        repr
    }
}

impl<const N: usize> From<Uint<N>> for BigUint {
    #[inline]
    fn from(val: Uint<N>) -> BigUint {
        BigUint::from_bytes_le(&val.into_bytes_le())
    }
}

impl<const N: usize> ShrAssign<u32> for Uint<N> {
    /// Computes the bitwise shift right operation in place.
    ///
    /// Differently from the built-in numeric types (u8, u32, u64, etc.) this
    /// operation does *not* return an underflow error if the number of bits
    /// shifted is larger than N * 64. Instead the result saturates to zero.
    fn shr_assign(&mut self, mut rhs: u32) {
        if rhs >= (64 * N) as u32 {
            *self = Self::from(0u64);
            return;
        }

        while rhs >= 64 {
            let mut t = 0;
            for limb in self.limbs.iter_mut().rev() {
                core::mem::swap(&mut t, limb);
            }
            rhs -= 64;
        }

        if rhs > 0 {
            let mut t = 0;
            for a in self.limbs.iter_mut().rev() {
                let t2 = *a << (64 - rhs);
                *a >>= rhs;
                *a |= t;
                t = t2;
            }
        }
    }
}

impl<const N: usize> Shr<u32> for Uint<N> {
    type Output = Self;

    fn shr(mut self, rhs: u32) -> Self::Output {
        self >>= rhs;
        self
    }
}

impl<const N: usize> ShlAssign<u32> for Uint<N> {
    /// Computes the bitwise shift left operation in place.
    ///
    /// Differently from the built-in numeric types (u8, u32, u64, etc.) this
    /// operation does *not* return an overflow error if the number of bits
    /// shifted is larger than N * 64. Instead, the overflow is chopped off.
    fn shl_assign(&mut self, mut rhs: u32) {
        if rhs >= (64 * N) as u32 {
            *self = Self::from(0u64);
            return;
        }

        while rhs >= 64 {
            let mut t = 0;
            for i in 0..N {
                core::mem::swap(&mut t, &mut self.limbs[i]);
            }
            rhs -= 64;
        }

        if rhs > 0 {
            let mut t = 0;
            for i in 0..N {
                let a = &mut self.limbs[i];
                let t2 = *a >> (64 - rhs);
                *a <<= rhs;
                *a |= t;
                t = t2;
            }
        }
    }
}

impl<const N: usize> Shl<u32> for Uint<N> {
    type Output = Self;

    fn shl(mut self, rhs: u32) -> Self::Output {
        self <<= rhs;
        self
    }
}

impl<const N: usize> BigInteger for Uint<N> {
    const BITS: usize = Self::NUM_LIMBS * (Limb::BITS as usize);
    const MAX: Self = Self { limbs: [u64::MAX; N] };
    const NUM_LIMBS: usize = N;
    const ONE: Self = {
        let mut one = Self::ZERO;
        one.limbs[0] = 1;
        one
    };
    const ZERO: Self = Self { limbs: [0u64; N] };

    fn is_odd(&self) -> bool {
        self.limbs[0] & 1 == 1
    }

    fn is_even(&self) -> bool {
        !self.is_odd()
    }

    fn is_zero(&self) -> bool {
        self.limbs.iter().all(Zero::is_zero)
    }

    fn num_bits(&self) -> usize {
        self.ct_num_bits()
    }

    fn get_bit(&self, i: usize) -> bool {
        self.ct_get_bit(i)
    }

    fn from_bytes_le(bytes: &[u8]) -> Self {
        Self::ct_from_le_slice(bytes)
    }

    fn into_bytes_le(self) -> alloc::vec::Vec<u8> {
        self.limbs.iter().flat_map(|&limb| limb.to_le_bytes()).collect()
    }
}

impl<const N: usize> BitIteratorBE for Uint<N> {
    fn bit_be_iter(&self) -> impl Iterator<Item = bool> {
        self.as_limbs().iter().rev().flat_map(Limb::bit_be_iter)
    }
}

/// Parse a number from a string in a given radix.
///
/// This implementation can be slow on big numbers and possibly fail constant
/// compilation by timeout.
#[must_use]
pub const fn from_str_radix<const LIMBS: usize>(
    s: &str,
    radix: u32,
) -> Uint<LIMBS> {
    let bytes = s.as_bytes();
    assert!(!bytes.is_empty(), "empty string");

    // The lowest order digit is at the end of the string.
    let mut index = bytes.len() - 1;

    let mut uint = Uint::from_u32(0);
    let mut order = Uint::from_u32(1);
    let uint_radix = Uint::from_u32(radix);

    loop {
        let digit = Uint::from_u32(parse_digit(bytes[index], radix));

        // Add the digit multiplied by the order of magnitude.
        uint = uint.ct_add(&digit.ct_mul(&order));

        // When the beginning of the string is reached, the number is
        // complete.
        if index == 0 {
            return uint;
        }

        order = uint_radix.ct_mul(&order);
        index -= 1;
    }
}

// Try to parse a digit from a utf-8 byte.
const fn parse_digit(utf8_digit: u8, digit_radix: u32) -> u32 {
    let ch = parse_utf8_byte(utf8_digit);
    match ch.to_digit(digit_radix) {
        None => {
            panic!("invalid digit");
        }
        Some(digit) => digit,
    }
}

/// Parse a single UTF-8 byte.
const fn parse_utf8_byte(byte: u8) -> char {
    match byte {
        0x00..=0x7F => byte as char,
        _ => panic!("non-ASCII character found"),
    }
}

/// This macro converts a string base-10 number to a big integer.
#[macro_export]
macro_rules! from_num {
    ($num:literal) => {
        $crate::arithmetic::uint::from_str_radix($num, 10)
    };
}

/// Integer that uses twice as many limbs as `Uint` for the same `N`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Zeroize)]
pub struct WideUint<const N: usize> {
    low: Uint<N>,
    high: Uint<N>,
}

impl<const N: usize> WideUint<N> {
    /// Construct a wide integer from its low and high halves.
    pub const fn new(low: Uint<N>, high: Uint<N>) -> Self {
        Self { low, high }
    }

    /// Compute the remainder of division of `self` by `rhs`.
    ///
    /// # Panics
    ///
    /// Panics if `rhs` is zero.
    pub const fn ct_rem(&self, rhs: &Uint<N>) -> Uint<N> {
        assert!(!rhs.ct_is_zero(), "should not divide by zero");

        // Base-2 long division, high bit first.
        let mut remainder = Uint::<N>::new([0u64; N]);
        let mut index = self.ct_num_bits();
        while index > 0 {
            index -= 1;
            let (doubled, carry) = remainder.ct_mul2_with_carry();
            remainder = doubled;
            remainder.limbs[0] |= self.ct_get_bit(index) as u64;
            if remainder.ct_geq(rhs) || carry {
                let (r, borrow) = remainder.ct_sub_with_borrow(rhs);
                remainder = r;
                assert!(borrow == carry);
            }
        }
        remainder
    }

    /// Find the number of bits in the binary decomposition of `self`.
    pub const fn ct_num_bits(&self) -> usize {
        let high_num_bits = self.high.ct_num_bits();
        if high_num_bits == 0 {
            self.low.ct_num_bits()
        } else {
            high_num_bits + N * Limb::BITS as usize
        }
    }

    /// Compute the `i`-th bit of `self`.
    pub const fn ct_get_bit(&self, i: usize) -> bool {
        if i >= N * Limb::BITS as usize {
            self.high.ct_get_bit(i - N * Limb::BITS as usize)
        } else {
            self.low.ct_get_bit(i)
        }
    }
}

#[cfg(all(test, feature = "std"))]
mod tests {
    use num_bigint::BigUint;
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn parses_base10_strings() {
        let uint_from_base10: Uint<4> = from_str_radix(
            "57896044618658097711785492504343953926634992332820282019728792003956564819949",
            10,
        );
        #[allow(clippy::unreadable_literal)]
        let expected = Uint::<4>::new([
            0xffffffffffffffed,
            0xffffffffffffffff,
            0xffffffffffffffff,
            0x7fffffffffffffff,
        ]);
        assert_eq!(uint_from_base10, expected);

        let uint_from_base10: Uint<1> =
            from_str_radix("18446744069414584321", 10);
        let uint_from_binary: Uint<1> = from_str_radix(
            "1111111111111111111111111111111100000000000000000000000000000001",
            2,
        );
        assert_eq!(uint_from_base10, uint_from_binary);
    }

    #[test]
    fn le_byte_round_trip() {
        proptest!(|(limbs: [u64; 4])| {
            let num = Uint::<4>::new(limbs);
            let bytes = num.into_bytes_le();
            prop_assert_eq!(Uint::<4>::from_bytes_le(&bytes), num);
        });
    }

    #[test]
    fn num_bits_tracks_highest_set_bit() {
        let num = Uint::<4>::new([0b1100, 0, 0, 0]);
        assert_eq!(num.num_bits(), 4);

        let num = Uint::<4>::new([0, 0b1100, 0, 0]);
        assert_eq!(num.num_bits(), 64 + 4);

        let num = Uint::<4>::new([0, 0, 0, 1]);
        assert_eq!(num.num_bits(), 193);
    }

    #[test]
    fn wide_remainder_matches_bigint_arithmetic() {
        proptest!(|(lo: [u64; 4], hi: [u64; 4], m: [u64; 4])| {
            let modulus = Uint::<4>::new(m);
            prop_assume!(!modulus.ct_is_zero());

            let wide = WideUint::new(Uint::new(lo), Uint::new(hi));
            let remainder = wide.ct_rem(&modulus);

            let big_lo = BigUint::from(Uint::new(lo));
            let big_hi = BigUint::from(Uint::new(hi));
            let big = (big_hi << 256) + big_lo;
            let expected = big % BigUint::from(modulus);

            prop_assert_eq!(BigUint::from(remainder), expected);
        });
    }

    #[test]
    fn montgomery_r_is_power_of_two_mod_modulus() {
        // p = 2^255 - 19
        let modulus: Uint<4> = from_str_radix(
            "57896044618658097711785492504343953926634992332820282019728792003956564819949",
            10,
        );
        let r = modulus.montgomery_r();
        let r2 = modulus.montgomery_r2();

        let big_modulus = BigUint::from(modulus);
        let big_r = (BigUint::from(1u8) << 256) % &big_modulus;
        let big_r2 = (&big_r * &big_r) % &big_modulus;

        assert_eq!(BigUint::from(r), big_r);
        assert_eq!(BigUint::from(r2), big_r2);
    }

    #[test]
    fn shifts_saturate_instead_of_overflowing() {
        let num = Uint::<4>::new([1, 2, 3, 4]);
        assert_eq!(num >> 256, Uint::ZERO);
        assert_eq!(num << 256, Uint::ZERO);
        assert_eq!(num >> 64, Uint::new([2, 3, 4, 0]));
        assert_eq!(num << 64, Uint::new([0, 1, 2, 3]));
    }
}
