//! Fixed-width big-integer arithmetic and its generic interface.

pub mod limb;
pub mod uint;

use core::{
    fmt::{Debug, Display},
    ops::{Shl, ShlAssign, Shr, ShrAssign},
};

pub use limb::Limb;
use zeroize::Zeroize;

use crate::bits::BitIteratorBE;

/// Defines a big integer with a constant length.
pub trait BigInteger:
    'static
    + Copy
    + Clone
    + Debug
    + Default
    + Display
    + Eq
    + Ord
    + Send
    + Sized
    + Sync
    + Zeroize
    + From<u64>
    + From<u32>
    + From<u16>
    + From<u8>
    + BitIteratorBE
    + Shr<u32, Output = Self>
    + ShrAssign<u32>
    + Shl<u32, Output = Self>
    + ShlAssign<u32>
{
    /// Number of 64-bit limbs representing `Self`.
    const NUM_LIMBS: usize;

    /// Number of bytes in the integer.
    const BYTES: usize = Self::BITS / 8;

    /// Number of bits in the integer.
    const BITS: usize;

    /// The largest value that can be represented by this integer type.
    const MAX: Self;

    /// The multiplicative identity element of `Self`, 1.
    const ONE: Self;

    /// The additive identity element of `Self`, 0.
    const ZERO: Self;

    /// Returns true if this number is odd.
    ///
    /// ```
    /// use edwards25519::arithmetic::{uint::U64, BigInteger};
    ///
    /// assert!(U64::from(1u64).is_odd());
    /// ```
    fn is_odd(&self) -> bool;

    /// Returns true if this number is even.
    fn is_even(&self) -> bool;

    /// Returns true if this number is zero.
    fn is_zero(&self) -> bool;

    /// Compute the minimum number of bits needed to encode this number.
    ///
    /// ```
    /// use edwards25519::arithmetic::{uint::U64, BigInteger};
    ///
    /// assert_eq!(U64::from(0u64).num_bits(), 0);
    /// assert_eq!(U64::from(u32::MAX as u64).num_bits(), 32);
    /// ```
    fn num_bits(&self) -> usize;

    /// Compute the `i`-th bit of `self`, where bit 0 is the least
    /// significant one.
    fn get_bit(&self, i: usize) -> bool;

    /// Create a big integer from little-endian bytes.
    ///
    /// # Panics
    ///
    /// Panics if the number of bytes is not equal to `Self::BYTES`.
    fn from_bytes_le(bytes: &[u8]) -> Self;

    /// Convert the big integer to little-endian bytes.
    fn into_bytes_le(self) -> alloc::vec::Vec<u8>;
}
