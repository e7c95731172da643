//! Error taxonomy shared across the engine.
//!
//! Key derivation and signing surface these as hard failures. Verification
//! treats any parse-stage error as "signature does not verify" and returns
//! `false` instead of propagating.

/// A result with the engine's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

/// Failures raised while parsing or operating on engine inputs.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Hex input of odd length or with a non-hex digit, or a byte buffer of
    /// the wrong length for a seed, public key, or signature.
    #[error("invalid hex or byte encoding")]
    InvalidEncoding,
    /// A compressed point whose y-coordinate is out of range for the selected
    /// verification mode, that has no square root, or that carries the
    /// forbidden (x = 0, sign = 1) encoding in strict mode.
    #[error("invalid point encoding")]
    InvalidPoint,
    /// A scalar that is zero or not below the group order where one is
    /// required.
    #[error("scalar out of range")]
    InvalidScalar,
    /// An inversion of zero or of a non-unit element. Indicates corrupted
    /// input or a bug rather than a merely invalid signature.
    #[error("inversion of a non-invertible element")]
    InvalidInverse,
    /// The platform randomness source failed to produce bytes.
    #[cfg(feature = "rand")]
    #[error("platform randomness source unavailable")]
    RandomSource,
}
