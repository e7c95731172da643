//! SHA-512 hashing contracts.
//!
//! The signature engine never hashes directly; it consumes a hash through
//! the traits below, in either a synchronous or an asynchronous shape. The
//! [`Sha512Builder`] implementation backed by the `sha2` crate satisfies
//! both: every synchronous builder doubles as a ready-immediately
//! asynchronous one.

/// A streaming 64-byte-output hash state.
///
/// Instances represent state that is changed while hashing data: absorb
/// input with [`update`] and squeeze the digest with [`finalize`].
///
/// [`update`]: Digest512::update
/// [`finalize`]: Digest512::finalize
pub trait Digest512 {
    /// Absorb additional input. Can be called multiple times.
    fn update(&mut self, input: impl AsRef<[u8]>);

    /// Pad and squeeze the state to the 64-byte output.
    fn finalize(self) -> [u8; 64];
}

/// A trait for creating instances of [`Digest512`].
///
/// For each instance of `BuildDigest`, the digests created by
/// [`build_digest`] must be identical: feeding the same stream of bytes into
/// each produces the same output.
///
/// [`build_digest`]: BuildDigest::build_digest
pub trait BuildDigest {
    /// Type of the digest state that will be created.
    type Digest: Digest512;

    /// Creates a new digest state.
    fn build_digest(&self) -> Self::Digest;

    /// Hash the concatenation of `parts`.
    fn digest_parts(&self, parts: &[&[u8]]) -> [u8; 64] {
        let mut digest = self.build_digest();
        for part in parts {
            digest.update(part);
        }
        digest.finalize()
    }
}

/// The asynchronous shape of the hashing contract.
///
/// Engine operations with an `_async` suffix suspend only at this await
/// point; all arithmetic before and after runs to completion.
#[allow(async_fn_in_trait)]
pub trait AsyncDigest512 {
    /// Hash the concatenation of `parts`, possibly suspending.
    async fn digest(&self, parts: &[&[u8]]) -> [u8; 64];
}

/// Every synchronous hash serves the asynchronous contract by resolving
/// immediately.
impl<B: BuildDigest> AsyncDigest512 for B {
    async fn digest(&self, parts: &[&[u8]]) -> [u8; 64] {
        self.digest_parts(parts)
    }
}

/// The default [`BuildDigest`], producing SHA-512 states from the `sha2`
/// crate.
#[derive(Clone, Copy, Debug, Default)]
pub struct Sha512Builder;

impl BuildDigest for Sha512Builder {
    type Digest = Sha512;

    #[inline]
    fn build_digest(&self) -> Self::Digest {
        Sha512(sha2::Sha512::default())
    }
}

/// A SHA-512 digest state.
pub struct Sha512(sha2::Sha512);

impl Digest512 for Sha512 {
    fn update(&mut self, input: impl AsRef<[u8]>) {
        sha2::Digest::update(&mut self.0, input.as_ref());
    }

    fn finalize(self) -> [u8; 64] {
        let mut output = [0u8; 64];
        output.copy_from_slice(&sha2::Digest::finalize(self.0));
        output
    }
}

#[cfg(all(test, feature = "std"))]
mod tests {
    use hex_literal::hex;
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn empty_input_digest() {
        let digest = Sha512Builder.digest_parts(&[]);
        let expected = hex!(
            "cf83e1357eefb8bdf1542850d66d8007d620e4050b5715dc83f4a921d36ce9ce"
            "47d0d13c5d85f2b0ff8318d2877eec2f63b931bd47417a81a538327af927da3e"
        );
        assert_eq!(digest, expected);
    }

    #[test]
    fn known_digest() {
        let digest = Sha512Builder.digest_parts(&[b"abc"]);
        let expected = hex!(
            "ddaf35a193617abacc417349ae20413112e6fa4e89a97ea20a9eeee64b55d39a"
            "2192992a274fc1a836ba3c23a3feebbd454d4423643ce80e2a9ac94fa54ca49f"
        );
        assert_eq!(digest, expected);
    }

    #[test]
    fn split_parts_match_concatenated_input() {
        proptest!(|(data1: Vec<u8>, data2: Vec<u8>)| {
            let split = Sha512Builder.digest_parts(&[&data1, &data2]);

            let mut concatenated = data1.clone();
            concatenated.extend_from_slice(&data2);
            let joined = Sha512Builder.digest_parts(&[&concatenated]);

            prop_assert_eq!(split, joined);
        });
    }

    #[test]
    fn async_bridge_matches_sync_digest() {
        let sync_digest = Sha512Builder.digest_parts(&[b"bridge"]);
        let async_digest =
            futures::executor::block_on(Sha512Builder.digest(&[b"bridge"]));
        assert_eq!(sync_digest, async_digest);
    }
}
