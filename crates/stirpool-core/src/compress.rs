//! Block compression primitive used to mix the pool.
//!
//! The pool treats the hash as an opaque one-way compression function: a
//! 64-byte message block is folded into a 20-byte chaining value supplied by
//! the caller. Nothing in the mixing algorithm depends on which hash sits
//! behind the trait, only on the two sizes.

use sha1::digest::generic_array::GenericArray;

/// Digest / chaining value size in bytes.
pub const HASHSIZE: usize = 20;

/// Compression function input block size in bytes.
pub const HASHINPUT: usize = 64;

/// One-way compression: `chain <- Compress(chain, block)`.
///
/// Implementations must be pure functions of `(chain, block)` — the pool's
/// determinism guarantees (and its tests) rely on that.
pub trait BlockCompress {
    /// Fold `block` into `chain` in place.
    fn compress(&self, chain: &mut [u8; HASHSIZE], block: &[u8; HASHINPUT]);
}

/// Default primitive: the raw SHA-1 block transform.
///
/// Chain bytes map to the five 32-bit state words big-endian. The choice of
/// byte order only matters for consistency within a run; the pool never
/// interprets the words.
#[derive(Debug, Default, Clone, Copy)]
pub struct ShaCompress;

impl BlockCompress for ShaCompress {
    fn compress(&self, chain: &mut [u8; HASHSIZE], block: &[u8; HASHINPUT]) {
        let mut state = [0u32; 5];
        for (word, bytes) in state.iter_mut().zip(chain.chunks_exact(4)) {
            *word = u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
        }

        let block = GenericArray::clone_from_slice(block);
        sha1::compress(&mut state, core::slice::from_ref(&block));

        for (word, bytes) in state.iter().zip(chain.chunks_exact_mut(4)) {
            bytes.copy_from_slice(&word.to_be_bytes());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// SHA-1 initial state, big-endian bytes.
    const SHA1_IV: [u8; HASHSIZE] = [
        0x67, 0x45, 0x23, 0x01, 0xef, 0xcd, 0xab, 0x89, 0x98, 0xba, 0xdc, 0xfe, 0x10, 0x32, 0x54,
        0x76, 0xc3, 0xd2, 0xe1, 0xf0,
    ];

    #[test]
    fn test_known_answer_empty_message() {
        // One transform of the padding block for the empty message, starting
        // from the IV, must equal SHA-1("").
        let mut chain = SHA1_IV;
        let mut block = [0u8; HASHINPUT];
        block[0] = 0x80;

        ShaCompress.compress(&mut chain, &block);

        let expected: [u8; HASHSIZE] = [
            0xda, 0x39, 0xa3, 0xee, 0x5e, 0x6b, 0x4b, 0x0d, 0x32, 0x55, 0xbf, 0xef, 0x95, 0x60,
            0x18, 0x90, 0xaf, 0xd8, 0x07, 0x09,
        ];
        assert_eq!(chain, expected);
    }

    #[test]
    fn test_deterministic() {
        let mut a = [7u8; HASHSIZE];
        let mut b = [7u8; HASHSIZE];
        let block = [0x5c; HASHINPUT];
        ShaCompress.compress(&mut a, &block);
        ShaCompress.compress(&mut b, &block);
        assert_eq!(a, b);
    }

    #[test]
    fn test_chain_value_matters() {
        let mut a = [0u8; HASHSIZE];
        let mut b = [1u8; HASHSIZE];
        let block = [0x36; HASHINPUT];
        ShaCompress.compress(&mut a, &block);
        ShaCompress.compress(&mut b, &block);
        assert_ne!(a, b);
    }

    #[test]
    fn test_block_value_matters() {
        let mut a = SHA1_IV;
        let mut b = SHA1_IV;
        ShaCompress.compress(&mut a, &[0u8; HASHINPUT]);
        ShaCompress.compress(&mut b, &[1u8; HASHINPUT]);
        assert_ne!(a, b);
    }
}
