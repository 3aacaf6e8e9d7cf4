//! The stirred entropy pool.
//!
//! Architecture:
//! 1. A fixed 1200-byte pool holds the mixed entropy we actually hand out
//! 2. A cursor walks the pool; bytes behind it have been revealed
//! 3. Light noise accumulates in a 64-byte staging buffer, is compressed
//!    into a running chain digest, and XOR-folds into the pool at the cursor
//! 4. A full stir remixes the whole pool with two backward CFB-style passes
//! 5. Heavy one-shot noise XORs straight across the pool, no staging
//!
//! After a stir the cursor sits at `HASHSIZE`, not zero: the first pool block
//! was the fixed mixing input for the whole stir, and handing it out would
//! give away the key the rest of the output was mixed with. The backward
//! block order exists for the same reason — output bytes were computed from
//! pool content that extraction has not yet revealed.
//!
//! This is a faithful rendition of a long-lived SSH client construction, kept
//! bit-exact for its observable behavior. Treat it as legacy-compatible
//! engineering, not as a modern CSPRNG design.

use crate::compress::{BlockCompress, HASHINPUT, HASHSIZE, ShaCompress};
use crate::source::NoiseSource;

/// Size of the random pool in bytes.
pub const POOLSIZE: usize = 1200;

/// Length of the opaque save blob produced by [`StirPool::save_data`].
pub const SEED_LEN: usize = POOLSIZE / 2;

// The stir walks the pool in digest-sized blocks.
const _: () = assert!(POOLSIZE % HASHSIZE == 0);
const _: () = assert!(POOLSIZE >= HASHINPUT);

/// A continuously-stirred pool of random bytes.
///
/// The pool has no opinion about where its noise comes from: every operation
/// that may need to re-stir takes the light [`NoiseSource`] as a parameter,
/// so one stir always folds in one fresh light sample. Lifecycle (activation
/// guards, heavy seeding, the inactive no-op policy) lives in
/// [`RandomEngine`](crate::RandomEngine); this type assumes it exists and is
/// being driven from a single thread.
pub struct StirPool<C: BlockCompress = ShaCompress> {
    pool: [u8; POOLSIZE],
    cursor: usize,
    chain: [u8; HASHSIZE],
    staging: [u8; HASHINPUT],
    staging_pos: usize,
    compress: C,
}

impl StirPool<ShaCompress> {
    /// A zero-filled pool using the default SHA-1 transform.
    ///
    /// A fresh pool has absorbed no noise yet — callers are expected to feed
    /// it heavy noise and stir before extracting anything.
    pub fn new() -> Self {
        Self::with_compress(ShaCompress)
    }
}

impl Default for StirPool<ShaCompress> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: BlockCompress> StirPool<C> {
    /// A zero-filled pool mixing with the given compression primitive.
    pub fn with_compress(compress: C) -> Self {
        Self {
            pool: [0; POOLSIZE],
            cursor: 0,
            chain: [0; HASHSIZE],
            staging: [0; HASHINPUT],
            staging_pos: 0,
            compress,
        }
    }

    /// Absorb light noise through the staging buffer.
    ///
    /// Cheap enough to call per timer tick or per keystroke. Whenever the
    /// staging buffer fills, it is compressed into the chain and the chain is
    /// XOR-folded into the pool at the cursor; if that fold wraps around and
    /// lands back inside the first block, the pool has completed a full lap
    /// of folding and gets stirred on the spot.
    pub fn add_noise(&mut self, light: &mut dyn NoiseSource, noise: &[u8]) {
        self.absorb(noise, Some(light));
    }

    /// Full remix of the pool: one light sample, then two CFB passes.
    ///
    /// Always safe to call. The light sample taken here is absorbed without
    /// the fold-triggered auto-stir — the remix below runs unconditionally,
    /// so re-entering it from its own noise sample would only loop.
    pub fn stir(&mut self, light: &mut dyn NoiseSource) {
        let mut sample = Vec::new();
        light.gather(&mut sample);
        self.absorb(&sample, None);
        self.remix();
    }

    /// Absorb bulk noise, restirring after every full pool width.
    ///
    /// XORs `POOLSIZE`-byte chunks straight across the pool, stirring after
    /// each one, then XORs the remaining tail from the start of the pool and
    /// stirs once more. Used for one-shot seeding where the whole sample is
    /// in hand and the pool should be fully remixed before use.
    pub fn add_heavy_noise(&mut self, light: &mut dyn NoiseSource, mut noise: &[u8]) {
        while noise.len() >= POOLSIZE {
            for (slot, b) in self.pool.iter_mut().zip(noise) {
                *slot ^= *b;
            }
            noise = &noise[POOLSIZE..];
            self.stir(light);
        }

        for (slot, b) in self.pool.iter_mut().zip(noise) {
            *slot ^= *b;
        }
        self.stir(light);
    }

    /// Absorb bulk noise incrementally, respecting the rolling cursor.
    ///
    /// XORs starting at the current cursor, stirring only when a full lap of
    /// the pool completes (and continuing from position 0 afterwards). The
    /// tail lands at the cursor and advances it; no final stir is forced.
    /// Suits noise whose total size is not known in advance.
    pub fn add_heavy_noise_rolling(&mut self, light: &mut dyn NoiseSource, mut noise: &[u8]) {
        while noise.len() >= POOLSIZE - self.cursor {
            let span = POOLSIZE - self.cursor;
            for (slot, b) in self.pool[self.cursor..].iter_mut().zip(&noise[..span]) {
                *slot ^= *b;
            }
            noise = &noise[span..];
            self.stir(light);
            self.cursor = 0;
        }

        for (slot, b) in self.pool[self.cursor..].iter_mut().zip(noise) {
            *slot ^= *b;
        }
        self.cursor += noise.len();
    }

    /// The next pseudo-random byte, stirring first if the pool is exhausted.
    pub fn next_byte(&mut self, light: &mut dyn NoiseSource) -> u8 {
        if self.cursor >= POOLSIZE {
            self.stir(light);
        }
        let byte = self.pool[self.cursor];
        self.cursor += 1;
        byte
    }

    /// An opaque `SEED_LEN`-byte blob for persistence across runs.
    ///
    /// Stirs, copies half the pool at the cursor, then stirs again — the
    /// exported blob can predict neither prior nor subsequent output, and two
    /// back-to-back calls never return the same bytes.
    pub fn save_data(&mut self, light: &mut dyn NoiseSource) -> Vec<u8> {
        self.stir(light);
        let blob = self.pool[self.cursor..self.cursor + SEED_LEN].to_vec();
        self.stir(light);
        blob
    }

    /// Staging-buffer ingestion shared by the light path and the in-stir
    /// sample. `restir` carries the light source when the fold-triggered
    /// auto-stir is allowed; `None` while stirring.
    fn absorb(&mut self, mut noise: &[u8], mut restir: Option<&mut dyn NoiseSource>) {
        while noise.len() >= HASHINPUT - self.staging_pos {
            let take = HASHINPUT - self.staging_pos;
            self.staging[self.staging_pos..].copy_from_slice(&noise[..take]);
            noise = &noise[take..];

            let wrapped = self.fold_staged();
            if wrapped {
                if let Some(light) = restir.as_deref_mut() {
                    self.stir(light);
                }
            }
        }

        self.staging[self.staging_pos..self.staging_pos + noise.len()].copy_from_slice(noise);
        self.staging_pos += noise.len();
    }

    /// Compress the full staging buffer into the chain and XOR-fold the
    /// chain into the pool at the cursor, wrapping at the end. Returns true
    /// when the fold wrapped back below the first block.
    fn fold_staged(&mut self) -> bool {
        self.compress.compress(&mut self.chain, &self.staging);
        self.staging_pos = 0;

        for k in 0..HASHSIZE {
            self.pool[self.cursor] ^= self.chain[k];
            self.cursor += 1;
            if self.cursor >= POOLSIZE {
                self.cursor = 0;
            }
        }

        self.cursor < HASHSIZE
    }

    /// The two-pass CFB remix.
    ///
    /// The working digest starts from the chain. Each pass walks the pool
    /// backwards in `HASHSIZE` blocks, XORing the block into the digest,
    /// compressing with the pool's first `HASHINPUT` bytes as the fixed
    /// message block, and writing the digest back. The fixed block is
    /// re-captured per pass (pass one rewrites it at its last step). One
    /// final compression seeds the next stir's chain, and the cursor parks
    /// just past the never-revealed first block.
    fn remix(&mut self) {
        self.compress.compress(&mut self.chain, &self.staging);
        self.staging_pos = 0;

        let mut digest = self.chain;
        let mut block = [0u8; HASHINPUT];

        for _pass in 0..2 {
            block.copy_from_slice(&self.pool[..HASHINPUT]);

            let mut j = POOLSIZE;
            while j >= HASHSIZE {
                j -= HASHSIZE;
                for (d, p) in digest.iter_mut().zip(&self.pool[j..j + HASHSIZE]) {
                    *d ^= *p;
                }
                self.compress.compress(&mut digest, &block);
                self.pool[j..j + HASHSIZE].copy_from_slice(&digest);
            }
        }

        self.compress.compress(&mut digest, &block);
        self.chain = digest;

        self.cursor = HASHSIZE;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -----------------------------------------------------------------------
    // Deterministic stub sources
    // -----------------------------------------------------------------------

    /// Light source returning the same bytes on every sample.
    struct FixedNoise(Vec<u8>);

    impl NoiseSource for FixedNoise {
        fn name(&self) -> &'static str {
            "fixed"
        }
        fn gather(&mut self, out: &mut Vec<u8>) {
            out.extend_from_slice(&self.0);
        }
    }

    /// Light source that counts how many times it was sampled — one sample
    /// per stir, so the count observes stir invocations from outside.
    struct CountingNoise {
        calls: usize,
        data: Vec<u8>,
    }

    impl CountingNoise {
        fn silent() -> Self {
            Self {
                calls: 0,
                data: Vec::new(),
            }
        }
        fn with_data(data: Vec<u8>) -> Self {
            Self { calls: 0, data }
        }
    }

    impl NoiseSource for CountingNoise {
        fn name(&self) -> &'static str {
            "counting"
        }
        fn gather(&mut self, out: &mut Vec<u8>) {
            self.calls += 1;
            out.extend_from_slice(&self.data);
        }
    }

    fn sequential(n: usize) -> Vec<u8> {
        (0..n).map(|i| i as u8).collect()
    }

    // -----------------------------------------------------------------------
    // Stir behavior
    // -----------------------------------------------------------------------

    #[test]
    fn test_stir_is_deterministic() {
        let mut a = StirPool::new();
        let mut b = StirPool::new();
        let mut light_a = FixedNoise(vec![0x17; 33]);
        let mut light_b = FixedNoise(vec![0x17; 33]);

        a.add_noise(&mut light_a, b"same ambient noise either way");
        b.add_noise(&mut light_b, b"same ambient noise either way");
        a.stir(&mut light_a);
        b.stir(&mut light_b);

        assert_eq!(a.pool, b.pool);
        assert_eq!(a.chain, b.chain);
        assert_eq!(a.cursor, b.cursor);
    }

    #[test]
    fn test_stir_parks_cursor_past_first_block() {
        let mut pool = StirPool::new();
        let mut light = FixedNoise(vec![9; 8]);
        pool.stir(&mut light);
        assert_eq!(pool.cursor, HASHSIZE);
    }

    #[test]
    fn test_stir_changes_pool_and_chain() {
        let mut pool = StirPool::new();
        let mut light = FixedNoise(vec![0xF0; 16]);
        let before = pool.pool;
        pool.stir(&mut light);
        assert_ne!(pool.pool, before);
        assert_ne!(pool.chain, [0u8; HASHSIZE]);
    }

    #[test]
    fn test_stir_samples_light_exactly_once() {
        let mut pool = StirPool::new();
        let mut light = CountingNoise::silent();
        pool.stir(&mut light);
        assert_eq!(light.calls, 1);
    }

    // -----------------------------------------------------------------------
    // Light noise path
    // -----------------------------------------------------------------------

    #[test]
    fn test_add_noise_zero_length_is_noop() {
        let mut pool = StirPool::new();
        let mut light = CountingNoise::silent();
        pool.add_noise(&mut light, &[]);
        assert_eq!(pool.pool, [0u8; POOLSIZE]);
        assert_eq!(pool.cursor, 0);
        assert_eq!(pool.staging_pos, 0);
        assert_eq!(light.calls, 0);
    }

    #[test]
    fn test_add_noise_accumulates_in_staging() {
        let mut pool = StirPool::new();
        let mut light = CountingNoise::silent();

        pool.add_noise(&mut light, &[1; 10]);
        assert_eq!(pool.staging_pos, 10);
        // Pool itself untouched until the staging buffer fills.
        assert_eq!(pool.pool, [0u8; POOLSIZE]);

        pool.add_noise(&mut light, &[2; HASHINPUT - 10]);
        assert_eq!(pool.staging_pos, 0);
        assert_eq!(pool.cursor, HASHSIZE);
        assert_ne!(pool.pool, [0u8; POOLSIZE]);
        assert_eq!(light.calls, 0, "no stir before the fold wraps");
    }

    #[test]
    fn test_fold_wraparound_triggers_auto_stir() {
        let mut pool = StirPool::new();
        let mut light = CountingNoise::with_data(vec![0xA5; 8]);
        let chain_before = pool.chain;

        // 60 full staging blocks fold 60 * HASHSIZE = POOLSIZE bytes into the
        // pool, so the fold cursor completes exactly one lap and wraps to 0.
        pool.add_noise(&mut light, &sequential(60 * HASHINPUT));

        assert_eq!(light.calls, 1, "the wrap must have stirred exactly once");
        assert_eq!(pool.cursor, HASHSIZE);
        assert_ne!(pool.chain, chain_before);
    }

    #[test]
    fn test_add_noise_multiblock_input_consumed() {
        let mut pool = StirPool::new();
        let mut light = CountingNoise::silent();
        // 3.5 staging blocks: three folds plus a half-full staging buffer.
        pool.add_noise(&mut light, &sequential(HASHINPUT * 3 + HASHINPUT / 2));
        assert_eq!(pool.cursor, 3 * HASHSIZE);
        assert_eq!(pool.staging_pos, HASHINPUT / 2);
    }

    // -----------------------------------------------------------------------
    // Heavy noise paths
    // -----------------------------------------------------------------------

    #[test]
    fn test_heavy_noise_stir_count() {
        let mut pool = StirPool::new();
        let mut light = CountingNoise::silent();
        // floor(3000 / 1200) = 2 full chunks, then the partial tail: 3 stirs.
        pool.add_heavy_noise(&mut light, &sequential(3000));
        assert_eq!(light.calls, 3);
        assert_eq!(pool.cursor, HASHSIZE);
    }

    #[test]
    fn test_heavy_noise_empty_input_still_stirs_once() {
        let mut pool = StirPool::new();
        let mut light = CountingNoise::silent();
        pool.add_heavy_noise(&mut light, &[]);
        assert_eq!(light.calls, 1);
    }

    #[test]
    fn test_heavy_noise_is_deterministic() {
        let mut a = StirPool::new();
        let mut b = StirPool::new();
        let mut light_a = FixedNoise(vec![3; 5]);
        let mut light_b = FixedNoise(vec![3; 5]);
        a.add_heavy_noise(&mut light_a, &sequential(2500));
        b.add_heavy_noise(&mut light_b, &sequential(2500));
        assert_eq!(a.pool, b.pool);
        assert_eq!(a.chain, b.chain);
    }

    #[test]
    fn test_rolling_heavy_noise_tail_advances_cursor() {
        let mut pool = StirPool::new();
        let mut light = CountingNoise::silent();
        pool.stir(&mut light);
        assert_eq!(pool.cursor, HASHSIZE);

        // 100 bytes from cursor 20: no lap completes, no extra stir.
        pool.add_heavy_noise_rolling(&mut light, &sequential(100));
        assert_eq!(pool.cursor, HASHSIZE + 100);
        assert_eq!(light.calls, 1);
    }

    #[test]
    fn test_rolling_heavy_noise_stirs_per_lap() {
        let mut pool = StirPool::new();
        let mut light = CountingNoise::silent();
        // From cursor 0: two full 1200-byte laps stir, the 600-byte tail
        // lands at position 0 and only advances the cursor.
        pool.add_heavy_noise_rolling(&mut light, &sequential(3000));
        assert_eq!(light.calls, 2);
        assert_eq!(pool.cursor, 600);
    }

    // -----------------------------------------------------------------------
    // Extraction
    // -----------------------------------------------------------------------

    #[test]
    fn test_cursor_never_exceeds_poolsize() {
        let mut pool = StirPool::new();
        let mut light = CountingNoise::silent();
        pool.stir(&mut light);

        for _ in 0..(3 * POOLSIZE) {
            pool.next_byte(&mut light);
            assert!(pool.cursor <= POOLSIZE);
        }
    }

    #[test]
    fn test_exhausted_pool_stirs_exactly_once() {
        let mut pool = StirPool::new();
        let mut light = CountingNoise::silent();
        pool.stir(&mut light);
        assert_eq!(light.calls, 1);

        // Drain the pool to the very end.
        for _ in 0..(POOLSIZE - HASHSIZE) {
            pool.next_byte(&mut light);
        }
        assert_eq!(pool.cursor, POOLSIZE);
        assert_eq!(light.calls, 1);

        // The next read must restir exactly once before producing a byte.
        pool.next_byte(&mut light);
        assert_eq!(light.calls, 2);
        assert_eq!(pool.cursor, HASHSIZE + 1);
    }

    #[test]
    fn test_extraction_is_deterministic() {
        let run = || {
            let mut pool = StirPool::new();
            let mut light = FixedNoise(vec![0x42; 24]);
            pool.add_heavy_noise(&mut light, &[0xAA; POOLSIZE]);
            (0..64).map(|_| pool.next_byte(&mut light)).collect::<Vec<u8>>()
        };
        assert_eq!(run(), run());
    }

    // -----------------------------------------------------------------------
    // Save data
    // -----------------------------------------------------------------------

    #[test]
    fn test_save_data_length() {
        let mut pool = StirPool::new();
        let mut light = FixedNoise(vec![1, 2, 3]);
        let blob = pool.save_data(&mut light);
        assert_eq!(blob.len(), SEED_LEN);
    }

    #[test]
    fn test_save_data_never_repeats() {
        let mut pool = StirPool::new();
        let mut light = CountingNoise::silent();
        let first = pool.save_data(&mut light);
        let second = pool.save_data(&mut light);
        assert_ne!(first, second, "a stir before and after each copy makes save data one-shot");
        assert_eq!(light.calls, 4);
    }
}
