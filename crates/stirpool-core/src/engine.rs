//! Engine owning the pool's lifecycle.
//!
//! The original construction kept the pool in process-wide static state
//! behind an "active" flag. Here the engine is an ordinary owned value: one
//! per client session, passed wherever randomness is needed, safe to have
//! several of in tests. Activation allocates and seeds the pool; before that
//! (and after deactivation) injected noise is dropped and extraction fails
//! with [`EngineError::NotActive`].

use log::{debug, trace, warn};

use crate::compress::{BlockCompress, ShaCompress};
use crate::error::EngineError;
use crate::pool::{SEED_LEN, StirPool};
use crate::source::NoiseSource;

/// Owner of one [`StirPool`] plus the two noise sources that feed it.
///
/// The light source is sampled on every stir; the heavy source once per
/// activation. All operations are synchronous and expect exclusive access —
/// wrap the engine in a mutex if producers live on other threads.
pub struct RandomEngine<C: BlockCompress = ShaCompress> {
    pool: Option<Box<StirPool<C>>>,
    light: Box<dyn NoiseSource>,
    heavy: Box<dyn NoiseSource>,
    compress: C,
}

impl RandomEngine<ShaCompress> {
    /// An inactive engine using the default SHA-1 transform.
    pub fn new(light: Box<dyn NoiseSource>, heavy: Box<dyn NoiseSource>) -> Self {
        Self::with_compress(light, heavy, ShaCompress)
    }
}

impl<C: BlockCompress + Clone> RandomEngine<C> {
    /// An inactive engine mixing with the given compression primitive.
    pub fn with_compress(
        light: Box<dyn NoiseSource>,
        heavy: Box<dyn NoiseSource>,
        compress: C,
    ) -> Self {
        Self {
            pool: None,
            light,
            heavy,
            compress,
        }
    }

    /// Whether the pool is currently allocated and seeded.
    pub fn is_active(&self) -> bool {
        self.pool.is_some()
    }

    /// Allocate, seed, and stir the pool. Idempotent — a second call while
    /// active does nothing.
    ///
    /// `saved_seed` is the blob a previous run exported via [`save_data`]
    /// (exactly [`SEED_LEN`] bytes). It is folded in through the bulk
    /// restirring path before the fresh heavy sample, so prior entropy is
    /// not discarded. A blob of any other length is untrusted persisted
    /// state and is treated as absent, never as an error.
    ///
    /// [`save_data`]: RandomEngine::save_data
    pub fn activate(&mut self, saved_seed: Option<&[u8]>) {
        if self.pool.is_some() {
            debug!("random pool already active, ignoring activate");
            return;
        }

        let mut pool = Box::new(StirPool::with_compress(self.compress.clone()));

        if let Some(seed) = saved_seed {
            if seed.len() == SEED_LEN {
                pool.add_heavy_noise(self.light.as_mut(), seed);
                debug!("restored {SEED_LEN}-byte saved seed");
            } else {
                warn!(
                    "discarding saved seed of unexpected length {} (want {SEED_LEN})",
                    seed.len()
                );
            }
        }

        let mut sample = Vec::new();
        self.heavy.gather(&mut sample);
        pool.add_heavy_noise_rolling(self.light.as_mut(), &sample);
        pool.stir(self.light.as_mut());

        debug!(
            "random pool active ({} heavy bytes from {})",
            sample.len(),
            self.heavy.name()
        );
        self.pool = Some(pool);
    }

    /// Free the pool. Idempotent — a no-op when already inactive.
    pub fn deactivate(&mut self) {
        if self.pool.take().is_some() {
            debug!("random pool deactivated");
        }
    }

    /// Fold environmental noise in through the light (staging) path.
    ///
    /// Dropped silently when inactive: producer callbacks may fire before
    /// setup finishes or after teardown, and must not crash the host.
    pub fn add_noise(&mut self, noise: &[u8]) {
        let Some(pool) = self.pool.as_mut() else {
            trace!("dropping {} noise bytes, pool not active", noise.len());
            return;
        };
        pool.add_noise(self.light.as_mut(), noise);
    }

    /// Fold a user-supplied bulk sample (e.g. recorded audio) in through the
    /// heavy restirring path. Dropped silently when inactive.
    pub fn add_user_noise(&mut self, noise: &[u8]) {
        let Some(pool) = self.pool.as_mut() else {
            trace!("dropping {} user noise bytes, pool not active", noise.len());
            return;
        };
        pool.add_heavy_noise(self.light.as_mut(), noise);
    }

    /// The next pseudo-random byte.
    pub fn next_byte(&mut self) -> Result<u8, EngineError> {
        let pool = self.pool.as_mut().ok_or(EngineError::NotActive)?;
        Ok(pool.next_byte(self.light.as_mut()))
    }

    /// Fill `buf` with pseudo-random bytes, the way the session-key layer
    /// consumes them.
    pub fn fill_bytes(&mut self, buf: &mut [u8]) -> Result<(), EngineError> {
        let pool = self.pool.as_mut().ok_or(EngineError::NotActive)?;
        for slot in buf {
            *slot = pool.next_byte(self.light.as_mut());
        }
        Ok(())
    }

    /// Export an opaque [`SEED_LEN`]-byte blob for the next run's activate.
    pub fn save_data(&mut self) -> Result<Vec<u8>, EngineError> {
        let pool = self.pool.as_mut().ok_or(EngineError::NotActive)?;
        Ok(pool.save_data(self.light.as_mut()))
    }
}
