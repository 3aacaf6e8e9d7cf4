//! Abstract noise source trait.
//!
//! The pool is fed by two producers with very different cost profiles: a
//! *light* source the stir operation samples every time it runs (cheap, may
//! return only a handful of bytes), and a *heavy* source sampled once at
//! activation (slow, large, high entropy). Both speak the same trait; the
//! engine decides which role a source plays.

/// A producer of environmental noise bytes.
///
/// `gather` appends however many bytes the source has to offer right now —
/// there is no length contract, and appending nothing is legal. Sources may
/// keep internal state (counters, previous snapshots) between calls.
pub trait NoiseSource {
    /// Short identifier used in log messages.
    fn name(&self) -> &'static str;

    /// Append a noise sample to `out`. Must be synchronous and non-blocking
    /// in spirit: light sources are called on every stir.
    fn gather(&mut self, out: &mut Vec<u8>);
}

/// A source with nothing to offer. Useful for hosts without ambient noise
/// and for deterministic tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct EmptyNoise;

impl NoiseSource for EmptyNoise {
    fn name(&self) -> &'static str {
        "empty"
    }

    fn gather(&mut self, _out: &mut Vec<u8>) {}
}
