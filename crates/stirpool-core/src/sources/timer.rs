//! TimerNoise — light source sampling wall clock, monotonic clock jitter,
//! and volatile process counters.
//!
//! Called on every stir, so the sample stays small and cheap: a few dozen
//! bytes of timestamps plus the low bits of back-to-back monotonic clock
//! reads, whose deltas wobble with interrupt and scheduler activity.

use std::time::{Instant, SystemTime, UNIX_EPOCH};

use crate::source::NoiseSource;

/// Number of back-to-back monotonic clock reads per sample.
const JITTER_ROUNDS: usize = 16;

/// Cheap ambient entropy: timers, clock jitter, and a call counter.
///
/// The counter guarantees consecutive samples differ even on hosts with a
/// coarse monotonic clock.
#[derive(Debug, Default)]
pub struct TimerNoise {
    calls: u64,
}

impl TimerNoise {
    pub fn new() -> Self {
        Self::default()
    }
}

impl NoiseSource for TimerNoise {
    fn name(&self) -> &'static str {
        "timer_jitter"
    }

    fn gather(&mut self, out: &mut Vec<u8>) {
        self.calls = self.calls.wrapping_add(1);

        let wall = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default();
        out.extend_from_slice(&wall.as_nanos().to_le_bytes());
        out.extend_from_slice(&std::process::id().to_le_bytes());
        out.extend_from_slice(&self.calls.to_le_bytes());

        // LSBs of deltas between consecutive monotonic reads.
        let mut prev = Instant::now();
        for _ in 0..JITTER_ROUNDS {
            let now = Instant::now();
            out.push(now.duration_since(prev).subsec_nanos() as u8);
            prev = now;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_is_nonempty_and_bounded() {
        let mut source = TimerNoise::new();
        let mut out = Vec::new();
        source.gather(&mut out);
        assert!(!out.is_empty());
        // Light samples must stay comfortably small.
        assert!(out.len() < 128, "light sample too large: {}", out.len());
    }

    #[test]
    fn test_consecutive_samples_differ() {
        let mut source = TimerNoise::new();
        let mut first = Vec::new();
        let mut second = Vec::new();
        source.gather(&mut first);
        source.gather(&mut second);
        // The embedded call counter alone forces a difference.
        assert_ne!(first, second);
    }
}
