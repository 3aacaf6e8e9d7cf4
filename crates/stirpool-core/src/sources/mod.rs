//! Built-in noise producers.
//!
//! Two default implementations of [`NoiseSource`](crate::NoiseSource), one
//! per cost profile: [`TimerNoise`] is the cheap per-stir light source,
//! [`SystemNoise`] the slow one-shot heavy source sampled at activation.
//! Hosts with richer ambient noise (keystroke timing, audio capture) plug in
//! their own sources alongside or instead of these.

mod system;
mod timer;

pub use system::SystemNoise;
pub use timer::TimerNoise;
