//! # stirpool-core
//!
//! **A continuously-stirred entropy pool for SSH session randomness.**
//!
//! `stirpool-core` maintains a fixed 1200-byte pool of mixed entropy,
//! re-stirred with a CFB-style two-pass hash construction whenever its
//! unread bytes run out. Cheap ambient noise (timers, keystrokes) drips in
//! through a staging buffer on every stir; a large one-shot system snapshot
//! seeds the pool at activation. Consumers pull single bytes for session
//! keys, padding, and nonces.
//!
//! ## Quick start
//!
//! ```
//! use stirpool_core::{RandomEngine, SystemNoise, TimerNoise};
//!
//! let mut engine = RandomEngine::new(
//!     Box::new(TimerNoise::new()),
//!     Box::new(SystemNoise::new()),
//! );
//! engine.activate(None);
//!
//! let mut session_key = [0u8; 32];
//! engine.fill_bytes(&mut session_key).unwrap();
//!
//! // Persist across runs: feed this blob to the next activate().
//! let seed = engine.save_data().unwrap();
//! assert_eq!(seed.len(), stirpool_core::SEED_LEN);
//! ```
//!
//! ## Architecture
//!
//! Noise sources → staging buffer → chain digest → pool ← stir ← extraction
//!
//! - [`StirPool`] owns the buffer, cursor, chain, and staging state, and
//!   implements the mixing algorithm.
//! - [`RandomEngine`] owns the pool's lifecycle plus the two [`NoiseSource`]
//!   producers, and enforces the inactive-engine policy.
//! - [`BlockCompress`] is the seam for the hash primitive (default: the raw
//!   SHA-1 block transform).
//!
//! ## A note on the construction
//!
//! The mixing algorithm reproduces a long-deployed SSH client design,
//! including its deliberate quirks (backward block order, the unrevealed
//! first block, cursor parked past it after every stir). It predates modern
//! sponge-based CSPRNGs and carries no formal mixing proof; it is preserved
//! as legacy-compatible engineering, not recommended for new designs.

pub mod compress;
pub mod engine;
pub mod error;
pub mod pool;
pub mod source;
pub mod sources;

pub use compress::{BlockCompress, HASHINPUT, HASHSIZE, ShaCompress};
pub use engine::RandomEngine;
pub use error::EngineError;
pub use pool::{POOLSIZE, SEED_LEN, StirPool};
pub use source::{EmptyNoise, NoiseSource};
pub use sources::{SystemNoise, TimerNoise};

/// Library version (from Cargo.toml).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
