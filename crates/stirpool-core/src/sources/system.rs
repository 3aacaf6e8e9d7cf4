//! SystemNoise — heavy one-shot source snapshotting volatile system state.
//!
//! Sampled once at activation, so it is allowed to be slow and large: kernel
//! counter files where the platform has them, the process environment, read
//! timing jitter, and an OS CSPRNG safety net so the heavy sample is strong
//! even on hosts where everything else is empty or predictable.

use std::time::Instant;

use crate::source::NoiseSource;

/// Volatile kernel counter files, read when present. Every one of these
/// changes continuously on a live Linux host; on other platforms the reads
/// simply fail and are skipped.
const PROC_FILES: &[&str] = &[
    "/proc/self/stat",
    "/proc/self/statm",
    "/proc/stat",
    "/proc/meminfo",
    "/proc/loadavg",
    "/proc/uptime",
    "/proc/interrupts",
];

/// Bytes of OS CSPRNG output mixed into every heavy sample.
const SAFETY_NET_BYTES: usize = 256;

/// One-shot system snapshot: kernel counters, environment, read timing,
/// plus OS random bytes.
#[derive(Debug, Default)]
pub struct SystemNoise;

impl SystemNoise {
    pub fn new() -> Self {
        Self
    }
}

impl NoiseSource for SystemNoise {
    fn name(&self) -> &'static str {
        "system_snapshot"
    }

    fn gather(&mut self, out: &mut Vec<u8>) {
        // Kernel counters, with the per-file read latency folded in as
        // timing jitter.
        for path in PROC_FILES {
            let start = Instant::now();
            if let Ok(bytes) = std::fs::read(path) {
                out.extend_from_slice(&bytes);
            }
            out.extend_from_slice(&start.elapsed().subsec_nanos().to_le_bytes());
        }

        // Process environment: pointer-ish values, session identifiers,
        // paths. Low entropy per byte but plenty of machine-specific state.
        for (key, value) in std::env::vars_os() {
            out.extend_from_slice(key.as_encoded_bytes());
            out.extend_from_slice(value.as_encoded_bytes());
        }

        out.extend_from_slice(&getrandom(SAFETY_NET_BYTES));
    }
}

/// OS random bytes via the `getrandom` crate.
///
/// # Panics
/// Panics if the OS CSPRNG fails — this indicates a fatal platform issue.
fn getrandom(n: usize) -> Vec<u8> {
    let mut buf = vec![0u8; n];
    getrandom::fill(&mut buf).expect("OS CSPRNG failed");
    buf
}
