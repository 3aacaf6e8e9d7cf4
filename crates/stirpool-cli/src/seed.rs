//! Seed file persistence.
//!
//! The file holds exactly the opaque `SEED_LEN`-byte blob the engine
//! exports. Anything else — missing file, truncated write from another
//! version, unreadable path — is treated as having no seed at all; corrupt
//! persisted state must never prevent startup.

use std::io;
use std::path::Path;

use log::warn;
use stirpool_core::SEED_LEN;

/// Read a previously stored seed blob, or `None` if absent or malformed.
pub fn load(path: &Path) -> Option<Vec<u8>> {
    match std::fs::read(path) {
        Ok(blob) if blob.len() == SEED_LEN => Some(blob),
        Ok(blob) => {
            warn!(
                "ignoring seed file {} with unexpected length {} (want {SEED_LEN})",
                path.display(),
                blob.len()
            );
            None
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => None,
        Err(err) => {
            warn!("cannot read seed file {}: {err}", path.display());
            None
        }
    }
}

/// Write the seed blob, owner-readable only where the platform supports it.
pub fn store(path: &Path, blob: &[u8]) -> io::Result<()> {
    std::fs::write(path, blob)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))?;
    }

    Ok(())
}
