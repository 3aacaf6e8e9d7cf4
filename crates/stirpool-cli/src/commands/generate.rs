use std::io::{self, Write};
use std::path::Path;

use stirpool_core::{RandomEngine, SystemNoise, TimerNoise};

use crate::seed;

pub fn run(
    bytes: usize,
    raw: bool,
    output: Option<&Path>,
    seed_file: Option<&Path>,
) -> io::Result<()> {
    let mut engine = RandomEngine::new(
        Box::new(TimerNoise::new()),
        Box::new(SystemNoise::new()),
    );

    let saved = seed_file.and_then(seed::load);
    engine.activate(saved.as_deref());

    let mut buf = vec![0u8; bytes];
    engine.fill_bytes(&mut buf).map_err(io::Error::other)?;

    match output {
        Some(path) if raw => std::fs::write(path, &buf)?,
        Some(path) => std::fs::write(path, hex(&buf))?,
        None if raw => io::stdout().write_all(&buf)?,
        None => println!("{}", hex(&buf)),
    }

    // Refresh the seed file so the next run starts from today's entropy.
    if let Some(path) = seed_file {
        let blob = engine.save_data().map_err(io::Error::other)?;
        seed::store(path, &blob)?;
        log::debug!("seed file refreshed at {}", path.display());
    }

    Ok(())
}

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_encoding() {
        assert_eq!(hex(&[0x00, 0x0f, 0xa5, 0xff]), "000fa5ff");
        assert_eq!(hex(&[]), "");
    }
}
