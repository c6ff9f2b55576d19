use anyhow::{Context, Result, bail};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as B64;
use keyderive::DerivedKeypair;
use nix::sys::stat::Mode;
use nix::unistd::mkfifo;
use std::fs;
use std::io::{ErrorKind, Write};
use std::os::unix::fs::FileTypeExt;
use std::path::Path;
use zeroize::Zeroizing;

fn create_fifo(path: &Path, mode: Mode) -> Result<()> {
    match fs::symlink_metadata(path) {
        Ok(meta) if meta.file_type().is_fifo() => {
            fs::remove_file(path)
                .with_context(|| format!("failed to remove stale FIFO {}", path.display()))?;
        }
        Ok(_) => bail!("{} exists and is not a FIFO", path.display()),
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => {
            return Err(e).with_context(|| format!("failed to stat {}", path.display()));
        }
    }
    mkfifo(path, mode)
        .with_context(|| format!("failed to create FIFO at {}", path.display()))
}

/// JSON object mapping each subject to its base64-encoded 64-byte keypair.
pub fn payload(keypairs: &[(String, DerivedKeypair)]) -> Result<Zeroizing<Vec<u8>>> {
    let mut map = serde_json::Map::new();
    for (subject, keypair) in keypairs {
        let encoded = B64.encode(keypair.to_keypair_bytes().as_slice());
        map.insert(subject.clone(), serde_json::Value::String(encoded));
    }

    let mut json = Zeroizing::new(
        serde_json::to_vec(&serde_json::Value::Object(map))
            .context("failed to encode keypair payload")?,
    );
    json.push(b'\n');
    Ok(json)
}

/// Create a FIFO at `path` and hand the keypairs to whoever opens it for
/// reading. Loops forever so the consumer can reconnect on restart.
pub fn serve(path: &Path, keypairs: &[(String, DerivedKeypair)]) -> Result<()> {
    let json = payload(keypairs)?;

    let mode = Mode::S_IRUSR | Mode::S_IWUSR;
    log::info!("serving {} keypair(s) on FIFO {}", keypairs.len(), path.display());

    loop {
        create_fifo(path, mode)?;

        let mut file = fs::OpenOptions::new()
            .write(true)
            .open(path)
            .with_context(|| format!("failed to open FIFO {} for writing", path.display()))?;

        file.write_all(&json)
            .context("failed to write keypairs to FIFO")?;
        drop(file);

        log::info!("served keypairs to reader");
        fs::remove_file(path).ok();
    }
}
