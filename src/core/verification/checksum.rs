//! Checksum calculation for exported archives

use crate::domain::Result;
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Calculate the SHA-256 checksum of a file
///
/// Returns a hex-encoded checksum string (64 characters).
///
/// # Examples
///
/// ```no_run
/// use confzip::core::verification::checksum::checksum_file;
///
/// let checksum = checksum_file("wireguard-export.zip").unwrap();
/// assert_eq!(checksum.len(), 64);
/// ```
pub fn checksum_file(path: impl AsRef<Path>) -> Result<String> {
    let mut reader = BufReader::new(File::open(path.as_ref())?);
    let mut hasher = Sha256::new();
    let mut buf = [0u8; 8192];

    loop {
        let n = reader.read(&mut buf)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }

    Ok(format!("{:x}", hasher.finalize()))
}

/// Calculate the SHA-256 checksum of a byte slice
pub fn checksum_bytes(data: &[u8]) -> String {
    format!("{:x}", Sha256::digest(data))
}
