//! BLAKE3 content hashing for post-copy verification.

use std::fs::File;
use std::io;
use std::path::Path;

/// Hash a file's entire contents, streaming.
///
/// # Errors
///
/// Returns any I/O error from opening or reading the file.
pub fn hash_file(path: &Path) -> io::Result<[u8; 32]> {
    let mut file = File::open(path)?;
    let mut hasher = blake3::Hasher::new();
    io::copy(&mut file, &mut hasher)?;
    Ok(*hasher.finalize().as_bytes())
}
