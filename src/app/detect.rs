use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Bytes inspected when deciding whether a file holds text.
pub const SNIFF_LEN: u64 = 1024;

/// Decode-attempt heuristic: a file is text when its first `SNIFF_LEN` bytes
/// are valid UTF-8. Empty files count as text; unreadable files do not.
pub fn looks_like_text(path: &Path) -> bool {
    match sniff(path) {
        Ok(is_text) => {
            if !is_text {
                log::debug!("Skipping binary file: {}", path.display());
            }
            is_text
        }
        Err(err) => {
            log::warn!("Could not read file {}: {}", path.display(), err);
            false
        }
    }
}

fn sniff(path: &Path) -> io::Result<bool> {
    let file = File::open(path)?;
    let metadata = file.metadata()?;
    if !metadata.is_file() {
        return Err(io::Error::new(io::ErrorKind::InvalidInput, "not a regular file"));
    }
    if metadata.len() == 0 {
        return Ok(true);
    }

    let mut head = Vec::with_capacity(SNIFF_LEN as usize);
    file.take(SNIFF_LEN).read_to_end(&mut head)?;

    Ok(is_utf8_prefix(&head, metadata.len() > SNIFF_LEN))
}

/// True when `bytes` is valid UTF-8. When the file continues past the window,
/// a final code point cut short by it still counts.
fn is_utf8_prefix(bytes: &[u8], truncated: bool) -> bool {
    match std::str::from_utf8(bytes) {
        Ok(_) => true,
        Err(err) => truncated && err.error_len().is_none(),
    }
}

/// Decodes `bytes` as UTF-8, dropping invalid sequences instead of failing.
pub fn decode_dropping_invalid(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        out.push_str(chunk.valid());
    }
    out
}
