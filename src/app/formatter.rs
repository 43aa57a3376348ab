use crate::app::detect::decode_dropping_invalid;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

pub struct OutputGenerator;

impl OutputGenerator {
    /// Header line for one entry: `# <relative/path>`.
    pub fn header(relative_path: &str) -> String {
        format!("# {}\n", relative_path)
    }

    /// Reads `path` and writes a complete entry (header, content, blank line).
    ///
    /// The content is read before anything is written, so a read failure
    /// leaves `out` untouched.
    pub fn write_entry<W: Write>(out: &mut W, relative_path: &str, path: &Path) -> io::Result<()> {
        let bytes = fs::read(path)?;
        let content = decode_dropping_invalid(&bytes);

        out.write_all(Self::header(relative_path).as_bytes())?;
        out.write_all(content.as_bytes())?;
        out.write_all(b"\n\n")?;
        Ok(())
    }
}
