//! Text channel encoder

use std::fmt::{self, Display, Write as _};
use std::io::Write;
use std::path::Path;

use crate::error::CodecResult;
use crate::list::List;

/// Writes a list as readable blocks, one per element, each followed by a blank line
pub struct Encoder {
    // Currently stateless, but reserved for future options
}

impl Encoder {
    /// Create a new encoder
    pub fn new() -> Self {
        Self {}
    }

    /// Encode a list to a string
    ///
    /// Fails only if an element's `Display` implementation reports an error.
    pub fn encode<T: Display>(&self, list: &List<T>) -> CodecResult<String> {
        let mut output = String::new();
        for element in list {
            self.encode_block(&mut output, element)?;
        }
        Ok(output)
    }

    /// Encode a single block and its separator
    fn encode_block<T: Display>(&self, output: &mut String, element: &T) -> fmt::Result {
        write!(output, "{}", element)?;
        if !output.ends_with('\n') {
            output.push('\n');
        }
        output.push('\n');
        Ok(())
    }

    /// Encode a list directly to a writer
    pub fn encode_to_writer<T: Display, W: Write>(&self, list: &List<T>, mut writer: W) -> CodecResult<()> {
        let encoded = self.encode(list)?;
        writer.write_all(encoded.as_bytes())?;
        writer.flush()?;
        Ok(())
    }

    /// Encode a list to a file, replacing its contents
    pub fn encode_to_file<T: Display>(&self, list: &List<T>, path: &Path) -> CodecResult<()> {
        let encoded = self.encode(list)?;
        std::fs::write(path, encoded)?;
        log::info!("Wrote {} records to {}", list.len(), path.display());
        Ok(())
    }
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new()
    }
}
