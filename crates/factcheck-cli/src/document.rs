//! Document input.

use factcheck_domain::traits::DocumentSource;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

/// A plain-text document read from a file or standard input.
#[derive(Debug, Clone)]
pub enum PlainTextDocument {
    /// File on disk
    File(PathBuf),
    /// Standard input
    Stdin,
}

impl DocumentSource for PlainTextDocument {
    type Error = io::Error;

    fn read_text(&self) -> Result<String, Self::Error> {
        let text = match self {
            PlainTextDocument::File(path) => fs::read_to_string(path)?,
            PlainTextDocument::Stdin => {
                let mut buffer = String::new();
                io::stdin().read_to_string(&mut buffer)?;
                buffer
            }
        };
        Ok(text.trim_start_matches('\u{feff}').to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_read_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "\u{feff}The Great Wall is visible from space.").unwrap();

        let text = PlainTextDocument::File(file.path().to_path_buf())
            .read_text()
            .unwrap();
        assert_eq!(text, "The Great Wall is visible from space.");
    }

    #[test]
    fn test_missing_file() {
        let doc = PlainTextDocument::File(PathBuf::from("/nonexistent/doc.txt"));
        assert!(doc.read_text().is_err());
    }
}
