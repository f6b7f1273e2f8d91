use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub mod source;

pub use source::Source;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Could not open {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub fn open_file(path: &Path) -> Result<File, LoadError> {
    if !path.exists() {
        return Err(LoadError::FileNotFound(path.to_path_buf()));
    }

    File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Opens a file as a streaming tokenizer source.
pub fn open(path: &Path) -> Result<Source, LoadError> {
    Ok(Source::from_reader(open_file(path)?))
}

/// Standard input as a streaming tokenizer source.
pub fn stdin() -> Source {
    Source::from_reader(io::stdin())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Write;

    #[test]
    fn test_open_nonexistent_file() {
        let result = open(Path::new("/nonexistent/path/corpus.txt"));
        assert!(matches!(result, Err(LoadError::FileNotFound(_))));
    }

    #[test]
    fn test_open_reads_file() {
        let path = std::env::temp_dir().join("ptbtok_input_open_test.txt");
        let mut file = File::create(&path).unwrap();
        file.write_all(b"hello world\n").unwrap();

        let mut source = open(&path).unwrap();
        source.fill().unwrap();
        assert_eq!(source.rest(), "hello world\n");

        fs::remove_file(&path).unwrap();
    }
}
