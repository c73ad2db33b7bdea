//! JSON document writer rooted at the output directory.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};

#[derive(Debug, Clone)]
pub struct JsonWriter {
    root: PathBuf,
    pretty: bool,
}

impl JsonWriter {
    pub fn new(root: impl Into<PathBuf>, pretty: bool) -> Self {
        JsonWriter {
            root: root.into(),
            pretty,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Writer for a subdirectory, e.g. `gen8/`.
    pub fn nested(&self, dir: impl AsRef<Path>) -> Self {
        JsonWriter {
            root: self.root.join(dir),
            pretty: self.pretty,
        }
    }

    /// Serialize `value` to `<root>/<file>`, creating parent directories.
    pub fn write<T: Serialize + ?Sized>(&self, file: impl AsRef<Path>, value: &T) -> Result<()> {
        let path = self.root.join(file);
        let mut json = if self.pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        }
        .map_err(|source| Error::Serialize {
            path: path.clone(),
            source,
        })?;
        json.push('\n');

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| Error::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(&path, json).map_err(|source| Error::Write { path, source })
    }
}

/// Remove everything inside `dir`, creating it when missing.
pub fn empty_dir(dir: &Path) -> Result<()> {
    if dir.exists() {
        debug!(dir = %dir.display(), "emptying output directory");
        fs::remove_dir_all(dir).map_err(|source| Error::Write {
            path: dir.to_path_buf(),
            source,
        })?;
    }
    fs::create_dir_all(dir).map_err(|source| Error::Write {
        path: dir.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_pretty_output_has_trailing_newline() {
        let dir = tempfile::tempdir().unwrap();
        let writer = JsonWriter::new(dir.path(), true).nested("gen1");
        writer.write("pokemon/bulbasaur.json", &json!({ "slug": "bulbasaur" })).unwrap();

        let written = fs::read_to_string(dir.path().join("gen1/pokemon/bulbasaur.json")).unwrap();
        assert_eq!(written, "{\n  \"slug\": \"bulbasaur\"\n}\n");
    }

    #[test]
    fn test_compact_output() {
        let dir = tempfile::tempdir().unwrap();
        let writer = JsonWriter::new(dir.path(), false);
        writer.write("a.json", &vec![1, 2]).unwrap();
        assert_eq!(fs::read_to_string(dir.path().join("a.json")).unwrap(), "[1,2]\n");
    }

    #[test]
    fn test_empty_dir() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("generated");
        fs::create_dir_all(out.join("gen1")).unwrap();
        fs::write(out.join("gen1/old.json"), "{}").unwrap();

        empty_dir(&out).unwrap();
        assert!(out.exists());
        assert_eq!(fs::read_dir(&out).unwrap().count(), 0);
    }
}
