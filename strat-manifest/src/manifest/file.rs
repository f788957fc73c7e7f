use std::path::{Path, PathBuf};

use super::Manifest;
use crate::{Error, Result};

/// A stack.toml file with both raw content and parsed manifest.
#[derive(Debug)]
pub struct StackToml {
    path: PathBuf,
    content: String,
    manifest: Manifest,
}

impl StackToml {
    /// Open and parse a stack.toml file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let content = std::fs::read_to_string(&path).map_err(|e| {
            Box::new(Error::Io {
                path: path.clone(),
                source: e,
            })
        })?;
        let filename = path.display().to_string();
        let manifest = Manifest::from_str_with_filename(&content, &filename)?;

        Ok(Self {
            path,
            content,
            manifest,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the raw content.
    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    /// Take the parsed manifest.
    pub fn into_manifest(self) -> Manifest {
        self.manifest
    }
}
