use super::backend::ParamBackend;
use crate::error::{ModparmError, Result};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

/// Backend over the real filesystem (normally sysfs).
#[derive(Debug, Default, Clone, Copy)]
pub struct FsBackend;

impl FsBackend {
    pub fn new() -> Self {
        Self
    }
}

impl ParamBackend for FsBackend {
    fn list_entries(&self, dir: &Path) -> Result<Vec<String>> {
        let entries = fs::read_dir(dir).map_err(|e| ModparmError::path(dir, e))?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| ModparmError::path(dir, e))?;
            if let Some(name) = entry.file_name().to_str() {
                names.push(name.to_string());
            }
        }
        // read_dir order is unspecified; match `ls`.
        names.sort();
        Ok(names)
    }

    fn read_text(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path).map_err(|e| ModparmError::path(path, e))
    }

    fn write_text(&self, path: &Path, text: &str) -> Result<()> {
        // sysfs attributes can't be swapped in by rename, so write in place.
        let mut file = OpenOptions::new()
            .write(true)
            .truncate(true)
            .open(path)
            .map_err(|e| ModparmError::path(path, e))?;
        file.write_all(text.as_bytes())
            .map_err(|e| ModparmError::path(path, e))?;
        Ok(())
    }
}
