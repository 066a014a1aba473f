use super::backend::ParamBackend;
use crate::error::{ModparmError, Result};
use std::cell::RefCell;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// In-memory storage backend for testing.
///
/// Uses `RefCell` for interior mutability since modparm is single-threaded.
/// Files keep insertion order, which stands in for directory-listing order.
#[derive(Default)]
pub struct MemBackend {
    dirs: RefCell<Vec<PathBuf>>,
    files: RefCell<Vec<(PathBuf, String)>>,
    unreadable: RefCell<HashSet<PathBuf>>,
    writes: RefCell<Vec<(PathBuf, String)>>,
    simulate_write_error: RefCell<bool>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an (empty) directory and its ancestors.
    pub fn add_dir(&self, dir: impl AsRef<Path>) {
        let mut dirs = self.dirs.borrow_mut();
        for ancestor in dir.as_ref().ancestors() {
            if ancestor.as_os_str().is_empty() {
                break;
            }
            if !dirs.iter().any(|d| d == ancestor) {
                dirs.push(ancestor.to_path_buf());
            }
        }
    }

    /// Creates or replaces a file; does not count as a write.
    pub fn add_file(&self, path: impl AsRef<Path>, text: &str) {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            self.add_dir(parent);
        }
        let mut files = self.files.borrow_mut();
        match files.iter_mut().find(|(p, _)| p == path) {
            Some(entry) => entry.1 = text.to_string(),
            None => files.push((path.to_path_buf(), text.to_string())),
        }
    }

    /// Makes reads of `path` fail, as a permission-denied file would.
    pub fn set_unreadable(&self, path: impl AsRef<Path>) {
        self.unreadable
            .borrow_mut()
            .insert(path.as_ref().to_path_buf());
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        *self.simulate_write_error.borrow_mut() = simulate;
    }

    /// Current content of a file, if present.
    pub fn content(&self, path: impl AsRef<Path>) -> Option<String> {
        let path = path.as_ref();
        self.files
            .borrow()
            .iter()
            .find(|(p, _)| p == path)
            .map(|(_, text)| text.clone())
    }

    /// Every successful write, oldest first.
    pub fn writes(&self) -> Vec<(PathBuf, String)> {
        self.writes.borrow().clone()
    }
}

impl ParamBackend for MemBackend {
    fn list_entries(&self, dir: &Path) -> Result<Vec<String>> {
        if !self.dirs.borrow().iter().any(|d| d == dir) {
            return Err(ModparmError::Backend(format!(
                "No such directory: {}",
                dir.display()
            )));
        }

        let mut names: Vec<String> = Vec::new();
        let children = self
            .dirs
            .borrow()
            .iter()
            .filter(|d| d.parent() == Some(dir))
            .cloned()
            .collect::<Vec<_>>();
        let files = self
            .files
            .borrow()
            .iter()
            .filter(|(p, _)| p.parent() == Some(dir))
            .map(|(p, _)| p.clone())
            .collect::<Vec<_>>();

        for path in children.iter().chain(files.iter()) {
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                if !names.iter().any(|n| n == name) {
                    names.push(name.to_string());
                }
            }
        }
        Ok(names)
    }

    fn read_text(&self, path: &Path) -> Result<String> {
        if self.unreadable.borrow().contains(path) {
            return Err(ModparmError::Backend(format!(
                "Permission denied: {}",
                path.display()
            )));
        }
        self.content(path)
            .ok_or_else(|| ModparmError::Backend(format!("No such file: {}", path.display())))
    }

    fn write_text(&self, path: &Path, text: &str) -> Result<()> {
        if *self.simulate_write_error.borrow() {
            return Err(ModparmError::Backend("Simulated write error".to_string()));
        }

        let mut files = self.files.borrow_mut();
        let entry = files
            .iter_mut()
            .find(|(p, _)| p == path)
            .ok_or_else(|| ModparmError::Backend(format!("No such file: {}", path.display())))?;
        entry.1 = text.to_string();
        self.writes
            .borrow_mut()
            .push((path.to_path_buf(), text.to_string()));
        Ok(())
    }
}
