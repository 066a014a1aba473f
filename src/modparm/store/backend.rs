use crate::error::Result;
use std::path::Path;

/// Abstract interface for raw parameter-file I/O.
/// This trait handles the "how" of storage (filesystem vs memory),
/// while ParamStore handles the "what" (discovery, classification, persistence).
pub trait ParamBackend {
    /// List entry names of a directory, in listing order.
    fn list_entries(&self, dir: &Path) -> Result<Vec<String>>;

    /// Read the whole content of a file as text.
    fn read_text(&self, path: &Path) -> Result<String>;

    /// Replace the whole content of a file.
    fn write_text(&self, path: &Path, text: &str) -> Result<()>;
}
