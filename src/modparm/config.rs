//! # Configuration
//!
//! Configuration is managed by [`confique`], which handles layered loading
//! from a TOML file, environment variables and compiled defaults.
//!
//! ## Storage Hierarchy
//!
//! Configuration is resolved in priority order:
//! 1. **Command line**: `--root` / `--test` (applied by the CLI on top).
//! 2. **Environment variables**: `MODPARM_ROOT`.
//! 3. **Config file**: `modparm.toml` in the OS-appropriate config directory
//!    (via `directories` crate). A missing file is fine.
//! 4. **Compiled Defaults**: Built-in fallbacks via `#[config(default = ...)]`.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `root` | `/sys` | Directory holding `module/<name>/parameters/` |
//! | `modules` | `["ipmi_si", "ipmi_msghandler", "ipmi_devintf"]` | Modules scanned, in order |
//! | `radix` | `hex` | Radix for typed values at startup (`hex` or `dec`) |

use crate::error::Result;
use crate::model::Radix;
use confique::Config;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILENAME: &str = "modparm.toml";

fn default_modules() -> Vec<String> {
    vec![
        "ipmi_si".to_string(),
        "ipmi_msghandler".to_string(),
        "ipmi_devintf".to_string(),
    ]
}

/// Configuration for modparm, stored in `modparm.toml`.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ModparmConfig {
    /// Root of the module tree; parameters live in `<root>/module/<name>/parameters/`.
    #[config(env = "MODPARM_ROOT", default = "/sys")]
    pub root: PathBuf,

    /// Kernel modules whose parameters are offered, in menu order.
    #[config(default = ["ipmi_si", "ipmi_msghandler", "ipmi_devintf"])]
    pub modules: Vec<String>,

    /// Radix used to parse typed values until toggled with `r`.
    #[config(default = "hex")]
    pub radix: Radix,
}

impl Default for ModparmConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("/sys"),
            modules: default_modules(),
            radix: Radix::Hex,
        }
    }
}

impl ModparmConfig {
    /// Loads env + the given file (if it exists) over the defaults.
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        let mut builder = Self::builder().env();
        if let Some(path) = path {
            builder = builder.file(path);
        }
        Ok(builder.load()?)
    }

    /// Loads from the default location.
    pub fn load() -> Result<Self> {
        Self::load_from(default_config_path().as_deref())
    }
}

/// `<config_dir>/modparm.toml`, when a home directory can be determined.
pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("org", "modparm", "modparm")
        .map(|dirs| dirs.config_dir().join(CONFIG_FILENAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_default_config() {
        let config = ModparmConfig::default();
        assert_eq!(config.root, PathBuf::from("/sys"));
        assert_eq!(
            config.modules,
            vec!["ipmi_si", "ipmi_msghandler", "ipmi_devintf"]
        );
        assert_eq!(config.radix, Radix::Hex);
    }

    #[test]
    fn test_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        fs::write(
            &path,
            "root = \"/tmp/fake-sys\"\nmodules = [\"ipmi_watchdog\"]\nradix = \"dec\"\n",
        )
        .unwrap();

        let config = ModparmConfig::load_from(Some(&path)).unwrap();
        // MODPARM_ROOT may be set in the environment running the tests.
        if std::env::var_os("MODPARM_ROOT").is_none() {
            assert_eq!(config.root, PathBuf::from("/tmp/fake-sys"));
        }
        assert_eq!(config.modules, vec!["ipmi_watchdog"]);
        assert_eq!(config.radix, Radix::Decimal);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ModparmConfig::load_from(Some(&dir.path().join("absent.toml"))).unwrap();
        assert_eq!(config.modules, ModparmConfig::default().modules);
        assert_eq!(config.radix, Radix::Hex);
    }

    #[test]
    fn test_serialized_config_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        let config = ModparmConfig {
            modules: vec!["ipmi_si".to_string()],
            radix: Radix::Decimal,
            ..Default::default()
        };
        fs::write(&path, toml::to_string(&config).unwrap()).unwrap();

        let loaded = ModparmConfig::load_from(Some(&path)).unwrap();
        assert_eq!(loaded.modules, config.modules);
        assert_eq!(loaded.radix, Radix::Decimal);
    }

    #[test]
    fn test_default_path_is_named_modparm_toml() {
        if let Some(path) = default_config_path() {
            assert_eq!(path.file_name().unwrap(), CONFIG_FILENAME);
        }
    }
}
