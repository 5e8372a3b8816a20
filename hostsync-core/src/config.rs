//! Environment file (`env_dynamic`) loader.
//!
//! Line-oriented `KEY=VALUE` pairs; lines starting with `#` or lacking `=`
//! are ignored. The file is read once per run and the resulting
//! [`EnvConfig`] is read-only afterwards.
//!
//! Keys with defaults: `ERROR_LOG` (`error_log.txt`), `ACCESS_LOG`
//! (`access_log.txt`), `DIR` (`./`), `BRANCH` (`main`). The inventory and
//! partition-log paths have no defaults; subcommands that need them call
//! [`EnvConfig::require_inventory`] / [`EnvConfig::require_partition_logs`].

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Default error journal path when `ERROR_LOG` is absent.
pub const DEFAULT_ERROR_LOG: &str = "error_log.txt";
/// Default access journal path when `ACCESS_LOG` is absent.
pub const DEFAULT_ACCESS_LOG: &str = "access_log.txt";
/// Default repository directory when `DIR` is absent.
pub const DEFAULT_DIR: &str = "./";
/// Default push branch when `BRANCH` is absent.
pub const DEFAULT_BRANCH: &str = "main";

/// Process-wide configuration loaded from the environment file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvConfig {
    /// Error journal path (`ERROR_LOG`).
    pub error_log: PathBuf,
    /// Access journal path (`ACCESS_LOG`).
    pub access_log: PathBuf,
    /// Tracked inventory CSV inside the repository (`AWS_CSV`).
    pub inventory_csv: Option<PathBuf>,
    /// Slot database CSV (`AWS_DATABASE`).
    pub database: Option<PathBuf>,
    /// Partition log for accepted ADD entries (`AWS_HADD_LOG`).
    pub host_add_log: Option<PathBuf>,
    /// Partition log for accepted REMOVE entries (`AWS_HREM_LOG`).
    pub host_remove_log: Option<PathBuf>,
    /// Repository working directory (`DIR`).
    pub repo_dir: PathBuf,
    /// Branch pushed to by the publisher (`BRANCH`).
    pub branch: String,
}

impl EnvConfig {
    /// Load the environment file at `path`.
    ///
    /// A missing file is not an error: every key falls back to its default
    /// (or `None`), matching the behavior of the legacy loader.
    pub fn load_at(path: &Path) -> Result<EnvConfig, ConfigError> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => String::new(),
            Err(err) => return Err(ConfigError::io(path, err)),
        };
        Ok(Self::from_pairs(parse_pairs(&contents)))
    }

    fn from_pairs(mut pairs: HashMap<String, String>) -> EnvConfig {
        let mut take = |key: &str| pairs.remove(key);
        EnvConfig {
            error_log: take("ERROR_LOG").map_or_else(|| PathBuf::from(DEFAULT_ERROR_LOG), PathBuf::from),
            access_log: take("ACCESS_LOG")
                .map_or_else(|| PathBuf::from(DEFAULT_ACCESS_LOG), PathBuf::from),
            inventory_csv: take("AWS_CSV").map(PathBuf::from),
            database: take("AWS_DATABASE").map(PathBuf::from),
            host_add_log: take("AWS_HADD_LOG").map(PathBuf::from),
            host_remove_log: take("AWS_HREM_LOG").map(PathBuf::from),
            repo_dir: take("DIR").map_or_else(|| PathBuf::from(DEFAULT_DIR), PathBuf::from),
            branch: take("BRANCH").unwrap_or_else(|| DEFAULT_BRANCH.to_string()),
        }
    }

    /// The tracked inventory CSV path, or a missing-key error.
    pub fn require_csv(&self) -> Result<&Path, ConfigError> {
        self.inventory_csv
            .as_deref()
            .ok_or(ConfigError::MissingKey { key: "AWS_CSV" })
    }

    /// The inventory CSV and slot database paths, or a missing-key error
    /// naming the first absent one.
    pub fn require_inventory(&self) -> Result<(&Path, &Path), ConfigError> {
        let csv = self.require_csv()?;
        let database = self
            .database
            .as_deref()
            .ok_or(ConfigError::MissingKey { key: "AWS_DATABASE" })?;
        Ok((csv, database))
    }

    /// The ADD/REMOVE partition log paths, or a missing-key error.
    pub fn require_partition_logs(&self) -> Result<(&Path, &Path), ConfigError> {
        let add = self
            .host_add_log
            .as_deref()
            .ok_or(ConfigError::MissingKey { key: "AWS_HADD_LOG" })?;
        let remove = self
            .host_remove_log
            .as_deref()
            .ok_or(ConfigError::MissingKey { key: "AWS_HREM_LOG" })?;
        Ok((add, remove))
    }
}

/// Split file contents into `KEY=VALUE` pairs.
///
/// Only the first `=` splits; later ones stay in the value. Later
/// occurrences of a key override earlier ones.
fn parse_pairs(contents: &str) -> HashMap<String, String> {
    let mut pairs = HashMap::new();
    for line in contents.lines() {
        let line = line.trim();
        if line.starts_with('#') {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        pairs.insert(key.to_string(), value.to_string());
    }
    pairs
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn load_from(contents: &str) -> EnvConfig {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("env_dynamic");
        std::fs::write(&path, contents).expect("write env file");
        EnvConfig::load_at(&path).expect("load")
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = TempDir::new().expect("tempdir");
        let config = EnvConfig::load_at(&dir.path().join("absent")).expect("load");
        assert_eq!(config.error_log, PathBuf::from("error_log.txt"));
        assert_eq!(config.access_log, PathBuf::from("access_log.txt"));
        assert_eq!(config.repo_dir, PathBuf::from("./"));
        assert_eq!(config.branch, "main");
        assert!(config.inventory_csv.is_none());
    }

    #[test]
    fn comments_and_malformed_lines_are_ignored() {
        let config = load_from("# a comment\nnot a pair\nBRANCH=release\n");
        assert_eq!(config.branch, "release");
        assert_eq!(config.error_log, PathBuf::from("error_log.txt"));
    }

    #[test]
    fn value_keeps_embedded_equals_sign() {
        let config = load_from("ERROR_LOG=logs/err=weird.txt\n");
        assert_eq!(config.error_log, PathBuf::from("logs/err=weird.txt"));
    }

    #[test]
    fn all_recognised_keys_load() {
        let config = load_from(concat!(
            "ERROR_LOG=e.txt\n",
            "ACCESS_LOG=a.txt\n",
            "AWS_CSV=hosts.csv\n",
            "AWS_DATABASE=db.csv\n",
            "AWS_HADD_LOG=add.txt\n",
            "AWS_HREM_LOG=rem.txt\n",
            "DIR=/srv/inventory\n",
            "BRANCH=main\n",
        ));
        assert_eq!(config.inventory_csv.as_deref(), Some(Path::new("hosts.csv")));
        assert_eq!(config.database.as_deref(), Some(Path::new("db.csv")));
        assert_eq!(config.host_add_log.as_deref(), Some(Path::new("add.txt")));
        assert_eq!(config.host_remove_log.as_deref(), Some(Path::new("rem.txt")));
        assert_eq!(config.repo_dir, PathBuf::from("/srv/inventory"));
    }

    #[test]
    fn require_inventory_names_first_missing_key() {
        let config = load_from("AWS_DATABASE=db.csv\n");
        let err = config.require_inventory().unwrap_err();
        assert!(err.to_string().contains("AWS_CSV"), "got: {err}");
    }

    #[test]
    fn require_partition_logs_passes_when_both_present() {
        let config = load_from("AWS_HADD_LOG=add.txt\nAWS_HREM_LOG=rem.txt\n");
        let (add, remove) = config.require_partition_logs().expect("both present");
        assert_eq!(add, Path::new("add.txt"));
        assert_eq!(remove, Path::new("rem.txt"));
    }
}
