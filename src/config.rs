use std::path::PathBuf;

use tracing::debug;

use crate::error::Result;
use crate::reference::{load_builtin, load_from_dir, ReferenceData};

/// Environment variable naming a directory of reference CSV tables.
pub const DATA_DIR_ENV: &str = "MBG_DATA_DIR";

/// Where reference tables are read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReferenceSource {
    Builtin,
    Directory(PathBuf),
}

impl ReferenceSource {
    /// Pick the source: explicit flag, then `MBG_DATA_DIR`, then built-in tables.
    pub fn resolve(flag: Option<PathBuf>) -> Self {
        Self::resolve_with(flag, std::env::var(DATA_DIR_ENV).ok())
    }

    pub fn resolve_with(flag: Option<PathBuf>, env: Option<String>) -> Self {
        flag.or_else(|| env.filter(|v| !v.trim().is_empty()).map(PathBuf::from))
            .map(ReferenceSource::Directory)
            .unwrap_or(ReferenceSource::Builtin)
    }

    pub fn load(&self) -> Result<ReferenceData> {
        debug!(source = ?self, "loading reference tables");
        match self {
            ReferenceSource::Builtin => load_builtin(),
            ReferenceSource::Directory(dir) => load_from_dir(dir),
        }
    }
}
