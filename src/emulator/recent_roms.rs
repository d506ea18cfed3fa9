// Recently opened ROM list, persisted as JSON

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// File the list is stored in
pub const RECENT_ROMS_FILE: &str = "recent_roms.json";

/// Most recent ROMs kept
const CAPACITY: usize = 10;

/// Ordered list of recently opened ROM paths, most recent first
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecentRoms {
    entries: Vec<PathBuf>,
}

impl RecentRoms {
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        fs::read_to_string(path)
            .ok()
            .and_then(|text| serde_json::from_str(&text).ok())
            .unwrap_or_default()
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> std::io::Result<()> {
        let text = serde_json::to_string_pretty(self)?;
        fs::write(path, text)
    }

    /// Move (or insert) a path to the front, dropping the oldest entry
    /// past capacity
    pub fn add<P: AsRef<Path>>(&mut self, path: P) {
        let path = path.as_ref().to_path_buf();
        self.entries.retain(|entry| entry != &path);
        self.entries.insert(0, path);
        self.entries.truncate(CAPACITY);
    }

    pub fn iter(&self) -> impl Iterator<Item = &PathBuf> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
