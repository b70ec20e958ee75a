//! # gomcaddy-store: Cart Record Persistence
//!
//! File-backed implementation of the [`CartStore`] port defined in
//! gomcaddy-core.
//!
//! ## Storage Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Cart Record on Disk                                 │
//! │                                                                         │
//! │  <data dir>/gomcaddy/cart.json                                          │
//! │                                                                         │
//! │  {                                                                      │
//! │    "items": [ { "menu_item_id": "...", "quantity": 2, ... } ],          │
//! │    "restaurantId": "...",                                               │
//! │    "restaurantName": "Mama's Kitchen"                                   │
//! │  }                                                                      │
//! │                                                                         │
//! │  • One record per session, replaced whole on every save                 │
//! │  • Missing file  → no saved cart (Ok(None))                             │
//! │  • Corrupt file  → StoreError::Corrupt; the session starts empty        │
//! │  • No locking    → concurrent sessions overwrite each other at save    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use tracing::{debug, warn};

use gomcaddy_core::{CartStore, PersistedCart, StoreError};

/// File name of the cart record inside the data directory.
const CART_FILE: &str = "cart.json";

// =============================================================================
// JSON File Store
// =============================================================================

/// Cart store backed by a single JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Creates a store at an explicit path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileStore { path: path.into() }
    }

    /// Creates a store at the platform default location
    /// (e.g. `~/.local/share/gomcaddy/cart.json` on Linux).
    ///
    /// Returns `None` when no home directory can be determined.
    pub fn at_default_location() -> Option<Self> {
        let dirs = ProjectDirs::from("com", "Gomcaddy", "gomcaddy")?;
        Some(JsonFileStore::new(dirs.data_dir().join(CART_FILE)))
    }

    /// The path this store reads and writes.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CartStore for JsonFileStore {
    fn load(&self) -> Result<Option<PersistedCart>, StoreError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no saved cart");
                return Ok(None);
            }
            Err(e) => return Err(StoreError::Read(e.to_string())),
        };

        match serde_json::from_str::<PersistedCart>(&raw) {
            Ok(record) => {
                debug!(
                    path = %self.path.display(),
                    lines = record.items.len(),
                    "loaded cart record"
                );
                Ok(Some(record))
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "cart record is corrupt");
                Err(StoreError::Corrupt(e.to_string()))
            }
        }
    }

    fn save(&self, cart: &PersistedCart) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| StoreError::Write(e.to_string()))?;
        }

        let raw = serde_json::to_string(cart).map_err(|e| StoreError::Write(e.to_string()))?;
        fs::write(&self.path, raw).map_err(|e| StoreError::Write(e.to_string()))?;

        debug!(
            path = %self.path.display(),
            lines = cart.items.len(),
            "saved cart record"
        );
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
