//! Persistence of the registry.
//!
//! [`JsonConfigStore`] reads and writes the Claude Desktop config file with
//! atomic writes and timestamped backups. [`MemoryStore`] keeps the registry
//! in memory for tests and embedding.

use std::cell::{Cell, RefCell};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::Local;

use crate::constants::{CONFIG_FILE_NAME, CONFIG_PATH_ENV, DEFAULT_BACKUPS_PATH, MAX_BACKUPS};
use crate::error::{ToggleError, ToggleResult};
use crate::registry::Registry;

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// Loads and saves the registry.
pub trait ConfigStore {
    /// Load the registry, creating and persisting an empty one if none exists.
    fn load(&self) -> ToggleResult<Registry>;

    /// Persist the registry. On error nothing is considered committed.
    fn save(&self, registry: &Registry) -> ToggleResult<()>;

    /// Snapshot the current stored state before it gets overwritten.
    fn backup(&self) -> ToggleResult<Option<PathBuf>> {
        Ok(None)
    }
}

/// Registry stored as a JSON file.
#[derive(Debug, Clone)]
pub struct JsonConfigStore {
    path: PathBuf,
    backups_dir: Option<PathBuf>,
}

/// Registry kept in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    registry: RefCell<Option<Registry>>,
    fail_writes: Cell<bool>,
    saves: Cell<usize>,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl JsonConfigStore {
    /// Store at `path` without backups.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            backups_dir: None,
        }
    }

    /// Store at the default location with backups in the default directory.
    pub fn open_default() -> ToggleResult<Self> {
        Ok(Self::new(default_config_path()?).with_backups(DEFAULT_BACKUPS_PATH.clone()))
    }

    /// Keep backups of the file in `dir` before it is overwritten.
    pub fn with_backups(mut self, dir: impl Into<PathBuf>) -> Self {
        self.backups_dir = Some(dir.into());
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn malformed(&self, message: String) -> ToggleError {
        ToggleError::MalformedStoredConfig {
            path: self.path.clone(),
            message,
        }
    }

    fn persistence_failure(&self, message: String) -> ToggleError {
        ToggleError::PersistenceFailure {
            path: self.path.clone(),
            message,
        }
    }

    /// Write to a temp file, verify it parses, then rename over the target.
    fn write_atomic(&self, content: &str) -> ToggleResult<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| {
                self.persistence_failure(format!("Failed to create directory: {}", e))
            })?;
        }

        let temp_path = self.path.with_extension("json.tmp");

        {
            let mut file = fs::File::create(&temp_path)
                .map_err(|e| self.persistence_failure(format!("Failed to create temp file: {}", e)))?;
            file.write_all(content.as_bytes())
                .and_then(|_| file.sync_all())
                .map_err(|e| {
                    let _ = fs::remove_file(&temp_path);
                    self.persistence_failure(format!("Failed to write temp file: {}", e))
                })?;
        }

        let verify_content = fs::read_to_string(&temp_path).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            self.persistence_failure(format!("Failed to read back temp file: {}", e))
        })?;
        serde_json::from_str::<Registry>(&verify_content).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            self.persistence_failure(format!("Verification failed: {}", e))
        })?;

        fs::rename(&temp_path, &self.path).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            self.persistence_failure(format!("Failed to replace config: {}", e))
        })?;

        Ok(())
    }
}

impl MemoryStore {
    /// Store that starts out with `registry`.
    pub fn with_registry(registry: Registry) -> Self {
        let store = Self::default();
        store.registry.replace(Some(registry));
        store
    }

    /// Make every subsequent save fail.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }

    /// Number of successful saves.
    pub fn save_count(&self) -> usize {
        self.saves.get()
    }

    /// Currently stored registry, if any.
    pub fn snapshot(&self) -> Option<Registry> {
        self.registry.borrow().clone()
    }
}

//--------------------------------------------------------------------------------------------------
// Trait Implementations
//--------------------------------------------------------------------------------------------------

impl ConfigStore for JsonConfigStore {
    fn load(&self) -> ToggleResult<Registry> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "config missing, creating empty registry");
            let registry = Registry::new();
            self.save(&registry)?;
            return Ok(registry);
        }

        let content = fs::read_to_string(&self.path)?;

        if content.trim().is_empty() {
            return Ok(Registry::new());
        }

        serde_json::from_str(&content).map_err(|e| self.malformed(format!("Invalid JSON: {}", e)))
    }

    fn save(&self, registry: &Registry) -> ToggleResult<()> {
        let content = serde_json::to_string_pretty(registry)
            .map_err(|e| self.persistence_failure(format!("Failed to serialize config: {}", e)))?;
        self.write_atomic(&content)?;
        tracing::debug!(path = %self.path.display(), servers = registry.len(), "saved config");
        Ok(())
    }

    fn backup(&self) -> ToggleResult<Option<PathBuf>> {
        let Some(backup_dir) = &self.backups_dir else {
            return Ok(None);
        };

        if !self.path.exists() {
            return Ok(None);
        }

        fs::create_dir_all(backup_dir).with_context(|| {
            format!("Failed to create backup directory {}", backup_dir.display())
        })?;

        let backup_path = next_backup_path(backup_dir);
        fs::copy(&self.path, &backup_path)
            .with_context(|| format!("Failed to back up {}", self.path.display()))?;
        prune_old_backups(backup_dir, MAX_BACKUPS)?;

        tracing::debug!(backup = %backup_path.display(), "backed up config");
        Ok(Some(backup_path))
    }
}

impl ConfigStore for MemoryStore {
    fn load(&self) -> ToggleResult<Registry> {
        let mut slot = self.registry.borrow_mut();
        Ok(slot.get_or_insert_with(Registry::new).clone())
    }

    fn save(&self, registry: &Registry) -> ToggleResult<()> {
        if self.fail_writes.get() {
            return Err(ToggleError::PersistenceFailure {
                path: PathBuf::from("<memory>"),
                message: "writes disabled".to_string(),
            });
        }
        self.registry.replace(Some(registry.clone()));
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }
}

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Resolve the config path: `MCP_TOGGLE_CONFIG`, then the platform default.
pub fn default_config_path() -> ToggleResult<PathBuf> {
    if let Ok(path) = std::env::var(CONFIG_PATH_ENV)
        && !path.is_empty()
    {
        return Ok(PathBuf::from(path));
    }
    claude_desktop_path()
}

fn claude_desktop_path() -> ToggleResult<PathBuf> {
    #[cfg(target_os = "macos")]
    {
        let home = dirs::home_dir()
            .ok_or_else(|| ToggleError::Generic("Could not determine home directory".to_string()))?;
        Ok(home
            .join("Library/Application Support/Claude")
            .join(CONFIG_FILE_NAME))
    }
    #[cfg(target_os = "windows")]
    {
        let appdata = std::env::var("APPDATA").map(PathBuf::from).or_else(|_| {
            dirs::config_dir().ok_or_else(|| {
                ToggleError::Generic("Could not determine config directory".to_string())
            })
        })?;
        Ok(appdata.join("Claude").join(CONFIG_FILE_NAME))
    }
    #[cfg(target_os = "linux")]
    {
        let config = dirs::config_dir().ok_or_else(|| {
            ToggleError::Generic("Could not determine config directory".to_string())
        })?;
        Ok(config.join("Claude").join(CONFIG_FILE_NAME))
    }
    #[cfg(not(any(target_os = "macos", target_os = "windows", target_os = "linux")))]
    {
        Err(ToggleError::Generic("Unsupported platform".to_string()))
    }
}

/// Load the registry, falling back to an empty one if the stored file is
/// malformed. The bad file is backed up and gets overwritten on the next save.
pub fn load_or_recover(store: &impl ConfigStore) -> ToggleResult<Registry> {
    match store.load() {
        Err(ToggleError::MalformedStoredConfig { path, message }) => {
            tracing::warn!(path = %path.display(), error = %message, "malformed config, starting empty");
            store.backup()?;
            Ok(Registry::new())
        }
        other => other,
    }
}

/// Timestamped backup path that does not exist yet.
fn next_backup_path(backup_dir: &Path) -> PathBuf {
    let timestamp = Local::now().format("%Y-%m-%dT%H-%M-%S%.3f").to_string();
    let mut path = backup_dir.join(format!("{}.json", timestamp));
    let mut n = 1;
    while path.exists() {
        path = backup_dir.join(format!("{}-{}.json", timestamp, n));
        n += 1;
    }
    path
}

/// Remove old backups, keeping only the most recent N.
fn prune_old_backups(backup_dir: &Path, keep: usize) -> ToggleResult<()> {
    let mut backups: Vec<_> = fs::read_dir(backup_dir)?
        .filter_map(|e| e.ok())
        .filter(|e| {
            e.path()
                .extension()
                .map(|ext| ext == "json")
                .unwrap_or(false)
        })
        .collect();

    // Newest first
    backups.sort_by(|a, b| {
        b.metadata()
            .and_then(|m| m.modified())
            .ok()
            .cmp(&a.metadata().and_then(|m| m.modified()).ok())
    });

    for entry in backups.into_iter().skip(keep) {
        let _ = fs::remove_file(entry.path());
    }

    Ok(())
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------
