//! store/subscription_store.rs
//!
//! The `SubscriptionStore`: subscriber ids plus the current boss record,
//! mirrored to one JSON file.

use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use tracing::{debug, error, info, warn};

use bossbot_common::models::{BossDataFile, BossRecord, BossUpdate};

use crate::Error;
use crate::services::notification::render_boss_notification;
use crate::store::persist::write_json_atomic;
use crate::utils::time::current_boss_time;

/// Holds the boss data document in memory and rewrites its file after
/// every change.
///
/// All mutations run under one lock that is held until the file write has
/// finished, so concurrent callers never lose each other's updates. Write
/// failures are logged and the in-memory copy stays authoritative.
pub struct SubscriptionStore {
    data: Mutex<BossDataFile>,
    /// Where the JSON document lives.
    data_file: PathBuf,
}

impl SubscriptionStore {
    /// Opens the store backed by `data_file`, loading it if it exists.
    ///
    /// A missing, unreadable or malformed file yields an empty document.
    pub fn open(data_file: impl Into<PathBuf>) -> Self {
        let data_file = data_file.into();
        if let Some(parent) = data_file.parent().filter(|p| !p.as_os_str().is_empty()) {
            if let Err(e) = fs::create_dir_all(parent) {
                warn!("Could not create boss data directory {:?}: {:?}", parent, e);
            }
        }
        let data = load_boss_data(&data_file);
        Self {
            data: Mutex::new(data),
            data_file,
        }
    }

    pub fn path(&self) -> &Path {
        &self.data_file
    }

    /// Adds `id` to the subscriber list. Already-present ids are left alone.
    pub fn add_subscriber(&self, id: impl ToString) {
        let id = id.to_string();
        self.mutate(|data| {
            if data.subscriptions.contains(&id) {
                debug!("Subscriber '{}' already present", id);
                return false;
            }
            data.subscriptions.push(id);
            true
        });
    }

    /// Removes `id` from the subscriber list if present.
    pub fn remove_subscriber(&self, id: impl ToString) {
        let id = id.to_string();
        self.mutate(|data| {
            let before = data.subscriptions.len();
            data.subscriptions.retain(|s| *s != id);
            data.subscriptions.len() != before
        });
    }

    /// Current subscribers in insertion order.
    pub fn list_subscribers(&self) -> Vec<String> {
        self.data.lock().subscriptions.clone()
    }

    /// Replaces the boss record. Without a time the record is stamped with
    /// the current local time.
    pub fn set_record(&self, update: BossUpdate) {
        let record = update.into_record(current_boss_time);
        self.mutate(move |data| {
            data.boss = Some(record);
            true
        });
    }

    pub fn get_record(&self) -> Option<BossRecord> {
        self.data.lock().boss.clone()
    }

    /// Copy of the whole document taken under a single lock.
    pub fn snapshot(&self) -> BossDataFile {
        self.data.lock().clone()
    }

    /// Renders the current record as the notification text.
    pub fn render_notification(&self) -> String {
        render_boss_notification(self.data.lock().boss.as_ref())
    }

    /// Writes the current document to disk, reporting failure to the caller.
    pub fn save(&self) -> Result<(), Error> {
        let data = self.data.lock();
        write_json_atomic(&self.data_file, &*data)
    }

    /// Applies `f` under the lock; if it reports a change, persists before
    /// releasing the lock.
    fn mutate<F>(&self, f: F)
    where
        F: FnOnce(&mut BossDataFile) -> bool,
    {
        let mut data = self.data.lock();
        if !f(&mut *data) {
            return;
        }
        match write_json_atomic(&self.data_file, &*data) {
            Ok(()) => debug!("Saved boss data to {:?}", self.data_file),
            Err(e) => error!("Failed to write boss data file {:?}: {:?}", self.data_file, e),
        }
    }
}

fn load_boss_data(path: &Path) -> BossDataFile {
    if !path.exists() {
        info!("No boss data file at {:?}; starting empty.", path);
        return BossDataFile::default();
    }
    let contents = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            warn!("Could not read boss data file at {:?}: {:?}", path, e);
            return BossDataFile::default();
        }
    };
    let value = match serde_json::from_str::<serde_json::Value>(&contents) {
        Ok(v) => v,
        Err(e) => {
            warn!("Could not parse boss data JSON at {:?}: {:?}", path, e);
            return BossDataFile::default();
        }
    };
    match serde_json::from_value::<BossDataFile>(value) {
        Ok(mut parsed) => {
            let dropped = parsed.dedup_subscriptions();
            if dropped > 0 {
                warn!("Dropped {} duplicate subscriber ids from {:?}", dropped, path);
            }
            info!(
                "Loaded boss data from {:?} ({} subscribers, record: {})",
                path,
                parsed.subscriptions.len(),
                parsed.boss.is_some()
            );
            parsed
        }
        Err(e) => {
            warn!("Boss data at {:?} has an unexpected shape: {:?}", path, e);
            BossDataFile::default()
        }
    }
}
