// File: bossbot-core/tests/test_utils/mod.rs

#![allow(dead_code)]
use std::path::PathBuf;
use tempfile::TempDir;
use bossbot_core::SubscriptionStore;

/// A store backed by a file inside a fresh temp dir.
/// Keep the `TempDir` alive for as long as the store is used.
pub fn temp_store() -> (TempDir, PathBuf, SubscriptionStore) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("boss_data.json");
    let store = SubscriptionStore::open(&path);
    (dir, path, store)
}

/// Parses the data file as raw JSON.
pub fn read_json(path: &std::path::Path) -> serde_json::Value {
    let text = std::fs::read_to_string(path).expect("read data file");
    serde_json::from_str(&text).expect("data file is valid JSON")
}
