// File: bossbot-common/src/models/mod.rs
pub mod boss;

pub use boss::{BossDataFile, BossRecord, BossUpdate};
