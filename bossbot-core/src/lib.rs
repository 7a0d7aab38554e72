// src/lib.rs

pub mod config;
pub mod services;
pub mod store;
pub mod utils;

pub use bossbot_common::error::Error;
pub use config::StoreConfig;
pub use services::{BossCommandService, CommandReply};
pub use store::SubscriptionStore;
