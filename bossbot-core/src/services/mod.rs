// File: src/services/mod.rs

pub mod notification;
pub mod boss_command_service;

pub use boss_command_service::{BossCommandService, CommandReply};
pub use notification::render_boss_notification;
