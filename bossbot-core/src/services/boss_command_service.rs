// File: src/services/boss_command_service.rs

use std::sync::Arc;

use tracing::{debug, info, warn};

use bossbot_common::models::BossUpdate;
use bossbot_common::traits::NotificationSink;

use crate::Error;
use crate::services::notification::{render_boss_notification, NO_RECORD_TEXT};
use crate::store::SubscriptionStore;
use crate::utils::time::parse_boss_time;

pub const NO_SUBSCRIBERS_TEXT: &str = "当前没有订阅用户";

/// Static help appended to the show-boss reply.
pub const USAGE_TEXT: &str = "指令用法:\n\
/头目 （查询头目指令）\n\
/订阅头目 （订阅当前QQ号）\n\
/取消订阅 （取消当前QQ号）\n\
/更新头目：地点 精灵 个体 性格 特性 [时间可选]\n\
/订阅列表 （查询订阅列表）\n\
/头目来了 （提醒所有订阅者）\n\n\
更新头目例子：\n/更新头目 第1星系-火山3层 赤西西比 29 孤独 圣灵 2025/08/29-10:00";

/// Reply produced by a boss command handler.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandReply {
    /// Ids the host should at-mention ahead of `text`.
    pub mentions: Vec<String>,
    pub text: String,
}

impl CommandReply {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            mentions: Vec::new(),
            text: text.into(),
        }
    }

    pub fn mentioning(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            mentions: vec![id.into()],
            text: text.into(),
        }
    }
}

/// Command-level behaviour of the boss notifier.
///
/// Handlers receive already-parsed arguments from the host's dispatcher.
pub struct BossCommandService {
    store: Arc<SubscriptionStore>,
    sink: Arc<dyn NotificationSink>,
}

impl BossCommandService {
    pub fn new(store: Arc<SubscriptionStore>, sink: Arc<dyn NotificationSink>) -> Self {
        debug!("Initializing BossCommandService with data file {:?}", store.path());
        Self { store, sink }
    }

    pub fn store(&self) -> &Arc<SubscriptionStore> {
        &self.store
    }

    /// Subscribes `target`, or the caller when no target is given.
    pub fn subscribe(&self, caller_id: &str, target: Option<&str>) -> CommandReply {
        let id = target.unwrap_or(caller_id);
        self.store.add_subscriber(id);
        info!("'{}' subscribed to boss notifications", id);
        CommandReply::mentioning(id, "\n\n已成功订阅头目提醒")
    }

    pub fn unsubscribe(&self, caller_id: &str, target: Option<&str>) -> CommandReply {
        let id = target.unwrap_or(caller_id);
        self.store.remove_subscriber(id);
        info!("'{}' unsubscribed from boss notifications", id);
        CommandReply::mentioning(id, "\n\n已取消订阅头目提醒")
    }

    pub fn update_boss(&self, update: BossUpdate) -> CommandReply {
        if let Some(t) = update.time.as_deref().filter(|t| !t.is_empty()) {
            if parse_boss_time(t).is_none() {
                warn!("Boss time '{}' is not YYYY/MM/DD-HH:MM; storing it as given", t);
            }
        }
        self.store.set_record(update);
        CommandReply::plain("头目信息已更新")
    }

    pub fn list_subscriptions(&self) -> CommandReply {
        let subs = self.store.list_subscribers();
        if subs.is_empty() {
            return CommandReply::plain(NO_SUBSCRIBERS_TEXT);
        }
        let tags: Vec<String> = subs.iter().map(|id| format!("@{}", id)).collect();
        CommandReply::plain(format!("当前订阅用户:\n{}", tags.join(" ")))
    }

    /// Sends the rendered notification to every subscriber via the sink.
    ///
    /// Nothing is sent when there is no record. With no subscribers the
    /// notification still goes out, just without mentions.
    pub async fn notify_all(&self) -> Result<CommandReply, Error> {
        let snapshot = self.store.snapshot();
        if snapshot.boss.is_none() {
            return Ok(CommandReply::plain(NO_RECORD_TEXT));
        }

        let body = format!("\n\n{}", render_boss_notification(snapshot.boss.as_ref()));
        self.sink.send(&snapshot.subscriptions, &body).await?;
        info!("Boss notification sent to {} subscribers", snapshot.subscriptions.len());
        Ok(CommandReply::plain("已通知所有订阅用户"))
    }

    /// Current record followed by the usage help.
    pub fn show_boss(&self) -> CommandReply {
        CommandReply::plain(format!("{}\n\n{}", self.store.render_notification(), USAGE_TEXT))
    }
}
