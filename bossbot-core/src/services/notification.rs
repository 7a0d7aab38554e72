// File: src/services/notification.rs

use bossbot_common::models::BossRecord;

/// Shown whenever no boss record has been set.
pub const NO_RECORD_TEXT: &str = "当前没有记录头目信息。";

pub const NOTIFICATION_TITLE: &str = "头目刷新提醒";

/// Renders the boss notification block.
///
/// The title is followed by exactly six labeled lines in fixed order:
/// time, place, name, individual values, nature, feature.
pub fn render_boss_notification(record: Option<&BossRecord>) -> String {
    let Some(b) = record else {
        return NO_RECORD_TEXT.to_string();
    };
    format!(
        "{}\n\
         - 时间：{}\n\
         - 地点：{}\n\
         - 精灵：{}\n\
         - 个体：{}\n\
         - 性格：{}\n\
         - 特性：{}\n",
        NOTIFICATION_TITLE, b.time, b.place, b.name, b.individual_values, b.nature, b.feature
    )
}
