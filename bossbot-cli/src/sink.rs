// File: bossbot-cli/src/sink.rs

use std::io::{stdout, Write};

use async_trait::async_trait;
use bossbot_common::traits::NotificationSink;
use bossbot_common::Error;

/// Prints notifications to stdout, one `@id` per recipient ahead of the body.
#[derive(Debug, Default)]
pub struct StdoutSink;

#[async_trait]
impl NotificationSink for StdoutSink {
    async fn send(&self, recipients: &[String], body: &str) -> Result<(), Error> {
        let mut out = stdout().lock();
        writeln!(out, "{}", format_mentions(recipients))?;
        writeln!(out, "{}", body)?;
        out.flush()?;
        Ok(())
    }
}

pub fn format_mentions(ids: &[String]) -> String {
    ids.iter()
        .map(|id| format!("@{}", id))
        .collect::<Vec<_>>()
        .join(" ")
}
