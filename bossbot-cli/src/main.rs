use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

use bossbot_common::models::BossUpdate;
use bossbot_core::{BossCommandService, CommandReply, StoreConfig, SubscriptionStore};

mod sink;
use sink::{format_mentions, StdoutSink};

#[derive(Parser, Debug, Clone)]
#[command(name = "bossbot")]
#[command(author, version, about = "Boss notifier - subscriber list and boss record store")]
struct Args {
    /// Path of the boss data JSON file. Falls back to $BOSSBOT_DATA_FILE,
    /// then the platform data directory.
    #[arg(long, global = true)]
    data_file: Option<PathBuf>,

    #[command(subcommand)]
    command: BossCommand,
}

#[derive(Subcommand, Debug, Clone)]
enum BossCommand {
    /// Subscribe an id to boss notifications
    Subscribe { id: String },
    /// Remove an id from the subscriber list
    Unsubscribe { id: String },
    /// Replace the boss record
    Update {
        place: String,
        name: String,
        iv: String,
        nature: String,
        feature: String,
        /// YYYY/MM/DD-HH:MM; defaults to now
        time: Option<String>,
    },
    /// List subscribers
    List,
    /// Show the current record and usage
    Show,
    /// Notify every subscriber about the current record
    Notify,
}

fn init_tracing() {
    let filter = EnvFilter::from_default_env()
        .add_directive("bossbot=info".parse().unwrap_or_default());
    let sub = fmt().with_env_filter(filter).with_writer(std::io::stderr).finish();
    if let Err(e) = tracing::subscriber::set_global_default(sub) {
        eprintln!("Failed to set global subscriber: {}", e);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let args = Args::parse();

    let config = StoreConfig::from_env(args.data_file.clone());
    config.validate()?;
    info!("Using boss data file {:?}", config.data_file);

    let store = Arc::new(SubscriptionStore::open(&config.data_file));
    let service = BossCommandService::new(store, Arc::new(StdoutSink));

    let reply = match run_command(&service, args.command).await {
        Ok(r) => r,
        Err(e) => {
            error!("Command failed: {:?}", e);
            return Err(e);
        }
    };
    print_reply(&reply);
    Ok(())
}

async fn run_command(service: &BossCommandService, command: BossCommand) -> anyhow::Result<CommandReply> {
    let reply = match command {
        BossCommand::Subscribe { id } => service.subscribe(&id, None),
        BossCommand::Unsubscribe { id } => service.unsubscribe(&id, None),
        BossCommand::Update { place, name, iv, nature, feature, time } => {
            let mut update = BossUpdate::new(place, name, iv, nature, feature);
            update.time = time;
            service.update_boss(update)
        }
        BossCommand::List => service.list_subscriptions(),
        BossCommand::Show => service.show_boss(),
        BossCommand::Notify => service.notify_all().await?,
    };
    Ok(reply)
}

fn print_reply(reply: &CommandReply) {
    if reply.mentions.is_empty() {
        println!("{}", reply.text);
    } else {
        println!("{}{}", format_mentions(&reply.mentions), reply.text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_update_with_optional_time() {
        let args = Args::try_parse_from([
            "bossbot", "--data-file", "/tmp/b.json", "update", "Zone-1", "Monster", "29", "Lonely", "Aura",
        ])
        .unwrap();
        assert_eq!(args.data_file, Some(PathBuf::from("/tmp/b.json")));
        match args.command {
            BossCommand::Update { place, time, .. } => {
                assert_eq!(place, "Zone-1");
                assert_eq!(time, None);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn data_file_is_accepted_after_the_subcommand() {
        let args = Args::try_parse_from(["bossbot", "list", "--data-file", "x.json"]).unwrap();
        assert_eq!(args.data_file, Some(PathBuf::from("x.json")));
    }

    #[tokio::test]
    async fn subscribe_then_list_through_the_service() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(SubscriptionStore::open(dir.path().join("boss.json")));
        let service = BossCommandService::new(store, Arc::new(StdoutSink));

        run_command(&service, BossCommand::Subscribe { id: "1001".into() }).await.unwrap();
        let reply = run_command(&service, BossCommand::List).await.unwrap();
        assert_eq!(reply.text, "当前订阅用户:\n@1001");
    }
}
