use std::sync::Arc;

use chrono::Local;
use clap::{Parser, Subcommand};

use crate::handlers::discord::BotHandler;
use crate::handlers::discord_responder::StdoutResponder;
use crate::service::calendar_service::CalendarClient;
use crate::service::command::BotCommand;
use crate::service::reference_cache::ReferenceCache;

#[derive(Parser)]
#[command(about = "Run a single bot command and print the replies")]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Send events for `*` or a comma-separated symbol list
    Sev {
        symbols: Option<String>,
        start_date: Option<String>,
        end_date: Option<String>,
    },
    /// Print the Coindar id for a symbol
    Cid { symbol: String },
    /// List the chat commands
    Help,
}

impl From<Commands> for BotCommand {
    fn from(command: Commands) -> Self {
        match command {
            Commands::Sev {
                symbols,
                start_date,
                end_date,
            } => BotCommand::SendEvents {
                symbols,
                start_date,
                end_date,
            },
            Commands::Cid { symbol } => BotCommand::CoinId {
                symbol: Some(symbol),
            },
            Commands::Help => BotCommand::Help,
        }
    }
}

pub async fn cli(
    command_prefix: &str,
    cache: Arc<ReferenceCache>,
    calendar: Arc<dyn CalendarClient>,
) {
    // Fine to exit from clap here
    let cli = Cli::parse();
    let handler = BotHandler::new(cache, calendar, command_prefix);
    handler
        .handle_command_with(&StdoutResponder, cli.command.into(), Local::now().date_naive())
        .await;
}
