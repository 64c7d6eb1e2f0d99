pub const DEFAULT_PREFIX: &str = ".";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BotCommand {
    SendEvents {
        symbols: Option<String>,
        start_date: Option<String>,
        end_date: Option<String>,
    },
    CoinId {
        symbol: Option<String>,
    },
    RefreshCoins,
    Help,
}

/// Parses `<prefix><name> [args...]`. Anything else, including unknown command
/// names, yields `None` so the message is ignored.
pub fn parse_command(prefix: &str, content: &str) -> Option<BotCommand> {
    let rest = content.trim().strip_prefix(prefix)?;
    let mut parts = rest.split_whitespace();
    let name = parts.next()?;
    let mut next_arg = || parts.next().map(str::to_string);

    match name {
        "sev" => Some(BotCommand::SendEvents {
            symbols: next_arg(),
            start_date: next_arg(),
            end_date: next_arg(),
        }),
        "cid" => Some(BotCommand::CoinId { symbol: next_arg() }),
        "rc" => Some(BotCommand::RefreshCoins),
        "h" | "help" => Some(BotCommand::Help),
        _ => None,
    }
}

pub fn help_text(prefix: &str) -> String {
    let commands = [
        format!("{prefix}sev [* | [symbols,]] [start date yyyy-mm-dd] [end date yyyy-mm-dd] - send events"),
        format!("{prefix}cid [symbol] - get id for symbol"),
        format!("{prefix}rc - refresh coins"),
        format!("{prefix}h - list all commands"),
    ];
    format!(
        "```\nCrypto Event Bot powered by Coindar\nList of commands:\n - {}\n```",
        commands.join("\n - ")
    )
}
