use chrono::{Days, NaiveDate};

use crate::error::QueryError;
use crate::models::coin::Coin;
use crate::models::event::{DATE_FORMAT, Event};
use crate::models::tag::Tag;
use crate::service::calendar_service::CalendarClient;
use crate::service::reference_cache::ReferenceSnapshot;

pub const WILDCARD: &str = "*";
pub const WILDCARD_RANGE_DAYS: u64 = 7;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SymbolSpec {
    Wildcard,
    Symbols(Vec<String>),
}

impl SymbolSpec {
    /// A spec whose first comma-separated token is `*` selects every coin.
    pub fn parse(raw: &str) -> Self {
        let symbols: Vec<String> = raw.split(',').map(str::to_string).collect();
        if symbols.first().map(String::as_str) == Some(WILDCARD) {
            SymbolSpec::Wildcard
        } else {
            SymbolSpec::Symbols(symbols)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventQuery {
    pub symbols: SymbolSpec,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl EventQuery {
    pub fn parse(
        symbols: Option<&str>,
        start_date: Option<&str>,
        end_date: Option<&str>,
    ) -> Result<Self, QueryError> {
        Ok(Self {
            symbols: SymbolSpec::parse(symbols.unwrap_or(WILDCARD)),
            start_date: start_date.map(parse_date).transpose()?,
            end_date: end_date.map(parse_date).transpose()?,
        })
    }
}

pub fn parse_date(raw: &str) -> Result<NaiveDate, QueryError> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|_| QueryError::InvalidDate(raw.to_string()))
}

/// One reply's worth of data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedEvent {
    Found {
        coin: Coin,
        event: Event,
        tag: Option<Tag>,
    },
    NoEventForCoin {
        coin: Coin,
    },
    NoEventInRange {
        start_date: NaiveDate,
        end_date: NaiveDate,
    },
}

/// Joins the query against the snapshot and the calendar.
///
/// With symbols, each resolved coin is queried on its own with the end date left
/// as given, and a coin without events yields a placeholder. Without symbols,
/// a single unfiltered query covers `start..start + 7 days` unless an end date was
/// given; events whose coin is not cached are skipped.
pub async fn resolve_events<C: CalendarClient + ?Sized>(
    snapshot: &ReferenceSnapshot,
    client: &C,
    query: &EventQuery,
    today: NaiveDate,
) -> Result<Vec<ResolvedEvent>, QueryError> {
    let coins: Vec<&Coin> = match &query.symbols {
        SymbolSpec::Wildcard => Vec::new(),
        SymbolSpec::Symbols(symbols) => {
            let resolved: Vec<&Coin> = symbols
                .iter()
                .filter_map(|symbol| snapshot.find_coin_by_symbol(symbol))
                .collect();
            if resolved.is_empty() {
                return Err(QueryError::InvalidSymbol);
            }
            resolved
        }
    };

    let start_date = query.start_date.unwrap_or(today);
    let lookup_tag = |event: &Event| {
        event
            .tag_id
            .and_then(|id| snapshot.find_tag_by_id(id))
            .cloned()
    };

    let mut results = Vec::new();
    if !coins.is_empty() {
        for coin in coins {
            let events = client
                .list_events(&[coin.id], Some(start_date), query.end_date)
                .await?;
            if events.is_empty() {
                results.push(ResolvedEvent::NoEventForCoin { coin: coin.clone() });
                continue;
            }
            for event in events {
                let tag = lookup_tag(&event);
                results.push(ResolvedEvent::Found {
                    coin: coin.clone(),
                    event,
                    tag,
                });
            }
        }
        return Ok(results);
    }

    let end_date = query.end_date.unwrap_or_else(|| default_end_date(start_date));
    let events = client
        .list_events(&[], Some(start_date), Some(end_date))
        .await?;
    if events.is_empty() {
        results.push(ResolvedEvent::NoEventInRange {
            start_date,
            end_date,
        });
        return Ok(results);
    }

    for event in events {
        let Some(coin) = snapshot.find_coin_by_id(event.coin_id) else {
            tracing::debug!(coin_id = event.coin_id, "Skipping event for uncached coin");
            continue;
        };
        let tag = lookup_tag(&event);
        results.push(ResolvedEvent::Found {
            coin: coin.clone(),
            event,
            tag,
        });
    }
    Ok(results)
}

pub fn default_end_date(start_date: NaiveDate) -> NaiveDate {
    start_date
        .checked_add_days(Days::new(WILDCARD_RANGE_DAYS))
        .unwrap_or(NaiveDate::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wildcard_only_when_first_token_is_star() {
        assert_eq!(SymbolSpec::parse("*"), SymbolSpec::Wildcard);
        assert_eq!(SymbolSpec::parse("*,BTC"), SymbolSpec::Wildcard);
        assert_eq!(
            SymbolSpec::parse("BTC,*"),
            SymbolSpec::Symbols(vec!["BTC".to_string(), "*".to_string()])
        );
    }

    #[test]
    fn missing_symbols_default_to_wildcard() {
        let query = EventQuery::parse(None, None, None).unwrap();
        assert_eq!(query.symbols, SymbolSpec::Wildcard);
        assert_eq!(query.start_date, None);
    }

    #[test]
    fn rejects_malformed_dates() {
        let err = EventQuery::parse(Some("BTC"), Some("05/01/2021"), None).unwrap_err();
        assert!(matches!(err, QueryError::InvalidDate(ref raw) if raw == "05/01/2021"));
    }

    #[test]
    fn default_end_is_seven_days_later() {
        let start = NaiveDate::from_ymd_opt(2021, 12, 28).unwrap();
        assert_eq!(
            default_end_date(start),
            NaiveDate::from_ymd_opt(2022, 1, 4).unwrap()
        );
    }
}
