use chrono::NaiveDate;
use coinEventBot::clients::coindar_client::CoindarClient;
use coinEventBot::error::UpstreamError;
use serde_json::{Value, json};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKEN: &str = "test-token";

fn events_page(count: usize, coin_id: i64) -> Value {
    Value::Array(
        (0..count)
            .map(|i| {
                json!({
                    "caption": format!("Event {i}"),
                    "source": format!("https://example.com/{i}"),
                    "date_start": "2021-05-03",
                    "coin_id": coin_id.to_string(),
                    "tags": "4",
                })
            })
            .collect(),
    )
}

#[tokio::test]
async fn fetches_coins_with_access_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/coins"))
        .and(query_param("access_token", TOKEN))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "1", "symbol": "BTC", "name": "Bitcoin", "image_64": "https://img/btc.png"},
            {"id": 2, "symbol": "ETH", "name": "Ethereum"},
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = CoindarClient::new(server.uri(), TOKEN);
    let coins = client.fetch_coins().await.expect("coins should decode");

    assert_eq!(coins.len(), 2);
    assert_eq!(coins[0].symbol, "BTC");
    assert_eq!(coins[1].id, 2);
}

#[tokio::test]
async fn stops_paging_at_first_empty_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/events"))
        .and(query_param("access_token", TOKEN))
        .and(query_param("page", "1"))
        .and(query_param("page_size", "100"))
        .and(query_param("filter_coins", "1"))
        .and(query_param("filter_date_start", "2021-05-01"))
        .respond_with(ResponseTemplate::new(200).set_body_json(events_page(100, 1)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/events"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = CoindarClient::new(server.uri(), TOKEN);
    let events = client
        .fetch_events(&[1], NaiveDate::from_ymd_opt(2021, 5, 1), None)
        .await
        .expect("events should decode");

    assert_eq!(events.len(), 100);
    assert_eq!(server.received_requests().await.unwrap().len(), 2);
}

#[tokio::test]
async fn stops_paging_at_the_page_cap() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/events"))
        .respond_with(ResponseTemplate::new(200).set_body_json(events_page(1, 3)))
        .expect(100)
        .mount(&server)
        .await;

    let client = CoindarClient::new(server.uri(), TOKEN);
    let events = client.fetch_events(&[3], None, None).await.unwrap();

    assert_eq!(events.len(), 100);
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 100);
    let last_query = requests[99].url.query().unwrap_or_default().to_string();
    assert!(last_query.contains("page=100&"));
}

#[tokio::test]
async fn unbounded_end_date_is_not_sent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/events"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let client = CoindarClient::new(server.uri(), TOKEN);
    client
        .fetch_events(&[], NaiveDate::from_ymd_opt(2021, 5, 1), None)
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let query = requests[0].url.query().unwrap_or_default().to_string();
    assert!(query.contains("filter_date_start=2021-05-01"));
    assert!(!query.contains("filter_date_end"));
    assert!(query.contains("filter_coins=&") || query.ends_with("filter_coins="));
}

#[tokio::test]
async fn failing_page_discards_earlier_pages() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/events"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(events_page(100, 1)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/events"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = CoindarClient::new(server.uri(), TOKEN);
    let err = client.fetch_events(&[1], None, None).await.unwrap_err();

    assert!(matches!(
        err,
        UpstreamError::Status {
            endpoint: "events",
            status: 503
        }
    ));
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tags"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"error": "bad token"})))
        .mount(&server)
        .await;

    let client = CoindarClient::new(server.uri(), TOKEN);
    let err = client.fetch_tags().await.unwrap_err();

    assert!(matches!(err, UpstreamError::Decode { endpoint: "tags", .. }));
}
