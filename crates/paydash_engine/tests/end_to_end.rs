use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::Utc;
use paydash_core::{
    Credential, FailureKind, Feed, FetchState, FieldFormatter, FormatRules, StaticCredential,
    TableOutcome, TableRenderer,
};
use paydash_engine::{Endpoint, FetchSettings, Poller, ReqwestFetcher};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn first_update(body: Value) -> FetchState {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/transactions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;

    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    let fetcher = Arc::new(ReqwestFetcher::new(FetchSettings::default()));
    let poller = Poller::new(fetcher, tokio::runtime::Handle::current());
    let handle = poller.start(
        Endpoint::for_feed(&server.uri(), Feed::Transactions),
        &StaticCredential(Some(Credential::new("tok", "acme"))),
        Duration::from_secs(60),
        move |state| sink.lock().unwrap().push(state),
    );

    for _ in 0..200 {
        if !seen.lock().unwrap().is_empty() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    handle.stop();
    let first = seen.lock().unwrap().first().cloned();
    first.expect("no update received")
}

fn renderer() -> TableRenderer<Utc> {
    TableRenderer::new(FieldFormatter::with_zone(FormatRules::default(), Utc))
}

#[tokio::test]
async fn polled_transactions_render_as_table() {
    let state = first_update(json!({
        "transactions": [{"id": 1, "amount": 100, "recharge_date": "2024-01-01T00:00:00Z"}]
    }))
    .await;

    let records = state.records().expect("success");
    let TableOutcome::Table(view) = renderer().render(records) else {
        panic!("expected a table");
    };
    assert_eq!(view.headers, vec!["Id", "Amount", "Recharge_date"]);
    assert_eq!(view.rows, vec![vec!["1", "100", "1/1/2024, 12:00:00 AM"]]);
}

#[tokio::test]
async fn empty_transactions_render_no_data() {
    let state = first_update(json!({"transactions": []})).await;
    let records = state.records().expect("success");
    assert_eq!(renderer().render(records), TableOutcome::NoData);
}

#[tokio::test]
async fn non_array_transactions_are_malformed() {
    let state = first_update(json!({"transactions": {"id": 1}})).await;
    assert_eq!(
        state.failure().map(|f| &f.kind),
        Some(&FailureKind::MalformedPayload)
    );
}
