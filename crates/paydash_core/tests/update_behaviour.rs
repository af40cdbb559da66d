use chrono::Utc;
use paydash_core::{
    update, AppState, Effect, FailureKind, Feed, FetchFailure, FetchState, FieldFormatter,
    FormatRules, Msg, PanelBody, Record, TableRenderer, View,
};
use serde_json::json;

fn renderer() -> TableRenderer<Utc> {
    TableRenderer::new(FieldFormatter::with_zone(FormatRules::default(), Utc))
}

fn record(value: serde_json::Value) -> Record {
    Record::from_value(value).unwrap()
}

fn success(state: &AppState, feed: Feed, records: Vec<Record>) -> Msg {
    Msg::FeedUpdated {
        feed,
        generation: state.generation(),
        state: FetchState::Success(records),
    }
}

fn apply(state: AppState, feed: Feed, records: Vec<Record>) -> AppState {
    let msg = success(&state, feed, records);
    update(state, msg).0
}

#[test]
fn opening_a_view_starts_its_feeds_and_marks_loading() {
    paydash_logging::initialize_for_tests();
    let (mut state, effects) = update(AppState::new(), Msg::ViewOpened(View::Wallet));

    assert_eq!(
        effects,
        vec![
            Effect::StartPolling {
                feed: Feed::Topups,
                generation: 1
            },
            Effect::StartPolling {
                feed: Feed::ClientBanks,
                generation: 1
            },
        ]
    );
    assert_eq!(state.feed_state(Feed::Topups), &FetchState::Loading);
    let view = state.view_with(&renderer());
    assert!(view
        .panels
        .iter()
        .all(|panel| panel.body == PanelBody::Loading));
    assert!(state.consume_dirty());
    assert!(!state.consume_dirty());
}

#[test]
fn reopening_the_active_view_is_a_noop() {
    let (mut state, _) = update(AppState::new(), Msg::ViewOpened(View::Dashboard));
    state.consume_dirty();
    let (mut state, effects) = update(state, Msg::ViewOpened(View::Dashboard));
    assert!(effects.is_empty());
    assert!(!state.consume_dirty());
}

#[test]
fn switching_views_stops_previous_feeds_first() {
    let (state, _) = update(AppState::new(), Msg::ViewOpened(View::Dashboard));
    let (state, effects) = update(state, Msg::ViewOpened(View::Transactions));

    assert_eq!(
        effects,
        vec![
            Effect::StopPolling {
                feed: Feed::DashboardSummary
            },
            Effect::StartPolling {
                feed: Feed::Transactions,
                generation: 2
            },
        ]
    );
    assert_eq!(state.feed_state(Feed::DashboardSummary), &FetchState::Idle);
}

#[test]
fn transactions_render_as_table_or_no_data() {
    let (state, _) = update(AppState::new(), Msg::ViewOpened(View::Transactions));
    let state = apply(state, Feed::Transactions, Vec::new());
    assert_eq!(
        state.view_with(&renderer()).panels[0].body,
        PanelBody::NoData
    );

    let state = apply(
        state,
        Feed::Transactions,
        vec![record(json!({"id": 9, "amount": 5}))],
    );
    let PanelBody::Table(table) = &state.view_with(&renderer()).panels[0].body else {
        panic!("expected table");
    };
    assert_eq!(table.headers, vec!["Id", "Amount"]);
    assert_eq!(table.rows, vec![vec!["9", "5"]]);
}

#[test]
fn failures_surface_as_panel_errors() {
    let (state, _) = update(AppState::new(), Msg::ViewOpened(View::Transactions));
    let (state, _) = update(
        state,
        Msg::FeedUpdated {
            feed: Feed::Transactions,
            generation: 1,
            state: FetchState::Failure(FetchFailure::new(FailureKind::HttpStatus(500), "boom")),
        },
    );
    assert_eq!(
        state.view_with(&renderer()).panels[0].body,
        PanelBody::Error("http status 500: boom".to_string())
    );
}

#[test]
fn updates_for_inactive_feeds_are_dropped() {
    let (mut state, _) = update(AppState::new(), Msg::ViewOpened(View::Dashboard));
    state.consume_dirty();
    let mut state = apply(state, Feed::Transactions, Vec::new());
    assert_eq!(state.feed_state(Feed::Transactions), &FetchState::Idle);
    assert!(!state.consume_dirty());
}

#[test]
fn results_from_an_earlier_opening_are_dropped() {
    let (state, _) = update(AppState::new(), Msg::ViewOpened(View::Transactions));
    let stale = success(&state, Feed::Transactions, vec![record(json!({"id": 1}))]);
    let (state, _) = update(state, Msg::ViewOpened(View::Dashboard));
    let (mut state, effects) = update(state, Msg::ViewOpened(View::Transactions));
    assert_eq!(
        effects[1],
        Effect::StartPolling {
            feed: Feed::Transactions,
            generation: 3
        }
    );
    state.consume_dirty();

    let (mut state, _) = update(state, stale);
    assert_eq!(state.feed_state(Feed::Transactions), &FetchState::Loading);
    assert!(!state.consume_dirty());

    let state = apply(state, Feed::Transactions, vec![record(json!({"id": 2}))]);
    assert_eq!(
        state.feed_state(Feed::Transactions).records().map(<[_]>::len),
        Some(1)
    );
}

#[test]
fn tick_changes_nothing() {
    let (mut state, _) = update(AppState::new(), Msg::ViewOpened(View::Wallet));
    state.consume_dirty();
    let before = state.clone();
    let (mut next, effects) = update(state, Msg::Tick);
    assert_eq!(next, before);
    assert!(effects.is_empty());
    assert!(!next.consume_dirty());
}

#[test]
fn dashboard_maps_first_summary_record_to_cards() {
    let (state, _) = update(AppState::new(), Msg::ViewOpened(View::Dashboard));
    let state = apply(
        state,
        Feed::DashboardSummary,
        vec![record(json!({"Wallet_Balance": 250, "Total_Credit": 0}))],
    );
    let PanelBody::Kpis(cards) = &state.view_with(&renderer()).panels[0].body else {
        panic!("expected cards");
    };
    assert_eq!(cards[0].count, "250");
    assert_eq!(cards[1].count, "0");
}

#[test]
fn wallet_filters_topups_by_session_subject() {
    let (state, _) = update(
        AppState::new(),
        Msg::SessionResolved {
            subject: Some("acme".into()),
        },
    );
    let (state, _) = update(state, Msg::ViewOpened(View::Wallet));
    let state = apply(
        state,
        Feed::Topups,
        vec![
            record(json!({"id": 1, "client_id": "acme", "amount": 10})),
            record(json!({"id": 2, "client_id": "zenith", "amount": 20})),
        ],
    );
    let state = apply(
        state,
        Feed::ClientBanks,
        vec![record(json!({"client_id": "zenith", "bank_name": "Z"}))],
    );

    let view = state.view_with(&renderer());
    let PanelBody::Table(table) = &view.panels[0].body else {
        panic!("expected topup table");
    };
    assert_eq!(table.rows, vec![vec!["1", "acme", "10"]]);
    assert_eq!(view.panels[1].body, PanelBody::NoData);
}

#[test]
fn wallet_without_a_subject_shows_no_topups() {
    let (state, _) = update(AppState::new(), Msg::ViewOpened(View::Wallet));
    let state = apply(
        state,
        Feed::Topups,
        vec![record(json!({"id": 1, "client_id": "acme", "amount": 10}))],
    );
    assert_eq!(state.view_with(&renderer()).panels[0].body, PanelBody::NoData);
}

#[test]
fn quit_stops_active_feeds_then_quits() {
    let (state, _) = update(AppState::new(), Msg::ViewOpened(View::Transactions));
    let (state, effects) = update(state, Msg::QuitRequested);
    assert_eq!(
        effects,
        vec![
            Effect::StopPolling {
                feed: Feed::Transactions
            },
            Effect::Quit,
        ]
    );
    assert_eq!(state.active_view(), None);
}

#[test]
fn closing_without_a_view_does_nothing() {
    let (mut state, effects) = update(AppState::new(), Msg::ViewClosed);
    assert!(effects.is_empty());
    assert!(!state.consume_dirty());
}
