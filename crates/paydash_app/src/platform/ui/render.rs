use paydash_core::{AppViewModel, Feed, PanelBody, PanelView};

use super::constants::{KEY_DASHBOARD, KEY_QUIT, KEY_TRANSACTIONS, KEY_WALLET};
use super::layout::{key_value_lines, table_lines};

fn feed_label(feed: Feed) -> &'static str {
    match feed {
        Feed::Transactions => "transactions",
        Feed::DashboardSummary => "dashboard data",
        Feed::Topups => "wallet transactions",
        Feed::ClientBanks => "account details",
    }
}

fn panel_title(feed: Feed) -> &'static str {
    match feed {
        Feed::Transactions => "Transactions",
        Feed::DashboardSummary => "Overview",
        Feed::Topups => "Wallet Transactions",
        Feed::ClientBanks => "Account Details",
    }
}

pub fn render(view: &AppViewModel) -> Vec<String> {
    let mut lines = Vec::new();

    let title = view.active.map(|v| v.title()).unwrap_or("Paydash");
    let session = match &view.subject {
        Some(subject) => format!("signed in as {subject}"),
        None => "not signed in".to_string(),
    };
    lines.push(format!("== {title} == ({session})"));

    for panel in &view.panels {
        lines.push(String::new());
        lines.push(format!("[{}]", panel_title(panel.feed)));
        lines.extend(render_panel(panel));
    }

    lines.push(String::new());
    lines.push(format!(
        "{KEY_DASHBOARD}: dashboard  {KEY_TRANSACTIONS}: transactions  {KEY_WALLET}: wallet  {KEY_QUIT}: quit"
    ));
    lines
}

fn render_panel(panel: &PanelView) -> Vec<String> {
    let label = feed_label(panel.feed);
    match &panel.body {
        PanelBody::Idle => Vec::new(),
        PanelBody::Loading => vec![format!("Loading {label}...")],
        PanelBody::Error(message) => vec![format!("Error: {message}")],
        PanelBody::NoData => vec![format!("No {label} available.")],
        PanelBody::Table(table) => table_lines(&table.headers, &table.rows),
        PanelBody::Kpis(cards) => cards
            .iter()
            .map(|card| format!("({}) {}: {}", card.icon, card.title, card.count))
            .collect(),
        PanelBody::Account(details) => {
            key_value_lines(details.iter().map(|d| (d.label, d.value.as_str())))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use paydash_core::{
        update, AppState, FetchFailure, FetchState, FieldFormatter, FormatRules, Msg, Record,
        TableRenderer, View,
    };
    use pretty_assertions::assert_eq;

    fn renderer() -> TableRenderer<Utc> {
        TableRenderer::new(FieldFormatter::with_zone(FormatRules::default(), Utc))
    }

    #[test]
    fn loading_then_table() {
        let (state, _) = update(AppState::new(), Msg::ViewOpened(View::Transactions));
        let lines = render(&state.view_with(&renderer()));
        assert_eq!(lines[0], "== Transactions == (not signed in)");
        assert_eq!(lines[2], "[Transactions]");
        assert_eq!(lines[3], "Loading transactions...");

        let record = Record::new()
            .with("id", 1)
            .with("recharge_date", "2024-01-01T00:00:00Z");
        let (state, _) = update(
            state,
            Msg::FeedUpdated {
                feed: Feed::Transactions,
                generation: 1,
                state: FetchState::Success(vec![record]),
            },
        );
        let lines = render(&state.view_with(&renderer()));
        assert_eq!(
            &lines[3..6],
            &[
                "Id | Recharge_date".to_string(),
                "---+----------------------".to_string(),
                "1  | 1/1/2024, 12:00:00 AM".to_string(),
            ]
        );
    }

    #[test]
    fn errors_and_empty_batches_have_messages() {
        let (state, _) = update(AppState::new(), Msg::ViewOpened(View::Wallet));
        let (state, _) = update(
            state,
            Msg::FeedUpdated {
                feed: Feed::Topups,
                generation: 1,
                state: FetchState::Failure(FetchFailure::missing_credential()),
            },
        );
        let (state, _) = update(
            state,
            Msg::FeedUpdated {
                feed: Feed::ClientBanks,
                generation: 1,
                state: FetchState::Success(Vec::new()),
            },
        );
        let lines = render(&state.view_with(&renderer()));
        assert!(lines.contains(&"Error: missing credential: no token in session".to_string()));
        assert!(lines.contains(&"No account details available.".to_string()));
    }

    #[test]
    fn dashboard_lists_cards_with_icons() {
        let (state, _) = update(AppState::new(), Msg::ViewOpened(View::Dashboard));
        let (state, _) = update(
            state,
            Msg::FeedUpdated {
                feed: Feed::DashboardSummary,
                generation: 1,
                state: FetchState::Success(vec![Record::new().with("Wallet_Balance", 75)]),
            },
        );
        let lines = render(&state.view_with(&renderer()));
        assert_eq!(lines[3], "(account_balance_wallet) Wallet Balance: 75");
    }
}
