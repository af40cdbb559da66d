use serde_json::Value;

use crate::format::stringify;
use crate::Record;

pub const DEFAULT_ICON: &str = "insert_chart";

const ICONS: &[(&str, &str)] = &[
    ("Wallet Balance", "account_balance_wallet"),
    ("Total Credit", "credit_score"),
    ("Total Debit", "money_off"),
    ("Success Transaction", "check_circle"),
    ("Processing", "autorenew"),
    ("Failed Transaction", "cancel"),
    ("Today Turn over", "today"),
    ("Monthly Turn Over", "calendar_month"),
    ("Total Turn Over", "account_balance"),
    ("Daily Commission", "paid"),
    ("Monthly Commission", "payments"),
    ("Total Commission", "attach_money"),
];

/// Card title and the summary field it reads. Field names follow the backend verbatim.
const CARDS: &[(&str, &str)] = &[
    ("Wallet Balance", "Wallet_Balance"),
    ("Total Credit", "Total_Credit"),
    ("Total Debit", "Total_Debit"),
    ("Success Transaction", "Success_Trasaction"),
    ("Processing", "Processing"),
    ("Failed Transaction", "Failed_Transaction"),
    ("Today Turn over", "Today_Turnover"),
    ("Monthly Turn Over", "Monthly_TurnOver"),
    ("Total Turn Over", "Total_TurnOver"),
    ("Daily Commission", "Daily_Commision"),
    ("Monthly Commission", "Monthly_Commision"),
    ("Total Commission", "Total_Commision"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KpiCard {
    pub title: &'static str,
    pub icon: &'static str,
    pub count: String,
}

pub fn icon_for(title: &str) -> &'static str {
    ICONS
        .iter()
        .find(|(name, _)| *name == title)
        .map(|(_, icon)| *icon)
        .unwrap_or(DEFAULT_ICON)
}

/// Maps a summary record onto the fixed card set. Missing or falsy values show `0`.
pub fn kpi_cards(summary: Option<&Record>) -> Vec<KpiCard> {
    CARDS
        .iter()
        .map(|&(title, field)| {
            let value = summary.and_then(|record| record.get(field).value());
            KpiCard {
                title,
                icon: icon_for(title),
                count: count_text(value),
            }
        })
        .collect()
}

fn count_text(value: Option<&Value>) -> String {
    match value {
        Some(value) if !is_falsy(value) => stringify(value),
        _ => "0".to_string(),
    }
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(flag) => !flag,
        Value::Number(number) => number.as_f64().is_some_and(|f| f == 0.0 || f.is_nan()),
        Value::String(text) => text.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}
