use std::time::Duration;

/// How often the app loop wakes up to coalesce rendering.
pub const TICK_INTERVAL: Duration = Duration::from_millis(75);

pub const KEY_QUIT: &str = "q";
pub const KEY_DASHBOARD: &str = "d";
pub const KEY_TRANSACTIONS: &str = "t";
pub const KEY_WALLET: &str = "w";

pub const COLUMN_SEPARATOR: &str = " | ";
