//! Paydash core: record normalization, table rendering and the pure view state machine.
mod effect;
mod feed;
mod fetch_state;
pub mod format;
mod kpi;
mod msg;
mod record;
mod schema;
mod session;
mod state;
mod table;
mod update;
mod view_model;
mod wallet;

pub use effect::Effect;
pub use feed::{Feed, Generation, PayloadShape, View};
pub use fetch_state::{FailureKind, FetchFailure, FetchState};
pub use format::{FieldFormatter, FormatRules, INVALID_DATE};
pub use kpi::{icon_for, kpi_cards, KpiCard, DEFAULT_ICON};
pub use msg::Msg;
pub use record::{FieldValue, Record};
pub use schema::{infer_fields, FieldCatalog};
pub use session::{Credential, CredentialProvider, SessionGate, StaticCredential};
pub use state::AppState;
pub use table::{column_header, TableOutcome, TableRenderer, TableView};
pub use update::update;
pub use view_model::{AppViewModel, PanelBody, PanelView};
pub use wallet::{account_details, wallet_topups, AccountDetail};
