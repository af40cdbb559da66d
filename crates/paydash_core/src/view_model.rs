use crate::{AccountDetail, Feed, KpiCard, TableView, View};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub active: Option<View>,
    pub subject: Option<String>,
    pub panels: Vec<PanelView>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelView {
    pub feed: Feed,
    pub body: PanelBody,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelBody {
    Idle,
    Loading,
    Error(String),
    NoData,
    Table(TableView),
    Kpis(Vec<KpiCard>),
    Account(Vec<AccountDetail>),
}
