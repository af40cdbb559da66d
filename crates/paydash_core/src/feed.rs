/// A remote collection the client polls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Feed {
    Transactions,
    DashboardSummary,
    Topups,
    ClientBanks,
}

/// How records sit inside a feed's response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadShape {
    /// Every element of the array field is a record.
    Collection,
    /// Only the first element of the array field is used.
    FirstOnly,
}

impl Feed {
    pub fn path(self) -> &'static str {
        match self {
            Feed::Transactions => "/transactions",
            Feed::DashboardSummary => "/dashboard",
            Feed::Topups | Feed::ClientBanks => "/get",
        }
    }

    /// Name of the array field holding the records.
    pub fn collection_field(self) -> &'static str {
        match self {
            Feed::Transactions => "transactions",
            Feed::DashboardSummary => "dashboard_data",
            Feed::Topups => "topups",
            Feed::ClientBanks => "client_banks",
        }
    }

    pub fn shape(self) -> PayloadShape {
        match self {
            Feed::DashboardSummary => PayloadShape::FirstOnly,
            _ => PayloadShape::Collection,
        }
    }
}

/// Counts view openings; poll results carry the generation they were started under.
pub type Generation = u64;

/// A screen of the dashboard. Opening one starts polling its feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum View {
    #[default]
    Dashboard,
    Transactions,
    Wallet,
}

impl View {
    pub fn feeds(self) -> &'static [Feed] {
        match self {
            View::Dashboard => &[Feed::DashboardSummary],
            View::Transactions => &[Feed::Transactions],
            View::Wallet => &[Feed::Topups, Feed::ClientBanks],
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            View::Dashboard => "Dashboard",
            View::Transactions => "Transactions",
            View::Wallet => "Wallet",
        }
    }
}
