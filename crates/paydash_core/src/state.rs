use std::collections::BTreeMap;
use std::fmt;

use chrono::TimeZone;

use crate::view_model::{AppViewModel, PanelBody, PanelView};
use crate::{
    account_details, kpi_cards, wallet_topups, Feed, FetchState, Generation, TableOutcome,
    TableRenderer, View,
};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    active: Option<View>,
    feeds: BTreeMap<Feed, FetchState>,
    subject: Option<String>,
    generation: Generation,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_view(&self) -> Option<View> {
        self.active
    }

    pub fn subject(&self) -> Option<&str> {
        self.subject.as_deref()
    }

    /// Generation of the most recent view opening.
    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn feed_state(&self, feed: Feed) -> &FetchState {
        const IDLE: &FetchState = &FetchState::Idle;
        self.feeds.get(&feed).unwrap_or(IDLE)
    }

    /// Returns whether anything changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// View model with dates rendered in the viewer's local zone.
    pub fn view(&self) -> AppViewModel {
        self.view_with(&TableRenderer::default())
    }

    pub fn view_with<Tz>(&self, renderer: &TableRenderer<Tz>) -> AppViewModel
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        let panels = self
            .active
            .map(|view| {
                view.feeds()
                    .iter()
                    .map(|&feed| PanelView {
                        feed,
                        body: self.panel_body(feed, renderer),
                    })
                    .collect()
            })
            .unwrap_or_default();
        AppViewModel {
            active: self.active,
            subject: self.subject.clone(),
            panels,
            dirty: self.dirty,
        }
    }

    fn panel_body<Tz>(&self, feed: Feed, renderer: &TableRenderer<Tz>) -> PanelBody
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        let records = match self.feed_state(feed) {
            FetchState::Idle => return PanelBody::Idle,
            FetchState::Loading => return PanelBody::Loading,
            FetchState::Failure(failure) => return PanelBody::Error(failure.to_string()),
            FetchState::Success(records) => records,
        };
        match feed {
            Feed::DashboardSummary => PanelBody::Kpis(kpi_cards(records.first())),
            Feed::Transactions => table_body(renderer.render(records)),
            Feed::Topups => match self.subject() {
                Some(subject) => table_body(renderer.render(&wallet_topups(records, subject))),
                None => PanelBody::NoData,
            },
            Feed::ClientBanks => {
                let subject = self.subject().unwrap_or_default();
                let details = account_details(records, subject, renderer.formatter());
                if details.is_empty() {
                    PanelBody::NoData
                } else {
                    PanelBody::Account(details)
                }
            }
        }
    }

    /// Activates `view` under a fresh generation and returns it.
    pub(crate) fn open_view(&mut self, view: View) -> Generation {
        self.generation = self.generation.wrapping_add(1);
        self.active = Some(view);
        for &feed in view.feeds() {
            self.feeds.insert(feed, FetchState::Loading);
        }
        self.dirty = true;
        self.generation
    }

    /// Clears the active view and returns the feeds that were polling.
    pub(crate) fn close_view(&mut self) -> &'static [Feed] {
        let Some(view) = self.active.take() else {
            return &[];
        };
        for feed in view.feeds() {
            self.feeds.remove(feed);
        }
        self.dirty = true;
        view.feeds()
    }

    /// Stores a poll result. Results for feeds outside the active view, or
    /// started under an earlier generation, are dropped.
    pub(crate) fn apply_feed(
        &mut self,
        feed: Feed,
        generation: Generation,
        state: FetchState,
    ) -> bool {
        let active = generation == self.generation
            && self
                .active
                .is_some_and(|view| view.feeds().contains(&feed));
        if active {
            self.feeds.insert(feed, state);
            self.dirty = true;
        }
        active
    }

    pub(crate) fn set_subject(&mut self, subject: Option<String>) {
        if self.subject != subject {
            self.subject = subject;
            self.dirty = true;
        }
    }
}

fn table_body(outcome: TableOutcome) -> PanelBody {
    match outcome {
        TableOutcome::NoData => PanelBody::NoData,
        TableOutcome::Table(view) => PanelBody::Table(view),
    }
}
