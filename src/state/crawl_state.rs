//! Crawl lifecycle definitions
//!
//! A crawl moves `Idle -> Running(first) -> ... -> Running(last) -> Done`,
//! visiting each configured page exactly once in ascending order.

use std::fmt;

/// Represents where the crawl driver is in its page range
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CrawlState {
    /// Constructed, no page visited yet
    #[default]
    Idle,

    /// Processing the given listing page
    Running { page: u32 },

    /// Every configured page has been visited
    Done,
}

impl CrawlState {
    /// Checks whether moving from this state to `next` is allowed
    ///
    /// Pages must be entered in strictly ascending order, `Done` is final, and
    /// `Idle` can never be re-entered.
    pub fn can_transition_to(&self, next: &CrawlState) -> bool {
        match (self, next) {
            (Self::Idle, Self::Running { .. }) => true,
            (Self::Idle, Self::Done) => true,
            (Self::Running { page: from }, Self::Running { page: to }) => to > from,
            (Self::Running { .. }, Self::Done) => true,
            _ => false,
        }
    }
}

impl fmt::Display for CrawlState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Running { page } => write!(f, "running (page {})", page),
            Self::Done => write!(f, "done"),
        }
    }
}
