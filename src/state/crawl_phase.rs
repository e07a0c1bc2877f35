/// Crawl phase definitions for tracking run progress
///
/// A run moves `Discovering -> Crawling(1) -> ... -> Crawling(n) -> Done`,
/// or `Discovering -> Aborted` when the last page cannot be determined.
use std::fmt;

/// Represents the current phase of a crawl run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrawlPhase {
    /// Looking for the last page number on the first listing page
    Discovering,

    /// Processing the given listing page
    Crawling(u32),

    /// Every page up to the last one has been attempted
    Done,

    /// Discovery failed; no page was processed
    Aborted,
}

impl CrawlPhase {
    /// Returns true if no further transition is possible
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Aborted)
    }

    /// Checks whether moving from this phase to `next` is legal
    ///
    /// Pages are visited strictly in ascending order, one at a time, so a
    /// `Crawling(n)` phase may only be followed by `Crawling(n + 1)` or `Done`.
    pub fn can_transition_to(&self, next: &CrawlPhase) -> bool {
        match (self, next) {
            (Self::Discovering, Self::Crawling(1)) => true,
            (Self::Discovering, Self::Done) => true,
            (Self::Discovering, Self::Aborted) => true,
            (Self::Crawling(current), Self::Crawling(following)) => {
                current.checked_add(1) == Some(*following)
            }
            (Self::Crawling(_), Self::Done) => true,
            _ => false,
        }
    }
}

impl fmt::Display for CrawlPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Discovering => write!(f, "discovering"),
            Self::Crawling(page) => write!(f, "crawling page {}", page),
            Self::Done => write!(f, "done"),
            Self::Aborted => write!(f, "aborted"),
        }
    }
}
