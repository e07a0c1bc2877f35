/// Per-page results of the crawl loop
use std::fmt;

/// What happened to a single listing page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageOutcome {
    /// Titles were parsed and the output file was written
    Written {
        /// Number of titles written (may be zero)
        titles: usize,
    },

    /// The page could not be fetched; its output file was not touched
    FetchFailed,

    /// The page was fetched and parsed but persisting it failed
    WriteFailed,
}

impl PageOutcome {
    /// Returns true if the page's output file now holds its titles
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Written { .. })
    }

    /// Returns true if the politeness delay applies after this page
    ///
    /// Only a failed fetch skips the delay.
    pub fn sleeps_after(&self) -> bool {
        !matches!(self, Self::FetchFailed)
    }
}

impl fmt::Display for PageOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Written { titles } => write!(f, "written ({} titles)", titles),
            Self::FetchFailed => write!(f, "fetch failed"),
            Self::WriteFailed => write!(f, "write failed"),
        }
    }
}
