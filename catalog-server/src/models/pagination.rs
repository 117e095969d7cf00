//! Pagination clamp for product listings

/// Default (and maximum) number of rows per listing
pub const DEFAULT_COUNT: i64 = 10;

/// Largest `count` honoured before falling back to the default
pub const MAX_COUNT: i64 = 10;

/// Offset/limit window for a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    /// Rows to skip
    pub start: i64,
    /// Rows to return at most
    pub count: i64,
}

impl Page {
    /// Create a window, normalising out-of-range values instead of rejecting them.
    ///
    /// - `count` outside 1..=10 becomes 10
    /// - negative `start` becomes 0; there is no upper bound
    pub fn new(start: i64, count: i64) -> Self {
        let count = if !(1..=MAX_COUNT).contains(&count) {
            DEFAULT_COUNT
        } else {
            count
        };

        Self {
            start: start.max(0),
            count,
        }
    }

    /// Build a window from raw query values.
    ///
    /// Missing or unparsable values read as zero before clamping.
    pub fn from_raw(start: Option<&str>, count: Option<&str>) -> Self {
        Self::new(lenient_int(start), lenient_int(count))
    }
}

impl Default for Page {
    fn default() -> Self {
        Self {
            start: 0,
            count: DEFAULT_COUNT,
        }
    }
}

fn lenient_int(raw: Option<&str>) -> i64 {
    raw.and_then(|s| s.parse().ok()).unwrap_or(0)
}
