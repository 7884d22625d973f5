//! Page windows and next/previous links

use serde::{Deserialize, Serialize};
use std::ops::Range;

use crate::error::{QueryError, QueryResult};

/// Validated `(limit, offset)` slice of an ordered collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageWindow {
    limit: u64,
    offset: u64,
}

impl PageWindow {
    /// Build a window from raw query values.
    ///
    /// `limit` must be at least 1 and `offset` at least 0; out-of-range
    /// values are rejected, never clamped.
    pub fn new(limit: i64, offset: i64) -> QueryResult<Self> {
        if limit < 1 || offset < 0 {
            return Err(QueryError::InvalidWindow { limit, offset });
        }

        Ok(Self {
            limit: limit.unsigned_abs(),
            offset: offset.unsigned_abs(),
        })
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Index range of this window within a collection of `len` items
    pub fn range(&self, len: usize) -> Range<usize> {
        let start = usize::try_from(self.offset).unwrap_or(usize::MAX).min(len);
        let limit = usize::try_from(self.limit).unwrap_or(usize::MAX);
        start..start.saturating_add(limit).min(len)
    }

    pub fn links(&self, base_path: &str, total_count: u64) -> PageLinks {
        page_links(base_path, total_count, self.limit, self.offset)
    }
}

/// Links to the neighbouring pages, `None` where there is no such page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLinks {
    pub next: Option<String>,
    pub previous: Option<String>,
}

/// Compute next/previous links for a page of `total_count` items.
///
/// Both links require `limit <= total_count`. `next` also requires
/// `offset + limit < total_count` and `previous` requires `offset >= limit`.
/// `limit` and `offset` are echoed as given; validating them is the
/// caller's job (see [`PageWindow::new`]).
pub fn page_links(base_path: &str, total_count: u64, limit: u64, offset: u64) -> PageLinks {
    let fits = limit <= total_count;

    let next = offset
        .checked_add(limit)
        .filter(|next_offset| fits && *next_offset < total_count)
        .map(|next_offset| page_url(base_path, limit, next_offset));

    let previous = offset
        .checked_sub(limit)
        .filter(|_| fits)
        .map(|previous_offset| page_url(base_path, limit, previous_offset));

    PageLinks { next, previous }
}

fn page_url(base_path: &str, limit: u64, offset: u64) -> String {
    format!("{}?limit={}&offset={}", base_path, limit, offset)
}
