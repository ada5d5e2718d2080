use serde::{Deserialize, Serialize};

pub const DEFAULT_LIMIT: u64 = 6;
pub const MAX_LIMIT: u64 = 100;

/// Page-number pagination arguments as they arrive in a query string.
#[derive(Debug, Default, Clone, Copy, Deserialize)]
pub struct PageArgs {
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

impl PageArgs {
    pub fn new(page: u64, limit: u64) -> Self {
        Self {
            page: Some(page),
            limit: Some(limit),
        }
    }

    pub fn page(&self) -> u64 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn limit(&self) -> u64 {
        self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
    }

    /// Saturates so an absurd page number yields an empty page. SQLite
    /// offsets are signed, hence the `i64::MAX` ceiling.
    pub fn offset(&self) -> u64 {
        (self.page() - 1)
            .saturating_mul(self.limit())
            .min(i64::MAX as u64)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub count: u64,
    pub results: Vec<T>,
    #[serde(skip)]
    pub page: u64,
    #[serde(skip)]
    pub limit: u64,
}

impl<T> Page<T> {
    pub fn new(args: &PageArgs, count: u64, results: Vec<T>) -> Self {
        Self {
            count,
            results,
            page: args.page(),
            limit: args.limit(),
        }
    }

    pub fn has_next(&self) -> bool {
        self.page.saturating_mul(self.limit) < self.count
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            count: self.count,
            results: self.results.into_iter().map(f).collect(),
            page: self.page,
            limit: self.limit,
        }
    }
}
