//! Pagination utilities for service layer
//!
//! `skip = (page - 1) * limit`. Missing or zero inputs fall back to the
//! defaults (`page = 1`, `limit = 5`).

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 5;
pub const MAX_LIMIT: u32 = 100;

/// Pagination parameters
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pagination {
    /// 1-based page index
    pub page: u32,
    /// items per page
    pub limit: u32,
}

impl Pagination {
    pub fn new(page: u32, limit: u32) -> Self {
        Self { page, limit }.normalize()
    }

    /// Build from optional query inputs, defaulting what is absent or zero.
    pub fn from_parts(page: Option<u32>, limit: Option<u32>, default_limit: u32) -> Self {
        let page = page.filter(|p| *p > 0).unwrap_or(DEFAULT_PAGE);
        let limit = limit.filter(|l| *l > 0).unwrap_or(default_limit);
        Self::new(page, limit)
    }

    /// Clamp to sane bounds
    pub fn normalize(self) -> Self {
        let page = if self.page == 0 { DEFAULT_PAGE } else { self.page };
        let limit = self.limit.clamp(1, MAX_LIMIT);
        Self { page, limit }
    }

    pub fn skip(&self) -> usize {
        (self.page as usize - 1) * self.limit as usize
    }

    /// Keep only the items on this page.
    pub fn apply<T>(&self, items: Vec<T>) -> Vec<T> {
        items.into_iter().skip(self.skip()).take(self.limit as usize).collect()
    }
}

impl Default for Pagination {
    fn default() -> Self { Self { page: DEFAULT_PAGE, limit: DEFAULT_LIMIT } }
}
