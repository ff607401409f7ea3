//! Pagination window for list endpoints

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Offset/limit window forwarded verbatim as `skip` and `limit` query
/// parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Page {
    /// Number of records to skip
    pub skip: u32,
    /// Maximum number of records to return
    pub limit: u32,
}

impl Page {
    /// Backend default page size
    pub const DEFAULT_LIMIT: u32 = 100;

    /// Create a page window
    #[must_use]
    pub const fn new(skip: u32, limit: u32) -> Self {
        Self { skip, limit }
    }

    /// First page with the given limit
    #[must_use]
    pub const fn first(limit: u32) -> Self {
        Self { skip: 0, limit }
    }

    /// The window immediately after this one
    #[must_use]
    pub const fn next(self) -> Self {
        Self {
            skip: self.skip.saturating_add(self.limit),
            limit: self.limit,
        }
    }

    /// Reject windows that cannot return anything
    pub fn validate(self) -> Result<Self, DomainError> {
        if self.limit == 0 {
            return Err(DomainError::InvalidPage(
                "limit must be greater than 0".to_string(),
            ));
        }
        Ok(self)
    }

    /// Query parameters in the order the backend documents them
    #[must_use]
    pub fn query(&self) -> [(&'static str, u32); 2] {
        [("skip", self.skip), ("limit", self.limit)]
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::first(Self::DEFAULT_LIMIT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_backend() {
        let page = Page::default();
        assert_eq!(page.skip, 0);
        assert_eq!(page.limit, 100);
    }

    #[test]
    fn next_advances_by_limit() {
        let page = Page::new(0, 50).next();
        assert_eq!(page, Page::new(50, 50));
    }

    #[test]
    fn next_saturates() {
        let page = Page::new(u32::MAX - 1, 50).next();
        assert_eq!(page.skip, u32::MAX);
    }

    #[test]
    fn zero_limit_is_rejected() {
        assert!(Page::new(10, 0).validate().is_err());
        assert!(Page::new(10, 1).validate().is_ok());
    }

    #[test]
    fn query_pairs_are_skip_then_limit() {
        let pairs = Page::new(0, 50).query();
        assert_eq!(pairs, [("skip", 0), ("limit", 50)]);
    }
}
