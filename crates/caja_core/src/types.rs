//! Shared identifier and paging types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Default page size for sale listings.
pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// Identifier of a product in the catalog.
///
/// Product ids are small sequential integers. Client devices assign
/// them locally and push them through the product sync endpoint; the
/// server allocates the next free id for products created through the
/// REST API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(u32);

impl ProductId {
    /// Creates a product id from its raw value.
    pub fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw id value.
    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A page window for listing queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    /// 1-based page number.
    pub number: u32,
    /// Number of records per page.
    pub size: u32,
}

impl Page {
    /// Creates a page window. A zero page number is clamped to 1 and a
    /// zero size to the default page size.
    pub fn new(number: u32, size: u32) -> Self {
        Self {
            number: number.max(1),
            size: if size == 0 { DEFAULT_PAGE_SIZE } else { size },
        }
    }

    /// Returns the offset of the first record in this window.
    pub fn offset(self) -> usize {
        (self.number as usize - 1) * self.size as usize
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(1, DEFAULT_PAGE_SIZE)
    }
}
