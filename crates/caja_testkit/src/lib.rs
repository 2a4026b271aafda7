//! # Caja Testkit
//!
//! Test utilities for the caja point-of-sale backend.
//!
//! This crate provides:
//! - Store fixtures with seeded catalogs and a controllable clock
//! - Property-based test generators using proptest
//!
//! ## Usage
//!
//! ```rust,ignore
//! use caja_testkit::prelude::*;
//!
//! #[test]
//! fn test_with_catalog() {
//!     let catalog = TestCatalog::with_products(3);
//!     let draft = catalog.sale_draft_for(catalog.product_ids[0], 1);
//!     // ... test operations
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::fixtures::*;
    pub use crate::generators::*;
}

pub use fixtures::*;
pub use generators::*;
