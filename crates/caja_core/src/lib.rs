//! # Caja Core
//!
//! Domain model and catalog store for the caja point-of-sale backend.
//!
//! This crate provides:
//! - `Product`, `Sale`, and `SaleItem` entities with field-level validation
//! - `Store`, the in-memory catalog with soft delete and watermark queries
//! - Atomic per-sale application (validate, deduct stock, persist)
//! - The `Clock` seam so the server stays the clock of record
//!
//! All writes to the store are serialized through a single write lock:
//! a sale either applies completely (stock deducted, record persisted)
//! or leaves no trace.

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod clock;
mod error;
mod product;
mod sale;
mod store;
mod types;
mod validate;
pub mod watermark;

/// Crate version, re-exported for diagnostics.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{CoreError, CoreResult};
pub use product::{Product, ProductDraft, ProductPatch, ProductUpsert};
pub use sale::{Sale, SaleDraft, SaleItem, SaleItemDraft};
pub use store::{SaleOutcome, Store};
pub use types::{Page, ProductId, DEFAULT_PAGE_SIZE};
pub use validate::{Violation, Violations};
