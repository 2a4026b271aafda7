//! # Caja Protocol
//!
//! JSON wire types for the caja point-of-sale API.
//!
//! This crate provides:
//! - Request bodies for product/sale CRUD and the sync batch endpoints
//! - Response envelopes (`count`/`results`/`sync_timestamp`)
//! - Structured field errors (field name → list of messages)
//!
//! This is a pure data crate with no I/O operations. Field names match
//! the wire exactly: decimals travel as strings ("100.00"), timestamps
//! as RFC 3339.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod errors;
mod product;
mod sale;
mod sync;

pub use errors::FieldErrors;
pub use product::{
    ProductBody, ProductListResponse, ProductPatchBody, ProductSyncEntry, ProductSyncRequest,
    ProductWrite,
};
pub use sale::{SaleBody, SaleCreateRequest, SaleItemBody, SaleItemWrite, SaleListResponse};
pub use sync::{
    ProductSyncErrors, ProductSyncResponse, SaleSyncEntry, SaleSyncErrors, SaleSyncRequest,
    SaleSyncResponse,
};
