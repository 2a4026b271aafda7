//! # Caja Server
//!
//! Sync reconciler and HTTP API for the caja point-of-sale backend.
//!
//! This crate provides:
//! - `SyncReconciler`: per-record merging of device-created sales and
//!   product edits into the server catalog
//! - `PosService`: the CRUD layer over the catalog store
//! - An axum router exposing the REST endpoints and an `ApiServer`
//!   to bind and serve it
//!
//! # Architecture
//!
//! Handlers are thin: they parse the request, call into `PosService` or
//! `SyncReconciler`, and convert the result. All catalog state lives in
//! `caja_core::Store`; each sale record is applied under one store
//! write guard, so a mid-record failure leaves no partial stock
//! deduction and concurrent batches cannot race decrements.
//!
//! # Reporting policy
//!
//! Sync batches process records independently, yet the response's
//! `success` flag is all-or-nothing: one rejected record flips it to
//! false while the accepted records in the same batch still take
//! effect. That asymmetry is part of the documented API surface.

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod config;
mod error;
mod http;
mod reconciler;
mod server;
mod service;

pub use config::ServerConfig;
pub use error::{ApiError, ApiResult};
pub use http::router;
pub use reconciler::SyncReconciler;
pub use server::ApiServer;
pub use service::PosService;
