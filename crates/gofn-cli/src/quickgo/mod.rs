//! QuickGO bindings
//!
//! The EBI QuickGO REST API serves GO term metadata, is_a paths between
//! terms and gene product annotations. [`QuickGoClient`] exposes these as
//! the lookup traits of `gofn_core`.

pub mod client;
pub mod endpoints;
pub mod types;

pub use client::QuickGoClient;
