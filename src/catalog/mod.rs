//! Metadata fetcher for the external movie catalog (OMDb-compatible API).

mod client;
mod models;

pub use client::{CatalogClient, CatalogConfig};
