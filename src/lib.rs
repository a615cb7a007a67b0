//! Plant catalog manager.
//!
//! A JSON-file store served over HTTP and a client that edits the catalog
//! as a whole collection.

pub mod catalog;
pub mod client;
pub mod config;
pub mod models;
pub mod server;

pub use catalog::CatalogError;
pub use client::{Session, StoreClient};
pub use models::{Collection, Field, LightChoice, LightOption, Plant, PlantForm};
pub use server::{PlantStore, SaveResponse};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
