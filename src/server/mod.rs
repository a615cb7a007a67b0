//! Server-side modules for the plant store.

pub mod api;
pub mod import;
pub mod storage;

pub use api::{router, AppState, ErrorResponse, SaveResponse, API_PATH};
pub use import::{import_catalog, parse_catalog, ImportError};
pub use storage::{PlantStore, StoreError};
