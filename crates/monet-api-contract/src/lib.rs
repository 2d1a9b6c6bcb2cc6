//! Monet API contract types and model catalog
//!
//! Wire types shared by the REST client, the mock client and the CLI.
//! Task payloads are consumed as the service returns them; nothing here
//! validates inputs against the catalog.

pub mod error;
pub mod models;
pub mod types;

pub use error::*;
pub use types::*;
