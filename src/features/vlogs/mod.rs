//! Video diary uploads.
//!
//! The payload goes to the blob store first; the metadata record is only
//! written once the blob exists, so a record never points at nothing.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | POST | `/vlogs` | Upload a vlog (multipart) |
//! | GET | `/vlogs/{id}` | Stream one vlog payload |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use routes::routes;
pub use services::VlogService;
