//! GPS fixes submitted by the mobile app.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | POST | `/gps` | Submit one GPS fix |
//! | GET | `/export/gps` | All GPS fixes as JSON |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use routes::routes;
pub use services::GpsService;
