//! Emotion ratings submitted by the mobile app.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | POST | `/sentiments` | Submit one sentiment |
//! | GET | `/export/sentiments` | All sentiments as JSON |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use routes::routes;
pub use services::SentimentService;
