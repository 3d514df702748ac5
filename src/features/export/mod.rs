//! Operator facing exports: dashboard, previews, CSV, JSON and ZIP downloads.
//!
//! Every rendering shows timestamps in the fixed display offset; stored
//! values are never rewritten.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/export` | HTML dashboard with counts |
//! | GET | `/export/sentiments/csv` | Sentiments as CSV |
//! | GET | `/export/sentiments/preview` | Sentiments HTML preview |
//! | GET | `/export/gps/csv` | GPS fixes as CSV |
//! | GET | `/export/gps/preview` | GPS HTML preview |
//! | GET | `/export/vlogs` | HTML vlog list |
//! | GET | `/export/vlogs/download-all` | ZIP of every vlog |
//! | GET | `/export/vlogs/download-multiple?ids=` | ZIP of selected vlogs |
//! | GET | `/export/all` | Full JSON export |
//! | GET | `/export/all/download` | Full JSON export as a file |

pub mod dtos;
pub mod handlers;
pub mod routes;
pub mod services;

pub use routes::routes;
pub use services::ExportService;
