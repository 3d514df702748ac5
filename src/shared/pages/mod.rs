//! Server-rendered operator pages (dashboard, previews, vlog list).
//!
//! Templates live in `templates/pages/` and are compiled into the binary.
//! Every template ends in `.html`, so minijinja auto-escapes all values.

pub mod engine;

pub use engine::render_page;
