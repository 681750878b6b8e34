pub mod app;
pub mod categories;
pub mod dates;
pub mod detail;
pub mod errors;
pub mod format;
pub mod handlers;
pub mod models;
pub mod select;
pub mod series;
pub mod source;
pub mod state;
pub mod summary;
pub mod ui;

#[cfg(test)]
mod testing;

pub use app::router;
pub use source::{load_records, resolve_source_path};
pub use state::AppState;
