pub mod app;
pub mod auth;
pub mod errors;
pub mod handlers;
pub mod lifecycle;
pub mod models;
pub mod state;
pub mod stats;
pub mod storage;
pub mod summary;
pub mod ui;

pub use app::router;
pub use state::AppState;
pub use storage::{load_accounts, resolve_data_path};
