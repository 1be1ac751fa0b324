pub mod app;
pub mod buckets;
pub mod calendar;
pub mod clock;
pub mod compliance;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod overlap;
pub mod search;
pub mod state;
pub mod storage;
pub mod streak;
pub mod ui;

pub use app::router;
pub use state::AppState;
pub use storage::DataPaths;
