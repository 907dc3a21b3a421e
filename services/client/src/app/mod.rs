pub mod auth;
pub mod catalog;
pub mod favorites;
pub mod reviews;
pub mod router;
pub mod scan;
pub mod session;
pub mod startup;
pub mod state;
pub mod store;

// Re-export the pieces the shell wires together.
pub use router::Page;
pub use scan::ScanOutcome;
pub use state::AppState;
pub use store::{Action, AppData, Store};
