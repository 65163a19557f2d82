//! Server module
//!
//! Application state, routing and server startup.

pub mod app;
pub mod routes;
pub mod state;

pub use app::App;
pub use routes::create_router;
pub use state::AppState;
