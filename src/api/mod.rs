//! SuiTruth API Module
//! REST API over the address trust resolver

pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod types;

pub use routes::create_router;
pub use types::*;
