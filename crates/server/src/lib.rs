pub mod error;
pub mod patch;
pub mod routes;
pub mod state;
pub mod validate;
