pub mod config;
pub mod error;
pub mod gateway;
pub mod images;
pub mod reconcile;
pub mod schema;
pub mod session;
pub mod sync;
