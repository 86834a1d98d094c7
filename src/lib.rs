pub mod models;
pub mod routes;
pub mod services;
pub mod storage;
pub mod utils;

pub use services::auth_service::SessionGate;
