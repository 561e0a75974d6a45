pub mod routes;
pub mod server;

pub use routes::{router, GenerateResponse};
