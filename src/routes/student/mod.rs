mod handler;
mod model;

pub use handler::{login, logout, me};
pub use model::{LoginRequest, StudentResponse};
