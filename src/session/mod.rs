mod manager;
mod model;

pub use manager::SessionManager;
pub use model::{Session, parse_amount};
