pub mod health;
pub mod jmx;

pub use health::health;
pub use jmx::handle_poll;
