pub mod health_check;
pub mod subscriptions;

pub use health_check::*;
pub use subscriptions::{error_chain_fmt, subscribe};
