//! Bot module - Core bot functionality.

pub mod dispatcher;
pub mod runtime;
#[cfg(test)]
pub mod testing;

pub use dispatcher::Bot;
pub use runtime::ConnectionManager;
