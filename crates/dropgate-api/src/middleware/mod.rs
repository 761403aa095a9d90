//! Request middleware

pub mod admission;
pub mod logging;

pub use admission::admission_middleware;
pub use logging::logging_middleware;
