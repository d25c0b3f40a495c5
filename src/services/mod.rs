//! Business logic services.
//!
//! Services contain core logic separated from HTTP handlers.

pub mod dispatcher;
