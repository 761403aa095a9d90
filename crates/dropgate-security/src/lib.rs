//! # dropgate security
//!
//! Request admission for the dropgate gateway:
//!
//! - **AuthGate**: ordered IP allow-list, API key and bearer token checks, or the
//!   legacy single shared key
//! - **RateLimiter**: per-client sliding-window admission control
//! - **Client identity**: forwarded-for aware address resolution shared by both
//!
//! Requests are read through the [`InboundRequest`] trait so the checks stay
//! independent of the HTTP framework.

pub mod error;
pub mod gate;
pub mod keys;
pub mod limiter;
pub mod request;
pub mod token;

pub use error::{Denial, Result};
pub use gate::{AuthGate, HEALTH_PATH};
pub use keys::{key_matches, matches_any_key};
pub use limiter::{RateLimiter, WINDOW};
pub use request::{client_address, InboundRequest};
pub use token::TokenValidator;
