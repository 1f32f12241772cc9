//! Core request-gating pipeline
//!
//! Leaves first: the rate limiter, sanitizer, and audit log have no
//! dependencies on each other; the gateway sequences them and talks to the
//! external collaborators.

pub mod audit;
pub mod gateway;
pub mod providers;
pub mod ratelimit;
pub mod sanitize;
pub mod types;
