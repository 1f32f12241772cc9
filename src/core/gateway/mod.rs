//! Request-gating orchestration for the advisor chat
//!
//! Sequences RateLimiter → InputSanitizer → context augmentation → remote LLM
//! call → response mapping, auditing every decision point. Each request moves
//! through the pipeline fresh; the only cross-request state lives in the
//! limiter and the audit logs.

mod gateway;


pub use gateway::ChatGateway;
