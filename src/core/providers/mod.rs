//! External collaborators of the gating pipeline
//!
//! The LLM backend and the training-context provider are trait seams: the
//! gateway treats both as opaque. Production impls live here; tests substitute
//! their own.

mod backend;
mod context;

pub use backend::{HttpLlmBackend, LlmBackend};
pub use context::{FileContextProvider, StaticContextProvider, TrainingContextProvider};
