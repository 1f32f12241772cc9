//! Append-only audit trail of pipeline decisions
//!
//! Two instances exist at runtime: the general chat log and a smaller
//! security-incident log fed only by sanitizer blocks. Both are FIFO ring
//! buffers with a fixed capacity; persistence is best-effort and never fails
//! the chat flow.

mod log;


pub use log::{
    AuditAction, AuditEntry, AuditLog, CHAT_LOG_CAPACITY, INPUT_PREVIEW_CHARS,
    SECURITY_LOG_CAPACITY,
};
