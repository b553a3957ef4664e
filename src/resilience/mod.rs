//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Request to upstream:
//!     → timeouts.rs (single deadline over connect, response and body)
//!     → on expiry: failure reported to the handler, no retry
//! ```
//!
//! # Design Decisions
//! - Timeouts are non-negotiable; every external call has a deadline
//! - No retries and no circuit breaking: one inbound request, one outbound call

pub mod timeouts;

pub use timeouts::{with_deadline, DeadlineExceeded};
