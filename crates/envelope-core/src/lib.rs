//! Core types for uniform API responses
//!
//! Holds the framework-agnostic pieces: the exposable [`ApiFail`] value,
//! the [`FailDetail`] a handler describes a failure with, and the default
//! success/failure envelopes.

#![allow(clippy::must_use_candidate)]

mod envelope;
mod fail;

pub use envelope::{default_fail_envelope, default_success_envelope};
pub use fail::{ApiFail, DEFAULT_FAIL_STATUS, FailDetail};
