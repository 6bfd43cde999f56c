//! Low-level DSP primitives used by the higher level graph nodes.
//!
//! These components are allocation-free and realtime-safe, making them safe to
//! embed directly inside voice structs. They intentionally stay focused on the
//! envelope math so graph wrappers can layer on orchestration and messaging.

/// Coefficient solver for tension-curved one-pole segments.
pub mod curve;
/// Attack/decay/sustain/release envelope generator with per-stage tension.
pub mod envelope;

pub use envelope::{Envelope, EnvelopeParams, Stage};
