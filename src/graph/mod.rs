//! Composable building blocks for plugging envelopes into instrument graphs.
//!
//! Graph nodes wrap the low-level DSP core with the ergonomics needed for
//! instrument design: note events, block-based rendering, and (with the
//! `rtrb` feature) a wait-free message channel from a control thread.

/// Envelope generator nodes, direct and message-driven.
pub mod envelope;
/// Core traits shared by all graph nodes.
pub mod node;
