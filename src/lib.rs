pub mod dsp;
pub mod graph; // Envelope nodes for composable instrument graphs

pub use dsp::{Envelope, EnvelopeParams, Stage};

pub const MAX_BLOCK_SIZE: usize = 2048;
pub(crate) const MIN_STAGE_MS: f64 = 1.0;
