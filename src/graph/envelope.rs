#[cfg(feature = "rtrb")]
use rtrb::{Consumer, Producer, RingBuffer};

use crate::{
    dsp::envelope::{Envelope, EnvelopeParams},
    graph::node::GraphNode,
};

/// Graph node wrapping a tension envelope for direct, single-threaded use.
pub struct EnvNode {
    env: Envelope,
}

impl EnvNode {
    pub fn new(sample_rate: f64) -> Self {
        let env = Envelope::new(sample_rate);
        Self { env }
    }

    pub fn with_params(sample_rate: f64, params: EnvelopeParams) -> Self {
        let env = Envelope::with_params(sample_rate, params);
        Self { env }
    }

    pub fn adsr(
        sample_rate: f64,
        attack_ms: f64,
        decay_ms: f64,
        sustain_db: f64,
        release_ms: f64,
    ) -> Self {
        let env = Envelope::adsr(sample_rate, attack_ms, decay_ms, sustain_db, release_ms);
        Self { env }
    }

    pub fn configure(&mut self, params: &EnvelopeParams) {
        self.env.configure(params);
    }

    pub fn reset(&mut self) {
        self.env.reset();
    }
}

impl GraphNode for EnvNode {
    fn render_block(&mut self, out: &mut [f32]) {
        self.env.render(out);
    }

    fn note_on(&mut self, scale: f64) {
        self.env.note_on(scale);
    }

    fn note_off(&mut self) {
        self.env.note_off();
    }

    fn envelope_level(&self) -> Option<f64> {
        Some(self.env.level())
    }

    fn is_active(&self) -> bool {
        self.env.is_active()
    }
}

/// Control messages accepted by [`SharedEnvNode`].
#[cfg(feature = "rtrb")]
#[derive(Debug, Clone, Copy)]
pub enum EnvelopeMessage {
    NoteOn { scale: f64 },
    NoteOff,
    Configure(EnvelopeParams),
    Reset,
}

/// Control-thread side of a shared envelope.
///
/// Pushes are wait-free; a full queue drops the message, which is the
/// correct failure mode on a realtime path.
#[cfg(feature = "rtrb")]
pub struct EnvelopeHandle {
    tx: Producer<EnvelopeMessage>,
}

#[cfg(feature = "rtrb")]
impl EnvelopeHandle {
    pub fn note_on(&mut self, scale: f64) {
        let _ = self.tx.push(EnvelopeMessage::NoteOn { scale });
    }

    pub fn note_off(&mut self) {
        let _ = self.tx.push(EnvelopeMessage::NoteOff);
    }

    pub fn configure(&mut self, params: EnvelopeParams) {
        let _ = self.tx.push(EnvelopeMessage::Configure(params));
    }

    pub fn reset(&mut self) {
        let _ = self.tx.push(EnvelopeMessage::Reset);
    }
}

/// Audio-thread side of a shared envelope.
///
/// Messages are drained at the start of each rendered block, so triggers
/// land with block granularity.
#[cfg(feature = "rtrb")]
pub struct SharedEnvNode {
    env: Envelope,
    rx: Consumer<EnvelopeMessage>,
}

#[cfg(feature = "rtrb")]
const ENVELOPE_QUEUE_SIZE: usize = 64;

#[cfg(feature = "rtrb")]
impl SharedEnvNode {
    pub fn new(sample_rate: f64) -> (Self, EnvelopeHandle) {
        Self::with_params(sample_rate, EnvelopeParams::default())
    }

    pub fn with_params(sample_rate: f64, params: EnvelopeParams) -> (Self, EnvelopeHandle) {
        let env = Envelope::with_params(sample_rate, params);
        let (tx, rx) = RingBuffer::<EnvelopeMessage>::new(ENVELOPE_QUEUE_SIZE);

        let handle = EnvelopeHandle { tx };
        let node = Self { env, rx };

        (node, handle)
    }

    /// Check if envelope is currently active (not Idle)
    pub fn is_active(&self) -> bool {
        self.env.is_active()
    }
}

#[cfg(feature = "rtrb")]
impl GraphNode for SharedEnvNode {
    fn render_block(&mut self, out: &mut [f32]) {
        while let Ok(msg) = self.rx.pop() {
            match msg {
                EnvelopeMessage::NoteOn { scale } => self.env.note_on(scale),
                EnvelopeMessage::NoteOff => self.env.note_off(),
                EnvelopeMessage::Configure(params) => self.env.configure(&params),
                EnvelopeMessage::Reset => self.env.reset(),
            }
        }

        self.env.render(out);
    }

    fn envelope_level(&self) -> Option<f64> {
        Some(self.env.level())
    }

    fn is_active(&self) -> bool {
        self.env.is_active()
    }
}
