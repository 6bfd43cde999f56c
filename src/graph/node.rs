/// Core trait for graph nodes that produce control or audio-rate signals.
///
/// Nodes render block by block and respond to note events. The surrounding
/// instrument owns note scheduling and voice allocation; nodes only react.
pub trait GraphNode: Send {
    fn render_block(&mut self, out: &mut [f32]);

    /// Triggered when a note starts. `scale` is the note's peak amplitude,
    /// typically velocity-derived, in [0, 1].
    ///
    /// Default implementation does nothing (passthrough nodes).
    fn note_on(&mut self, _scale: f64) {
        // Default: do nothing
    }

    /// Triggered when a note is released.
    ///
    /// Default implementation does nothing (passthrough nodes).
    fn note_off(&mut self) {
        // Default: do nothing
    }

    fn envelope_level(&self) -> Option<f64> {
        None
    }

    /// Check if this node is still producing output.
    ///
    /// Used by voice management to know when a voice can be freed.
    fn is_active(&self) -> bool {
        true
    }
}

/// Allow boxed graph nodes to be used as graph nodes (for dynamic dispatch)
impl GraphNode for Box<dyn GraphNode> {
    fn render_block(&mut self, out: &mut [f32]) {
        (**self).render_block(out)
    }

    fn note_on(&mut self, scale: f64) {
        (**self).note_on(scale)
    }

    fn note_off(&mut self) {
        (**self).note_off()
    }

    fn envelope_level(&self) -> Option<f64> {
        (**self).envelope_level()
    }

    fn is_active(&self) -> bool {
        (**self).is_active()
    }
}
