#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{dsp::curve, MIN_STAGE_MS};

/*
Tension ADSR Envelope
=====================

This module implements an ADSR envelope generator whose three moving stages
(attack, decay, release) each carry a continuously adjustable curve-shape
control called tension.

Vocabulary
----------

  value       The envelope's current output, 0.0 up to `scale`. Multiplies
              the audio signal to shape its amplitude over time, or feeds
              any other modulatable parameter.

  stage       Which phase of the envelope we're in: Idle, Attack, Decay,
              Sustain, or Release. A state machine governs transitions.

  scale       Peak amplitude for the current note, fixed at note-on time.
              Typically velocity-derived, in [0, 1].

  tension     Per-stage curve control in [-1, 1]. Zero gives a near-linear
              segment, positive a slow start, negative a fast start.

  (b, c)      Per-stage coefficients of the recurrence
              value[n] = b + c * value[n-1]. Solved once at trigger time
              by `dsp::curve::solve`, then applied once per sample.


The Shape
---------

  Level
  scale ┐     ╱╲
        │    ╱  ╲___________
    S   │   ╱               ╲
        │  ╱                 ╲
    0.0 └─╱───────────────────╲──→ Time
        Attack Decay  Sustain  Release
         (A)   (D)      (S)      (R)

Unlike a fixed linear or fixed exponential envelope, every sloped segment
here can be bowed smoothly between "slow start" and "fast start" by its
tension setting, with the zero setting numerically indistinguishable from
a straight line.


The State Machine
-----------------

  note_on:   any stage -> Attack. The recurrence keeps running from the
             current value, so retriggering a sounding note produces a
             legato re-attack instead of a click back to zero.

  note_off:  any stage -> Release. The release curve is solved from the
             current amplitude, so releasing mid-attack falls smoothly
             from wherever the envelope actually is.

  tick:      Attack reaches `scale`     -> Decay
             Decay reaches sustain      -> Sustain
             Release reaches zero       -> Idle

At every threshold crossing the value snaps to the exact boundary level.
Without the snap, floating-point drift accumulated over a long stage would
leak into the next stage's starting point.


Parameter Handling
------------------

Stage times arrive in milliseconds and are floored to 1 ms before being
converted to samples. Sustain arrives in decibels, clamped to <= 0 dB and
converted to linear gain. `configure` only performs these conversions; the
(b, c) pairs are solved lazily at the next trigger, so changing parameters
mid-note never distorts a stage already in progress.

State and coefficients are f64. The zero-tension sentinel pushes `c` to
within ~1e-11 of 1.0 on second-long stages, which f32 rounds to exactly
1.0, freezing the ramp.
*/

/// The current stage of the envelope state machine.
///
/// Discriminants are the stage identifiers exposed to hosts. The
/// power-of-two-looking values are plain ids, not bit flags.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Stage {
    Idle = 0,    // Inactive; value holds (0 after a completed release)
    Attack = 1,  // Rising toward scale
    Decay = 2,   // Falling toward sustain level
    Sustain = 4, // Holding until note_off
    Release = 8, // Falling toward zero
}

impl Stage {
    /// Raw stage identifier, for callers that branch on the numeric id.
    #[inline]
    pub fn id(self) -> u8 {
        self as u8
    }
}

/// User-facing envelope parameters.
///
/// Times are milliseconds (floored to 1 ms), sustain is decibels
/// (clamped to <= 0 dB), tensions are curve controls in [-1, 1].
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnvelopeParams {
    pub attack_ms: f64,
    pub decay_ms: f64,
    pub sustain_db: f64,
    pub release_ms: f64,
    pub tension_attack: f64,
    pub tension_decay: f64,
    pub tension_release: f64,
}

impl Default for EnvelopeParams {
    fn default() -> Self {
        Self {
            attack_ms: 10.0,
            decay_ms: 100.0,
            sustain_db: -6.0,
            release_ms: 300.0,
            tension_attack: 0.0,
            tension_decay: 0.0,
            tension_release: 0.0,
        }
    }
}

/// Per-voice ADSR envelope generator with per-stage tension.
///
/// One instance per synthesizer voice, owned by exactly one thread of
/// control at a time. All operations are in-place arithmetic with no
/// allocation.
pub struct Envelope {
    sample_rate: f64,

    // Runtime state
    stage: Stage,
    value: f64,
    scale: f64,

    // Derived parameters (updated by `configure`)
    attack_samples: f64,
    decay_samples: f64,
    release_samples: f64,
    sustain_level: f64,
    tension_attack: f64,
    tension_decay: f64,
    tension_release: f64,

    // Stage coefficients (solved at trigger time)
    attack_b: f64,
    attack_c: f64,
    decay_b: f64,
    decay_c: f64,
    release_b: f64,
    release_c: f64,
}

impl Envelope {
    /// Create an idle envelope with default parameters.
    ///
    /// The sample rate is fixed for the life of the voice.
    pub fn new(sample_rate: f64) -> Self {
        Self::with_params(sample_rate, EnvelopeParams::default())
    }

    /// Create an idle envelope from explicit parameters.
    pub fn with_params(sample_rate: f64, params: EnvelopeParams) -> Self {
        let mut env = Self {
            sample_rate,
            stage: Stage::Idle,
            value: 0.0,
            scale: 0.0,
            attack_samples: 1.0,
            decay_samples: 1.0,
            release_samples: 1.0,
            sustain_level: 1.0,
            tension_attack: curve::LINEAR_TENSION,
            tension_decay: curve::LINEAR_TENSION,
            tension_release: curve::LINEAR_TENSION,
            attack_b: 0.0,
            attack_c: 0.0,
            decay_b: 0.0,
            decay_c: 0.0,
            release_b: 0.0,
            release_c: 0.0,
        };
        env.configure(&params);
        env
    }

    /// Zero-tension convenience constructor.
    pub fn adsr(
        sample_rate: f64,
        attack_ms: f64,
        decay_ms: f64,
        sustain_db: f64,
        release_ms: f64,
    ) -> Self {
        Self::with_params(
            sample_rate,
            EnvelopeParams {
                attack_ms,
                decay_ms,
                sustain_db,
                release_ms,
                ..EnvelopeParams::default()
            },
        )
    }

    /// Apply new parameters.
    ///
    /// Only derived values are updated here; stage coefficients are solved
    /// at the next trigger, so a stage already in progress keeps its shape.
    /// Calling this repeatedly with the same parameters leaves `value` and
    /// `stage` untouched.
    pub fn configure(&mut self, params: &EnvelopeParams) {
        self.attack_samples = params.attack_ms.max(MIN_STAGE_MS) * 0.001 * self.sample_rate;
        self.decay_samples = params.decay_ms.max(MIN_STAGE_MS) * 0.001 * self.sample_rate;
        self.release_samples = params.release_ms.max(MIN_STAGE_MS) * 0.001 * self.sample_rate;
        self.sustain_level = 10f64.powf(params.sustain_db.min(0.0) / 20.0);

        // Decay and release run downward, so their user tension flips sign
        // to keep positive tension meaning "slow start" in both directions.
        self.tension_attack = curve::normalize_tension(params.tension_attack);
        self.tension_decay = curve::normalize_tension(-params.tension_decay);
        self.tension_release = curve::normalize_tension(-params.tension_release);
    }

    /// Note-on: start the attack stage at the given peak amplitude.
    ///
    /// Solves the attack and decay coefficients for this note. The
    /// recurrence continues from the current value, so retriggering a
    /// sounding voice re-attacks legato instead of resetting to zero.
    pub fn note_on(&mut self, scale: f64) {
        self.scale = scale;

        let (b, c) = curve::solve(0.0, scale, scale, self.attack_samples, self.tension_attack, 1.0);
        self.attack_b = b;
        self.attack_c = c;

        let sustain = self.sustain_level * scale;
        let (b, c) = curve::solve(
            scale,
            sustain,
            scale - sustain,
            self.decay_samples,
            self.tension_decay,
            -1.0,
        );
        self.decay_b = b;
        self.decay_c = c;

        self.stage = Stage::Attack;
    }

    /// Note-off: start the release stage from the current amplitude.
    ///
    /// Valid in any stage. The release curve is anchored at the louder of
    /// the current value and the sustain level, so releasing mid-attack or
    /// mid-decay falls smoothly from where the envelope actually is.
    pub fn note_off(&mut self) {
        let baseline = self.value.max(self.sustain_level) * self.scale;

        let (b, c) = curve::solve(
            baseline,
            0.0,
            baseline,
            self.release_samples,
            self.tension_release,
            -1.0,
        );
        self.release_b = b;
        self.release_c = c;

        self.stage = Stage::Release;
    }

    /// Advance the envelope by one sample and return the resulting stage.
    ///
    /// Read the output separately via [`level`](Self::level). The value
    /// snaps to the exact boundary at each threshold crossing so
    /// floating-point drift never leaks into the next stage.
    pub fn next_sample(&mut self) -> Stage {
        match self.stage {
            Stage::Attack => {
                self.value = self.attack_b + self.value * self.attack_c;
                if self.value >= self.scale {
                    self.value = self.scale;
                    self.stage = Stage::Decay;
                }
            }

            Stage::Decay => {
                self.value = self.decay_b + self.value * self.decay_c;
                let floor = self.sustain_level * self.scale;
                if self.value <= floor {
                    self.value = floor;
                    self.stage = Stage::Sustain;
                }
            }

            Stage::Release => {
                self.value = self.release_b + self.value * self.release_c;
                if self.value <= 0.0 {
                    self.value = 0.0;
                    self.stage = Stage::Idle;
                }
            }

            // Holding stages: value is retained untouched.
            Stage::Sustain | Stage::Idle => {}
        }

        debug_assert!(
            self.value >= 0.0 && self.value <= self.scale,
            "envelope value {} escaped [0, {}]",
            self.value,
            self.scale
        );

        self.stage
    }

    /// Render a block of envelope values into the buffer.
    pub fn render(&mut self, out: &mut [f32]) {
        for sample in out.iter_mut() {
            self.next_sample();
            *sample = self.value as f32;
        }
    }

    /// Force the envelope back to idle (voice steal/reuse).
    pub fn reset(&mut self) {
        self.value = 0.0;
        self.stage = Stage::Idle;
    }

    /// Current envelope output, 0.0 to `scale`.
    #[inline]
    pub fn level(&self) -> f64 {
        self.value
    }

    /// Current stage of the state machine.
    #[inline]
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Returns true while the envelope is producing output (not idle).
    ///
    /// Used by voice management to know when a voice can be freed.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.stage != Stage::Idle
    }
}
