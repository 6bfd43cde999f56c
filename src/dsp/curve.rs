/*
Tension Curve Coefficients
==========================

Every envelope segment in this crate is driven by the same one-pole
recurrence:

    value[n] = b + c * value[n-1]

which traces an exponential toward the fixed point b / (1 - c). Picking
(b, c) well lets a single multiply-add per sample produce anything from a
near-straight ramp to a sharply bowed curve, and `solve` is where that
choice happens.

Vocabulary
----------

  segment     One envelope stage: attack, decay, or release. Each has a
              start level, an end level, and a length in samples.

  span        The amplitude distance the segment covers. Keeps the curve's
              warp proportional to how far the segment actually travels.

  tension     User-facing curve control in [-1, 1]. Zero is (near) linear,
              positive bows the curve so it starts slowly, negative so it
              starts quickly.

  warp        The cubed tension term `t`. Acts as a virtual offset pushed
              beyond the segment's endpoints: the recurrence aims at a
              fixed point outside the visible range, and the segment rides
              the steep (or shallow) part of that exponential.


The Two Branches
----------------

Normalized tension above 1 selects the slow-start shape:

    t = (tension - 1)^3
    c = exp( ln((span + t) / t) / length )        // c > 1, divergent
    b = (start - direction * t) * (1 - c)

Normalized tension at or below 1 selects the fast-start shape:

    t = tension^3
    c = exp( -ln((span + t) / t) / length )       // c < 1, convergent
    b = (end + direction * t) * (1 - c)

Both branches are built so that a segment launched from its nominal start
level lands exactly on its end level after `length` samples: the log term
is chosen to make c^length equal the ratio between warp and warp-plus-span.

Small `t` means a violently curved segment (the fixed point sits just past
an endpoint); large `t` means a gentle one. Zero user tension maps to the
sentinel 100, whose warp t = 99^3 is so large that c is indistinguishable
from 1 over any audible segment length - the recurrence walks an almost
perfectly straight line. That near-linear approximation is the reference
behavior; do not replace it with a literal linear ramp.
*/

/// Normalized tension produced by a zero user tension. Large enough that the
/// resulting curve is flat to within floating-point noise.
pub(crate) const LINEAR_TENSION: f64 = 100.0;

/// Map user tension in [-1, 1] into the solver's two-branch domain.
///
/// The mapping skips over 1.0 itself, which would zero the warp term and
/// blow up the log in `solve`.
#[inline]
pub fn normalize_tension(tension: f64) -> f64 {
    let u = tension + 1.0;
    if u == 1.0 {
        LINEAR_TENSION
    } else if u > 1.0 {
        3.001 - u
    } else {
        0.001 + u
    }
}

/// Derive the one-pole coefficients `(b, c)` for one envelope segment.
///
/// * `start`, `end` - nominal segment endpoints, in output units.
/// * `span` - amplitude distance covered; must be nonzero for the warp to
///   bite (a zero span degenerates to a flat segment).
/// * `length` - segment length in samples, >= 1.
/// * `tension` - normalized tension from [`normalize_tension`].
/// * `direction` - +1.0 for a rising segment, -1.0 for a falling one.
///   Flips which side of the segment the virtual fixed point sits on.
#[inline]
pub fn solve(
    start: f64,
    end: f64,
    span: f64,
    length: f64,
    tension: f64,
    direction: f64,
) -> (f64, f64) {
    if tension > 1.0 {
        // Slow start: c > 1, value accelerates away from a fixed point
        // parked `t` below (rising) or above (falling) the start level.
        let t = (tension - 1.0).powi(3);
        let c = (((span + t) / t).ln() / length).exp();
        let b = (start - direction * t) * (1.0 - c);
        (b, c)
    } else {
        // Fast start: c < 1, value converges toward a fixed point parked
        // `t` beyond the end level, so the early samples move quickest.
        let t = tension.powi(3);
        let c = (-((span + t) / t).ln() / length).exp();
        let b = (end + direction * t) * (1.0 - c);
        (b, c)
    }
}
