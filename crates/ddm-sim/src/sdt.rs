//! The delayed signal-detection judgment.

use crate::walk::Boundary;

/// Classify the delayed response from a trial's evidence value.
///
/// Upper-boundary trials are judged against `crit[0]`, lower-boundary trials
/// against `crit[1]`; the response is positive when the evidence strictly
/// exceeds the matching criterion.  Stateless — the judgment reuses the
/// drift rate the walk ran with, it never re-samples.
#[inline]
pub fn delayed_response(boundary: Boundary, evidence: f64, crit: [f64; 2]) -> bool {
    match boundary {
        Boundary::Upper => evidence > crit[0],
        Boundary::Lower => evidence > crit[1],
    }
}
