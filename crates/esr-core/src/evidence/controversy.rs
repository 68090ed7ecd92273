//! Controversy detection
//!
//! Flags evidence whose sources disagree sharply in their own ratings.
//! Only the spread of per-source levels is considered; contradictions in
//! findings are not analysed.

use super::types::{live_sources, Controversy, EvidenceSource};

/// Minimum spread between the best and worst rated source
pub const CONTROVERSY_SPREAD: u8 = 3;

pub const CONTROVERSY_REASON: &str = "Studies show widely varying quality and conclusions. Some high-quality evidence conflicts with lower-quality studies.";

/// Detect controversy among the non-retracted sources
pub fn detect_controversy(sources: &[EvidenceSource]) -> Controversy {
    let live = live_sources(sources);
    if live.len() < 2 {
        return Controversy::none();
    }

    let levels = live.iter().map(|s| s.evidence_level.value());
    let (min, max) = levels.fold((u8::MAX, u8::MIN), |(lo, hi), l| (lo.min(l), hi.max(l)));

    if max - min >= CONTROVERSY_SPREAD {
        Controversy::flagged(CONTROVERSY_REASON)
    } else {
        Controversy::none()
    }
}
