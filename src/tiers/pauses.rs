use crate::models::Tier;

/// Index of the first interval after `index` that is a silence marker at
/// least `min_duration` long.
///
/// Non-pause intervals and pauses shorter than the threshold are walked
/// over, so micro-hesitations never terminate a chunk. When no qualifying
/// pause exists before the end of the tier, degrades to the last index.
pub fn next_qualifying_pause(tier: &Tier, index: usize, min_duration: f64) -> usize {
    let intervals = tier.intervals();
    if intervals.is_empty() {
        return 0;
    }
    let last = intervals.len() - 1;

    let mut current = index;
    while current < last {
        let candidate = &intervals[current + 1];
        if candidate.is_silence() && candidate.duration() >= min_duration {
            return current + 1;
        }
        current += 1;
    }
    last
}

/// Mirror of [`next_qualifying_pause`], scanning backward; degrades to
/// index 0 when no qualifying pause precedes `index`.
pub fn previous_qualifying_pause(tier: &Tier, index: usize, min_duration: f64) -> usize {
    let intervals = tier.intervals();
    if intervals.is_empty() {
        return 0;
    }

    let mut current = index.min(intervals.len() - 1);
    while current > 0 {
        let candidate = &intervals[current - 1];
        if candidate.is_silence() && candidate.duration() >= min_duration {
            return current - 1;
        }
        current -= 1;
    }
    0
}

/// Index of the last interval in the contiguous silence/noise run starting
/// at `index`, or `index` itself when the following interval is speech.
pub fn silence_streak_end(tier: &Tier, index: usize) -> usize {
    let intervals = tier.intervals();
    if intervals.is_empty() {
        return index;
    }
    let last = intervals.len() - 1;

    let mut current = index;
    while current < last && intervals[current + 1].is_pause_like() {
        current += 1;
    }
    current
}
