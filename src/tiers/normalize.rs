use crate::models::{Interval, SILENCE_LABEL, Tier};
use crate::tiers::silence_streak_end;

/// Collapse every run of consecutive silence/noise intervals into a single
/// silence interval spanning the whole run.
///
/// All other intervals are copied through unchanged, so the cleaned tier
/// keeps the input's ordering, total span, and gap-free layout. Cleaning the
/// phone and word tiers independently can leave their boundaries divergent;
/// cross-tier correspondence has to be re-derived by time lookup, never by
/// index.
pub fn clean_tier(tier: &Tier) -> Tier {
    let intervals = tier.intervals();
    let mut cleaned: Vec<Interval> = Vec::with_capacity(intervals.len());

    let mut index = 0;
    while index < intervals.len() {
        let interval = &intervals[index];
        if interval.is_pause_like() {
            let run_end = silence_streak_end(tier, index);
            cleaned.push(Interval {
                label: SILENCE_LABEL.to_string(),
                start: interval.start,
                end: intervals[run_end].end,
            });
            index = run_end + 1;
        } else {
            cleaned.push(interval.clone());
            index += 1;
        }
    }

    Tier::from_ordered(cleaned)
}
