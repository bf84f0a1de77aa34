use crate::model::{CommitPoint, DayPoint, Revision};
use std::collections::BTreeMap;

/// Label caps for the two chart axes. Charts get unreadable past these.
pub const PER_COMMIT_LABELS: usize = 20;
pub const PER_DAY_LABELS: usize = 10;

/// LOC per revision, one point per commit in number order.
pub fn per_commit(revisions: &[Revision]) -> Vec<CommitPoint> {
    revisions
        .iter()
        .map(|rev| CommitPoint {
            revision: rev.number,
            loc: rev.loc,
        })
        .collect()
}

/// LOC per calendar day from the first to the last commit date inclusive.
///
/// Days without a commit carry the previous day's value forward. When
/// several revisions land on one day the highest-numbered wins. Revisions
/// without a date cannot be bucketed and are skipped.
pub fn per_day(revisions: &[Revision]) -> Vec<DayPoint> {
    let mut by_day = BTreeMap::new();
    for rev in revisions {
        if let Some(date) = rev.date {
            by_day.insert(date, rev.loc);
        }
    }

    let (Some((&first, _)), Some((&last, _))) =
        (by_day.first_key_value(), by_day.last_key_value())
    else {
        return Vec::new();
    };

    let mut series = Vec::new();
    let mut loc = 0;
    let mut date = first;
    while date <= last {
        if let Some(&committed) = by_day.get(&date) {
            loc = committed;
        }
        series.push(DayPoint { date, loc });
        date = match date.succ_opt() {
            Some(next) => next,
            None => break,
        };
    }
    series
}

/// Indexes of the points that get an axis label: every `ceil(len/max)`-th
/// one, starting at index 0. Never selects more than `max`.
pub fn label_indexes(len: usize, max: usize) -> Vec<usize> {
    if len == 0 || max == 0 {
        return Vec::new();
    }
    let jump = len.div_ceil(max);
    (0..len).step_by(jump).collect()
}
