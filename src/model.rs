use crate::error::{Result, SvntlError};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const SCHEMA_VERSION: u32 = 1;

/// One revision of the repository with its reconstructed total line count.
///
/// `loc` is signed on purpose: a malformed diff can drive the running total
/// below zero and the value is passed through uncorrected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Revision {
    pub number: u64,
    pub loc: i64,
    pub date: Option<NaiveDate>,
}

impl Revision {
    pub fn new(number: u64, date: Option<NaiveDate>) -> Self {
        Self {
            number,
            loc: 0,
            date,
        }
    }
}

/// Ordered collection of revisions, ascending by number.
///
/// Every store starts with the synthetic revision 0 at zero LOC. It anchors
/// the first diff and is a valid lookup target, but it never counts as a
/// real revision.
#[derive(Debug, Clone)]
pub struct RevisionStore {
    revisions: Vec<Revision>,
}

impl RevisionStore {
    pub fn new() -> Self {
        Self {
            revisions: vec![Revision::new(0, None)],
        }
    }

    /// Build a store from already-computed revisions. The baseline is
    /// inserted if missing and the result is sorted ascending by number.
    pub fn from_revisions(mut revisions: Vec<Revision>) -> Self {
        if !revisions.iter().any(|r| r.number == 0) {
            revisions.push(Revision::new(0, None));
        }
        revisions.sort_by_key(|r| r.number);
        revisions.dedup_by_key(|r| r.number);
        Self { revisions }
    }

    /// Number of real revisions, excluding the baseline.
    pub fn revision_count(&self) -> usize {
        self.revisions.len() - 1
    }

    pub fn find(&self, number: u64) -> Result<&Revision> {
        self.revisions
            .binary_search_by_key(&number, |r| r.number)
            .map(|idx| &self.revisions[idx])
            .map_err(|_| SvntlError::NoSuchRevision(number))
    }

    /// All revisions including the baseline, ascending.
    pub fn all(&self) -> &[Revision] {
        &self.revisions
    }

    /// Real revisions only, ascending.
    pub fn real_revisions(&self) -> &[Revision] {
        &self.revisions[1..]
    }

    /// View with the longest zero-LOC prefix removed, so charts do not start
    /// with a flat line at zero. The baseline always falls into the trimmed
    /// prefix; an all-zero history yields an empty slice.
    pub fn without_leading_zero_loc(&self) -> &[Revision] {
        match self.revisions.iter().position(|r| r.loc != 0) {
            Some(first) => &self.revisions[first..],
            None => &[],
        }
    }

    /// LOC at end of each commit day. When several revisions share a date
    /// the one with the highest number wins.
    pub fn by_day(&self) -> BTreeMap<NaiveDate, i64> {
        let mut days = BTreeMap::new();
        for rev in self.real_revisions() {
            if let Some(date) = rev.date {
                days.insert(date, rev.loc);
            }
        }
        days
    }
}

impl Default for RevisionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitPoint {
    pub revision: u64,
    pub loc: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayPoint {
    pub date: NaiveDate,
    pub loc: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub url: String,
    pub revision_count: usize,
    pub per_commit: Vec<CommitPoint>,
    pub per_day: Vec<DayPoint>,
}
