//! Vote tallies over integer labels

use smallvec::SmallVec;

use crate::errors::PixelCloudResult;
use serde::{Deserialize, Serialize};

/// Counts how many times each label was offered. Backed by a small vector,
/// a K sized neighborhood rarely sees more than a handful of classes.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct LabelTally {
    items: SmallVec<[(i64, usize); 4]>,
}

impl LabelTally {
    /// Offers one label to the tally.
    pub fn add(&mut self, label: i64) {
        for (stored_label, votes) in self.items.iter_mut() {
            if label == *stored_label {
                *votes += 1;
                return;
            }
        }
        self.items.push((label, 1));
    }

    /// Merges another tally in, label by label.
    pub fn combine(&mut self, other: &LabelTally) {
        for (label, votes) in other.items.iter() {
            let mut merged = false;
            for (stored_label, stored_votes) in self.items.iter_mut() {
                if label == stored_label {
                    *stored_votes += votes;
                    merged = true;
                    break;
                }
            }
            if !merged {
                self.items.push((*label, *votes));
            }
        }
    }

    /// How many labels have been offered in total
    pub fn count(&self) -> usize {
        self.items.iter().map(|(_label, votes)| votes).sum()
    }

    /// The label holding the majority. Equal vote counts resolve to the
    /// smaller label value, so the winner never depends on insertion order.
    pub fn dominant(&self) -> Option<i64> {
        let mut best: Option<(i64, usize)> = None;
        for (label, votes) in self.items.iter() {
            best = match best {
                None => Some((*label, *votes)),
                Some((best_label, best_votes)) => {
                    if *votes > best_votes || (*votes == best_votes && *label < best_label) {
                        Some((*label, *votes))
                    } else {
                        Some((best_label, best_votes))
                    }
                }
            };
        }
        best.map(|(label, _votes)| label)
    }
}

/// A tally plus a record of how many of the offered images carried no label
/// or errored out on access.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct TallyCounter {
    /// The votes that actually landed
    pub tally: LabelTally,
    /// How many offered images were unlabeled
    pub nones: usize,
    /// How many offered images errored out
    pub errors: usize,
}

impl TallyCounter {
    /// Routes one label lookup into the right bucket.
    pub fn add(&mut self, v: PixelCloudResult<Option<i64>>) {
        match v {
            Ok(Some(label)) => self.tally.add(label),
            Ok(None) => self.nones += 1,
            Err(_) => self.errors += 1,
        }
    }

    /// Merges the underlying tallies, and the nones/errors
    pub fn combine(&mut self, other: &TallyCounter) {
        self.tally.combine(&other.tally);
        self.nones += other.nones;
        self.errors += other.errors;
    }

    /// a reference to the underlying tally
    pub fn tally(&self) -> &LabelTally {
        &self.tally
    }

    /// the number of images this covers, labeled or not
    pub fn count(&self) -> usize {
        self.tally.count() + self.nones + self.errors
    }

    /// how many unlabeled images snuck thru
    pub fn nones(&self) -> usize {
        self.nones
    }

    /// how many label lookups errored out
    pub fn errors(&self) -> usize {
        self.errors
    }
}
