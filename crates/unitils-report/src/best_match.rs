//! Plausible pairings for unordered collections that did not match.
//!
//! An [`UnorderedCollectionDifference`] holds the difference of every left
//! element with every right element. To show something readable, exact
//! matches are set aside and each remaining left element is paired with the
//! right element it differs from the least. The pairing is greedy per left
//! element; two left elements may pick the same right one.

use unitils_compare::{Difference, UnorderedCollectionDifference};

/// Score of a leaf whose sides have different runtime types.
const TYPE_MISMATCH_SCORE: usize = 5;

/// The closest right element for one left element.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BestMatch<'d> {
    /// Index of the expected element.
    pub left: usize,
    /// Index of the closest actual element.
    pub right: usize,
    /// How far apart the two are; lower is closer.
    pub score: usize,
    /// The difference between the two, from the matrix.
    pub difference: &'d Difference,
}

/// Finds the best matches of an unordered collection difference.
#[derive(Clone, Copy, Debug, Default)]
pub struct BestMatchFinder;

impl BestMatchFinder {
    pub fn new() -> Self {
        Self
    }

    /// Best matches in ascending left index.
    ///
    /// Left elements that matched some right element exactly are omitted, as
    /// are left elements with no candidate left. Among candidates with the
    /// same score the lowest right index wins.
    pub fn best_matches<'d>(&self, difference: &'d UnorderedCollectionDifference) -> Vec<BestMatch<'d>> {
        let (left_matched, right_matched) = exact_matches(difference);

        let mut matches = Vec::new();
        for (left, row) in difference.matrix.iter().enumerate() {
            if left_matched[left] {
                continue;
            }
            let mut best: Option<BestMatch<'d>> = None;
            for (right, cell) in row.iter().enumerate() {
                if right_matched.get(right).copied().unwrap_or(true) {
                    continue;
                }
                let Some(candidate) = cell else {
                    continue;
                };
                let score = self.score(candidate);
                if best.map_or(true, |b| score < b.score) {
                    best = Some(BestMatch {
                        left,
                        right,
                        score,
                        difference: candidate,
                    });
                }
            }
            matches.extend(best);
        }
        matches
    }

    /// How far apart the two sides of `difference` are. Lower is closer.
    pub fn score(&self, difference: &Difference) -> usize {
        match difference {
            Difference::Leaf(detail) => {
                if detail.left.differs_in_type(&detail.right) {
                    TYPE_MISMATCH_SCORE
                } else {
                    1
                }
            }
            Difference::Object(d) => d.fields.len(),
            Difference::Collection(d) => d.elements.len(),
            Difference::Map(d) => d.entries.len(),
            Difference::Unordered(d) => self.best_matches(d).iter().map(|m| m.score).sum(),
        }
    }
}

/// Which left and right indices take part in at least one exact match.
fn exact_matches(difference: &UnorderedCollectionDifference) -> (Vec<bool>, Vec<bool>) {
    let mut left = vec![false; difference.left_len()];
    let mut right = vec![false; difference.right_len()];
    for (i, row) in difference.matrix.iter().enumerate() {
        for (j, cell) in row.iter().enumerate() {
            if cell.is_none() {
                left[i] = true;
                if let Some(slot) = right.get_mut(j) {
                    *slot = true;
                }
            }
        }
    }
    (left, right)
}
