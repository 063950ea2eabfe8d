//! The combination search engine: bounded backtracking over non-decreasing
//! digit sequences.
//!
//! Given a validated [`ConstraintSet`], [`search`] finds every multiset of
//! digits that sums to each target, groups the results by target sum, and
//! returns them as a [`ResultMapping`]. Candidates are extended in ascending
//! digit order starting from the last placed digit, so only canonically
//! sorted sequences are ever constructed — permutations are deduplicated by
//! the shape of the search tree, not by a post-pass.
//!
//! # Errors
//!
//! The engine raises exactly one error kind, [`InvalidConstraint`]
//! (C001-C009), synchronously before any search begins. Once validation
//! passes the search always terminates and always returns a (possibly empty)
//! mapping; a target with no combinations is a valid non-error outcome.
//!
//! # Examples
//!
//! ```
//! use cagesum::constraints::{Bounds, ConstraintSet};
//! use cagesum::search;
//!
//! // Two distinct digits from 1-9 summing to 3: only 1 + 2.
//! let constraints = ConstraintSet {
//!     sum_range: Bounds::exactly(3),
//!     count_range: Bounds::exactly(2),
//!     ..Default::default()
//! };
//!
//! let mapping = search::search(&constraints)?;
//! let combos = mapping.get(3).unwrap();
//! assert_eq!(1, combos.len());
//! assert_eq!(&[1, 2], combos[0].digits());
//! # Ok::<(), cagesum::constraints::InvalidConstraint>(())
//! ```
//!
//! ## Handling errors with detailed messages
//!
//! ```
//! use cagesum::constraints::{Bounds, ConstraintSet};
//! use cagesum::search;
//!
//! let constraints = ConstraintSet {
//!     sum_range: Bounds::of(10, 5), // inverted
//!     ..Default::default()
//! };
//!
//! match search::search(&constraints) {
//!     Ok(mapping) => println!("{} sums had solutions", mapping.len()),
//!     Err(e) => {
//!         // Show detailed error with code and help
//!         eprintln!("{}", e.display_detailed());
//!         // Error code: C002
//!     }
//! }
//! ```

use crate::combination::Combination;
use crate::constraints::{Bounds, ConstraintSet, InvalidConstraint, DIGIT_DOMAIN};
use log::debug;

/// All combinations found for one target sum, in discovery order
/// (ascending lexicographic by construction).
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct SumGroup {
    pub sum: i32,
    pub combinations: Vec<Combination>,
}

/// The engine's output: one [`SumGroup`] per target sum that produced at
/// least one combination.
///
/// Group order follows the order targets were scanned — ascending for range
/// mode, input order for exact-sums mode. Targets with no combinations get
/// no group, mirroring how the result is rendered.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
#[serde(transparent)]
pub struct ResultMapping {
    groups: Vec<SumGroup>,
}

impl ResultMapping {
    /// The combinations found for `sum`, if any were.
    pub fn get(&self, sum: i32) -> Option<&[Combination]> {
        self.groups
            .iter()
            .find(|g| g.sum == sum)
            .map(|g| g.combinations.as_slice())
    }

    /// Number of sums that produced at least one combination.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Iterate groups in scan order.
    pub fn iter(&self) -> impl Iterator<Item = &SumGroup> {
        self.groups.iter()
    }

    /// Append `combination` to the group for `sum`, creating the group on
    /// first use. A duplicate target in exact-sums mode extends its existing
    /// group rather than opening a second one.
    fn record(&mut self, sum: i32, combination: Combination) {
        match self.groups.iter_mut().find(|g| g.sum == sum) {
            Some(group) => group.combinations.push(combination),
            None => self.groups.push(SumGroup { sum, combinations: vec![combination] }),
        }
    }
}

impl IntoIterator for ResultMapping {
    type Item = SumGroup;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.into_iter()
    }
}

/// Per-digit rule tables, resolved once per [`search`] call.
///
/// Fixed-size arrays indexed by digit value (the domain is 0–9), so the hot
/// loop never touches a map. The flat `max_repeats` cap and the richer
/// `digit_counts` entries are unified here: a `digit_counts` entry overrides
/// the flat cap for that digit only, and must-have digits become a minimum
/// occurrence of 1.
#[derive(Debug)]
struct DigitRules {
    min_occurrences: [i32; DIGIT_DOMAIN],
    max_occurrences: [i32; DIGIT_DOMAIN],
    ignored: [bool; DIGIT_DOMAIN],
    /// Set when a requirement names a digit outside the 0–9 domain; no
    /// sequence can ever satisfy it, so the search is skipped entirely.
    unsatisfiable: bool,
}

/// Map a digit to its table slot, or `None` if it lies outside the domain.
fn domain_slot(digit: i32) -> Option<usize> {
    usize::try_from(digit).ok().filter(|&slot| slot < DIGIT_DOMAIN)
}

impl DigitRules {
    fn resolve(constraints: &ConstraintSet) -> Self {
        let mut rules = DigitRules {
            min_occurrences: [0; DIGIT_DOMAIN],
            max_occurrences: [constraints.max_repeats; DIGIT_DOMAIN],
            ignored: [false; DIGIT_DOMAIN],
            unsatisfiable: false,
        };

        for (&digit, &occ) in &constraints.digit_counts {
            match domain_slot(digit) {
                Some(slot) => {
                    rules.min_occurrences[slot] = occ.min;
                    rules.max_occurrences[slot] = occ.max;
                }
                // A required minimum for an unrepresentable digit can never be met.
                None if occ.min > 0 => rules.unsatisfiable = true,
                None => {}
            }
        }

        for &digit in &constraints.ignored_digits {
            if let Some(slot) = domain_slot(digit) {
                rules.ignored[slot] = true;
            }
        }

        for &digit in &constraints.must_have_digits {
            match domain_slot(digit) {
                Some(slot) => {
                    rules.min_occurrences[slot] = rules.min_occurrences[slot].max(1);
                }
                None => rules.unsatisfiable = true,
            }
        }

        rules
    }

    /// Leaf-only check: every configured per-digit minimum (must-haves
    /// included) is met by the occurrence counters. Cannot be a prune, since
    /// deeper nodes may still add occurrences.
    fn minimums_met(&self, counts: &[i32; DIGIT_DOMAIN]) -> bool {
        counts
            .iter()
            .zip(&self.min_occurrences)
            .all(|(have, need)| have >= need)
    }
}

/// Context shared by every node of one target's search.
struct SearchCtx<'a> {
    count_range: Bounds,
    digit_range: Bounds,
    rules: &'a DigitRules,
}

/// Enumerate every valid combination for every target sum.
///
/// Targets are the elements of `exact_sums` in input order when non-empty,
/// otherwise every integer in `sum_range` ascending; each target is searched
/// independently. The function is pure: no state is retained between calls,
/// and the same constraints always yield the same mapping.
///
/// # Errors
///
/// Returns [`InvalidConstraint`] if the constraint set fails validation.
pub fn search(constraints: &ConstraintSet) -> Result<ResultMapping, InvalidConstraint> {
    constraints.validate()?;

    let rules = DigitRules::resolve(constraints);
    let mut mapping = ResultMapping::default();

    if rules.unsatisfiable {
        debug!("constraints name a digit outside 0-9; nothing can match");
        return Ok(mapping);
    }

    let ctx = SearchCtx {
        count_range: constraints.count_range,
        digit_range: constraints.digit_range,
        rules: &rules,
    };

    let mut sequence = Vec::with_capacity(ctx.count_range.max as usize);
    let mut counts = [0i32; DIGIT_DOMAIN];

    if constraints.exact_sums.is_empty() {
        for target in constraints.sum_range.span() {
            extend(&ctx, target, target, &mut sequence, &mut counts, &mut mapping);
        }
    } else {
        for &target in &constraints.exact_sums {
            extend(&ctx, target, target, &mut sequence, &mut counts, &mut mapping);
        }
    }

    debug!(
        "search over {} produced {} sum group(s)",
        constraints,
        mapping.len()
    );
    Ok(mapping)
}

/// One node of the depth-first search for `target`.
///
/// `sequence` holds the digits placed so far (non-decreasing), `counts` the
/// per-digit occurrence counters kept in lockstep with it. Every push below
/// is mirrored by a pop/decrement after the recursive call returns, so both
/// structures are restored on all exit paths.
fn extend(
    ctx: &SearchCtx<'_>,
    target: i32,
    remaining: i32,
    sequence: &mut Vec<i32>,
    counts: &mut [i32; DIGIT_DOMAIN],
    mapping: &mut ResultMapping,
) {
    // Accept at any node once the sum is exact and every leaf-only condition
    // holds. Extending past this point is pointless: any further digit would
    // drive `remaining` negative (a zero digit cannot follow, since zeros
    // sort first in a non-decreasing sequence).
    if remaining == 0
        && ctx.count_range.contains(sequence.len() as i32)
        && ctx.rules.minimums_met(counts)
    {
        mapping.record(target, Combination::from_digits(sequence.clone()));
        return;
    }

    // Dead branch: overshot the sum or the length.
    if remaining < 0 || sequence.len() as i32 > ctx.count_range.max {
        return;
    }

    // Candidates run from the last placed digit upward, which keeps the
    // sequence non-decreasing.
    let start = sequence.last().copied().unwrap_or(ctx.digit_range.min);
    for digit in start..=ctx.digit_range.max {
        let slot = digit as usize;

        if ctx.rules.ignored[slot] {
            continue; // larger digits may still be legal
        }
        if counts[slot] >= ctx.rules.max_occurrences[slot] {
            continue;
        }
        if remaining - digit < 0 {
            // Digits are ascending, so every later candidate overshoots too.
            break;
        }

        sequence.push(digit);
        counts[slot] += 1;

        extend(ctx, target, remaining - digit, sequence, counts, mapping);

        sequence.pop();
        counts[slot] -= 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraints::OccurrenceRange;

    fn digits_for(mapping: &ResultMapping, sum: i32) -> Vec<Vec<i32>> {
        mapping
            .get(sum)
            .map(|combos| combos.iter().map(|c| c.digits().to_vec()).collect())
            .unwrap_or_default()
    }

    #[test]
    fn single_cell_boundary() {
        let constraints = ConstraintSet {
            sum_range: Bounds::exactly(5),
            count_range: Bounds::exactly(1),
            digit_range: Bounds::exactly(5),
            ..Default::default()
        };
        let mapping = search(&constraints).unwrap();
        assert_eq!(vec![vec![5]], digits_for(&mapping, 5));
        assert_eq!(1, mapping.len());
    }

    #[test]
    fn distinct_pair_summing_to_three() {
        let constraints = ConstraintSet {
            sum_range: Bounds::exactly(3),
            count_range: Bounds::exactly(2),
            ..Default::default()
        };
        let mapping = search(&constraints).unwrap();
        assert_eq!(vec![vec![1, 2]], digits_for(&mapping, 3));
    }

    #[test]
    fn exact_sums_pairs_with_repeats_allowed() {
        let constraints = ConstraintSet {
            exact_sums: vec![10],
            count_range: Bounds::exactly(2),
            max_repeats: 2,
            ..Default::default()
        };
        let mapping = search(&constraints).unwrap();
        // Ascending first-digit order, each pair exactly once.
        assert_eq!(
            vec![vec![1, 9], vec![2, 8], vec![3, 7], vec![4, 6], vec![5, 5]],
            digits_for(&mapping, 10)
        );
    }

    #[test]
    fn digit_count_minimum_is_a_leaf_check() {
        let mut constraints = ConstraintSet {
            exact_sums: vec![2],
            count_range: Bounds::exactly(2),
            ..Default::default()
        };
        constraints.digit_counts.insert(1, OccurrenceRange::exactly(2));
        let mapping = search(&constraints).unwrap();
        assert_eq!(vec![vec![1, 1]], digits_for(&mapping, 2));
    }

    #[test]
    fn digit_count_cap_overrides_flat_cap_for_that_digit_only() {
        // max_repeats=1 would forbid [2,2]; the digit_counts entry lifts the
        // cap for digit 2 but leaves every other digit all-unique.
        let mut constraints = ConstraintSet {
            exact_sums: vec![4],
            count_range: Bounds::of(2, 2),
            ..Default::default()
        };
        constraints.digit_counts.insert(2, OccurrenceRange::at_most(2));
        let mapping = search(&constraints).unwrap();
        assert_eq!(vec![vec![1, 3], vec![2, 2]], digits_for(&mapping, 4));
    }

    #[test]
    fn ignored_digits_never_appear() {
        let mut constraints = ConstraintSet {
            sum_range: Bounds::exactly(10),
            count_range: Bounds::of(2, 2),
            ..Default::default()
        };
        constraints.ignored_digits.insert(4);
        let mapping = search(&constraints).unwrap();
        // [4,6] drops out; [1,9], [2,8], [3,7] remain.
        assert_eq!(
            vec![vec![1, 9], vec![2, 8], vec![3, 7]],
            digits_for(&mapping, 10)
        );
    }

    #[test]
    fn must_have_digit_filters_results() {
        let mut constraints = ConstraintSet {
            sum_range: Bounds::exactly(10),
            count_range: Bounds::of(2, 2),
            ..Default::default()
        };
        constraints.must_have_digits.insert(9);
        let mapping = search(&constraints).unwrap();
        assert_eq!(vec![vec![1, 9]], digits_for(&mapping, 10));
    }

    #[test]
    fn range_mode_scans_every_sum_ascending() {
        let constraints = ConstraintSet {
            sum_range: Bounds::of(3, 5),
            count_range: Bounds::exactly(2),
            ..Default::default()
        };
        let mapping = search(&constraints).unwrap();
        let sums: Vec<i32> = mapping.iter().map(|g| g.sum).collect();
        assert_eq!(vec![3, 4, 5], sums);
        assert_eq!(vec![vec![1, 2]], digits_for(&mapping, 3));
        assert_eq!(vec![vec![1, 3]], digits_for(&mapping, 4));
        assert_eq!(vec![vec![1, 4], vec![2, 3]], digits_for(&mapping, 5));
    }

    #[test]
    fn exact_sums_preserve_input_order() {
        let constraints = ConstraintSet {
            exact_sums: vec![12, 3],
            count_range: Bounds::exactly(2),
            ..Default::default()
        };
        let mapping = search(&constraints).unwrap();
        let sums: Vec<i32> = mapping.iter().map(|g| g.sum).collect();
        assert_eq!(vec![12, 3], sums);
    }

    #[test]
    fn unreachable_sum_gets_no_group() {
        let constraints = ConstraintSet {
            sum_range: Bounds::of(1, 2),
            count_range: Bounds::exactly(2),
            ..Default::default()
        };
        // Two distinct digits from 1-9 sum to at least 3.
        let mapping = search(&constraints).unwrap();
        assert!(mapping.is_empty());
        assert!(mapping.get(1).is_none());
    }

    #[test]
    fn zero_digit_participates_when_allowed() {
        let constraints = ConstraintSet {
            exact_sums: vec![5],
            count_range: Bounds::of(2, 2),
            digit_range: Bounds::of(0, 9),
            ..Default::default()
        };
        let mapping = search(&constraints).unwrap();
        assert_eq!(
            vec![vec![0, 5], vec![1, 4], vec![2, 3]],
            digits_for(&mapping, 5)
        );
    }

    #[test]
    fn out_of_domain_must_have_yields_empty_mapping() {
        let mut constraints = ConstraintSet {
            sum_range: Bounds::exactly(5),
            ..Default::default()
        };
        constraints.must_have_digits.insert(12);
        // Impossible requirement, but not a constraint-shape error.
        let mapping = search(&constraints).unwrap();
        assert!(mapping.is_empty());
    }

    #[test]
    fn search_is_idempotent() {
        let mut constraints = ConstraintSet {
            sum_range: Bounds::of(5, 15),
            count_range: Bounds::of(2, 4),
            max_repeats: 2,
            ..Default::default()
        };
        constraints.ignored_digits.insert(7);
        let first = search(&constraints).unwrap();
        let second = search(&constraints).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn invalid_constraints_fail_before_searching() {
        let constraints = ConstraintSet {
            sum_range: Bounds::of(10, 5),
            ..Default::default()
        };
        assert_eq!(
            InvalidConstraint::InvertedSumRange { min: 10, max: 5 },
            search(&constraints).unwrap_err()
        );
    }

    /// Every structural invariant, checked across a broad scan.
    #[test]
    fn all_results_satisfy_the_constraints() {
        let mut constraints = ConstraintSet {
            sum_range: Bounds::of(0, 25),
            count_range: Bounds::of(2, 4),
            digit_range: Bounds::of(1, 9),
            max_repeats: 2,
            ..Default::default()
        };
        constraints.ignored_digits.insert(4);
        constraints.must_have_digits.insert(2);
        constraints.digit_counts.insert(9, OccurrenceRange::at_most(1));

        let mapping = search(&constraints).unwrap();
        assert!(!mapping.is_empty());

        for group in mapping.iter() {
            let mut seen: Vec<&[i32]> = Vec::new();
            for combo in &group.combinations {
                assert_eq!(group.sum, combo.sum());
                assert!(constraints.count_range.contains(combo.len() as i32));
                assert!(combo.digits().windows(2).all(|w| w[0] <= w[1]));
                assert!(combo.digits().iter().all(|&d| constraints.digit_range.contains(d)));
                assert!(!combo.digits().contains(&4));
                assert!(combo.digits().contains(&2));
                assert!(combo.digits().iter().filter(|&&d| d == 9).count() <= 1);
                assert!(combo.digits().iter().all(|&d| {
                    combo.digits().iter().filter(|&&x| x == d).count() <= 2
                }));
                // Canonical form makes multiset duplicates sequence duplicates.
                assert!(!seen.contains(&combo.digits()), "duplicate multiset in group");
                seen.push(combo.digits());
            }
        }
    }
}
