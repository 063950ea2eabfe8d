// constraints.rs
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::fmt::Display;
use std::ops::RangeInclusive;

/// Number of representable digit values (0–9). Occurrence tables throughout
/// the engine are fixed-size arrays indexed by digit value.
pub const DIGIT_DOMAIN: usize = 10;

/// An inclusive `[min, max]` integer interval.
///
/// Reused for all three range knobs of a [`ConstraintSet`]: the target-sum
/// range, the combination-length range, and the usable-digit range.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bounds {
    pub min: i32,
    pub max: i32,
}

impl Bounds {
    pub const fn of(min: i32, max: i32) -> Self {
        Bounds { min, max }
    }

    /// Collapse to a single value (`min == max == v`).
    pub const fn exactly(v: i32) -> Self {
        Bounds { min: v, max: v }
    }

    pub fn contains(&self, v: i32) -> bool {
        self.min <= v && v <= self.max
    }

    /// The interval as an iterable range.
    pub fn span(&self) -> RangeInclusive<i32> {
        self.min..=self.max
    }
}

impl Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{},{}]", self.min, self.max)
    }
}

/// How many times a single digit may (and must) occur within one combination.
///
/// `min == 0` means "no minimum". The text syntax `"3:2"` yields an exact
/// range (`min == max == 2`); `"3:2-5"` yields `[2, 5]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OccurrenceRange {
    pub min: i32,
    pub max: i32,
}

impl OccurrenceRange {
    pub const fn exactly(n: i32) -> Self {
        OccurrenceRange { min: n, max: n }
    }

    pub const fn between(min: i32, max: i32) -> Self {
        OccurrenceRange { min, max }
    }

    /// A pure cap with no minimum (the legacy flat-repeat-cap shape).
    pub const fn at_most(max: i32) -> Self {
        OccurrenceRange { min: 0, max }
    }
}

impl Display for OccurrenceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.min == self.max {
            write!(f, "{}", self.min)
        } else {
            write!(f, "{}-{}", self.min, self.max)
        }
    }
}

/// The full, validated input to one [`search`](crate::search::search) call.
///
/// Mirrors the web form: every field has the form's default, so a caller only
/// sets what it needs. The struct is plain data; [`validate`](Self::validate)
/// is invoked by the engine before any search begins.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstraintSet {
    /// Inclusive target-sum range. Ignored when `exact_sums` is non-empty.
    pub sum_range: Bounds,
    /// Specific target sums to evaluate instead of the range, in input order.
    pub exact_sums: Vec<i32>,
    /// Inclusive bounds on combination length.
    pub count_range: Bounds,
    /// Inclusive bounds on usable digit values (within 0–9).
    pub digit_range: Bounds,
    /// Global cap on how many times any single digit value may repeat within
    /// one combination. 1 means all digits distinct.
    pub max_repeats: i32,
    /// Per-digit occurrence ranges. An entry for digit `d` overrides
    /// `max_repeats` for `d` only; its `min` is enforced at accept time.
    pub digit_counts: HashMap<i32, OccurrenceRange>,
    /// Digits that must never appear in any combination.
    pub ignored_digits: HashSet<i32>,
    /// Digits that must each appear at least once in every combination.
    pub must_have_digits: HashSet<i32>,
}

impl Default for ConstraintSet {
    fn default() -> Self {
        ConstraintSet {
            sum_range: Bounds::exactly(0),
            exact_sums: Vec::new(),
            count_range: Bounds::of(1, 9),
            digit_range: Bounds::of(1, 9),
            max_repeats: 1,
            digit_counts: HashMap::new(),
            ignored_digits: HashSet::new(),
            must_have_digits: HashSet::new(),
        }
    }
}

impl ConstraintSet {
    /// Check every structural invariant, reporting the first violation.
    ///
    /// # Errors
    ///
    /// Returns the [`InvalidConstraint`] variant naming the violated
    /// invariant (negative bound, inverted range, sub-unit cap, digit
    /// outside the 0–9 domain).
    pub fn validate(&self) -> Result<(), InvalidConstraint> {
        if self.sum_range.min < 0 {
            return Err(InvalidConstraint::NegativeMinSum { min: self.sum_range.min });
        }
        if self.sum_range.max < self.sum_range.min {
            return Err(InvalidConstraint::InvertedSumRange {
                min: self.sum_range.min,
                max: self.sum_range.max,
            });
        }
        if self.count_range.min < 1 {
            return Err(InvalidConstraint::SubUnitMinCount { min: self.count_range.min });
        }
        if self.count_range.max < self.count_range.min {
            return Err(InvalidConstraint::InvertedCountRange {
                min: self.count_range.min,
                max: self.count_range.max,
            });
        }
        if self.digit_range.min < 0 {
            return Err(InvalidConstraint::NegativeMinDigit { min: self.digit_range.min });
        }
        if self.digit_range.max < self.digit_range.min {
            return Err(InvalidConstraint::InvertedDigitRange {
                min: self.digit_range.min,
                max: self.digit_range.max,
            });
        }
        if self.digit_range.max >= DIGIT_DOMAIN as i32 {
            return Err(InvalidConstraint::DigitOutOfDomain { digit: self.digit_range.max });
        }
        if self.max_repeats < 1 {
            return Err(InvalidConstraint::SubUnitRepeatCap { cap: self.max_repeats });
        }
        for (&digit, &occ) in &self.digit_counts {
            if occ.max < occ.min {
                return Err(InvalidConstraint::InvertedOccurrenceRange {
                    digit,
                    min: occ.min,
                    max: occ.max,
                });
            }
        }
        Ok(())
    }
}

/// Pretty, deterministic display (sorted set knobs) like:
/// `sums=[3,10]; counts=[2,4]; digits=[1,9]; max_repeats=1`
impl Display for ConstraintSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.exact_sums.is_empty() {
            write!(f, "sums={}", self.sum_range)?;
        } else {
            let sums: Vec<String> = self.exact_sums.iter().map(ToString::to_string).collect();
            write!(f, "sums={{{}}}", sums.join(","))?;
        }
        write!(
            f,
            "; counts={}; digits={}; max_repeats={}",
            self.count_range, self.digit_range, self.max_repeats
        )?;
        // Sort set-valued knobs for stable output
        let mut ignored: Vec<_> = self.ignored_digits.iter().copied().collect();
        ignored.sort_unstable();
        if !ignored.is_empty() {
            let s: Vec<String> = ignored.iter().map(ToString::to_string).collect();
            write!(f, "; ignored={{{}}}", s.join(","))?;
        }
        let mut required: Vec<_> = self.must_have_digits.iter().copied().collect();
        required.sort_unstable();
        if !required.is_empty() {
            let s: Vec<String> = required.iter().map(ToString::to_string).collect();
            write!(f, "; must_have={{{}}}", s.join(","))?;
        }
        let mut counted: Vec<_> = self.digit_counts.iter().collect();
        counted.sort_unstable_by_key(|(d, _)| **d);
        if !counted.is_empty() {
            let s: Vec<String> = counted.iter().map(|(d, occ)| format!("{d}:{occ}")).collect();
            write!(f, "; digit_counts={{{}}}", s.join(","))?;
        }
        Ok(())
    }
}

/// A structurally invalid [`ConstraintSet`], raised before any search begins.
///
/// Each variant has a unique code (C001-C009) for documentation lookup:
///
/// - C001: `NegativeMinSum`
/// - C002: `InvertedSumRange`
/// - C003: `SubUnitMinCount`
/// - C004: `InvertedCountRange`
/// - C005: `NegativeMinDigit`
/// - C006: `InvertedDigitRange`
/// - C007: `DigitOutOfDomain`
/// - C008: `SubUnitRepeatCap`
/// - C009: `InvertedOccurrenceRange`
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidConstraint {
    #[error("minimum sum {min} is negative")]
    NegativeMinSum { min: i32 },

    #[error("contradictory sum range: min={min}, max={max}")]
    InvertedSumRange { min: i32, max: i32 },

    #[error("minimum digit count {min} is below 1")]
    SubUnitMinCount { min: i32 },

    #[error("contradictory count range: min={min}, max={max}")]
    InvertedCountRange { min: i32, max: i32 },

    #[error("minimum digit {min} is negative")]
    NegativeMinDigit { min: i32 },

    #[error("contradictory digit range: min={min}, max={max}")]
    InvertedDigitRange { min: i32, max: i32 },

    #[error("digit {digit} is outside the supported 0-9 domain")]
    DigitOutOfDomain { digit: i32 },

    #[error("repeat cap {cap} is below 1")]
    SubUnitRepeatCap { cap: i32 },

    #[error("contradictory occurrence range for digit {digit}: min={min}, max={max}")]
    InvertedOccurrenceRange { digit: i32, min: i32, max: i32 },
}

impl InvalidConstraint {
    /// Returns the error code for this error variant
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            InvalidConstraint::NegativeMinSum { .. } => "C001",
            InvalidConstraint::InvertedSumRange { .. } => "C002",
            InvalidConstraint::SubUnitMinCount { .. } => "C003",
            InvalidConstraint::InvertedCountRange { .. } => "C004",
            InvalidConstraint::NegativeMinDigit { .. } => "C005",
            InvalidConstraint::InvertedDigitRange { .. } => "C006",
            InvalidConstraint::DigitOutOfDomain { .. } => "C007",
            InvalidConstraint::SubUnitRepeatCap { .. } => "C008",
            InvalidConstraint::InvertedOccurrenceRange { .. } => "C009",
        }
    }

    /// Returns a helpful suggestion for this error
    #[must_use]
    pub fn help(&self) -> Option<&'static str> {
        match self {
            InvalidConstraint::NegativeMinSum { .. } => {
                Some("Target sums must be zero or positive")
            }
            InvalidConstraint::InvertedSumRange { .. } => {
                Some("The minimum sum cannot exceed the maximum sum")
            }
            InvalidConstraint::SubUnitMinCount { .. } => {
                Some("A combination must contain at least one digit")
            }
            InvalidConstraint::InvertedCountRange { .. } => {
                Some("The minimum count cannot exceed the maximum count")
            }
            InvalidConstraint::NegativeMinDigit { .. } => {
                Some("Digit values must be zero or positive")
            }
            InvalidConstraint::InvertedDigitRange { .. } => {
                Some("The minimum digit cannot exceed the maximum digit")
            }
            InvalidConstraint::DigitOutOfDomain { .. } => {
                Some("Digit values are limited to 0 through 9")
            }
            InvalidConstraint::SubUnitRepeatCap { .. } => {
                Some("Every usable digit may appear at least once; use ignored digits to forbid one entirely")
            }
            InvalidConstraint::InvertedOccurrenceRange { .. } => {
                Some("In a digit-count range, the minimum cannot exceed the maximum (e.g., '1:2-5' not '1:5-2')")
            }
        }
    }

    /// Formats the error with code and optional help text
    #[must_use]
    pub fn display_detailed(&self) -> String {
        crate::errors::format_error_with_code_and_help(&self.to_string(), self.code(), self.help())
    }
}
