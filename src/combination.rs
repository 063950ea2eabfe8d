use std::fmt;
use std::fmt::{Display, Formatter};

/// One accepted assignment of digits: an ascending sequence summing to its
/// group's target. Multiset semantics — the ascending order is the canonical
/// form, so equality as sequences is equality as multisets.
///
/// The search constructs only non-decreasing sequences, which is what
/// guarantees each multiset is produced exactly once.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(transparent)]
pub struct Combination {
    digits: Vec<i32>,
}

impl Combination {
    /// Wrap an already-ascending digit sequence. Only the engine builds
    /// these, and it builds them sorted by construction.
    pub(crate) fn from_digits(digits: Vec<i32>) -> Self {
        debug_assert!(
            digits.windows(2).all(|w| w[0] <= w[1]),
            "Combination digits must be non-decreasing"
        );
        Combination { digits }
    }

    pub fn digits(&self) -> &[i32] {
        &self.digits
    }

    pub fn len(&self) -> usize {
        self.digits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }

    /// Sum of all digits (equal to the target this combination was found for).
    pub fn sum(&self) -> i32 {
        self.digits.iter().sum()
    }
}

/// Renders the way the web UI lists a combination row: `1 + 2 + 5`.
impl Display for Combination {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.digits.iter().map(ToString::to_string).collect();
        write!(f, "{}", parts.join(" + "))
    }
}

impl<'a> IntoIterator for &'a Combination {
    type Item = &'a i32;
    type IntoIter = std::slice::Iter<'a, i32>;

    fn into_iter(self) -> Self::IntoIter {
        self.digits.iter()
    }
}
