//! Free-text field parsers for the constraint form.
//!
//! Front ends (web form, CLI flags) hand constraint lists around as text:
//! comma-separated integers for sums/ignored/must-have digits, and the
//! `digit:count` mapping syntax (`"1:3,2:2"` or `"1:2-5,2:3"`) for per-digit
//! occurrence ranges. These parsers turn that text into the typed values a
//! [`ConstraintSet`](crate::constraints::ConstraintSet) carries.

mod digit_counts;
mod lists;

pub use digit_counts::parse_digit_counts;
pub use lists::parse_int_list;
