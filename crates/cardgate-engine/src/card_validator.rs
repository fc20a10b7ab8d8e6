//! Card checks that need nothing but the card fields and a date.

use cardgate_types::constants;
use chrono::{Datelike, NaiveDate};

/// Luhn checksum over the digits of `number`, ignoring spaces.
///
/// Counting from the rightmost digit, every second digit is doubled and
/// reduced by 9 when the result exceeds 9; the number is valid iff the sum
/// of all digits is a multiple of 10. Empty input and any character other
/// than a digit or space fail.
#[must_use]
pub fn is_valid_card_number(number: &str) -> bool {
    let digits: Option<Vec<u32>> = number
        .chars()
        .filter(|c| *c != ' ')
        .map(|c| c.to_digit(10))
        .collect();
    let Some(digits) = digits else {
        return false;
    };
    if digits.is_empty() {
        return false;
    }

    let sum: u32 = digits
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &d)| {
            if i % 2 == 1 {
                let doubled = d * 2;
                if doubled > 9 { doubled - 9 } else { doubled }
            } else {
                d
            }
        })
        .sum();
    sum % 10 == 0
}

/// A card is usable through the last day of its expiry month.
#[must_use]
pub fn is_valid_expiry(month: i32, year: i32, today: NaiveDate) -> bool {
    year > today.year() || (year == today.year() && i64::from(month) >= i64::from(today.month()))
}

/// Whether the expiry fields describe a real month at all.
#[must_use]
pub fn is_plausible_expiry(month: i32, year: i32) -> bool {
    (1..=12).contains(&month) && year > constants::MIN_EXPIRY_YEAR
}
