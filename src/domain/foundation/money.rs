//! Money comparison helpers.
//!
//! Provider payloads carry amounts as floating point numbers. Comparing them
//! bit-for-bit against stored costs would reject legitimate payments, so all
//! comparisons happen at two decimal places.

/// Rounds an amount to minor units (cents) at two decimal places.
pub fn to_minor_units(amount: f64) -> i64 {
    (amount * 100.0).round() as i64
}

/// Compares two amounts at two-decimal precision.
pub fn amounts_match(a: f64, b: f64) -> bool {
    to_minor_units(a) == to_minor_units(b)
}
