//! Identifier generation for locally created records.

use chrono::Utc;

const DIGITS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Format a number in lowercase base 36.
///
pub fn to_base36(mut value: u64) -> String {
    if value == 0 {
        return "0".to_owned();
    }
    let mut digits = Vec::new();
    while value > 0 {
        digits.push(DIGITS[(value % 36) as usize] as char);
        value /= 36;
    }
    digits.iter().rev().collect()
}

/// Build `<prefix>_<base36 millis>`, adding a numeric suffix while `taken`
/// reports the candidate as already used.
///
pub fn timestamp_id(prefix: &str, taken: impl Fn(&str) -> bool) -> String {
    let millis = Utc::now().timestamp_millis().max(0) as u64;
    let base = format!("{}_{}", prefix, to_base36(millis));
    if !taken(&base) {
        return base;
    }
    (1..)
        .map(|suffix| format!("{}_{}", base, suffix))
        .find(|candidate| !taken(candidate))
        .unwrap_or(base)
}
