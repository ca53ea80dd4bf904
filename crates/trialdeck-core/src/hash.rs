//! Task identity hash for anonymized display.
//!
//! A non-cryptographic 31x rolling hash rendered as lower hex. Collision
//! resistance only needs to hold for corpora of a few hundred task names;
//! this is an identity scheme, not a security primitive.

/// Hash a task name to a short, stable hex identifier.
///
/// Iterates UTF-16 code units with wrapping 32-bit signed arithmetic
/// (`h = (h << 5) - h + unit`), then renders the absolute value in hex.
/// The empty string maps to `"0"`.
pub fn hash_task_name(name: &str) -> String {
    if name.is_empty() {
        return "0".to_string();
    }
    let mut hash: i32 = 0;
    for unit in name.encode_utf16() {
        hash = hash
            .wrapping_shl(5)
            .wrapping_sub(hash)
            .wrapping_add(i32::from(unit));
    }
    format!("{:x}", hash.unsigned_abs())
}
