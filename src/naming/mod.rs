//! Field name mapping between wire and in-memory conventions.
//!
//! Wire names are lower snake_case; in-memory names are lowerCamelCase.
//! The two conversions are mutual inverses for names made of ASCII letters
//! and digits, under one deterministic tokenization rule: a boundary is
//! emitted before every uppercase letter and before every digit run that
//! follows a letter. Lowercase letters never open a boundary.
//!
//! The digit rule is what keeps indexed families lossless both ways:
//! `image36` ↔ `image_36`, `has2fa` ↔ `has_2fa`, `cacheTs` ↔ `cache_ts`.
//! Runs of capitals split per letter, so `xFiles` ↔ `x_files` and
//! `aBC` ↔ `a_b_c`.

/// Convert an in-memory (lowerCamelCase) field name to its wire
/// (snake_case) form.
pub fn to_wire_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let mut prev: Option<char> = None;
    for ch in name.chars() {
        if ch.is_ascii_uppercase() {
            if !out.is_empty() {
                out.push('_');
            }
            out.push(ch.to_ascii_lowercase());
        } else if ch.is_ascii_digit() && prev.map(|p| p.is_ascii_alphabetic()).unwrap_or(false) {
            out.push('_');
            out.push(ch);
        } else {
            out.push(ch);
        }
        prev = Some(ch);
    }
    out
}

/// Convert a wire (snake_case) field name to its in-memory
/// (lowerCamelCase) form.
pub fn to_field_name(wire: &str) -> String {
    let mut out = String::with_capacity(wire.len());
    let mut boundary = false;
    for ch in wire.chars() {
        if ch == '_' {
            boundary = true;
        } else if boundary {
            out.push(ch.to_ascii_uppercase());
            boundary = false;
        } else {
            out.push(ch);
        }
    }
    out
}
