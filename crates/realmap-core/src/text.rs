// crates/realmap-core/src/text.rs

/// `true` when `needle` starts a word inside `haystack` (both already lowercased).
///
/// A word starts at the beginning of the string or right after a character
/// that is not alphanumeric ("the twins" matches "twi" at index 4).
pub fn starts_word(haystack: &str, needle: &str) -> bool {
    haystack.match_indices(needle).any(|(i, _)| {
        i == 0
            || haystack[..i]
                .chars()
                .next_back()
                .is_some_and(|c| !c.is_alphanumeric())
    })
}

/// Formats a number with `,` thousands separators and no fraction digits.
pub fn group_thousands(value: f64) -> String {
    let rounded = value.round();
    let negative = rounded < 0.0;
    let digits = format!("{:.0}", rounded.abs());
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if negative {
        out.insert(0, '-');
    }
    out
}
