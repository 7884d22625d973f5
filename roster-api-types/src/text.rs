//! Normalization applied to incoming text fields

/// Capitalize the first letter of every word and lower-case the rest.
///
/// A word starts after any non-alphabetic character, so `o'neil` becomes
/// `O'Neil` and `DOE` becomes `Doe`.
pub fn title_case(value: &str) -> String {
    let mut titled = String::with_capacity(value.len());
    let mut in_word = false;

    for c in value.chars() {
        if in_word {
            titled.extend(c.to_lowercase());
        } else {
            titled.extend(c.to_uppercase());
        }
        in_word = c.is_alphabetic();
    }

    titled
}

/// Trimmed, title-cased name
pub fn normalize_name(value: &str) -> String {
    title_case(value.trim())
}

/// Trimmed, lower-cased email address
pub fn normalize_email(value: &str) -> String {
    value.trim().to_lowercase()
}
