//! Text normalization shared by catalog lookups and tokenization.

/// Normalize text for matching: lowercase, trimmed, internal whitespace
/// collapsed to single spaces. Idempotent.
pub fn normalize(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Remove punctuation, keeping word characters and whitespace.
pub fn strip_punctuation(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace() || *c == '_')
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_lowercases_and_collapses() {
        assert_eq!(normalize("  This   IS an\tElectric  "), "this is an electric");
    }

    #[test]
    fn normalize_is_idempotent() {
        for raw in ["", "  ", "Press 1", "This  is\nan ELECTRIC callout.", "a (b) [c]"] {
            let once = normalize(raw);
            assert_eq!(normalize(&once), once);
        }
    }

    #[test]
    fn normalize_keeps_punctuation() {
        assert_eq!(normalize("Thank you."), "thank you.");
    }

    #[test]
    fn strip_punctuation_keeps_words_and_spaces() {
        assert_eq!(strip_punctuation("thank you."), "thank you");
        assert_eq!(strip_punctuation("press 1!"), "press 1");
        assert_eq!(strip_punctuation("callout_type"), "callout_type");
    }
}
