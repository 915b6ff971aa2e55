//! Article agreement: choosing "a" vs "an" from the following word.

/// True when `word` is spoken with an initial vowel sound: a vowel first
/// letter, or a configured exception prefix (silent-h words, domain terms
/// recorded with a vowel onset). `exceptions` must already be lowercased.
pub(super) fn starts_with_vowel_sound(word: &str, exceptions: &[String]) -> bool {
    if word.is_empty() {
        return false;
    }
    let word = word.to_lowercase();
    if exceptions.iter().any(|prefix| word.starts_with(prefix.as_str())) {
        return true;
    }
    matches!(word.chars().next(), Some('a' | 'e' | 'i' | 'o' | 'u'))
}
