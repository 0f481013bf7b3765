use crate::constants::{KANA_OFFSET, KATAKANA_END, KATAKANA_START};

/// Fold katakana onto hiragana so a query typed in either script matches
/// names stored in the other.
#[must_use]
pub fn to_hiragana(text: &str) -> String {
    text.chars().map(fold_char).collect()
}

fn fold_char(ch: char) -> char {
    let code = u32::from(ch);
    if (KATAKANA_START..=KATAKANA_END).contains(&code) {
        char::from_u32(code - KANA_OFFSET).unwrap_or(ch)
    } else {
        ch
    }
}

/// Substring match that also accepts a hit after folding both sides to hiragana.
#[must_use]
pub fn matches_phonetic(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() || haystack.contains(needle) {
        return true;
    }
    to_hiragana(haystack).contains(&to_hiragana(needle))
}
