//! Text normalization and whole-phrase search helpers

/// Lowercase, fold typographic punctuation and collapse whitespace runs to a single space
pub fn normalize(text: &str) -> String {
    let folded: String = text
        .chars()
        .map(|c| match c {
            '\u{2018}' | '\u{2019}' => '\'',
            '\u{201C}' | '\u{201D}' => '"',
            '\u{2013}' | '\u{2014}' => '-',
            '\u{00A0}' => ' ',
            _ => c,
        })
        .collect();

    folded
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// True when the byte range `start..end` of `text` is not glued to a letter or digit
pub fn is_word_bounded(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();
    !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
}

/// Non-overlapping whole-word occurrences of `phrase` in `text`.
/// Both arguments are expected to be normalized already.
pub fn count_phrase(text: &str, phrase: &str) -> usize {
    if phrase.is_empty() {
        return 0;
    }

    let mut count = 0;
    let mut from = 0;
    while let Some(offset) = text[from..].find(phrase) {
        let start = from + offset;
        let end = start + phrase.len();
        if is_word_bounded(text, start, end) {
            count += 1;
            from = end;
        } else {
            // advance by one char to keep slicing on a boundary
            from = start + text[start..].chars().next().map_or(1, char::len_utf8);
        }
    }
    count
}

pub fn contains_phrase(text: &str, phrase: &str) -> bool {
    count_phrase(text, phrase) > 0
}
