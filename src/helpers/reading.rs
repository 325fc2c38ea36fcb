//! Reading time estimation

/// Count words in markdown text: ASCII words plus CJK characters, which
/// read one at a time.
pub fn count_words(text: &str) -> usize {
    let mut count = 0;
    let mut in_word = false;

    for c in text.chars() {
        if c.is_ascii_alphanumeric() {
            if !in_word {
                in_word = true;
                count += 1;
            }
        } else if ('\u{4E00}'..='\u{9FFF}').contains(&c) {
            count += 1;
            in_word = false;
        } else {
            in_word = false;
        }
    }

    count
}

/// Estimated reading time in minutes, rounded up, never below one
pub fn reading_time(text: &str, words_per_minute: usize) -> usize {
    let wpm = words_per_minute.max(1);
    count_words(text).div_ceil(wpm).max(1)
}

/// Human label for an article's reading time ("4 minute read")
pub fn reading_time_label(minutes: usize) -> String {
    format!("{} minute read", minutes)
}
