//! String validation functions

/// Number of characters (not bytes) in `s`
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Checks that `s` has at least `min` characters
pub fn has_min_chars(s: &str, min: usize) -> bool {
    char_len(s) >= min
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_min_chars() {
        assert!(has_min_chars("Joe", 3));
        assert!(!has_min_chars("Jo", 3));
        // Counted in characters, so multi-byte names are not penalised or favoured
        assert!(has_min_chars("Zoë", 3));
        assert!(!has_min_chars("Zö", 3));
    }

    #[test]
    fn test_char_len_counts_characters() {
        assert_eq!(char_len("Zoë"), 3);
        assert_eq!("Zoë".len(), 4);
    }
}
