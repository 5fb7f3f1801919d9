//! String helpers

/// Match `text` against a pattern supporting `*` (any run) and `?` (any one char)
pub fn wildcard_match(pattern: &str, text: &str) -> bool {
    let pattern: Vec<char> = pattern.chars().collect();
    let text: Vec<char> = text.chars().collect();

    let (mut p, mut t) = (0, 0);
    // Position of the last '*' seen and the text index it was matched against
    let mut backtrack: Option<(usize, usize)> = None;

    while t < text.len() {
        match pattern.get(p) {
            Some('*') => {
                backtrack = Some((p, t));
                p += 1;
            }
            Some(&c) if c == '?' || c == text[t] => {
                p += 1;
                t += 1;
            }
            _ => match backtrack {
                Some((star, matched)) => {
                    p = star + 1;
                    t = matched + 1;
                    backtrack = Some((star, matched + 1));
                }
                None => return false,
            },
        }
    }

    pattern[p..].iter().all(|&c| c == '*')
}

fn is_blank(c: char) -> bool {
    c == ' ' || c == '\t'
}

/// Remove leading spaces and tabs
pub fn trim_left(text: &str) -> &str {
    text.trim_start_matches(is_blank)
}

/// Remove trailing spaces and tabs
pub fn trim_right(text: &str) -> &str {
    text.trim_end_matches(is_blank)
}

/// Remove leading and trailing spaces and tabs
pub fn trim(text: &str) -> &str {
    trim_left(trim_right(text))
}

/// Encode a string as UTF-16 code units
pub fn to_wide(text: &str) -> Vec<u16> {
    text.encode_utf16().collect()
}

/// Decode UTF-16 code units, replacing invalid sequences
pub fn from_wide(wide: &[u16]) -> String {
    String::from_utf16_lossy(wide)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wildcard_literals() {
        assert!(wildcard_match("tank.ron", "tank.ron"));
        assert!(!wildcard_match("tank.ron", "tank.rom"));
        assert!(!wildcard_match("tank", "tanks"));
    }

    #[test]
    fn test_wildcard_question_mark() {
        assert!(wildcard_match("t?nk", "tank"));
        assert!(!wildcard_match("t?nk", "tnk"));
    }

    #[test]
    fn test_wildcard_star() {
        assert!(wildcard_match("*", ""));
        assert!(wildcard_match("*.ron", "actors/tank.ron"));
        assert!(wildcard_match("a*b*c", "aXXbYYc"));
        assert!(wildcard_match("a*b", "abab"));
        assert!(!wildcard_match("a*b", "abac"));
        assert!(wildcard_match("**?", "x"));
        assert!(!wildcard_match("?", ""));
    }

    #[test]
    fn test_trim_only_blanks() {
        assert_eq!(trim_left(" \t value "), "value ");
        assert_eq!(trim_right(" value \t"), " value");
        assert_eq!(trim("\t value \t"), "value");
        // Newlines are not blanks
        assert_eq!(trim("\nvalue\n"), "\nvalue\n");
    }

    #[test]
    fn test_wide_roundtrip() {
        let text = "Tank Battles ✓";
        assert_eq!(from_wide(&to_wide(text)), text);
    }
}
