//! Field sanitizer
//!
//! Escapes quote characters so extracted text can be embedded in a quoted SQL
//! literal. Quotes are kept (prefixed with a backslash), never removed.

/// Escape every `'` and `"` in `text` with a preceding backslash
pub fn sanitize(text: &str) -> String {
    let quotes = text.chars().filter(|c| matches!(c, '\'' | '"')).count();
    if quotes == 0 {
        return text.to_string();
    }

    let mut escaped = String::with_capacity(text.len() + quotes);
    for c in text.chars() {
        if matches!(c, '\'' | '"') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    /// True when every quote in `s` is directly preceded by a backslash
    fn all_quotes_escaped(s: &str) -> bool {
        let chars: Vec<char> = s.chars().collect();
        chars
            .iter()
            .enumerate()
            .filter(|(_, c)| matches!(c, '\'' | '"'))
            .all(|(i, _)| i > 0 && chars[i - 1] == '\\')
    }

    #[test]
    fn test_escapes_double_quotes() {
        assert_eq!(sanitize(r#"Café "Test""#), r#"Café \"Test\""#);
    }

    #[test]
    fn test_escapes_single_quotes() {
        assert_eq!(sanitize("Don't Stop"), r"Don\'t Stop");
    }

    #[test]
    fn test_escapes_mixed_and_adjacent_quotes() {
        assert_eq!(sanitize(r#"'"'"#), r#"\'\"\'"#);
        assert_eq!(sanitize(r#"a"b'c"#), r#"a\"b\'c"#);
    }

    #[test]
    fn test_text_without_quotes_unchanged() {
        for text in ["", "Plain Title", "東京事変", "Ünïcödé ♫", "back\\slash"] {
            assert_eq!(sanitize(text), text);
            assert_eq!(sanitize(&sanitize(text)), text);
        }
    }

    #[test]
    fn test_output_has_no_unescaped_quotes() {
        let inputs = [
            "\"",
            "'",
            r#"He said "it's fine""#,
            "''''",
            "trailing'",
            "\"leading",
            "日本語の'引用'",
        ];
        for input in inputs {
            let output = sanitize(input);
            assert!(all_quotes_escaped(&output), "unescaped quote in {:?}", output);
        }
    }

    #[test]
    fn test_preserves_content_and_order() {
        let input = r#"x"y'z"#;
        let output = sanitize(input);
        let stripped: String = output.chars().filter(|&c| c != '\\').collect();
        assert_eq!(stripped, input);
    }
}
