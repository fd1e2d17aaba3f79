/// Canonicalizes text for output comparison.
///
/// Strips trailing whitespace from each line, joins lines with a single `\n`,
/// and drops leading/trailing blank lines of the whole text. Applying the same
/// canonicalization to both the program output and the expected answer makes
/// the comparison tolerant of final-newline and trailing-space differences.
pub fn normalize(s: &str) -> String {
    let lines: Vec<&str> = s.lines().map(str::trim_end).collect();

    let Some(first) = lines.iter().position(|line| !line.is_empty()) else {
        return String::new();
    };
    let last = lines.iter().rposition(|line| !line.is_empty()).unwrap();

    lines[first..=last].join("\n")
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn should_ignore_trailing_newline() {
        assert_eq!(normalize("8\n"), normalize("8"));
        assert_eq!(normalize("8\n8\n"), "8\n8");
    }

    #[test]
    fn should_ignore_trailing_whitespace_per_line() {
        assert_eq!(normalize("8 \n8\n"), normalize("8\n8"));
        assert_eq!(normalize("YES \t\nNO"), "YES\nNO");
    }

    #[test]
    fn should_keep_content_order() {
        assert_ne!(normalize("8\n9"), normalize("9\n8"));
    }

    #[test]
    fn should_keep_interior_blank_lines() {
        assert_eq!(normalize("a\n\nb\n"), "a\n\nb");
    }

    #[test]
    fn should_drop_surrounding_blank_lines() {
        assert_eq!(normalize("\n\nYES\n\n\n"), "YES");
        assert_eq!(normalize("  \nYES\n \t \n"), "YES");
    }

    #[test]
    fn should_handle_crlf() {
        assert_eq!(normalize("YES\r\nNO\r\n"), "YES\nNO");
    }

    #[test]
    fn should_be_empty_for_whitespace_only_text() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("\n\n  \n"), "");
    }

    #[test]
    fn should_be_idempotent() {
        for s in ["", "8\n", " 8 \n\n9  \n", "a\r\nb", "\n\nx\n\n"] {
            let once = normalize(s);
            assert_eq!(normalize(&once), once);
        }
    }
}
