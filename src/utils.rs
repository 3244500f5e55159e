// src/utils.rs

/// Strips control characters from untrusted text before it enters the
/// transcript. Newlines and tabs survive; everything else in the C0/C1
/// ranges (including ESC, so no terminal escape sequences) is dropped.
pub fn sanitize(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_passes_through() {
        assert_eq!(sanitize("hello world"), "hello world");
    }

    #[test]
    fn newlines_and_tabs_survive() {
        assert_eq!(sanitize("line one\n\tline two"), "line one\n\tline two");
    }

    #[test]
    fn escape_sequences_are_stripped() {
        assert_eq!(sanitize("\x1b[31mred\x1b[0m"), "[31mred[0m");
        assert_eq!(sanitize("bell\x07 and \rreturn"), "bell and return");
    }
}
