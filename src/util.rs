use tree_sitter::Node;

/// Extract UTF-8 text from a tree-sitter node, returning `""` on failure.
pub fn txt<'a>(node: Node, src: &'a [u8]) -> &'a str {
    node.utf8_text(src).unwrap_or("")
}

/// Trim and collapse every run of whitespace to a single space.
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Rewrite `\r\n`, lone `\r` and the Unicode line/paragraph separators as `\n`.
pub fn normalize_newlines(code: &str) -> String {
    code.replace("\r\n", "\n")
        .replace(['\r', '\u{2028}', '\u{2029}'], "\n")
}

/// Number of lines in a document. Empty text still occupies one line.
pub fn line_count(code: &str) -> usize {
    let normalized = normalize_newlines(code);
    if normalized.is_empty() {
        return 1;
    }
    normalized.split('\n').count()
}

/// Text of the 1-based inclusive line range, clamped to the document.
pub fn slice_lines(code: &str, start_line: usize, end_line: usize) -> String {
    let normalized = normalize_newlines(code);
    let start = start_line.saturating_sub(1);
    let end = end_line.max(start);
    normalized
        .split('\n')
        .skip(start)
        .take(end - start)
        .collect::<Vec<_>>()
        .join("\n")
}
