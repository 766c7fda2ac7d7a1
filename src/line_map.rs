//! Byte offset to 1-based line number mapping.
//!
//! tree-sitter counts rows by `\n` only. Editors and the line utilities in
//! [`crate::util`] also break on a lone `\r` and on the Unicode line and
//! paragraph separators, so lines are computed from our own index of line
//! starts instead of `Node::start_position`.

use tree_sitter::Node;

/// Sorted byte offsets at which each line begins.
#[derive(Debug, Clone)]
pub struct LineIndex {
    starts: Vec<usize>,
}

impl LineIndex {
    pub fn new(src: &str) -> Self {
        let bytes = src.as_bytes();
        let mut starts = vec![0];
        let mut i = 0;
        while i < bytes.len() {
            match bytes[i] {
                b'\n' => starts.push(i + 1),
                b'\r' => {
                    if bytes.get(i + 1) == Some(&b'\n') {
                        i += 1;
                    }
                    starts.push(i + 1);
                }
                // U+2028 / U+2029 encode as E2 80 A8 / E2 80 A9.
                0xE2 if bytes.get(i + 1) == Some(&0x80)
                    && matches!(bytes.get(i + 2), Some(0xA8 | 0xA9)) =>
                {
                    i += 2;
                    starts.push(i + 1);
                }
                _ => {}
            }
            i += 1;
        }
        Self { starts }
    }

    /// 1-based line containing `offset`. Offsets past the end map to the last line.
    pub fn line_of(&self, offset: usize) -> usize {
        self.starts.partition_point(|&start| start <= offset)
    }

    pub fn line_count(&self) -> usize {
        self.starts.len()
    }

    /// Line of the node's first byte.
    pub fn start_line(&self, node: Node) -> usize {
        self.line_of(node.start_byte())
    }

    /// Line holding the node's exclusive end offset.
    pub fn end_line(&self, node: Node) -> usize {
        self.line_of(node.end_byte())
    }
}
