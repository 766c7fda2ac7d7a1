use std::path::Path;

use tree_sitter::{Node, Parser, Tree};

use crate::error::ScanError;
use crate::lang::CodeLanguage;

/// A parsed document: the tree plus the text it was built from.
pub struct ParsedSource<'s> {
    pub tree: Tree,
    pub source: &'s str,
    /// ERROR and MISSING nodes tree-sitter inserted to keep going.
    pub error_count: usize,
}

/// Parse source text in the given dialect.
///
/// tree-sitter does not abort on syntax errors; it returns a tree with ERROR
/// and MISSING nodes in place of the unparseable regions. Errors here mean
/// the parser itself could not run.
pub fn try_parse(source: &str, language: CodeLanguage) -> Result<ParsedSource<'_>, ScanError> {
    let grammar = language
        .tree_sitter_language()
        .ok_or(ScanError::UnscannableLanguage(language))?;

    let mut parser = Parser::new();
    parser.set_language(&grammar)?;

    let tree = parser
        .parse(source, None)
        .ok_or_else(|| ScanError::ParseFailed(format!("{} bytes of {language}", source.len())))?;

    let error_count = count_errors(tree.root_node());
    if error_count > 0 {
        tracing::warn!(
            errors = error_count,
            "source has syntax errors, scanning the partial tree"
        );
    }

    Ok(ParsedSource {
        tree,
        source,
        error_count,
    })
}

/// Parse TSX source text, logging and swallowing parser failures.
pub fn parse_source(source: &str) -> Option<ParsedSource<'_>> {
    match try_parse(source, CodeLanguage::Tsx) {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            tracing::error!(error = %e, "tsx parse failed, reporting no facts");
            None
        }
    }
}

/// Read a document from disk and work out its dialect from the extension.
pub fn read_document(path: &Path) -> Result<(String, CodeLanguage), ScanError> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    let language = CodeLanguage::from_extension(ext)?;

    let source = std::fs::read_to_string(path).map_err(|e| ScanError::Io {
        path: path.display().to_string(),
        source: e,
    })?;

    Ok((source, language))
}

/// Count ERROR and MISSING nodes below `node`.
fn count_errors(node: Node) -> usize {
    if !node.has_error() {
        return 0;
    }
    let own = usize::from(node.is_error() || node.is_missing());
    let mut cursor = node.walk();
    let below: usize = node.children(&mut cursor).map(count_errors).sum();
    own + below
}
