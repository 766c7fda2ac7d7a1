use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tree_sitter::Language as TsLanguage;

use crate::error::ScanError;

/// Dialect tag attached to every document handed to the scanner.
///
/// Only [`CodeLanguage::Tsx`] is ever parsed. Markup and stylesheet pages
/// share the same document store, so callers carry the tag through and the
/// scanner turns them away without parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CodeLanguage {
    Html,
    Css,
    #[default]
    Tsx,
}

impl CodeLanguage {
    /// Resolve a file extension to a dialect.
    pub fn from_extension(ext: &str) -> Result<Self, ScanError> {
        Self::for_extension(ext).ok_or_else(|| ScanError::UnsupportedExtension(ext.to_string()))
    }

    /// Resolve a file extension to a dialect (non-error variant).
    pub fn for_extension(ext: &str) -> Option<Self> {
        if is_tsx_ecosystem_extension(ext) {
            return Some(Self::Tsx);
        }
        if ext.eq_ignore_ascii_case("html") || ext.eq_ignore_ascii_case("htm") {
            return Some(Self::Html);
        }
        if ext.eq_ignore_ascii_case("css") {
            return Some(Self::Css);
        }
        None
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Css => "css",
            Self::Tsx => "tsx",
        }
    }

    /// Extension used when naming a page file of this dialect.
    pub fn file_extension(self) -> &'static str {
        self.as_str()
    }

    /// Whether the scanner understands this dialect.
    pub fn is_scannable(self) -> bool {
        matches!(self, Self::Tsx)
    }

    /// tree-sitter grammar for scannable dialects.
    ///
    /// Every member of the TS family goes through the TSX grammar: it accepts
    /// plain JavaScript, JSX and type annotations alike.
    pub fn tree_sitter_language(self) -> Option<TsLanguage> {
        match self {
            Self::Tsx => Some(tree_sitter_typescript::LANGUAGE_TSX.into()),
            Self::Html | Self::Css => None,
        }
    }

    /// Starter text for a freshly created page.
    pub fn default_page_code(self, page_number: u32) -> String {
        match self {
            Self::Html => format!(
                "<!doctype html>\n\
                 <html lang=\"en\">\n  \
                 <head>\n    \
                 <title>Page {page_number}</title>\n  \
                 </head>\n  \
                 <body>\n    \
                 <main>Page {page_number}</main>\n  \
                 </body>\n\
                 </html>\n"
            ),
            Self::Css => format!("/* Page {page_number} */\n.page {{\n  display: block;\n  padding: 1rem;\n}}\n"),
            Self::Tsx => format!(
                "// Page {page_number}\nexport default function Page() {{\n  return 'Page {page_number}'\n}}\n"
            ),
        }
    }
}

impl fmt::Display for CodeLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CodeLanguage {
    type Err = ScanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "html" => Ok(Self::Html),
            "css" => Ok(Self::Css),
            "tsx" => Ok(Self::Tsx),
            other => Err(ScanError::UnknownLanguage(other.to_string())),
        }
    }
}

/// Check whether a stored language tag is one of the known dialects.
pub fn is_code_language(value: &str) -> bool {
    value.parse::<CodeLanguage>().is_ok()
}

fn is_tsx_ecosystem_extension(ext: &str) -> bool {
    ["tsx", "jsx", "ts", "js", "mts", "cts", "mjs", "cjs"]
        .iter()
        .any(|candidate| ext.eq_ignore_ascii_case(candidate))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_supported_extensions() {
        assert_eq!(CodeLanguage::for_extension("tsx"), Some(CodeLanguage::Tsx));
        assert_eq!(CodeLanguage::for_extension("JSX"), Some(CodeLanguage::Tsx));
        assert_eq!(CodeLanguage::for_extension("mjs"), Some(CodeLanguage::Tsx));
        assert_eq!(CodeLanguage::for_extension("htm"), Some(CodeLanguage::Html));
        assert_eq!(CodeLanguage::for_extension("css"), Some(CodeLanguage::Css));
        assert_eq!(CodeLanguage::for_extension("rs"), None);
    }

    #[test]
    fn unsupported_extension_is_an_error() {
        let err = CodeLanguage::from_extension("py").unwrap_err();
        assert_eq!(err.to_string(), "unsupported extension: .py");
    }

    #[test]
    fn parses_stored_tags() {
        assert!(is_code_language("tsx"));
        assert!(is_code_language("css"));
        assert!(!is_code_language("TSX"));
        assert!(!is_code_language(""));
        assert_eq!("html".parse::<CodeLanguage>().unwrap(), CodeLanguage::Html);
    }

    #[test]
    fn only_tsx_is_scannable() {
        assert!(CodeLanguage::Tsx.is_scannable());
        assert!(CodeLanguage::Tsx.tree_sitter_language().is_some());
        assert!(!CodeLanguage::Html.is_scannable());
        assert!(CodeLanguage::Css.tree_sitter_language().is_none());
    }

    #[test]
    fn default_tsx_page_declares_page_function() {
        let code = CodeLanguage::Tsx.default_page_code(3);
        assert_eq!(
            code,
            "// Page 3\nexport default function Page() {\n  return 'Page 3'\n}\n"
        );
    }

    #[test]
    fn default_html_page_is_indented() {
        let code = CodeLanguage::Html.default_page_code(2);
        assert!(code.starts_with("<!doctype html>\n<html lang=\"en\">\n  <head>\n"));
        assert!(code.contains("    <title>Page 2</title>\n"));
        assert!(code.ends_with("</html>\n"));
    }

    #[test]
    fn default_css_page_has_page_rule() {
        let code = CodeLanguage::Css.default_page_code(1);
        assert_eq!(code, "/* Page 1 */\n.page {\n  display: block;\n  padding: 1rem;\n}\n");
    }

    #[test]
    fn serializes_as_lowercase_tag() {
        let json = serde_json::to_string(&CodeLanguage::Tsx).unwrap();
        assert_eq!(json, "\"tsx\"");
    }
}
