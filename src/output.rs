use std::fmt;

use serde::Serialize;

use crate::config::ScanConfig;
use crate::error::ScanError;
use crate::group::{bucket_types_by_line, group};
use crate::lang::CodeLanguage;
use crate::model::{FunctionFactGroup, Indented, LineTypes};
use crate::scan::scan_with;
use crate::util::line_count;

pub const NO_FUNCTIONS_MESSAGE: &str = "No named functions were found in this file.";
pub const TSX_ONLY_MESSAGE: &str = "Code Processor currently works only for TSX files.";

/// Processor summary of a single document, ready for display.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessorDigest {
    pub line_count: usize,
    pub message: String,
    pub groups: Vec<FunctionFactGroup>,
    pub outside: Vec<LineTypes>,
}

impl ProcessorDigest {
    /// Scan, group and summarise `source`.
    pub fn build(source: &str, config: &ScanConfig) -> Self {
        let report = scan_with(source, config);
        let grouped = group(
            &report.functions,
            &report.state_declarations,
            &report.hook_calls,
            &report.data_types,
        );
        Self {
            line_count: line_count(source),
            message: summary_message(report.functions.len()),
            groups: grouped.per_function,
            outside: bucket_types_by_line(&grouped.data_types_outside_functions),
        }
    }

    /// Like [`ProcessorDigest::build`], refusing documents that are not TSX.
    pub fn for_document(
        source: &str,
        language: CodeLanguage,
        config: &ScanConfig,
    ) -> Result<Self, ScanError> {
        if !language.is_scannable() {
            return Err(ScanError::UnscannableLanguage(language));
        }
        Ok(Self::build(source, config))
    }
}

pub fn summary_message(function_count: usize) -> String {
    if function_count == 0 {
        NO_FUNCTIONS_MESSAGE.to_string()
    } else {
        format!("Found {function_count} named function(s).")
    }
}

impl fmt::Display for ProcessorDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}  ({} lines)", self.message, self.line_count)?;

        for g in &self.groups {
            writeln!(f)?;
            write_group(f, g)?;
        }

        if !self.outside.is_empty() {
            writeln!(f)?;
            writeln!(f, "full-file scope:")?;
            for row in &self.outside {
                writeln!(f, "{}", Indented("  ", row))?;
            }
        }

        Ok(())
    }
}

fn write_group(f: &mut fmt::Formatter<'_>, g: &FunctionFactGroup) -> fmt::Result {
    let func = &g.function;
    write!(f, "{}  lines {}", func.name, func.start_line)?;
    if func.end_line != func.start_line {
        write!(f, "-{}", func.end_line)?;
    }
    writeln!(f)?;

    if !g.state_names.is_empty() {
        writeln!(f, "  state: {}", g.state_names.join(", "))?;
    }

    if !g.hooks.is_empty() {
        writeln!(f, "  hooks:")?;
        for h in &g.hooks {
            writeln!(f, "{}", Indented("    ", h))?;
        }
    }

    if !g.data_types.is_empty() {
        writeln!(f, "  types:")?;
        for row in bucket_types_by_line(&g.data_types) {
            writeln!(f, "{}", Indented("    ", &row))?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_counts_functions() {
        assert_eq!(summary_message(0), NO_FUNCTIONS_MESSAGE);
        assert_eq!(summary_message(1), "Found 1 named function(s).");
        assert_eq!(summary_message(3), "Found 3 named function(s).");
    }

    #[test]
    fn digest_of_component_file() {
        let src = "type Id = { value: string }\nexport function Card() {\n  const [open, setOpen] = useState(false)\n  useEffect(() => {}, [])\n  const title = 'x'\n}\n";
        let digest = ProcessorDigest::build(src, &ScanConfig::default());

        assert_eq!(digest.line_count, 7);
        assert_eq!(digest.message, "Found 1 named function(s).");
        assert_eq!(digest.groups.len(), 1);
        assert_eq!(digest.groups[0].state_names, vec!["open"]);
        assert_eq!(
            digest.outside,
            vec![LineTypes {
                line: 1,
                type_names: vec!["string".to_string()],
            }]
        );

        let text = digest.to_string();
        assert!(text.starts_with("Found 1 named function(s).  (7 lines)\n"));
        assert!(text.contains("Card  lines 2-6\n"));
        assert!(text.contains("  state: open\n"));
        assert!(text.contains("    useState  [L3]\n"));
        assert!(text.contains("    useEffect  [L4]\n"));
        assert!(text.contains("    string  [L5]\n"));
        assert!(text.ends_with("full-file scope:\n  string  [L1]\n"));
    }

    #[test]
    fn single_line_function_header() {
        let digest = ProcessorDigest::build("const f = () => 1\n", &ScanConfig::default());
        let text = digest.to_string();
        assert!(text.contains("f  lines 1\n"), "{text}");
        assert!(text.contains("function  [L1]"), "{text}");
    }

    #[test]
    fn empty_file_digest() {
        let digest = ProcessorDigest::build("", &ScanConfig::default());
        assert_eq!(digest.line_count, 1);
        assert_eq!(digest.message, NO_FUNCTIONS_MESSAGE);
        assert_eq!(digest.to_string(), format!("{NO_FUNCTIONS_MESSAGE}  (1 lines)\n"));
    }

    #[test]
    fn non_tsx_documents_are_refused() {
        let result = ProcessorDigest::for_document("<p>hi</p>", CodeLanguage::Html, &ScanConfig::default());
        assert!(matches!(
            result,
            Err(ScanError::UnscannableLanguage(CodeLanguage::Html))
        ));
        assert!(ProcessorDigest::for_document("", CodeLanguage::Tsx, &ScanConfig::default()).is_ok());
    }

    #[test]
    fn digest_serializes_camel_case() {
        let digest = ProcessorDigest::build("let n = 1", &ScanConfig::default());
        let json = serde_json::to_value(&digest).unwrap();
        assert_eq!(json["lineCount"], 1);
        assert_eq!(json["outside"][0]["typeNames"][0], "number");
    }
}
