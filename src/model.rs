use std::fmt;

use serde::{Deserialize, Serialize};

/// A syntactically named function-like construct and its 1-based line span.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NamedFunctionMatch {
    pub name: String,
    pub start_line: usize,
    pub end_line: usize,
}

impl NamedFunctionMatch {
    /// Number of lines the span covers beyond its first.
    pub fn span(&self) -> usize {
        self.end_line.saturating_sub(self.start_line)
    }

    /// Inclusive on both ends.
    pub fn contains(&self, line: usize) -> bool {
        line >= self.start_line && line <= self.end_line
    }

    /// Stable identity shared by the processor and review surfaces.
    pub fn key(&self) -> String {
        format!("{}-{}-{}", self.name, self.start_line, self.end_line)
    }
}

/// One identifier bound by a state-initializer call.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StateDeclarationMatch {
    pub name: String,
    pub line: usize,
}

/// A call whose callee follows the hook-naming convention.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HookCallMatch {
    pub name: String,
    pub line: usize,
}

/// An explicit type annotation, or the inferred category of an untyped initializer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataTypeMatch {
    pub type_name: String,
    pub line: usize,
}

/// The four independent fact lists produced by one scan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanReport {
    pub functions: Vec<NamedFunctionMatch>,
    pub state_declarations: Vec<StateDeclarationMatch>,
    pub hook_calls: Vec<HookCallMatch>,
    pub data_types: Vec<DataTypeMatch>,
}

impl ScanReport {
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
            && self.state_declarations.is_empty()
            && self.hook_calls.is_empty()
            && self.data_types.is_empty()
    }
}

/// Facts owned by one function under the smallest-enclosing-span rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionFactGroup {
    #[serde(rename = "fn")]
    pub function: NamedFunctionMatch,
    pub state_names: Vec<String>,
    pub hooks: Vec<HookCallMatch>,
    pub data_types: Vec<DataTypeMatch>,
}

/// Output of the grouper: one bucket per function plus the file-scope types.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupedFacts {
    pub per_function: Vec<FunctionFactGroup>,
    pub data_types_outside_functions: Vec<DataTypeMatch>,
}

/// All distinct type names recorded on one line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineTypes {
    pub line: usize,
    pub type_names: Vec<String>,
}

/// Wrapper for indented display of a value.
pub struct Indented<'a, T>(pub &'a str, pub &'a T);

impl fmt::Display for Indented<'_, NamedFunctionMatch> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Indented(indent, func) = self;
        write!(f, "{}{}  ", indent, func.name)?;
        if func.start_line == func.end_line {
            write!(f, "[L{}]", func.start_line)
        } else {
            write!(f, "[L{}-{}]", func.start_line, func.end_line)
        }
    }
}

impl fmt::Display for Indented<'_, HookCallMatch> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Indented(indent, hook) = self;
        write!(f, "{}{}  [L{}]", indent, hook.name, hook.line)
    }
}

impl fmt::Display for Indented<'_, LineTypes> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Indented(indent, row) = self;
        if let [only] = row.type_names.as_slice() {
            write!(f, "{}{}  [L{}]", indent, only, row.line)
        } else {
            write!(
                f,
                "{}{} types: {}  [L{}]",
                indent,
                row.type_names.len(),
                row.type_names.join(", "),
                row.line
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn func(name: &str, start_line: usize, end_line: usize) -> NamedFunctionMatch {
        NamedFunctionMatch {
            name: name.to_string(),
            start_line,
            end_line,
        }
    }

    #[test]
    fn span_and_containment_are_inclusive() {
        let f = func("Outer", 3, 7);
        assert_eq!(f.span(), 4);
        assert!(f.contains(3));
        assert!(f.contains(7));
        assert!(!f.contains(2));
        assert!(!f.contains(8));
    }

    #[test]
    fn key_joins_name_and_span() {
        assert_eq!(func("Page", 2, 4).key(), "Page-2-4");
    }

    #[test]
    fn serializes_with_camel_case_fields() {
        let json = serde_json::to_string(&func("App", 1, 9)).unwrap();
        assert_eq!(json, r#"{"name":"App","startLine":1,"endLine":9}"#);

        let ty = DataTypeMatch {
            type_name: "number".to_string(),
            line: 2,
        };
        assert_eq!(
            serde_json::to_string(&ty).unwrap(),
            r#"{"typeName":"number","line":2}"#
        );
    }

    #[test]
    fn group_serializes_function_under_fn() {
        let group = FunctionFactGroup {
            function: func("App", 1, 2),
            state_names: vec!["count".to_string()],
            hooks: Vec::new(),
            data_types: Vec::new(),
        };
        let value = serde_json::to_value(&group).unwrap();
        assert_eq!(value["fn"]["name"], "App");
        assert_eq!(value["stateNames"][0], "count");
    }

    #[test]
    fn indented_function_omits_range_for_single_line() {
        assert_eq!(Indented("  ", &func("f", 4, 4)).to_string(), "  f  [L4]");
        assert_eq!(Indented("", &func("g", 1, 3)).to_string(), "g  [L1-3]");
    }

    #[test]
    fn indented_line_types_lists_multiple_names() {
        let row = LineTypes {
            line: 5,
            type_names: vec!["string".to_string(), "number".to_string()],
        };
        assert_eq!(Indented("", &row).to_string(), "2 types: string, number  [L5]");
    }
}
