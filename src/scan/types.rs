use tree_sitter::Node;

use super::{Collector, ScanContext, Shape};
use crate::dedup::FirstSeen;
use crate::model::DataTypeMatch;
use crate::util::{collapse_whitespace, txt};

/// Collects data-type facts from two independent sources:
///
/// - every type annotation in the tree, recorded verbatim (whitespace
///   collapsed) at the line of the annotated type;
/// - every *untyped* variable declarator with an initializer whose shape
///   implies a primitive category, recorded at the initializer's line.
#[derive(Default)]
pub(super) struct DataTypeCollector {
    found: FirstSeen<(String, usize), DataTypeMatch>,
}

impl DataTypeCollector {
    fn add(&mut self, raw: &str, at: Node, cx: &ScanContext) {
        let type_name = collapse_whitespace(raw);
        if type_name.is_empty() {
            return;
        }
        let line = cx.lines.start_line(at);
        tracing::trace!(type_name = %type_name, line, "data type");
        self.found
            .push((type_name.clone(), line), DataTypeMatch { type_name, line });
    }
}

impl Collector for DataTypeCollector {
    type Output = Vec<DataTypeMatch>;

    fn visit(&mut self, _node: Node, shape: Shape, cx: &ScanContext) {
        match shape {
            Shape::TypeAnnotation { ty } => self.add(txt(ty, cx.src), ty, cx),
            Shape::VariableDeclarator {
                annotation: None,
                value: Some(value),
                ..
            } if cx.config.infer_types => {
                if let Some(category) = infer_category(value, cx.src) {
                    self.add(category, value, cx);
                }
            }
            _ => {}
        }
    }

    fn finish(self) -> Self::Output {
        self.found.into_vec()
    }
}

/// Primitive category implied by an initializer's syntax, if any.
///
/// Only literal-like shapes qualify; calls, identifiers, operators and
/// wrapped expressions say nothing about the value's type on their own.
fn infer_category(value: Node, src: &[u8]) -> Option<&'static str> {
    let category = match value.kind() {
        "string" | "template_string" => "string",
        // `10n` is a bigint, not a number.
        "number" if !txt(value, src).ends_with('n') => "number",
        "true" | "false" => "boolean",
        "null" => "null",
        "array" => "array",
        "object" => "object",
        "arrow_function" | "function_expression" | "generator_function" => "function",
        "undefined" => "undefined",
        "identifier" if txt(value, src) == "undefined" => "undefined",
        _ => return None,
    };
    Some(category)
}
