use tree_sitter::Node;

use super::node::is_function_value;
use super::{Collector, ScanContext, Shape};
use crate::dedup::FirstSeen;
use crate::model::NamedFunctionMatch;
use crate::util::txt;

/// Collects named function-like constructs, first name wins.
///
/// Three shapes qualify:
/// - `function Name() {}` (span of the declaration, from its `export` modifier if any)
/// - `const name = () => {}` / `const name = function () {}` (span of the declarator)
/// - `function name() {}` used as an expression, anywhere
#[derive(Default)]
pub(super) struct FunctionCollector {
    found: FirstSeen<String, NamedFunctionMatch>,
}

impl FunctionCollector {
    fn add(&mut self, name: &str, span: Node, cx: &ScanContext) {
        if name.is_empty() || self.found.contains(&name.to_string()) {
            return;
        }
        let found = NamedFunctionMatch {
            name: name.to_string(),
            start_line: cx.lines.start_line(span),
            end_line: cx.lines.end_line(span),
        };
        tracing::trace!(name, start = found.start_line, end = found.end_line, "function");
        self.found.push(found.name.clone(), found);
    }
}

impl Collector for FunctionCollector {
    type Output = Vec<NamedFunctionMatch>;

    fn visit(&mut self, node: Node, shape: Shape, cx: &ScanContext) {
        match shape {
            // `export default function G() {}` may parse as an expression
            Shape::FunctionDeclaration { name: Some(name) }
            | Shape::FunctionExpression { name: Some(name) } => {
                self.add(txt(name, cx.src), with_export_modifier(node), cx);
            }
            Shape::VariableDeclarator {
                name,
                value: Some(value),
                ..
            } if name.kind() == "identifier" && is_function_value(value.kind()) => {
                self.add(txt(name, cx.src), node, cx);
            }
            _ => {}
        }
    }

    fn finish(self) -> Self::Output {
        self.found.into_vec()
    }
}

/// A declaration's span starts at its `export` / `export default` modifier.
fn with_export_modifier(declaration: Node) -> Node {
    match declaration.parent() {
        Some(parent) if parent.kind() == "export_statement" => parent,
        _ => declaration,
    }
}

#[cfg(test)]
mod tests {
    use crate::scan::extract_named_functions;

    fn names_and_spans(src: &str) -> Vec<(String, usize, usize)> {
        extract_named_functions(src)
            .into_iter()
            .map(|f| (f.name, f.start_line, f.end_line))
            .collect()
    }

    #[test]
    fn finds_function_declaration_span() {
        let src = "\nfunction Page() {\n  return 1\n}\n";
        assert_eq!(names_and_spans(src), vec![("Page".to_string(), 2, 4)]);
    }

    #[test]
    fn finds_exported_and_default_declarations() {
        let src = "export function A() {}\nexport default function B() {}\n";
        assert_eq!(
            names_and_spans(src),
            vec![("A".to_string(), 1, 1), ("B".to_string(), 2, 2)]
        );
    }

    #[test]
    fn export_modifier_on_its_own_line_starts_the_span() {
        let src = "export\nfunction F() {\n}\nexport default\n  function G() {}\n";
        assert_eq!(
            names_and_spans(src),
            vec![("F".to_string(), 1, 3), ("G".to_string(), 4, 5)]
        );
    }

    #[test]
    fn arrow_binding_uses_declarator_span() {
        let src = "const handleClick =\n  () => {\n    go()\n  }\n";
        assert_eq!(names_and_spans(src), vec![("handleClick".to_string(), 1, 4)]);
    }

    #[test]
    fn function_expression_binding_and_its_own_name_both_count() {
        let src = "const outer = function inner() {\n}\n";
        assert_eq!(
            names_and_spans(src),
            vec![("outer".to_string(), 1, 2), ("inner".to_string(), 1, 2)]
        );
    }

    #[test]
    fn named_function_expression_anywhere() {
        let src = "items.forEach(function visit(item) {\n  log(item)\n})\n";
        assert_eq!(names_and_spans(src), vec![("visit".to_string(), 1, 3)]);
    }

    #[test]
    fn nested_functions_are_found_in_discovery_order() {
        let src = "function Outer() {\n  const inner = () => {\n    return 1\n  }\n  return inner\n}\n";
        assert_eq!(
            names_and_spans(src),
            vec![("Outer".to_string(), 1, 6), ("inner".to_string(), 2, 4)]
        );
    }

    #[test]
    fn first_declaration_wins_on_duplicate_name() {
        let src = "function dup() {\n  return 1\n}\nfunction dup() {\n  return 2\n  // longer\n}\n";
        assert_eq!(names_and_spans(src), vec![("dup".to_string(), 1, 3)]);
    }

    #[test]
    fn reassignment_does_not_add_a_second_entry() {
        let src = "let run = () => 1\nrun = () => 2\nvar run = function () {}\n";
        assert_eq!(names_and_spans(src), vec![("run".to_string(), 1, 1)]);
    }

    #[test]
    fn wrapped_initializers_are_not_functions() {
        let src = "const Memo = memo(() => null)\nconst cb = useCallback(() => {}, [])\nconst p = (() => 1)\n";
        assert!(names_and_spans(src).is_empty());
    }

    #[test]
    fn destructured_binding_is_not_a_function_name() {
        let src = "const { a } = () => {}\n";
        assert!(names_and_spans(src).is_empty());
    }

    #[test]
    fn anonymous_functions_are_skipped() {
        let src = "export default function () {}\nsetTimeout(function () {}, 1)\n";
        assert!(names_and_spans(src).is_empty());
    }

    #[test]
    fn class_methods_are_not_named_functions() {
        let src = "class Store {\n  load() {\n    return 1\n  }\n}\n";
        assert!(names_and_spans(src).is_empty());
    }

    #[test]
    fn jsx_component_with_inline_handler() {
        let src = "export function App() {\n  return (\n    <button onClick={function press() {}}>go</button>\n  )\n}\n";
        assert_eq!(
            names_and_spans(src),
            vec![("App".to_string(), 1, 5), ("press".to_string(), 3, 3)]
        );
    }
}
