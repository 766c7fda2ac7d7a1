use tree_sitter::Node;

use super::{classify, Collector, ScanContext, Shape};
use crate::dedup::FirstSeen;
use crate::model::StateDeclarationMatch;
use crate::util::txt;

/// Collects identifiers bound by a state-initializer call.
///
/// Detects patterns like:
/// - `const [count, setCount] = useState(0)` → `count` (the setter is ignored)
/// - `const state = React.useState(0)` → `state`
/// - `const { a, b: renamed, ...rest } = useState(init)` → `a`, `renamed`, `rest`
#[derive(Default)]
pub(super) struct StateCollector {
    found: FirstSeen<(String, usize), StateDeclarationMatch>,
}

impl Collector for StateCollector {
    type Output = Vec<StateDeclarationMatch>;

    fn visit(&mut self, _node: Node, shape: Shape, cx: &ScanContext) {
        let Shape::VariableDeclarator {
            name,
            value: Some(value),
            ..
        } = shape
        else {
            return;
        };
        if !is_state_initializer_call(value, cx) {
            return;
        }

        for binding in bound_names(name) {
            let name = txt(binding, cx.src);
            if name.is_empty() {
                continue;
            }
            let line = cx.lines.start_line(binding);
            tracing::trace!(name, line, "state declaration");
            self.found.push(
                (name.to_string(), line),
                StateDeclarationMatch {
                    name: name.to_string(),
                    line,
                },
            );
        }
    }

    fn finish(self) -> Self::Output {
        self.found.into_vec()
    }
}

fn is_state_initializer_call(value: Node, cx: &ScanContext) -> bool {
    match classify(value) {
        Shape::Call { callee } => txt(callee, cx.src) == cx.config.state_initializer,
        _ => false,
    }
}

/// Identifier nodes a binding pattern introduces, for the three supported shapes.
fn bound_names(pattern: Node) -> Vec<Node> {
    match pattern.kind() {
        "identifier" => vec![pattern],
        "array_pattern" => first_array_element(pattern).into_iter().collect(),
        "object_pattern" => object_bindings(pattern),
        _ => Vec::new(),
    }
}

/// The first slot of `[value, setValue]`. A hole (`[, setValue]`) binds nothing.
fn first_array_element(pattern: Node) -> Option<Node> {
    let mut cursor = pattern.walk();
    for child in pattern.children(&mut cursor) {
        if child.is_extra() || child.kind() == "[" {
            continue;
        }
        return simple_binding(child);
    }
    None
}

fn object_bindings(pattern: Node) -> Vec<Node> {
    let mut names = Vec::new();
    let mut cursor = pattern.walk();
    for child in pattern.named_children(&mut cursor) {
        let binding = match child.kind() {
            "shorthand_property_identifier_pattern" => Some(child),
            // { key: local } binds `local`
            "pair_pattern" => child.child_by_field_name("value").and_then(simple_binding),
            // { local = fallback }
            "object_assignment_pattern" => child
                .child_by_field_name("left")
                .filter(|left| left.kind() == "shorthand_property_identifier_pattern"),
            "rest_pattern" => simple_binding(child),
            _ => None,
        };
        names.extend(binding);
    }
    names
}

/// A bare identifier, `name = default`, or `...name`. Nested patterns bind nothing here.
fn simple_binding(node: Node) -> Option<Node> {
    match node.kind() {
        "identifier" => Some(node),
        "assignment_pattern" => node
            .child_by_field_name("left")
            .filter(|left| left.kind() == "identifier"),
        "rest_pattern" => {
            let mut cursor = node.walk();
            let inner = node
                .named_children(&mut cursor)
                .find(|c| c.kind() == "identifier");
            inner
        }
        _ => None,
    }
}
