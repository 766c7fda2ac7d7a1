//! Closed classification of the tree-sitter node kinds the collectors inspect.

use tree_sitter::Node;

/// The handful of node categories that can contribute a fact.
///
/// Everything else is [`Shape::Other`]; the walk still descends into it.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Shape<'t> {
    /// `function f() {}`, generator declarations and overload signatures.
    FunctionDeclaration { name: Option<Node<'t>> },
    /// `function () {}` / `function named() {}` used as a value.
    FunctionExpression { name: Option<Node<'t>> },
    /// `name: Type = value` inside a `const`/`let`/`var` declaration.
    VariableDeclarator {
        name: Node<'t>,
        annotation: Option<Node<'t>>,
        value: Option<Node<'t>>,
    },
    /// A call whose callee resolves to a name: the identifier itself, or the
    /// final property of a member access.
    Call { callee: Node<'t> },
    /// The type carried by `: Type` (and its optional/predicate variants).
    TypeAnnotation { ty: Node<'t> },
    Other,
}

pub(crate) fn classify(node: Node) -> Shape {
    match node.kind() {
        "function_declaration" | "generator_function_declaration" | "function_signature" => {
            Shape::FunctionDeclaration {
                name: node.child_by_field_name("name"),
            }
        }
        "function_expression" | "generator_function" => Shape::FunctionExpression {
            name: node.child_by_field_name("name"),
        },
        "variable_declarator" => match node.child_by_field_name("name") {
            Some(name) => Shape::VariableDeclarator {
                name,
                annotation: node.child_by_field_name("type"),
                value: node.child_by_field_name("value"),
            },
            None => Shape::Other,
        },
        // tagged templates (css`...`) share the call_expression kind
        "call_expression" if !is_tagged_template(node) => node
            .child_by_field_name("function")
            .and_then(callee_name_node)
            .map_or(Shape::Other, |callee| Shape::Call { callee }),
        kind if is_annotation_kind(kind) => annotated_type(node)
            .map_or(Shape::Other, |ty| Shape::TypeAnnotation { ty }),
        _ => Shape::Other,
    }
}

/// Function-valued initializer kinds (arrow functions and function expressions).
pub(crate) fn is_function_value(kind: &str) -> bool {
    matches!(
        kind,
        "arrow_function" | "function_expression" | "generator_function"
    )
}

fn is_tagged_template(call: Node) -> bool {
    call.child_by_field_name("arguments")
        .is_some_and(|args| args.kind() == "template_string")
}

/// `useState` → the identifier; `React.useState` / `hooks?.useX` → the property.
fn callee_name_node(func: Node) -> Option<Node> {
    match func.kind() {
        "identifier" => Some(func),
        "member_expression" => func.child_by_field_name("property"),
        _ => None,
    }
}

fn is_annotation_kind(kind: &str) -> bool {
    matches!(
        kind,
        "type_annotation"
            | "opting_type_annotation"
            | "omitting_type_annotation"
            | "adding_type_annotation"
            | "asserts_annotation"
            | "type_predicate_annotation"
    )
}

/// The type node after the `:` / `?:` / `-?:` / `+?:` punctuation.
fn annotated_type(annotation: Node) -> Option<Node> {
    let mut cursor = annotation.walk();
    let ty = annotation.named_children(&mut cursor).find(|c| !c.is_extra());
    ty
}
