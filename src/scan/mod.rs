//! Syntax scanner: one pre-order walk over a TSX tree, four fact collectors.
//!
//! Each collector looks at the [`Shape`] of every node and keeps what it
//! recognises, de-duplicating with first-seen-wins semantics. The collectors
//! are independent of each other, so they can run together in one walk
//! ([`scan_with`]) or alone ([`extract_named_functions`] and friends).
//!
//! Nothing here fails. A source that tree-sitter cannot fully parse still
//! produces a tree with ERROR nodes, and the walk simply visits whatever
//! structure survived.

mod functions;
mod hooks;
mod node;
mod state;
mod types;

use tree_sitter::Node;

use crate::config::ScanConfig;
use crate::lang::CodeLanguage;
use crate::line_map::LineIndex;
use crate::model::{
    DataTypeMatch, HookCallMatch, NamedFunctionMatch, ScanReport, StateDeclarationMatch,
};
use crate::parser::parse_source;

pub use hooks::is_hook_name;
pub(crate) use node::{classify, Shape};

/// Per-scan state shared by every collector.
pub(crate) struct ScanContext<'a> {
    pub src: &'a [u8],
    pub lines: LineIndex,
    pub config: &'a ScanConfig,
}

/// A fact extractor fed every node of the tree in pre-order.
pub(crate) trait Collector {
    type Output;

    fn visit(&mut self, node: Node, shape: Shape, cx: &ScanContext);

    fn finish(self) -> Self::Output;
}

/// Scan with the default configuration.
pub fn scan(source: &str) -> ScanReport {
    scan_with(source, &ScanConfig::default())
}

/// Parse once and run all four collectors over the same walk.
pub fn scan_with(source: &str, config: &ScanConfig) -> ScanReport {
    let Some(parsed) = parse_source(source) else {
        return ScanReport::default();
    };
    let cx = ScanContext {
        src: source.as_bytes(),
        lines: LineIndex::new(source),
        config,
    };

    let mut functions = functions::FunctionCollector::default();
    let mut states = state::StateCollector::default();
    let mut hook_calls = hooks::HookCollector::default();
    let mut data_types = types::DataTypeCollector::default();

    for_each_node(parsed.tree.root_node(), |node| {
        let shape = classify(node);
        functions.visit(node, shape, &cx);
        states.visit(node, shape, &cx);
        hook_calls.visit(node, shape, &cx);
        data_types.visit(node, shape, &cx);
    });

    let report = ScanReport {
        functions: functions.finish(),
        state_declarations: states.finish(),
        hook_calls: hook_calls.finish(),
        data_types: data_types.finish(),
    };
    tracing::debug!(
        functions = report.functions.len(),
        states = report.state_declarations.len(),
        hooks = report.hook_calls.len(),
        data_types = report.data_types.len(),
        syntax_errors = parsed.error_count,
        "scanned source"
    );
    report
}

/// Scan a document tagged with its dialect. Only TSX documents are parsed;
/// markup and stylesheets yield the empty report.
pub fn scan_document(source: &str, language: CodeLanguage, config: &ScanConfig) -> ScanReport {
    if !language.is_scannable() {
        tracing::debug!(language = language.as_str(), "skipping unscannable document");
        return ScanReport::default();
    }
    scan_with(source, config)
}

/// Named function declarations, function-valued variables and named function expressions.
pub fn extract_named_functions(source: &str) -> Vec<NamedFunctionMatch> {
    collect_one(source, &ScanConfig::default(), functions::FunctionCollector::default())
}

/// Identifiers bound by `useState`-style calls.
pub fn extract_state_declarations(source: &str, config: &ScanConfig) -> Vec<StateDeclarationMatch> {
    collect_one(source, config, state::StateCollector::default())
}

/// Calls whose callee follows the `use[A-Z0-9_]` convention.
pub fn extract_hook_calls(source: &str) -> Vec<HookCallMatch> {
    collect_one(source, &ScanConfig::default(), hooks::HookCollector::default())
}

/// Explicit annotations plus inferred categories of untyped initializers.
pub fn extract_data_types(source: &str, config: &ScanConfig) -> Vec<DataTypeMatch> {
    collect_one(source, config, types::DataTypeCollector::default())
}

fn collect_one<C: Collector>(source: &str, config: &ScanConfig, mut collector: C) -> C::Output {
    if let Some(parsed) = parse_source(source) {
        let cx = ScanContext {
            src: source.as_bytes(),
            lines: LineIndex::new(source),
            config,
        };
        for_each_node(parsed.tree.root_node(), |node| {
            collector.visit(node, classify(node), &cx);
        });
    }
    collector.finish()
}

/// Depth-first pre-order traversal of `root` and all its descendants.
///
/// Iterative so that deeply nested input cannot exhaust the stack.
pub(crate) fn for_each_node<'t>(root: Node<'t>, mut visit: impl FnMut(Node<'t>)) {
    let mut cursor = root.walk();
    loop {
        visit(cursor.node());
        if cursor.goto_first_child() {
            continue;
        }
        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return;
            }
        }
    }
}
