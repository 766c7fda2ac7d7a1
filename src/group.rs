//! Fact-to-function grouping.
//!
//! Every fact is owned by the *smallest* function whose inclusive line span
//! contains the fact's line, so facts inside a nested callback never bleed
//! into the component that textually surrounds it. When two candidates share
//! the same span the one listed first wins.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::dedup::FirstSeen;
use crate::model::{
    DataTypeMatch, FunctionFactGroup, GroupedFacts, HookCallMatch, LineTypes, NamedFunctionMatch,
    StateDeclarationMatch,
};

/// Stable identity of a function across the processor and review surfaces.
pub fn function_key(function: &NamedFunctionMatch) -> String {
    function.key()
}

/// Index of the innermost function containing `line`.
fn owner_index(functions: &[NamedFunctionMatch], line: usize) -> Option<usize> {
    let mut best: Option<(usize, usize)> = None;
    for (i, f) in functions.iter().enumerate() {
        if !f.contains(line) {
            continue;
        }
        // strict `<` keeps the earliest candidate on equal spans
        if best.map_or(true, |(_, span)| f.span() < span) {
            best = Some((i, f.span()));
        }
    }
    best.map(|(i, _)| i)
}

/// The smallest-span function containing `line`, if any.
pub fn innermost_function_at(
    functions: &[NamedFunctionMatch],
    line: usize,
) -> Option<&NamedFunctionMatch> {
    owner_index(functions, line).map(|i| &functions[i])
}

/// Working bucket with per-kind de-duplication keys.
struct Bucket {
    states: FirstSeen<String, String>,
    hooks: FirstSeen<String, HookCallMatch>,
    types: FirstSeen<(String, usize), DataTypeMatch>,
}

impl Bucket {
    fn new() -> Self {
        Self {
            states: FirstSeen::new(),
            hooks: FirstSeen::new(),
            types: FirstSeen::new(),
        }
    }

    fn into_group(self, function: NamedFunctionMatch) -> FunctionFactGroup {
        let mut data_types = self.types.into_vec();
        data_types.sort_by(|a, b| {
            a.line
                .cmp(&b.line)
                .then_with(|| collate(&a.type_name, &b.type_name))
        });
        FunctionFactGroup {
            function,
            state_names: self.states.into_vec(),
            hooks: self.hooks.into_vec(),
            data_types,
        }
    }
}

/// Dictionary order: case-insensitive first, lowercase before uppercase on ties.
///
/// `boolean` sorts before `Props`, and `a` before `A`.
fn collate(a: &str, b: &str) -> Ordering {
    let folded = a
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase));
    folded.then_with(|| {
        a.chars()
            .map(swap_case)
            .cmp(b.chars().map(swap_case))
    })
}

fn swap_case(c: char) -> char {
    if c.is_ascii_lowercase() {
        c.to_ascii_uppercase()
    } else if c.is_ascii_uppercase() {
        c.to_ascii_lowercase()
    } else {
        c
    }
}

/// Assign every fact to its owning function.
///
/// One group per function, in input order, even when a group ends up empty.
/// State and hook facts outside every function are dropped; data types
/// outside every function land in
/// [`GroupedFacts::data_types_outside_functions`], de-duplicated by
/// `(typeName, line)` and kept in input order.
pub fn group(
    functions: &[NamedFunctionMatch],
    state_declarations: &[StateDeclarationMatch],
    hook_calls: &[HookCallMatch],
    data_types: &[DataTypeMatch],
) -> GroupedFacts {
    let mut buckets: Vec<Bucket> = functions.iter().map(|_| Bucket::new()).collect();

    for state in state_declarations {
        if let Some(i) = owner_index(functions, state.line) {
            buckets[i].states.push(state.name.clone(), state.name.clone());
        }
    }

    for hook in hook_calls {
        if let Some(i) = owner_index(functions, hook.line) {
            buckets[i].hooks.push(hook.name.clone(), hook.clone());
        }
    }

    let mut outside = FirstSeen::new();
    for ty in data_types {
        let key = (ty.type_name.clone(), ty.line);
        match owner_index(functions, ty.line) {
            Some(i) => buckets[i].types.push(key, ty.clone()),
            None => outside.push(key, ty.clone()),
        };
    }

    let per_function: Vec<FunctionFactGroup> = buckets
        .into_iter()
        .zip(functions.iter().cloned())
        .map(|(bucket, function)| bucket.into_group(function))
        .collect();

    tracing::debug!(
        functions = per_function.len(),
        outside = outside.len(),
        "grouped facts"
    );

    GroupedFacts {
        per_function,
        data_types_outside_functions: outside.into_vec(),
    }
}

/// Collapse data types into one row per line, sorted by line.
///
/// Type names within a row keep their first-appearance order.
pub fn bucket_types_by_line(types: &[DataTypeMatch]) -> Vec<LineTypes> {
    let mut by_line: BTreeMap<usize, Vec<String>> = BTreeMap::new();
    for ty in types {
        let names = by_line.entry(ty.line).or_default();
        if !names.contains(&ty.type_name) {
            names.push(ty.type_name.clone());
        }
    }
    by_line
        .into_iter()
        .map(|(line, type_names)| LineTypes { line, type_names })
        .collect()
}
