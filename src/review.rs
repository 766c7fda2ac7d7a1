//! Review outline: the scroll-driven playback view over a document's functions.
//!
//! The outline is a pure projection of the grouped facts. The caller owns the
//! viewport; it feeds fractional focus lines in and reads progress and
//! partially revealed text back out.

use std::collections::HashMap;

use serde::Serialize;

use crate::group::innermost_function_at;
use crate::model::{GroupedFacts, NamedFunctionMatch};
use crate::util::slice_lines;

/// The text of lines `[start_line, end_line]` of `code`, 1-based and inclusive.
pub fn function_source(code: &str, function: &NamedFunctionMatch) -> String {
    slice_lines(code, function.start_line, function.end_line)
}

/// One function as presented in the review view.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewEntry {
    pub key: String,
    pub name: String,
    pub start_line: usize,
    pub end_line: usize,
    pub excerpt: String,
    pub state_items: Vec<String>,
    pub hook_items: Vec<String>,
    pub data_type_items: Vec<String>,
}

impl ReviewEntry {
    /// Text the readout reveals as the reader moves through the function.
    pub fn readout_source(&self) -> String {
        if self.excerpt.is_empty() {
            format!(
                "Function {} spans lines {}-{}.",
                self.name, self.start_line, self.end_line
            )
        } else {
            self.excerpt.clone()
        }
    }

    /// State names, one per line, or `stateless`.
    pub fn state_text(&self) -> String {
        join_or(&self.state_items, "stateless")
    }

    pub fn hook_text(&self) -> String {
        join_or(&self.hook_items, "hookless")
    }

    pub fn data_type_text(&self) -> String {
        join_or(&self.data_type_items, "typeless")
    }

    fn as_function(&self) -> NamedFunctionMatch {
        NamedFunctionMatch {
            name: self.name.clone(),
            start_line: self.start_line,
            end_line: self.end_line,
        }
    }
}

fn join_or(items: &[String], fallback: &str) -> String {
    if items.is_empty() {
        fallback.to_string()
    } else {
        items.join("\n")
    }
}

/// Every named function of a document, in discovery order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ReviewOutline {
    pub entries: Vec<ReviewEntry>,
}

impl ReviewOutline {
    /// Build the outline from the source text, its functions, and their grouped facts.
    ///
    /// A function with no group in `grouped` still gets an entry, with empty
    /// fact lists.
    pub fn build(source: &str, functions: &[NamedFunctionMatch], grouped: &GroupedFacts) -> Self {
        let entries = functions
            .iter()
            .map(|function| {
                let facts = grouped.per_function.iter().find(|g| g.function == *function);
                ReviewEntry {
                    key: function.key(),
                    name: function.name.clone(),
                    start_line: function.start_line,
                    end_line: function.end_line,
                    excerpt: function_source(source, function),
                    state_items: facts.map(|g| g.state_names.clone()).unwrap_or_default(),
                    hook_items: facts
                        .map(|g| g.hooks.iter().map(|h| h.name.clone()).collect())
                        .unwrap_or_default(),
                    data_type_items: facts
                        .map(|g| {
                            g.data_types
                                .iter()
                                .map(|t| format!("{} (line {})", t.type_name, t.line))
                                .collect()
                        })
                        .unwrap_or_default(),
                }
            })
            .collect();
        Self { entries }
    }

    pub fn entry(&self, key: &str) -> Option<&ReviewEntry> {
        self.entries.iter().find(|e| e.key == key)
    }

    /// Innermost entry containing `line`, same tie-break as grouping.
    pub fn entry_at_line(&self, line: usize) -> Option<&ReviewEntry> {
        let functions: Vec<NamedFunctionMatch> =
            self.entries.iter().map(ReviewEntry::as_function).collect();
        let key = innermost_function_at(&functions, line)?.key();
        self.entry(&key)
    }

    /// Prefix of the entry's readout text proportional to `progress`.
    ///
    /// Counts characters, not bytes. Unknown keys read as empty.
    pub fn readout_text(&self, key: &str, progress: f64) -> String {
        let Some(entry) = self.entry(key) else {
            return String::new();
        };
        let text = entry.readout_source();
        let total = text.chars().count();
        let shown = (total as f64 * clamp_unit(progress)).floor() as usize;
        text.chars().take(shown).collect()
    }

    /// How far a fractional 1-based focus line has moved through the entry.
    pub fn progress_at(&self, key: &str, focus_line: f64) -> Option<f64> {
        let entry = self.entry(key)?;
        let top = entry.start_line.saturating_sub(1) as f64;
        let bottom = entry.end_line as f64;
        let raw = (focus_line - top) / (bottom - top).max(1.0);
        Some(clamp_unit(raw))
    }
}

fn clamp_unit(p: f64) -> f64 {
    if p.is_nan() {
        0.0
    } else {
        p.clamp(0.0, 1.0)
    }
}

/// Per-function reading progress. Progress never moves backwards.
#[derive(Debug, Clone, Default)]
pub struct ReadoutProgress {
    by_key: HashMap<String, f64>,
}

impl ReadoutProgress {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `progress` for `key`, keeping the highest value seen. Returns the stored value.
    pub fn advance(&mut self, key: &str, progress: f64) -> f64 {
        let progress = clamp_unit(progress);
        let slot = self.by_key.entry(key.to_string()).or_insert(0.0);
        if progress > *slot {
            *slot = progress;
        }
        *slot
    }

    pub fn get(&self, key: &str) -> f64 {
        self.by_key.get(key).copied().unwrap_or(0.0)
    }

    /// Keys fully read, limited to entries still in `outline`, in outline order.
    pub fn completed_keys<'o>(&self, outline: &'o ReviewOutline) -> Vec<&'o str> {
        outline
            .entries
            .iter()
            .filter(|e| self.get(&e.key) >= 1.0)
            .map(|e| e.key.as_str())
            .collect()
    }

    pub fn reset(&mut self) {
        self.by_key.clear();
    }
}
