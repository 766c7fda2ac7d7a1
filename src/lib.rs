//! `runway_scan`: static fact scanner for TSX documents.
//!
//! [`scan`] walks a single source text once and reports four independent
//! fact lists: named functions with their line spans, identifiers bound by
//! state-initializer calls, hook calls, and data types (explicit annotations
//! plus the inferred category of untyped literal initializers). [`group`]
//! then assigns every fact to the innermost function containing its line.
//!
//! Both are pure functions of their input. Malformed source never fails a
//! scan; it only narrows what can be found.
//!
//! ```no_run
//! let source = "function Counter() {\n  const [n, setN] = useState(0)\n}\n";
//! let report = runway_scan::scan(source);
//! let grouped = runway_scan::group(
//!     &report.functions,
//!     &report.state_declarations,
//!     &report.hook_calls,
//!     &report.data_types,
//! );
//! assert_eq!(grouped.per_function[0].state_names, vec!["n"]);
//! ```

pub mod config;
pub mod dedup;
pub mod error;
pub mod group;
pub mod lang;
pub mod line_map;
pub mod model;
pub mod output;
pub mod parser;
pub mod review;
pub mod scan;
pub mod util;

pub use config::ScanConfig;
pub use error::ScanError;
pub use group::{bucket_types_by_line, function_key, group, innermost_function_at};
pub use lang::CodeLanguage;
pub use model::{
    DataTypeMatch, FunctionFactGroup, GroupedFacts, HookCallMatch, LineTypes, NamedFunctionMatch,
    ScanReport, StateDeclarationMatch,
};
pub use output::ProcessorDigest;
pub use review::{function_source, ReadoutProgress, ReviewOutline};
pub use scan::{
    extract_data_types, extract_hook_calls, extract_named_functions, extract_state_declarations,
    is_hook_name, scan, scan_document, scan_with,
};
pub use util::{line_count, normalize_newlines};
