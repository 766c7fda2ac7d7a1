//! `runway-scan`: prints the processor summary of TSX documents.
//!
//! Scans each file for named functions, state declarations, hook calls and
//! data types, then groups the facts by their innermost enclosing function.

use std::path::Path;

use runway_scan::output::{ProcessorDigest, TSX_ONLY_MESSAGE};
use runway_scan::parser::read_document;
use runway_scan::{group, scan_document, ScanConfig, ScanError};
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
struct CliArgs {
    json: bool,
    config: ScanConfig,
    files: Vec<String>,
}

fn parse_args(args: &[String]) -> Result<CliArgs, String> {
    let mut json = false;
    let mut config = ScanConfig::default();
    let mut files = Vec::new();
    let mut i = 0;

    while i < args.len() {
        match args[i].as_str() {
            "--json" => json = true,
            "--no-infer" => config.infer_types = false,
            "--state-fn" => {
                i += 1;
                let Some(name) = args.get(i) else {
                    return Err("--state-fn requires a function name".to_string());
                };
                if name.is_empty() || name.starts_with('-') {
                    return Err(format!("--state-fn: invalid function name '{name}'"));
                }
                config.state_initializer = name.clone();
            }
            arg if arg.starts_with('-') => {
                return Err(format!("unknown option: {arg}"));
            }
            _ => files.push(args[i].clone()),
        }
        i += 1;
    }

    Ok(CliArgs {
        json,
        config,
        files,
    })
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let raw: Vec<String> = std::env::args().skip(1).collect();

    if raw.is_empty() || raw[0] == "-h" || raw[0] == "--help" {
        print_help();
        std::process::exit(0);
    }

    let args = match parse_args(&raw) {
        Ok(a) => a,
        Err(msg) => {
            eprintln!("runway-scan: {msg}");
            std::process::exit(1);
        }
    };

    if args.files.is_empty() {
        eprintln!("runway-scan: no files specified");
        std::process::exit(1);
    }

    init_tracing();

    let multi = args.files.len() > 1;
    let mut failed = false;
    for (i, path_str) in args.files.iter().enumerate() {
        if i > 0 && multi && !args.json {
            println!("\n---\n");
        }
        let result = if args.json {
            print_json(path_str, &args.config)
        } else {
            print_digest(path_str, &args.config, multi)
        };
        match result {
            Ok(()) => {}
            Err(ScanError::UnscannableLanguage(_)) => {
                eprintln!("runway-scan: {path_str}: {TSX_ONLY_MESSAGE}");
                failed = true;
            }
            Err(e) => {
                eprintln!("runway-scan: {e}");
                failed = true;
            }
        }
    }

    if failed {
        std::process::exit(1);
    }
}

fn print_digest(path_str: &str, config: &ScanConfig, with_header: bool) -> Result<(), ScanError> {
    let (source, language) = read_document(Path::new(path_str))?;
    let digest = ProcessorDigest::for_document(&source, language, config)?;
    if with_header {
        println!("{path_str}");
    }
    print!("{digest}");
    Ok(())
}

fn print_json(path_str: &str, config: &ScanConfig) -> Result<(), ScanError> {
    let (source, language) = read_document(Path::new(path_str))?;
    if !language.is_scannable() {
        return Err(ScanError::UnscannableLanguage(language));
    }
    let report = scan_document(&source, language, config);
    let grouped = group(
        &report.functions,
        &report.state_declarations,
        &report.hook_calls,
        &report.data_types,
    );
    println!("{}", serde_json::to_string_pretty(&grouped)?);
    Ok(())
}

fn print_help() {
    eprintln!("runway-scan: function, state, hook and type summary for TSX documents");
    eprintln!("Usage: runway-scan [options] <file> [file2 ...]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --json             Print the grouped facts as JSON");
    eprintln!("  --state-fn NAME    State initializer call to look for (default useState)");
    eprintln!("  --no-infer         Do not infer types of untyped initializers");
    eprintln!("  -h, --help         Show help");
    eprintln!();
    eprintln!("Logging goes to stderr and follows RUST_LOG (default warn).");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_args_defaults() {
        let args = parse_args(&["page.tsx".into()]).unwrap();
        assert!(!args.json);
        assert_eq!(args.config.state_initializer, "useState");
        assert!(args.config.infer_types);
        assert_eq!(args.files, vec!["page.tsx"]);
    }

    #[test]
    fn parse_args_json() {
        let args = parse_args(&["--json".into(), "page.tsx".into()]).unwrap();
        assert!(args.json);
    }

    #[test]
    fn parse_args_no_infer() {
        let args = parse_args(&["--no-infer".into(), "page.tsx".into()]).unwrap();
        assert!(!args.config.infer_types);
    }

    #[test]
    fn parse_args_state_fn() {
        let args = parse_args(&["--state-fn".into(), "useSignal".into(), "page.tsx".into()]).unwrap();
        assert_eq!(args.config.state_initializer, "useSignal");
        assert_eq!(args.files, vec!["page.tsx"]);
    }

    #[test]
    fn parse_args_state_fn_requires_name() {
        assert!(parse_args(&["--state-fn".into()]).is_err());
        assert!(parse_args(&["--state-fn".into(), "--json".into()]).is_err());
    }

    #[test]
    fn parse_args_unknown_option_errors() {
        let result = parse_args(&["--unknown".into(), "page.tsx".into()]);
        assert!(result.is_err());
    }

    #[test]
    fn parse_args_multiple_files() {
        let args = parse_args(&["a.tsx".into(), "--json".into(), "b.tsx".into()]).unwrap();
        assert_eq!(args.files, vec!["a.tsx", "b.tsx"]);
        assert!(args.json);
    }
}
