use std::env;
use std::process::ExitCode;

use serde_json::{json, Value};
use storyline::{
    prepare_chapters, validate_timeline_json, ChapterSeq, PreparedChapter, ValidationDiagnostic,
    ValidationSeverity,
};

const USAGE: &str = "storyline -- timeline data inspection

USAGE:
    storyline <command> <data.json> [flags]

COMMANDS:
    info <data.json>                  Title and chapter summary in final order
    chapters <data.json> [--ndjson]   Prepared chapter records
    validate <data.json> [--strict]   Structured diagnostics

FLAGS:
    --pretty    Pretty-print JSON output
    --help      Show this help
";

fn main() -> ExitCode {
    let args: Vec<String> = env::args().skip(1).collect();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("error: {}", message);
            ExitCode::FAILURE
        }
    }
}

fn run(mut args: Vec<String>) -> Result<(), String> {
    if args.is_empty() || args.iter().any(|a| a == "--help" || a == "-h") {
        print!("{}", USAGE);
        return Ok(());
    }

    let pretty = pop_flag(&mut args, "--pretty");
    if args.is_empty() {
        return Err("missing command; run `storyline --help` for usage".to_string());
    }
    let cmd = args.remove(0);
    let rest = args;

    match cmd.as_str() {
        "info" => {
            let path = first_arg(&rest, "info requires <data.json>")?;
            let text = read_data(&path)?;
            let document = storyline::parse_document(&text).map_err(display_err)?;
            let chrome = document.chrome();
            let prepared = prepare_chapters(&ChapterSeq::from_document(document));
            let output = json!({
                "data": path,
                "title": chrome.title,
                "intro_title": chrome.intro_title,
                "chapter_count": prepared.len(),
                "chapters": prepared
                    .iter()
                    .map(|c| json!({"number": c.number, "title": c.title}))
                    .collect::<Vec<_>>(),
            });
            print_json(&output, pretty);
        }
        "chapters" => {
            let mut rest = rest;
            let ndjson = pop_flag(&mut rest, "--ndjson");
            let path = first_arg(&rest, "chapters requires <data.json>")?;
            let text = read_data(&path)?;
            let document = storyline::parse_document(&text).map_err(display_err)?;
            let prepared = prepare_chapters(&ChapterSeq::from_document(document));
            if ndjson {
                for chapter in &prepared {
                    println!("{}", chapter_json(chapter));
                }
            } else {
                let output = json!({
                    "data": path,
                    "count": prepared.len(),
                    "chapters": prepared.iter().map(chapter_json).collect::<Vec<_>>(),
                });
                print_json(&output, pretty);
            }
        }
        "validate" => {
            let mut rest = rest;
            let strict = pop_flag(&mut rest, "--strict");
            let path = first_arg(&rest, "validate requires <data.json>")?;
            let text = read_data(&path)?;
            let report = validate_timeline_json(&text).map_err(display_err)?;

            let output = json!({
                "data": path,
                "valid": report.is_valid(),
                "error_count": report.error_count(),
                "warning_count": report.warning_count(),
                "diagnostics": report
                    .diagnostics()
                    .iter()
                    .map(diagnostic_json)
                    .collect::<Vec<_>>(),
            });
            print_json(&output, pretty);

            let has_failures = if strict {
                report.error_count() > 0 || report.warning_count() > 0
            } else {
                report.error_count() > 0
            };
            if has_failures {
                return Err(if strict {
                    "validation failed (strict mode)".to_string()
                } else {
                    "validation failed".to_string()
                });
            }
        }
        _ => {
            return Err(format!(
                "unknown command '{}'; run `storyline --help` for usage",
                cmd
            ));
        }
    }

    Ok(())
}

fn read_data(path: &str) -> Result<String, String> {
    std::fs::read_to_string(path).map_err(|e| format!("failed to read {}: {}", path, e))
}

fn print_json(value: &Value, pretty: bool) {
    if pretty {
        println!("{:#}", value);
    } else {
        println!("{}", value);
    }
}

fn first_arg(args: &[String], msg: &str) -> Result<String, String> {
    args.first().cloned().ok_or_else(|| msg.to_string())
}

fn pop_flag(args: &mut Vec<String>, flag: &str) -> bool {
    if let Some(pos) = args.iter().position(|a| a == flag) {
        args.remove(pos);
        true
    } else {
        false
    }
}

fn display_err(err: impl std::fmt::Display) -> String {
    err.to_string()
}

fn chapter_json(chapter: &PreparedChapter) -> Value {
    json!({
        "number": chapter.number,
        "anchor": chapter.anchor,
        "title": chapter.title,
        "image": chapter.image.as_ref().map(|i| json!({"src": i.src, "alt": i.alt})),
        "paragraph_count": chapter.paragraphs.len(),
        "metadata": chapter.metadata,
    })
}

fn diagnostic_json(diagnostic: &ValidationDiagnostic) -> Value {
    json!({
        "code": diagnostic.code,
        "severity": match diagnostic.severity {
            ValidationSeverity::Error => "error",
            ValidationSeverity::Warning => "warning",
        },
        "message": diagnostic.message,
        "location": diagnostic.location,
        "hint": diagnostic.hint,
    })
}
