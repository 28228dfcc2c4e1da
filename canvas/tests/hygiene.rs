//! Hygiene — enforces coding standards at test time.
//!
//! Scans the crate's production sources for antipatterns. Every budget is
//! zero: buffered drawing must never panic or silently drop an error, so
//! the usual escape hatches are banned outright rather than reviewed
//! case by case.

use std::fs;
use std::path::Path;

/// (pattern, what it means). Budgets are all zero.
const BANNED: &[(&str, &str)] = &[
    (".unwrap()", "panics on Err/None"),
    (".expect(", "panics on Err/None"),
    ("panic!(", "crashes the session task"),
    ("unreachable!(", "crashes the session task"),
    ("todo!(", "unfinished code path"),
    ("unimplemented!(", "unfinished code path"),
    ("let _ =", "discards a Result without inspecting it"),
    (".ok()", "discards an error without inspecting it"),
    ("#[allow(dead_code)]", "hides unused code instead of removing it"),
];

struct SourceFile {
    path: String,
    content: String,
}

/// Production `.rs` files under `src/`, excluding sibling `*_test.rs` files.
fn source_files() -> Vec<SourceFile> {
    let mut files = Vec::new();
    collect(Path::new("src"), &mut files);
    assert!(!files.is_empty(), "no sources found; is the test running from the crate root?");
    files
}

fn collect(dir: &Path, out: &mut Vec<SourceFile>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect(&path, out);
            continue;
        }
        let name = path.to_string_lossy().to_string();
        if !name.ends_with(".rs") || name.ends_with("_test.rs") {
            continue;
        }
        if let Ok(content) = fs::read_to_string(&path) {
            out.push(SourceFile { path: name, content });
        }
    }
}

#[test]
fn production_sources_are_free_of_banned_patterns() {
    let files = source_files();
    let mut violations = Vec::new();

    for (pattern, why) in BANNED {
        for file in &files {
            for (lineno, line) in file.content.lines().enumerate() {
                // cfg(test) helpers inside src files get the same scrutiny
                // as production code; only *_test.rs files are exempt.
                if line.contains(pattern) {
                    violations.push(format!(
                        "  {}:{} uses `{pattern}` ({why})",
                        file.path,
                        lineno + 1
                    ));
                }
            }
        }
    }

    assert!(
        violations.is_empty(),
        "banned patterns in production sources (budget is zero):\n{}",
        violations.join("\n")
    );
}
