//! Hygiene — enforces coding standards at test time
//!
//! Scans the production sources under `src/` for antipatterns. Every
//! pattern has a budget of zero: panicking macros would kill the frame
//! loop, and silent error discards hide real failures. If one must be
//! added, an existing one has to go first — budgets never grow.

use std::fs;
use std::path::Path;

/// (pattern, what it means) — all budgets are zero.
const FORBIDDEN: &[(&str, &str)] = &[
    // Panics crash the process and stop the animation callback.
    (".unwrap()", "panics on None/Err"),
    (".expect(", "panics on None/Err"),
    ("panic!(", "explicit panic"),
    ("unreachable!(", "panics when reached"),
    ("todo!(", "unfinished stub"),
    ("unimplemented!(", "unfinished stub"),
    // Silent loss discards errors without inspecting them.
    ("let _ =", "silently discards a result"),
    (".ok()", "silently converts Err to None"),
    // Structure.
    ("#[allow(dead_code)]", "hides unused code instead of removing it"),
];

struct SourceFile {
    path: String,
    content: String,
}

/// Production `.rs` files under `src/`, excluding the `*_test.rs` units.
fn source_files() -> Vec<SourceFile> {
    let mut files = Vec::new();
    collect(Path::new("src"), &mut files);
    assert!(!files.is_empty(), "no sources found; run from the crate root");
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
fn forbidden_patterns_stay_at_zero() {
    let files = source_files();
    let mut report = String::new();

    for (pattern, why) in FORBIDDEN {
        for file in &files {
            for (line_no, line) in file.content.lines().enumerate() {
                if line.contains(pattern) {
                    report.push_str(&format!(
                        "  {}:{} contains `{pattern}` ({why})\n",
                        file.path,
                        line_no + 1,
                    ));
                }
            }
        }
    }

    assert!(report.is_empty(), "hygiene violations:\n{report}");
}
