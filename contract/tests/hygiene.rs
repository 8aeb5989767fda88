//! Hygiene: enforces coding standards at test time
//!
//! Scans the contract crate's production sources for panicking or
//! error-discarding constructs. The decoding boundary runs inside the page's
//! event loop, so every budget is zero.

use std::fs;
use std::path::Path;

/// (pattern, budget, label)
const BUDGETS: &[(&str, usize, &str)] = &[
    (".unwrap()", 0, "unwrap"),
    (".expect(", 0, "expect"),
    ("panic!(", 0, "panic"),
    ("unreachable!(", 0, "unreachable"),
    ("todo!(", 0, "todo"),
    ("unimplemented!(", 0, "unimplemented"),
    ("let _ =", 0, "silent discard"),
    (".ok()", 0, "dot ok"),
    ("#[allow(dead_code)]", 0, "allow dead_code"),
];

struct SourceFile {
    path: String,
    content: String,
}

fn collect_rs_files(dir: &Path, out: &mut Vec<SourceFile>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_rs_files(&path, out);
            continue;
        }
        let path_str = path.to_string_lossy().to_string();
        if !path_str.ends_with(".rs") || path_str.ends_with("_test.rs") {
            continue;
        }
        if let Ok(content) = fs::read_to_string(&path) {
            out.push(SourceFile { path: path_str, content });
        }
    }
}

fn hits(files: &[SourceFile], pattern: &str) -> Vec<(String, usize)> {
    files
        .iter()
        .map(|f| (f.path.clone(), f.content.lines().filter(|l| l.contains(pattern)).count()))
        .filter(|(_, count)| *count > 0)
        .collect()
}

#[test]
fn sources_are_found() {
    let mut files = Vec::new();
    collect_rs_files(Path::new("src"), &mut files);
    assert!(files.iter().any(|f| f.path.ends_with("lib.rs")));
}

#[test]
fn budgets_hold() {
    let mut files = Vec::new();
    collect_rs_files(Path::new("src"), &mut files);

    let mut failures = Vec::new();
    for (pattern, budget, label) in BUDGETS {
        let found = hits(&files, pattern);
        let count: usize = found.iter().map(|(_, c)| c).sum();
        if count > *budget {
            let detail = found
                .iter()
                .map(|(path, c)| format!("    {path}: {c}"))
                .collect::<Vec<_>>()
                .join("\n");
            failures.push(format!("  {label}: found {count}, max {budget}\n{detail}"));
        }
    }
    assert!(failures.is_empty(), "hygiene budgets exceeded:\n{}", failures.join("\n"));
}
