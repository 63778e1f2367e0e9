// tests/no_backend_calls_outside_modules.rs
// Fails if HTTP, model-backend or keyring calls leak out of their owning modules.

use std::fs;
use std::path::{Path, PathBuf};

fn collect_rs_files(dir: &Path, files: &mut Vec<PathBuf>) {
    if let Ok(entries) = fs::read_dir(dir) {
        for e in entries.flatten() {
            let p = e.path();
            if p.is_dir() {
                collect_rs_files(&p, files);
            } else if p.extension().map(|s| s == "rs").unwrap_or(false) {
                files.push(p);
            }
        }
    }
}

fn is_under(path: &Path, module: &str) -> bool {
    let p = path.to_string_lossy();
    p.contains(&format!("/src/{}/", module)) || p.contains(&format!("\\src\\{}\\", module))
}

/// Lists `(file, pattern)` for every source file outside `module` that
/// mentions one of `patterns`.
fn offenders_outside(module: &str, patterns: &[&str]) -> Vec<(String, String)> {
    let src_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("src");
    let mut files = Vec::new();
    collect_rs_files(&src_dir, &mut files);

    let mut offenders = Vec::new();
    for file in files {
        if is_under(&file, module) {
            continue;
        }
        let content = match fs::read_to_string(&file) {
            Ok(c) => c,
            Err(_) => continue,
        };
        for pat in patterns {
            if content.contains(pat) {
                offenders.push((file.to_string_lossy().to_string(), pat.to_string()));
            }
        }
    }
    offenders
}

fn report(offenders: Vec<(String, String)>, hint: &str) {
    if !offenders.is_empty() {
        let mut msg = String::from("Calls found outside their module:\n");
        for (file, pat) in offenders {
            msg.push_str(&format!("  {} contains pattern '{}': {}\n", file, pat, hint));
        }
        panic!("{}", msg);
    }
}

#[test]
fn model_backend_calls_stay_in_ai_module() {
    let offenders = offenders_outside(
        "ai",
        &["reqwest::", "GeminiBackend", "QueryResolver", "spawn_blocking("],
    );
    report(offenders, "send an AiInsightRequested event instead");
}

#[test]
fn keyring_access_stays_in_settings_module() {
    let offenders = offenders_outside("settings", &["keyring::"]);
    report(offenders, "use settings::credentials instead");
}
