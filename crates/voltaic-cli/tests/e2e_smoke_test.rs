use std::{fs, path::PathBuf};

use tempfile::tempdir;

use voltaic_cli::{Args, Emit};

fn demos_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../demos")
}

/// Collects all .json files from a directory
fn collect_json_files(dir: PathBuf) -> Vec<PathBuf> {
    let mut files = if let Ok(entries) = fs::read_dir(&dir) {
        entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("json")
            })
            .collect()
    } else {
        Vec::new()
    };

    // Sort for consistent test output
    files.sort();
    files
}

fn args_for(input: &PathBuf, output: PathBuf, emit: Emit) -> Args {
    Args {
        input: input.to_string_lossy().to_string(),
        output: output.to_string_lossy().to_string(),
        config: None,
        emit,
        log_level: "off".to_string(),
    }
}

#[test]
fn e2e_smoke_test_valid_demos() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let valid_demos = collect_json_files(demos_dir());
    assert!(!valid_demos.is_empty(), "No demos found in demos/");

    let mut failed_demos = Vec::new();

    for demo_path in &valid_demos {
        let stem = demo_path.file_stem().unwrap().to_string_lossy().to_string();
        let output_path = temp_dir.path().join(format!("{stem}.svg"));

        match voltaic_cli::run(&args_for(demo_path, output_path.clone(), Emit::Svg)) {
            Ok(()) => {
                let svg = fs::read_to_string(&output_path).expect("Output should exist");
                assert!(svg.contains("<svg"), "{stem}: output should be SVG");
                assert!(svg.contains("id=\"circuit\""), "{stem}: missing circuit group");
            }
            Err(e) => failed_demos.push((demo_path.clone(), e)),
        }
    }

    if !failed_demos.is_empty() {
        eprintln!("\nValid demos that failed:");
        for (path, err) in &failed_demos {
            eprintln!("  - {}: {}", path.display(), err);
        }
        panic!("{} valid demo(s) failed unexpectedly", failed_demos.len());
    }
}

#[test]
fn e2e_smoke_test_layout_output() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let input = demos_dir().join("voltage_divider.json");
    let output_path = temp_dir.path().join("layout.json");

    voltaic_cli::run(&args_for(&input, output_path.clone(), Emit::Layout))
        .expect("Layout export should succeed");

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&output_path).expect("Output should exist"))
            .expect("Output should be JSON");
    assert_eq!(json["components"][0]["id"], "V1");
    assert_eq!(json["nets"][2]["id"], "GND");
}

#[test]
fn e2e_smoke_test_error_demos() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let error_demos = collect_json_files(demos_dir().join("errors"));
    assert!(!error_demos.is_empty(), "No error demos found in demos/errors/");

    let mut unexpectedly_succeeded = Vec::new();

    for demo_path in &error_demos {
        let stem = demo_path.file_stem().unwrap().to_string_lossy().to_string();
        let output_path = temp_dir.path().join(format!("error_{stem}.svg"));

        if voltaic_cli::run(&args_for(demo_path, output_path, Emit::Svg)).is_ok() {
            unexpectedly_succeeded.push(demo_path.clone());
        }
    }

    if !unexpectedly_succeeded.is_empty() {
        eprintln!("\nError demos that unexpectedly succeeded:");
        for path in &unexpectedly_succeeded {
            eprintln!("  - {}", path.display());
        }
        panic!(
            "{} error demo(s) succeeded unexpectedly",
            unexpectedly_succeeded.len()
        );
    }
}

#[test]
fn e2e_missing_input_fails() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let input = temp_dir.path().join("does-not-exist.json");
    let result = voltaic_cli::run(&args_for(&input, temp_dir.path().join("out.svg"), Emit::Svg));
    assert!(matches!(result, Err(voltaic::VoltaicError::Io(_))));
}
