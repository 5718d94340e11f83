use std::{
    fs,
    path::{Path, PathBuf},
};

use tempfile::tempdir;

use arbor_cli::{Args, Direction, Format, run};

/// Collects all .toml files from a directory
fn collect_tree_files(dir: PathBuf) -> Vec<PathBuf> {
    let mut files = if let Ok(entries) = fs::read_dir(&dir) {
        entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("toml")
            })
            .collect()
    } else {
        Vec::new()
    };

    // Sort for consistent test output
    files.sort();
    files
}

/// Demo trees live at the workspace root, not inside the crate
fn demos_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("demos")
}

fn args_for(input: &Path, output: &Path, format: Format) -> Args {
    Args {
        input: input.to_string_lossy().to_string(),
        output: Some(output.to_string_lossy().to_string()),
        format,
        direction: None,
        config: None,
        log_level: "off".to_string(),
    }
}

#[test]
fn e2e_smoke_test_valid_demos() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let valid_demos = collect_tree_files(demos_path());

    assert!(!valid_demos.is_empty(), "No demo trees found in demos/");

    let mut failed_demos = Vec::new();

    for demo_path in &valid_demos {
        let stem = demo_path.file_stem().unwrap().to_string_lossy().to_string();
        for (format, extension) in [
            (Format::Text, "txt"),
            (Format::Toml, "toml"),
            (Format::Svg, "svg"),
        ] {
            let output_path = temp_dir.path().join(format!("{stem}.{extension}"));
            let args = args_for(demo_path, &output_path, format);

            match run(&args) {
                Ok(()) => {
                    let written = fs::read_to_string(&output_path).unwrap_or_default();
                    if written.is_empty() {
                        failed_demos.push((demo_path.clone(), "empty output".to_string()));
                    }
                }
                Err(e) => failed_demos.push((demo_path.clone(), e.to_string())),
            }
        }
    }

    if !failed_demos.is_empty() {
        eprintln!("\nDemo trees that failed:");
        for (path, err) in &failed_demos {
            eprintln!("  - {}: {}", path.display(), err);
        }
        panic!("{} demo run(s) failed unexpectedly", failed_demos.len());
    }
}

#[test]
fn e2e_smoke_test_error_demos() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let error_demos = collect_tree_files(demos_path().join("errors"));

    assert!(
        !error_demos.is_empty(),
        "No error demos found in demos/errors/"
    );

    let mut unexpectedly_succeeded = Vec::new();

    for demo_path in &error_demos {
        let output_filename = format!(
            "error_{}.txt",
            demo_path.file_stem().unwrap().to_string_lossy()
        );
        let output_path = temp_dir.path().join(output_filename);
        let args = args_for(demo_path, &output_path, Format::Text);

        if run(&args).is_ok() {
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
fn e2e_direction_and_config_are_applied() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("config.toml");
    fs::write(&config_path, "[layout]\nspacing_x = 50.0\nspacing_y = 30.0\n").unwrap();

    let output_path = temp_dir.path().join("chain.toml");
    let mut args = args_for(
        &demos_path().join("decorator_chain.toml"),
        &output_path,
        Format::Toml,
    );
    args.direction = Some(Direction::LeftToRight);
    args.config = Some(config_path.to_string_lossy().to_string());

    run(&args).expect("decorator chain should lay out");

    let report: toml::Table = toml::from_str(&fs::read_to_string(&output_path).unwrap()).unwrap();
    assert_eq!(report["direction"].as_str(), Some("left_to_right"));
    assert_eq!(report["root"].as_integer(), Some(10));

    // Seven layers exceed the depth threshold, so layer spacing grows by 1.2.
    let nodes = report["nodes"].as_array().unwrap();
    assert_eq!(nodes.len(), 7);
    let second_x = nodes[1]["position"]["x"].as_float().unwrap();
    assert!((second_x - 36.0).abs() < 1e-3);
}

#[test]
fn e2e_missing_input_is_an_io_error() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let args = args_for(
        &temp_dir.path().join("missing.toml"),
        &temp_dir.path().join("out.txt"),
        Format::Text,
    );

    let err = run(&args).unwrap_err();
    assert!(matches!(err, arbor::ArborError::Io(_)));
}
