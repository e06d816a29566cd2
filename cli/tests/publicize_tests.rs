use cli::{run, CliError, PublicizerConfig, RunOptions};
use metadata::{JsonModuleSource, MemberAccess, MetadataError, MetadataSource, TypeVisibility};
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

fn write_image(dir: &Path, file_name: &str, image: serde_json::Value) -> PathBuf {
    let path = dir.join(file_name);
    fs::write(&path, serde_json::to_string_pretty(&image).unwrap()).unwrap();
    path
}

fn game_image() -> serde_json::Value {
    json!({
        "name": "Game",
        "references": ["Engine"],
        "types": [
            {
                "namespace": "Game",
                "name": "Player",
                "visibility": "NotPublic",
                "methods": [
                    { "name": "get_Health", "access": "Private" },
                    { "name": "set_Health", "access": "Private" },
                    { "name": "TakeDamage", "access": "Assembly" },
                    { "name": "ToString", "access": "Public" }
                ],
                "fields": [
                    { "name": "_health", "access": "Private" },
                    { "name": "Died", "access": "Private" }
                ],
                "events": [{ "name": "Died" }]
            },
            {
                "namespace": "Game",
                "name": "Inventory",
                "declaring": 0,
                "visibility": "NestedPrivate",
                "methods": [],
                "fields": [{ "name": "_items", "access": "Family" }]
            },
            { "name": "Slot", "declaring": 1, "visibility": "NestedAssembly" }
        ]
    })
}

fn setup() -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    write_image(dir.path(), "Engine.json", json!({ "name": "Engine" }));
    let input = write_image(dir.path(), "Game.json", game_image());
    (dir, input)
}

#[test]
fn test_run_writes_default_output() {
    let (dir, input) = setup();
    let options = RunOptions {
        input: input.clone(),
        ..RunOptions::default()
    };

    let outcome = run(&PublicizerConfig::default(), &options).unwrap();

    let expected = dir
        .path()
        .join("publicized_assemblies")
        .join("Game_publicized.json");
    assert_eq!(outcome.output, Some(expected.clone()));
    assert_eq!(outcome.module, "Game");
    assert_eq!(outcome.report.types, 3);
    assert_eq!(outcome.report.methods, 3);
    assert_eq!(outcome.report.getters, 1);
    assert_eq!(outcome.report.setters, 1);
    assert_eq!(outcome.report.fields, 2);

    // The output directory has no Engine.json, so skip reference checks.
    let module = JsonModuleSource::default()
        .with_require_references(false)
        .load(&expected)
        .unwrap();
    let player = module.find_type("Game.Player").unwrap();
    let inventory = module.find_type("Game.Inventory").unwrap();
    let slot = module.find_type("Slot").unwrap();
    assert_eq!(module[player].visibility(), TypeVisibility::Public);
    assert_eq!(module[inventory].visibility(), TypeVisibility::NestedPublic);
    assert_eq!(module[slot].visibility(), TypeVisibility::NestedPublic);
    assert!(module[player].methods.iter().all(|m| m.is_public()));
    assert_eq!(module[player].fields[0].access, MemberAccess::Public);
    assert_eq!(module[player].fields[1].access, MemberAccess::Private);
    assert_eq!(module[inventory].fields[0].access, MemberAccess::Public);

    // The input is left untouched.
    let original: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&input).unwrap()).unwrap();
    assert_eq!(original, game_image());
}

#[test]
fn test_rerunning_on_output_changes_nothing() {
    let (dir, input) = setup();
    let first_output = dir.path().join("first.json");
    run(
        &PublicizerConfig::default(),
        &RunOptions {
            input,
            output: Some(first_output.clone()),
            dry_run: false,
        },
    )
    .unwrap();

    let second_output = dir.path().join("second.json");
    let outcome = run(
        &PublicizerConfig::default(),
        &RunOptions {
            input: first_output.clone(),
            output: Some(second_output.clone()),
            dry_run: false,
        },
    )
    .unwrap();

    assert!(outcome.report.is_empty());
    assert_eq!(
        fs::read_to_string(&first_output).unwrap(),
        fs::read_to_string(&second_output).unwrap()
    );
}

#[test]
fn test_dry_run_writes_nothing() {
    let (dir, input) = setup();
    let outcome = run(
        &PublicizerConfig::default(),
        &RunOptions {
            input,
            output: None,
            dry_run: true,
        },
    )
    .unwrap();

    assert!(outcome.output.is_none());
    assert_eq!(outcome.report.types, 3);
    assert!(!dir.path().join("publicized_assemblies").exists());
}

#[test]
fn test_missing_reference_fails_unless_allowed() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_image(dir.path(), "Game.json", game_image());
    let options = RunOptions {
        input,
        output: None,
        dry_run: true,
    };

    let err = run(&PublicizerConfig::default(), &options).unwrap_err();
    assert!(matches!(
        err,
        CliError::Metadata(MetadataError::UnresolvedReference { .. })
    ));

    let config = PublicizerConfig::default().with_require_references(false);
    assert!(run(&config, &options).is_ok());
}

#[test]
fn test_reference_found_on_extra_search_path() {
    let game_dir = tempfile::tempdir().unwrap();
    let lib_dir = tempfile::tempdir().unwrap();
    write_image(lib_dir.path(), "Engine.json", json!({ "name": "Engine" }));
    let input = write_image(game_dir.path(), "Game.json", game_image());

    let config = PublicizerConfig::default().with_search_path(lib_dir.path());
    let outcome = run(
        &config,
        &RunOptions {
            input,
            output: None,
            dry_run: true,
        },
    )
    .unwrap();
    assert_eq!(outcome.report.fields, 2);
}

#[test]
fn test_custom_output_layout_from_config_file() {
    let (dir, input) = setup();
    let config_path = dir.path().join("publicize.toml");
    fs::write(
        &config_path,
        "output_dir_name = \"open\"\noutput_suffix = \"\"\npretty = false\n",
    )
    .unwrap();

    let config = PublicizerConfig::from_file(&config_path).unwrap();
    let outcome = run(
        &config,
        &RunOptions {
            input,
            ..RunOptions::default()
        },
    )
    .unwrap();

    let expected = dir.path().join("open").join("Game.json");
    assert_eq!(outcome.output, Some(expected.clone()));
    let text = fs::read_to_string(expected).unwrap();
    assert!(!text.contains('\n'));
}

#[test]
fn test_malformed_input_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("Broken.json");
    fs::write(&input, "[1, 2").unwrap();

    let err = run(
        &PublicizerConfig::default(),
        &RunOptions {
            input: input.clone(),
            output: None,
            dry_run: true,
        },
    )
    .unwrap_err();
    assert!(err.to_string().contains("Broken.json"));
}

#[test]
fn test_binary_prints_report() {
    let (dir, input) = setup();
    let output = dir.path().join("out.json");

    let result = Command::new(env!("CARGO_BIN_EXE_publicize"))
        .arg(&input)
        .arg(&output)
        .output()
        .unwrap();

    assert!(result.status.success());
    let stdout = String::from_utf8(result.stdout).unwrap();
    assert!(stdout.contains("Changed 3 types to public"));
    assert!(stdout.contains("Changed 3 methods to public (1 getters, 1 setters)"));
    assert!(stdout.contains("Changed 2 fields to public"));
    assert!(output.is_file());
}

#[test]
fn test_binary_json_report() {
    let (_dir, input) = setup();

    let result = Command::new(env!("CARGO_BIN_EXE_publicize"))
        .arg(&input)
        .arg("--dry-run")
        .arg("--json")
        .output()
        .unwrap();

    assert!(result.status.success());
    let report: serde_json::Value = serde_json::from_slice(&result.stdout).unwrap();
    assert_eq!(report["module"], "Game");
    assert_eq!(report["output"], serde_json::Value::Null);
    assert_eq!(report["report"]["types"], 3);
}

#[test]
fn test_binary_fails_on_missing_input() {
    let dir = tempfile::tempdir().unwrap();
    let result = Command::new(env!("CARGO_BIN_EXE_publicize"))
        .arg(dir.path().join("Nope.json"))
        .output()
        .unwrap();
    assert!(!result.status.success());
}
