//! Integration tests for strata-cli.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const FALLBACK: &str = "# No specific description for this package.\n";

/// `strata` run inside `dir`, with user config and env overrides isolated.
fn strata(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("strata").unwrap();
    cmd.current_dir(dir)
        .env("HOME", dir)
        .env("XDG_CONFIG_HOME", dir.join(".config"))
        .env_remove("RUST_LOG")
        .env_remove("STRATA_DEFAULTS__OUTPUT_DIR")
        .env_remove("STRATA_DEFAULTS__MARKER_FILE")
        .env_remove("STRATA_OUTPUT__FORMAT");
    cmd
}

fn json_stdout(cmd: &mut Command) -> serde_json::Value {
    let out = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&out).unwrap()
}

// ── help / version ────────────────────────────────────────────────────────────

#[test]
fn help_lists_subcommands() {
    let temp = TempDir::new().unwrap();
    strata(temp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("scaffold"))
        .stdout(predicate::str::contains("bootstrap"))
        .stdout(predicate::str::contains("layout"));
}

#[test]
fn version_flag() {
    let temp = TempDir::new().unwrap();
    strata(temp.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn no_arguments_is_usage_error() {
    let temp = TempDir::new().unwrap();
    strata(temp.path()).assert().code(2);
}

// ── scaffold ──────────────────────────────────────────────────────────────────

#[test]
fn scaffold_creates_documented_tree() {
    let temp = TempDir::new().unwrap();
    let out = temp.path().join("out");

    strata(temp.path())
        .args(["scaffold", "shop", "--output"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Created 22 directories and 21 marker files"));

    let models = fs::read_to_string(out.join("shop/domain/models/__init__.py")).unwrap();
    assert!(models.starts_with("# Domain models"));

    let graphql = fs::read_to_string(out.join("shop/interfaces/graphql/__init__.py")).unwrap();
    assert_eq!(graphql, FALLBACK);

    let tests_root = fs::read_to_string(out.join("tests/shop/__init__.py")).unwrap();
    assert_eq!(tests_root, FALLBACK);

    assert!(out.join("shop/application").is_dir());
    assert!(!out.join("shop/__init__.py").exists());
}

#[test]
fn scaffold_defaults_to_generated_projects() {
    let temp = TempDir::new().unwrap();

    strata(temp.path()).args(["new", "shop"]).assert().success();

    assert!(temp
        .path()
        .join("generated_projects/shop/infrastructure/db/__init__.py")
        .is_file());
    assert!(temp.path().join("generated_projects/tests/shop/domain").is_dir());
}

#[test]
fn scaffold_twice_converges() {
    let temp = TempDir::new().unwrap();
    let marker = temp.path().join("out/shop/domain/__init__.py");

    strata(temp.path()).args(["scaffold", "shop", "-o", "out"]).assert().success();
    fs::write(&marker, "edited").unwrap();
    strata(temp.path()).args(["scaffold", "shop", "-o", "out"]).assert().success();

    assert!(fs::read_to_string(&marker).unwrap().starts_with("# The domain layer"));
}

#[test]
fn scaffold_custom_marker() {
    let temp = TempDir::new().unwrap();

    strata(temp.path())
        .args(["scaffold", "shop", "-o", "out", "--marker", "README.md"])
        .assert()
        .success();

    assert!(temp.path().join("out/shop/domain/README.md").is_file());
    assert!(!temp.path().join("out/shop/domain/__init__.py").exists());
}

#[test]
fn scaffold_dry_run_writes_nothing() {
    let temp = TempDir::new().unwrap();

    strata(temp.path())
        .args(["scaffold", "shop", "-o", "out", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dry run"))
        .stdout(predicate::str::contains("domain/models/__init__.py"));

    assert!(!temp.path().join("out").exists());
}

#[test]
fn scaffold_dry_run_json() {
    let temp = TempDir::new().unwrap();

    let plan = json_stdout(strata(temp.path()).args([
        "scaffold",
        "shop",
        "-o",
        "out",
        "--dry-run",
        "--output-format",
        "json",
    ]));

    assert_eq!(plan["dry_run"], true);
    assert_eq!(plan["nodes"].as_array().unwrap().len(), 22);
}

#[test]
fn scaffold_json_reports_state() {
    let temp = TempDir::new().unwrap();

    let state = json_stdout(strata(temp.path()).args([
        "--output-format",
        "json",
        "scaffold",
        "shop",
        "-o",
        "out",
    ]));

    assert_eq!(state["markers"].as_array().unwrap().len(), 21);
    assert!(state["project_root"].as_str().unwrap().ends_with("shop"));
}

#[test]
fn quiet_scaffold_prints_nothing() {
    let temp = TempDir::new().unwrap();

    strata(temp.path())
        .args(["-q", "scaffold", "shop", "-o", "out"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn verbose_scaffold_logs_to_stderr() {
    let temp = TempDir::new().unwrap();

    strata(temp.path())
        .args(["-v", "scaffold", "shop", "-o", "out"])
        .assert()
        .success()
        .stderr(predicate::str::contains("INFO"));
}

// ── layout ────────────────────────────────────────────────────────────────────

#[test]
fn layout_table_shows_both_sections() {
    let temp = TempDir::new().unwrap();
    strata(temp.path())
        .arg("layout")
        .assert()
        .success()
        .stdout(predicate::str::contains("Project (main)"))
        .stdout(predicate::str::contains("Tests (tests)"))
        .stdout(predicate::str::contains("api_rest/"));
}

#[test]
fn layout_json_lists_every_entry() {
    let temp = TempDir::new().unwrap();
    let entries = json_stdout(strata(temp.path()).args(["ls", "--format", "json"]));

    let entries = entries.as_array().unwrap();
    assert_eq!(entries.len(), 22);
    assert!(entries
        .iter()
        .any(|e| e["path"] == "interfaces/api_rest/routes" && e["described"] == true));
}

#[test]
fn layout_csv_has_header() {
    let temp = TempDir::new().unwrap();
    strata(temp.path())
        .args(["layout", "--format", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "section,path,package,described,description\n",
        ))
        .stdout(predicate::str::contains("tests,domain,true,false,"));
}

// ── bootstrap ─────────────────────────────────────────────────────────────────

#[test]
fn bootstrap_dry_run_lists_steps_in_order() {
    let temp = TempDir::new().unwrap();

    let output = strata(temp.path())
        .args(["bootstrap", "svc", "-o", "out", "--dry-run"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let text = String::from_utf8(output).unwrap();

    let order = [
        "ensure-poetry",
        "create-project",
        "add-dev-dependencies",
        "init-git",
        "init-commitizen",
        "register-alias",
        "stage-files",
        "initial-commit",
    ];
    let positions: Vec<usize> = order.iter().map(|s| text.find(s).unwrap()).collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
    assert!(text.contains("poetry new svc"));
    assert!(!temp.path().join("out").exists());
}

#[test]
fn bootstrap_honours_config_file() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("strata.toml");
    fs::write(
        &config,
        "[bootstrap]\ndev_dependencies = []\nregister_git_alias = false\n",
    )
    .unwrap();

    strata(temp.path())
        .args(["bootstrap", "--dry-run", "--config"])
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("poetry new my_project"))
        .stdout(predicate::str::contains("add-dev-dependencies").not())
        .stdout(predicate::str::contains("register-alias").not());
}

/// Stand-ins for `poetry` and `git` that succeed silently; `poetry new NAME`
/// creates the project directory like the real tool.
#[cfg(unix)]
fn fake_toolchain(dir: &Path) -> std::ffi::OsString {
    use std::os::unix::fs::PermissionsExt;

    let bin = dir.join("bin");
    fs::create_dir_all(&bin).unwrap();
    let scripts = [
        ("poetry", "#!/bin/sh\nif [ \"$1\" = new ]; then mkdir -p \"$2\"; fi\nexit 0\n"),
        ("git", "#!/bin/sh\nexit 0\n"),
    ];
    for (name, body) in scripts {
        let path = bin.join(name);
        fs::write(&path, body).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    }

    let mut paths = vec![bin];
    if let Some(existing) = std::env::var_os("PATH") {
        paths.extend(std::env::split_paths(&existing));
    }
    std::env::join_paths(paths).unwrap()
}

#[cfg(unix)]
#[test]
fn bootstrap_json_output_is_a_single_document() {
    let temp = TempDir::new().unwrap();
    let path = fake_toolchain(temp.path());

    // poetry is "installed", so ensure-poetry is skipped and would warn.
    let state = json_stdout(
        strata(temp.path())
            .env("PATH", path)
            .args(["--output-format", "json", "bootstrap", "svc", "-o", "out", "--yes"]),
    );

    assert_eq!(state["markers"].as_array().unwrap().len(), 21);
    assert!(temp.path().join("out/svc/svc/domain/models/__init__.py").is_file());
}

// ── init / config ─────────────────────────────────────────────────────────────

#[test]
fn init_local_then_refuses_overwrite() {
    let temp = TempDir::new().unwrap();

    strata(temp.path()).args(["init", "--local"]).assert().success();
    let written = fs::read_to_string(temp.path().join(".strata.toml")).unwrap();
    assert!(written.contains("marker_file = \"__init__.py\""));

    strata(temp.path())
        .args(["init", "--local"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--force"));

    strata(temp.path())
        .args(["init", "--local", "--force"])
        .assert()
        .success();
}

#[test]
fn config_set_persists_and_applies() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("c.toml");

    strata(temp.path())
        .args(["config", "set", "defaults.marker_file", "README.md", "--config"])
        .arg(&config)
        .assert()
        .success();

    strata(temp.path())
        .args(["config", "get", "defaults.marker_file", "--config"])
        .arg(&config)
        .assert()
        .success()
        .stdout("README.md\n");

    strata(temp.path())
        .args(["scaffold", "shop", "-o", "out", "--config"])
        .arg(&config)
        .assert()
        .success();
    assert!(temp.path().join("out/shop/domain/README.md").is_file());
}

#[test]
fn local_config_file_is_picked_up() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join(".strata.toml"),
        "[defaults]\noutput_dir = \"elsewhere\"\n",
    )
    .unwrap();

    strata(temp.path()).args(["scaffold", "shop"]).assert().success();
    assert!(temp.path().join("elsewhere/shop/domain").is_dir());
}

#[test]
fn environment_overrides_files() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join(".strata.toml"),
        "[defaults]\noutput_dir = \"from_file\"\n",
    )
    .unwrap();

    strata(temp.path())
        .env("STRATA_DEFAULTS__OUTPUT_DIR", "from_env")
        .args(["scaffold", "shop"])
        .assert()
        .success();

    assert!(temp.path().join("from_env/shop").is_dir());
    assert!(!temp.path().join("from_file").exists());
}

#[test]
fn config_list_shows_dotted_keys() {
    let temp = TempDir::new().unwrap();
    strata(temp.path())
        .args(["config", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("defaults.output_dir = generated_projects"))
        .stdout(predicate::str::contains("bootstrap.register_git_alias = true"));
}

#[test]
fn config_path_prefers_local_file() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join(".strata.toml"), "").unwrap();

    strata(temp.path())
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(".strata.toml\n");
}

// ── completions ───────────────────────────────────────────────────────────────

#[test]
fn shell_completions() {
    let temp = TempDir::new().unwrap();
    strata(temp.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("strata"));
}
