//! End-to-end tests for the `qtmods` binary.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

const MODULES_CONF: &str = r#"[submodule "qtbase"]
	path = qtbase
	url = ../qtbase.git
	status = essential
[submodule "qtsvg"]
	depends = qtbase
	path = qtsvg
	status = addon
[submodule "qtxml"]
	path = qtxml
	status = addon
[submodule "qtdeclarative"]
	depends = qtbase qtxml
	recommends = qtsvg
	path = qtdeclarative
	status = essential
[submodule "qtmultimedia"]
	depends = qtbase qtdeclarative
	path = qtmultimedia
	status = addon
[submodule "qtwebkit"]
	depends = qtbase
	path = qtwebkit
	status = obsolete
"#;

/// Test context with an isolated home and a project directory
struct TestContext {
    temp_dir: TempDir,
    project: PathBuf,
}

impl TestContext {
    fn new() -> Self {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        std::fs::create_dir_all(temp_dir.path().join("home")).expect("failed to create home");
        let project = temp_dir.path().join("project");
        std::fs::create_dir_all(&project).expect("failed to create project");
        Self { temp_dir, project }
    }

    fn project(&self) -> &Path {
        &self.project
    }

    fn write(&self, name: &str, content: &str) {
        std::fs::write(self.project().join(name), content).expect("failed to write file");
    }

    fn qtmods(&self, args: &[&str]) -> Output {
        let bin_path = env!("CARGO_BIN_EXE_qtmods");
        Command::new(bin_path)
            .args(args)
            .current_dir(self.project())
            .env("HOME", self.temp_dir.path().join("home"))
            .env("QTMODS_HOME", self.temp_dir.path().join("home/.qtmods"))
            .env_remove("QTMODS_CONF")
            .env_remove("QTMODS_CONFIG")
            .env_remove("RUST_LOG")
            .output()
            .expect("failed to run qtmods")
    }
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn test_help_command() {
    let ctx = TestContext::new();
    let output = ctx.qtmods(&["--help"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("Usage:"));
}

#[test]
fn test_version_command() {
    let ctx = TestContext::new();
    let output = ctx.qtmods(&["--version"]);
    assert!(output.status.success());
}

#[test]
fn test_list_json_skips_obsolete_modules() {
    let ctx = TestContext::new();
    ctx.write("qtmodules.conf", MODULES_CONF);

    let output = ctx.qtmods(&["list", "--json"]);
    assert!(output.status.success(), "{}", stderr(&output));

    let modules: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    let names: Vec<&str> = modules
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["name"].as_str().unwrap())
        .collect();
    assert_eq!(
        names,
        vec!["qtbase", "qtsvg", "qtxml", "qtdeclarative", "qtmultimedia"]
    );
}

#[test]
fn test_resolve_closes_over_dependencies() {
    let ctx = TestContext::new();
    ctx.write("qtmodules.conf", MODULES_CONF);

    let output = ctx.qtmods(&["resolve", "qtdeclarative"]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), "qtdeclarative\nqtxml\n");
}

#[test]
fn test_resolve_merges_configured_modules() {
    let ctx = TestContext::new();
    ctx.write("qtmodules.conf", MODULES_CONF);
    ctx.write("qtmods.toml", "[options]\nmodules = [\"qtsvg\"]\n");

    let output = ctx.qtmods(&["resolve", "--json", "qtxml"]);
    assert!(output.status.success(), "{}", stderr(&output));

    let enabled: Vec<String> = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(enabled, vec!["qtsvg", "qtxml"]);
}

#[test]
fn test_resolve_unknown_dependency_fails() {
    let ctx = TestContext::new();
    ctx.write(
        "qtmodules.conf",
        "[submodule \"a\"]\n\tdepends = z\n\tpath = a\n\tstatus = addon\n",
    );

    let output = ctx.qtmods(&["resolve", "a"]);
    assert!(!output.status.success());
    let err = stderr(&output);
    assert!(err.contains("'z'"), "{err}");
    assert!(err.contains("'a'"), "{err}");
}

#[test]
fn test_missing_modules_conf_fails() {
    let ctx = TestContext::new();
    let output = ctx.qtmods(&["list"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("qtmodules.conf"));
}

#[test]
fn test_malformed_modules_conf_fails() {
    let ctx = TestContext::new();
    ctx.write("qtmodules.conf", "[core]\n\tbare = true\n");

    let output = ctx.qtmods(&["list"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("submodule"));
}

#[test]
fn test_args_skip_disabled_modules_present_on_disk() {
    let ctx = TestContext::new();
    ctx.write("qtmodules.conf", MODULES_CONF);
    ctx.write(
        "qtmods.toml",
        "source_root = \"src\"\n\n[target]\nos = \"Linux\"\ncompiler = \"gcc\"\nlibcxx = \"libstdc++11\"\n",
    );
    for dir in ["qtbase", "qtsvg", "qtxml", "qtdeclarative"] {
        std::fs::create_dir_all(ctx.project().join("src").join(dir)).unwrap();
    }

    let output = ctx.qtmods(&["args", "--json", "qtdeclarative"]);
    assert!(output.status.success(), "{}", stderr(&output));

    let args: Vec<String> = serde_json::from_str(&stdout(&output)).unwrap();
    let skipped: Vec<&str> = args
        .windows(2)
        .filter(|w| w[0] == "-skip")
        .map(|w| w[1].as_str())
        .collect();
    assert_eq!(skipped, vec!["qtsvg"]);
    assert_eq!(args[0], "-shared");
}

#[test]
fn test_args_reject_invalid_options() {
    let ctx = TestContext::new();
    ctx.write("qtmodules.conf", MODULES_CONF);
    ctx.write("qtmods.toml", "[options]\ngui = false\nwidgets = true\n");

    let output = ctx.qtmods(&["args"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("widgets"));
}

#[test]
fn test_check_reports_dangling_edges() {
    let ctx = TestContext::new();
    ctx.write(
        "qtmodules.conf",
        "[submodule \"qtbase\"]\n\tpath = qtbase\n\tstatus = essential\n\
         [submodule \"qtquick3d\"]\n\tdepends = qtbase qtgone\n\tpath = qtquick3d\n\tstatus = preview\n",
    );

    let output = ctx.qtmods(&["check"]);
    assert!(!output.status.success());
    assert!(stdout(&output).contains("qtgone"));
}

#[test]
fn test_check_passes_on_valid_input() {
    let ctx = TestContext::new();
    ctx.write("qtmodules.conf", MODULES_CONF);
    ctx.write(
        "qtmods.toml",
        "[target]\nos = \"Linux\"\ncompiler = \"gcc\"\nlibcxx = \"libstdc++11\"\n",
    );

    let output = ctx.qtmods(&["check"]);
    assert!(output.status.success(), "{}{}", stdout(&output), stderr(&output));
}

#[test]
fn test_explicit_conf_flag() {
    let ctx = TestContext::new();
    std::fs::create_dir_all(ctx.project().join("qt5")).unwrap();
    std::fs::write(ctx.project().join("qt5/modules.conf"), MODULES_CONF).unwrap();

    let output = ctx.qtmods(&["--conf", "qt5/modules.conf", "resolve", "qtmultimedia"]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), "qtdeclarative\nqtmultimedia\nqtxml\n");
}

#[test]
fn test_check_warns_on_cycle_without_failing() {
    let ctx = TestContext::new();
    ctx.write(
        "qtmodules.conf",
        "[submodule \"qtbase\"]\n\tpath = qtbase\n\tstatus = essential\n\
         [submodule \"a\"]\n\tdepends = b\n\tpath = a\n\tstatus = addon\n\
         [submodule \"b\"]\n\tdepends = a\n\tpath = b\n\tstatus = addon\n",
    );
    ctx.write(
        "qtmods.toml",
        "[target]\nos = \"Linux\"\ncompiler = \"gcc\"\nlibcxx = \"libstdc++11\"\n",
    );

    let output = ctx.qtmods(&["check"]);
    assert!(output.status.success(), "{}{}", stdout(&output), stderr(&output));
    assert!(stdout(&output).contains("dependency cycle: a -> b -> a"));

    let output = ctx.qtmods(&["resolve", "a"]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), "a\nb\n");
}

#[test]
fn test_args_lines_format() {
    let ctx = TestContext::new();
    ctx.write("qtmodules.conf", MODULES_CONF);
    ctx.write(
        "qtmods.toml",
        "[target]\nos = \"Linux\"\ncompiler = \"gcc\"\nlibcxx = \"libstdc++11\"\n",
    );

    let output = ctx.qtmods(&["args", "--lines"]);
    assert!(output.status.success(), "{}", stderr(&output));
    let out = stdout(&output);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines[0], "-shared");
    assert!(lines.windows(2).any(|w| w == ["-skip", "qtsvg"]));
}

#[test]
fn test_args_shell_format_keeps_quoted_config_together() {
    let ctx = TestContext::new();
    ctx.write("qtmodules.conf", MODULES_CONF);
    ctx.write(
        "qtmods.toml",
        "[target]\nos = \"Linux\"\ncompiler = \"gcc\"\nlibcxx = \"libstdc++11\"\n\n\
         [options]\nconfig = 'QMAKE_CXXFLAGS+=\"-O2 -g\"'\n",
    );

    let output = ctx.qtmods(&["args", "--json"]);
    assert!(output.status.success(), "{}", stderr(&output));
    let args: Vec<String> = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(args.last().unwrap(), "QMAKE_CXXFLAGS+=-O2 -g");

    let output = ctx.qtmods(&["args"]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert!(stdout(&output).trim_end().ends_with("'QMAKE_CXXFLAGS+=-O2 -g'"));
}

#[test]
fn test_completions_command() {
    let ctx = TestContext::new();
    let output = ctx.qtmods(&["completions", "bash"]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert!(stdout(&output).contains("qtmods"));
}
