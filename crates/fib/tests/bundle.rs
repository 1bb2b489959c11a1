use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn fib(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("fib").expect("binary exists");
    cmd.current_dir(dir)
        .env("XDG_CONFIG_HOME", dir.join(".xdg"))
        .env("HOME", dir.join(".home"))
        .env_remove("FIB_OUTPUT")
        .env_remove("FIB_SORT")
        .env_remove("FIB_AUTHOR");
    cmd
}

fn workspace() -> TempDir {
    let temp = tempfile::tempdir().expect("temp dir");
    // Stops the workspace config lookup from walking above the temp dir.
    fs::create_dir_all(temp.path().join(".git")).expect("git marker");
    temp
}

#[test]
fn bundles_python_files_byte_for_byte() {
    let temp = workspace();
    fs::write(temp.path().join("a.py"), "print(1)").unwrap();
    fs::write(temp.path().join("b.py"), "print(2)\n\n").unwrap();
    fs::write(temp.path().join("c.rs"), "fn main() {}").unwrap();

    fib(temp.path())
        .args(["bundle", "-l", "python"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Bundle created successfully"))
        .stdout(predicate::str::contains("2 file(s) bundled, 0 skipped"));

    let written = fs::read_to_string(temp.path().join("bundle.txt")).unwrap();
    assert_eq!(written, "print(1)\n\nprint(2)\n\n\n");
}

#[test]
fn notes_author_and_empty_line_removal() {
    let temp = workspace();
    fs::create_dir_all(temp.path().join("src/bin")).unwrap();
    fs::write(temp.path().join("src/main.rs"), "fn main() {\n\n    run();\n}\n").unwrap();
    fs::write(temp.path().join("src/lib.rs"), "pub fn run() {}\n").unwrap();
    fs::write(temp.path().join("src/bin/tool.rs"), "fn tool() {}\n").unwrap();

    fib(temp.path())
        .args(["bundle", "-l", "RUST", "-o", "ctx.txt", "-n", "-r", "-a", "Jane Doe"])
        .assert()
        .success();

    let written = fs::read_to_string(temp.path().join("ctx.txt")).unwrap();
    insta::assert_snapshot!(written.trim_end(), @r"
    // Author: Jane Doe
    // Source: src/lib.rs
    pub fn run() {}

    // Source: src/main.rs
    fn main() {
        run();
    }
    ");
}

#[test]
fn unknown_language_is_rejected_without_output() {
    let temp = workspace();
    fs::write(temp.path().join("a.py"), "print(1)").unwrap();

    fib(temp.path())
        .args(["bundle", "-l", "python", "cobol"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid languages specified: cobol"))
        .stderr(predicate::str::contains("csharp"));

    assert!(!temp.path().join("bundle.txt").exists());
}

#[test]
fn invalid_sort_is_rejected() {
    let temp = workspace();

    fib(temp.path())
        .args(["bundle", "-l", "go", "-s", "size"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("size"));
}

#[test]
fn missing_output_directory_is_rejected() {
    let temp = workspace();
    fs::write(temp.path().join("main.go"), "package main").unwrap();

    fib(temp.path())
        .args(["bundle", "-l", "go", "-o", "nowhere/bundle.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn oversized_author_is_rejected() {
    let temp = workspace();
    let author = "a".repeat(101);

    fib(temp.path())
        .args(["bundle", "-l", "go", "-a", author.as_str()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot exceed 100 characters"));
}

#[test]
fn unreadable_files_are_skipped_with_a_warning() {
    let temp = workspace();
    fs::write(temp.path().join("good.cs"), "class Good {}").unwrap();
    fs::write(temp.path().join("bad.cs"), [0xc3_u8, 0x28, 0xa0]).unwrap();

    fib(temp.path())
        .args(["bundle", "-l", "csharp"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 file(s) bundled, 1 skipped"))
        .stderr(predicate::str::contains("bad.cs"));

    let written = fs::read_to_string(temp.path().join("bundle.txt")).unwrap();
    assert_eq!(written, "class Good {}\n\n");
}

#[test]
fn workspace_config_supplies_defaults() {
    let temp = workspace();
    fs::create_dir_all(temp.path().join(".fib")).unwrap();
    fs::write(
        temp.path().join(".fib/config.toml"),
        "[bundle]\noutput = \"from-config.txt\"\nauthor = \"Config Author\"\n",
    )
    .unwrap();
    fs::write(temp.path().join("app.ts"), "export {}").unwrap();

    fib(temp.path())
        .args(["bundle", "-l", "typescript"])
        .assert()
        .success();

    let written = fs::read_to_string(temp.path().join("from-config.txt")).unwrap();
    assert_eq!(written, "// Author: Config Author\nexport {}\n\n");
}

#[test]
fn response_file_arguments_are_replayed() {
    let temp = workspace();
    fs::write(temp.path().join("b.sh"), "echo b").unwrap();
    fs::write(temp.path().join("a.kt"), "fun a() {}").unwrap();
    fs::write(
        temp.path().join("opts.rsp"),
        " -l shell kotlin  -o \"my bundle.txt\" -s type ",
    )
    .unwrap();

    fib(temp.path())
        .args(["bundle", "@opts.rsp"])
        .assert()
        .success();

    let written = fs::read_to_string(temp.path().join("my bundle.txt")).unwrap();
    assert_eq!(written, "fun a() {}\n\necho b\n\n");
}

#[test]
fn verbose_run_logs_expanded_response_files() {
    let temp = workspace();
    fs::write(temp.path().join("main.go"), "package main").unwrap();
    fs::write(temp.path().join("go.rsp"), "-l go\n").unwrap();

    fib(temp.path())
        .args(["-v", "bundle", "@go.rsp"])
        .assert()
        .success()
        .stderr(predicate::str::contains("expanded response file"));
}

#[test]
fn negated_flags_override_workspace_config() {
    let temp = workspace();
    fs::create_dir_all(temp.path().join(".fib")).unwrap();
    fs::write(
        temp.path().join(".fib/config.toml"),
        "[bundle]\nnote = true\nremove_empty_lines = true\n",
    )
    .unwrap();
    fs::write(temp.path().join("a.rb"), "a\n\nb\n").unwrap();

    fib(temp.path())
        .args(["bundle", "-l", "ruby", "--no-note", "--no-remove-empty-lines"])
        .assert()
        .success();

    let written = fs::read_to_string(temp.path().join("bundle.txt")).unwrap();
    assert_eq!(written, "a\n\nb\n\n");
}

#[test]
fn rerunning_does_not_bundle_previous_output() {
    let temp = workspace();
    fs::write(temp.path().join("main.py"), "run()").unwrap();

    for _ in 0..2 {
        fib(temp.path())
            .args(["bundle", "-l", "python", "-o", "bundle.py"])
            .assert()
            .success();
    }

    let written = fs::read_to_string(temp.path().join("bundle.py")).unwrap();
    assert_eq!(written, "run()\n\n");
}
