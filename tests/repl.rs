use std::{
    fs,
    io::Write,
    path::Path,
    process::{Command, Output, Stdio},
};

use tempfile::TempDir;

/// Feed `input` to the shell on stdin with an isolated home directory.
fn run_in(home: &Path, input: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_conch"))
        .current_dir(home)
        .env("HOME", home)
        .env("PATH", "/bin:/usr/bin")
        .env("TERM", "xterm")
        .env_remove("HISTFILE")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("shell should start");

    child
        .stdin
        .take()
        .unwrap()
        .write_all(input.as_bytes())
        .unwrap();
    child.wait_with_output().unwrap()
}

fn run(input: &str) -> (TempDir, Output) {
    let home = TempDir::new().unwrap();
    let output = run_in(home.path(), input);
    (home, output)
}

/// Output lines with any echoed prompts removed.
fn lines(bytes: &[u8]) -> Vec<String> {
    String::from_utf8_lossy(bytes)
        .lines()
        .map(|line| {
            let mut line = line;
            while let Some(rest) = line.strip_prefix("$ ") {
                line = rest;
            }
            line.to_string()
        })
        .filter(|line| !line.is_empty() && line != "$")
        .collect()
}

#[test]
fn echo_and_quoting() {
    let (_home, out) = run("echo hello   world\necho 'a  b' \"c\\\"d\" e\\ f\n");
    assert_eq!(lines(&out.stdout), vec!["hello world", "a  b c\"d e f"]);
    assert!(out.status.success());
}

#[test]
fn type_reports_builtins_and_missing() {
    let (_home, out) = run("type echo\ntype nosuchcmd\n");
    assert_eq!(
        lines(&out.stdout),
        vec!["echo is a shell builtin", "nosuchcmd: not found"]
    );
}

#[test]
fn pwd_and_cd() {
    let (home, out) = run("mkdir sub\ncd sub\npwd\ncd /no/such/place\ncd ~\npwd\n");
    let home = home.path().display().to_string();
    assert_eq!(lines(&out.stdout), vec![format!("{home}/sub"), home]);
    assert_eq!(
        lines(&out.stderr),
        vec!["cd: /no/such/place: No such file or directory"]
    );
}

#[test]
fn unknown_command_keeps_running() {
    let (_home, out) = run("nosuchcmd a b\necho after\n");
    assert_eq!(lines(&out.stderr), vec!["nosuchcmd: command not found"]);
    assert_eq!(lines(&out.stdout), vec!["after"]);
}

#[test]
fn pipelines() {
    let (_home, out) = run("echo hello | cat\npwd | wc -l\nnosuchcmd | echo hi\n");
    let stdout: Vec<String> = lines(&out.stdout).iter().map(|l| l.trim().to_string()).collect();
    assert_eq!(stdout, vec!["hello", "1"]);
    assert_eq!(lines(&out.stderr), vec!["nosuchcmd: command not found"]);
}

#[test]
fn pipeline_syntax_error() {
    let (_home, out) = run("echo a |\n");
    assert_eq!(
        lines(&out.stderr),
        vec!["conch: syntax error near unexpected token `|'"]
    );
}

#[test]
fn history_is_numbered() {
    let (_home, out) = run("echo one\necho two\nhistory\nhistory 1\n");
    assert_eq!(
        lines(&out.stdout),
        vec![
            "one",
            "two",
            "   1 echo one",
            "   2 echo two",
            "   3 history",
            "   4 history 1",
        ]
    );
}

#[test]
fn redirection_writes_files() {
    let (home, out) = run("echo saved > out/a.txt\necho more >> out/a.txt\nls nothing-here 2> err.txt\n");
    assert!(out.stdout.is_empty() || lines(&out.stdout).is_empty());
    assert_eq!(
        fs::read_to_string(home.path().join("out/a.txt")).unwrap(),
        "saved\nmore\n"
    );
    let err = fs::read_to_string(home.path().join("err.txt")).unwrap();
    assert!(err.contains("nothing-here"));
}

#[test]
fn exit_status() {
    let (_home, out) = run("exit 7\necho unreachable\n");
    assert_eq!(out.status.code(), Some(7));
    assert!(lines(&out.stdout).is_empty());

    let (_home, out) = run("exit nope\necho still here\n");
    assert_eq!(out.status.code(), Some(0));
    assert_eq!(lines(&out.stdout), vec!["still here"]);
    assert_eq!(
        lines(&out.stderr),
        vec!["exit: nope: numeric argument required"]
    );
}

#[test]
fn end_of_input_exits_cleanly() {
    let (_home, out) = run("echo bye\n");
    assert_eq!(out.status.code(), Some(0));
}

#[test]
fn rc_file_runs_at_startup() {
    let home = TempDir::new().unwrap();
    fs::create_dir(home.path().join("work")).unwrap();
    fs::write(home.path().join(".conchrc"), "# comment\ncd work\n").unwrap();

    let out = run_in(home.path(), "pwd\nhistory\n");
    assert_eq!(
        lines(&out.stdout),
        vec![
            home.path().join("work").display().to_string(),
            "   1 pwd".to_string(),
            "   2 history".to_string(),
        ]
    );
}

#[test]
fn histfile_round_trip() {
    let home = TempDir::new().unwrap();
    let histfile = home.path().join("hist");
    fs::write(&histfile, "echo earlier\n").unwrap();

    let mut child = Command::new(env!("CARGO_BIN_EXE_conch"))
        .current_dir(home.path())
        .env("HOME", home.path())
        .env("TERM", "xterm")
        .env("HISTFILE", &histfile)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"history\nexit\n")
        .unwrap();
    let out = child.wait_with_output().unwrap();

    assert_eq!(
        lines(&out.stdout),
        vec!["   1 echo earlier", "   2 history"]
    );
    assert_eq!(
        fs::read_to_string(&histfile).unwrap(),
        "echo earlier\nhistory\nexit\n"
    );
}
