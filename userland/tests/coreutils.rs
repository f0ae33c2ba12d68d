use std::fs;
use std::io::Write;
use std::process::{Command, Output, Stdio};

fn run(bin: &str, args: &[&str]) -> Output {
    Command::new(bin)
        .args(args)
        .env_remove("MINIRT_LOG")
        .output()
        .unwrap()
}

#[test]
fn ls_missing_path_exits_one() {
    let root = tempfile::tempdir().unwrap();
    let missing = root.path().join("absent");
    let out = run(env!("CARGO_BIN_EXE_ls"), &[missing.to_str().unwrap()]);
    assert_eq!(out.status.code(), Some(1));
    assert!(out.stdout.is_empty());
    let err = String::from_utf8(out.stderr).unwrap();
    assert!(err.starts_with("ls: "));
    assert!(err.contains("No such file or directory"));
}

#[test]
fn ls_help_exits_zero() {
    let out = run(env!("CARGO_BIN_EXE_ls"), &["--help"]);
    assert_eq!(out.status.code(), Some(0));
    assert!(String::from_utf8(out.stdout).unwrap().starts_with("Usage: ls"));
}

#[test]
fn ls_defaults_to_current_directory() {
    let root = tempfile::tempdir().unwrap();
    fs::write(root.path().join("here"), b"").unwrap();
    let out = Command::new(env!("CARGO_BIN_EXE_ls"))
        .current_dir(root.path())
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(0));
    assert_eq!(out.stdout, b"here\n");
}

#[test]
fn ls_long_lists_dangling_symlink_with_logging_on() {
    let root = tempfile::tempdir().unwrap();
    std::os::unix::fs::symlink("nowhere", root.path().join("dangling")).unwrap();
    fs::write(root.path().join("ok"), b"").unwrap();
    let out = Command::new(env!("CARGO_BIN_EXE_ls"))
        .args(["-l", root.path().to_str().unwrap()])
        .env("MINIRT_LOG", "debug")
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(0));
    // lstat works on a dangling link, so both entries are listed and log
    // lines never reach stdout.
    let stdout = String::from_utf8(out.stdout).unwrap();
    assert_eq!(stdout.lines().count(), 2);
    assert!(stdout.contains(" dangling -> nowhere\n"));
    assert!(!stdout.contains("minirt["));
}

#[test]
fn echo_joins_arguments() {
    let out = run(env!("CARGO_BIN_EXE_echo"), &["a", "b  c", "d"]);
    assert_eq!(out.status.code(), Some(0));
    assert_eq!(out.stdout, b"a b  c d\n");

    let out = run(env!("CARGO_BIN_EXE_echo"), &["-n", "x"]);
    assert_eq!(out.stdout, b"x");
}

#[test]
fn cat_copies_files() {
    let root = tempfile::tempdir().unwrap();
    let a = root.path().join("a");
    let b = root.path().join("b");
    fs::write(&a, b"alpha\n").unwrap();
    fs::write(&b, b"beta\n").unwrap();
    let out = run(
        env!("CARGO_BIN_EXE_cat"),
        &[a.to_str().unwrap(), b.to_str().unwrap()],
    );
    assert_eq!(out.status.code(), Some(0));
    assert_eq!(out.stdout, b"alpha\nbeta\n");
}

#[test]
fn cat_reads_stdin_without_operands() {
    let mut child = Command::new(env!("CARGO_BIN_EXE_cat"))
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"piped input\n")
        .unwrap();
    let out = child.wait_with_output().unwrap();
    assert_eq!(out.status.code(), Some(0));
    assert_eq!(out.stdout, b"piped input\n");
}

#[test]
fn cat_missing_file_exits_one() {
    let root = tempfile::tempdir().unwrap();
    let missing = root.path().join("gone");
    let out = run(env!("CARGO_BIN_EXE_cat"), &[missing.to_str().unwrap()]);
    assert_eq!(out.status.code(), Some(1));
    assert_eq!(
        String::from_utf8(out.stderr).unwrap(),
        format!("cat: {}: No such file or directory\n", missing.display())
    );
}

#[test]
fn pwd_modes() {
    let root = tempfile::tempdir().unwrap();
    let physical = fs::canonicalize(root.path()).unwrap();

    let out = Command::new(env!("CARGO_BIN_EXE_pwd"))
        .arg("-P")
        .current_dir(root.path())
        .env("PWD", "/logical/view")
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(0));
    assert_eq!(out.stdout, format!("{}\n", physical.display()).into_bytes());

    let out = Command::new(env!("CARGO_BIN_EXE_pwd"))
        .current_dir(root.path())
        .env("PWD", "/logical/view")
        .output()
        .unwrap();
    assert_eq!(out.stdout, b"/logical/view\n");

    let out = run(env!("CARGO_BIN_EXE_pwd"), &["-Q"]);
    assert_eq!(out.status.code(), Some(1));
    assert_eq!(out.stderr, b"pwd: invalid option\n");
}
