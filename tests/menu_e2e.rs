use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// A fake module tree under a temp dir, with config lookups kept inside it.
fn setup() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path().join("module/ipmi_si/parameters");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("debugflag"), "5\n").unwrap();
    fs::write(dir.join("hotmod"), "").unwrap();
    fs::write(dir.join("timeout"), "10\n").unwrap();
    temp_dir
}

fn modparm(temp_dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("modparm").unwrap();
    cmd.env("HOME", temp_dir)
        .env("XDG_CONFIG_HOME", temp_dir.join("config"))
        .env_remove("MODPARM_ROOT")
        .env_remove("MODPARM_LOG")
        .arg("--root")
        .arg(temp_dir);
    cmd
}

fn param(temp_dir: &Path, name: &str) -> String {
    fs::read_to_string(temp_dir.join("module/ipmi_si/parameters").join(name))
        .unwrap()
        .trim()
        .to_string()
}

#[test]
fn test_toggle_bit_zero_writes_file() {
    let temp_dir = setup();

    modparm(temp_dir.path())
        .write_stdin("0\n0\n0\nq\nq\nq\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("00000101"))
        .stdout(predicate::str::contains("00000100"))
        .stdout(predicate::str::contains("hotmod").not());

    assert_eq!(param(temp_dir.path(), "debugflag"), "4");
    assert_eq!(param(temp_dir.path(), "timeout"), "10");
}

#[test]
fn test_plain_value_in_hex() {
    let temp_dir = setup();

    modparm(temp_dir.path())
        .write_stdin("0\n1\n1a\nq\nq\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("ipmi_si/timeout = 26 (0x1a)"));

    assert_eq!(param(temp_dir.path(), "timeout"), "26");
}

#[test]
fn test_decimal_radix_rejects_hex_digits() {
    let temp_dir = setup();

    modparm(temp_dir.path())
        .write_stdin("r\n0\n1\n1a\n12\nq\nq\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("radix: dec"))
        .stdout(predicate::str::contains("invalid number, try again"));

    assert_eq!(param(temp_dir.path(), "timeout"), "12");
}

#[test]
fn test_missing_modules_are_reported_not_fatal() {
    let temp_dir = setup();

    modparm(temp_dir.path())
        .write_stdin("q\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("cannot list parameters of ipmi_devintf"))
        .stdout(predicate::str::contains("(2 parameters)"))
        .stdout(predicate::str::contains("(0 parameters)"))
        // Shown once, as a message, not also as a log line.
        .stderr(predicate::str::is_empty());
}

#[test]
fn test_closed_input_ends_session() {
    let temp_dir = setup();

    modparm(temp_dir.path())
        .write_stdin("0\n1\n")
        .assert()
        .success();

    assert_eq!(param(temp_dir.path(), "timeout"), "10");
}

// XDG layout for the config directory.
#[cfg(target_os = "linux")]
#[test]
fn test_config_file_sets_modules_and_radix() {
    let temp_dir = setup();
    let config_dir = temp_dir.path().join("config/modparm");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(
        config_dir.join("modparm.toml"),
        "modules = [\"ipmi_si\"]\nradix = \"dec\"\n",
    )
    .unwrap();

    modparm(temp_dir.path())
        .write_stdin("q\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("radix: dec"))
        .stdout(predicate::str::contains("ipmi_devintf").not());
}
