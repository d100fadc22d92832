use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;

fn hickory() -> Command {
    let mut cmd = Command::cargo_bin("hickory").unwrap();
    cmd.env("HICKORY_BACKEND", "headless").env_remove("HICKORY_CONFIG");
    cmd
}

#[test]
fn test_plot_to_svg() {
    let dir = tempfile::tempdir().unwrap();
    let data = dir.path().join("data.txt");
    fs::write(&data, "# x y err\n1 1 0.1\n2 4 0.2\n3 9 0.3\n").unwrap();
    let out = dir.path().join("out.svg");

    hickory()
        .arg("plot")
        .arg(&data)
        .args(["--yerr", "3", "--title", "squares", "-o"])
        .arg(&out)
        .assert()
        .success();

    let svg = fs::read_to_string(&out).unwrap();
    assert!(svg.contains("<svg"));
    assert!(svg.contains("squares"));
}

#[test]
fn test_hist_to_png() {
    let dir = tempfile::tempdir().unwrap();
    let data = dir.path().join("values.csv");
    fs::write(&data, "1.0\n2.5\n2.7\n3.1\n4.0\n").unwrap();
    let out = dir.path().join("hist.png");

    hickory()
        .arg("hist")
        .arg(&data)
        .args(["--bins", "4", "-o"])
        .arg(&out)
        .assert()
        .success();

    assert!(fs::metadata(&out).unwrap().len() > 0);
}

#[test]
fn test_ragged_input_names_line() {
    let dir = tempfile::tempdir().unwrap();
    let data = dir.path().join("bad.txt");
    fs::write(&data, "1 2\n3 4\n5\n").unwrap();

    hickory()
        .arg("plot")
        .arg(&data)
        .arg("-o")
        .arg(dir.path().join("out.svg"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Ragged line 3"));
}

#[test]
fn test_show_headless_fails() {
    let dir = tempfile::tempdir().unwrap();
    let data = dir.path().join("data.txt");
    fs::write(&data, "1 2\n3 4\n").unwrap();

    hickory()
        .arg("plot")
        .arg(&data)
        .arg("--show")
        .assert()
        .failure()
        .stderr(predicate::str::contains("interactive display disabled"));
}

#[test]
fn test_backend_reports_forced_headless() {
    hickory()
        .arg("backend")
        .assert()
        .success()
        .stdout(predicate::str::contains("headless (forced)"));
}

#[test]
fn test_unknown_extension() {
    let dir = tempfile::tempdir().unwrap();
    let data = dir.path().join("data.txt");
    fs::write(&data, "1 2\n").unwrap();

    hickory()
        .arg("plot")
        .arg(&data)
        .arg("-o")
        .arg(dir.path().join("out.pdf"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported output format"));
}
