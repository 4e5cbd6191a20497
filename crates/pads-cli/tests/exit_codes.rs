use std::process::Command;

fn bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_stretched-pads"))
}

fn error_lines(stderr: &[u8]) -> usize {
    String::from_utf8_lossy(stderr)
        .lines()
        .filter(|l| l.starts_with("error:"))
        .count()
}

#[test]
fn exit_code_usage_is_1_for_missing_output() {
    let status = bin().status().expect("run stretched-pads");
    assert_eq!(status.code(), Some(1));
}

#[test]
fn exit_code_usage_is_1_for_unknown_flag() {
    let status = bin()
        .args(["--colour", "red", "-"])
        .status()
        .expect("run stretched-pads");
    assert_eq!(status.code(), Some(1));
}

#[test]
fn help_exits_0_on_stdout() {
    let output = bin().arg("--help").output().expect("run stretched-pads");
    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--pad-spacing"), "{stdout}");
}

#[test]
fn exit_code_input_is_2_for_missing_param_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let missing = dir.path().join("nope.args");
    let output = bin()
        .arg(format!("@{}", missing.display()))
        .arg(dir.path().join("out.svg"))
        .output()
        .expect("run stretched-pads");
    assert_eq!(output.status.code(), Some(2));
    assert!(!dir.path().join("out.svg").exists());
}

#[test]
fn exit_code_input_is_2_for_invalid_parameters() {
    let dir = tempfile::tempdir().expect("tempdir");
    let out = dir.path().join("out.svg");
    let output = bin()
        .args(["-d", "0"])
        .arg(&out)
        .output()
        .expect("run stretched-pads");
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("hole diameter (0)"), "{stderr}");
    assert!(!out.exists());
}

#[test]
fn unknown_position_is_reported_by_validation() {
    let output = bin()
        .args(["--position", "diagonal", "-"])
        .output()
        .expect("run stretched-pads");
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("diagonal"));
}

#[test]
fn fail_fast_reports_one_error() {
    let output = bin()
        .args(["-d", "50", "-r", "0", "-k", "-1", "-"])
        .output()
        .expect("run stretched-pads");
    assert_eq!(output.status.code(), Some(2));
    assert_eq!(error_lines(&output.stderr), 1);
}

#[test]
fn all_errors_reports_every_violation() {
    for flag in ["--all-errors", "--debug=0x1000"] {
        let output = bin()
            .args(["-d", "50", "-r", "0", "-k", "-1", flag, "-"])
            .output()
            .expect("run stretched-pads");
        assert_eq!(output.status.code(), Some(2));
        assert_eq!(error_lines(&output.stderr), 3, "{flag}");
    }
}

#[test]
fn padding_overflow_can_be_clamped() {
    let args = ["--position", "top", "--padding", "30", "-"];
    let rejected = bin().args(args).output().expect("run stretched-pads");
    assert_eq!(rejected.status.code(), Some(2));

    let clamped = bin()
        .arg("--clamp-padding")
        .args(args)
        .output()
        .expect("run stretched-pads");
    assert_eq!(clamped.status.code(), Some(0));
}

#[test]
fn non_finite_value_is_reported_once() {
    for args in [["-d", "nan"], ["-d", "inf"], ["-w", "nan"]] {
        let output = bin()
            .args(args)
            .args(["--all-errors", "-"])
            .output()
            .expect("run stretched-pads");
        assert_eq!(output.status.code(), Some(2));
        assert_eq!(error_lines(&output.stderr), 1, "{args:?}");
    }
}

#[test]
fn oversized_row_is_rejected_before_layout() {
    let output = bin()
        .args(["-r", "4000000000", "-"])
        .output()
        .expect("run stretched-pads");
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("row pins (4000000000)"), "{stderr}");
    assert!(output.stdout.is_empty());
}
