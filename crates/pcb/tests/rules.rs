use assert_cmd::Command;
use assert_fs::prelude::*;
use assert_fs::TempDir;

fn pcb() -> Command {
    let mut cmd = Command::cargo_bin("pcb").unwrap();
    cmd.env("NO_COLOR", "1");
    cmd
}

fn run(cmd: &mut Command, success: bool) -> (String, String) {
    let assert = cmd.assert();
    let assert = if success { assert.success() } else { assert.failure() };
    let output = assert.get_output();
    (
        String::from_utf8_lossy(&output.stdout).into_owned(),
        String::from_utf8_lossy(&output.stderr).into_owned(),
    )
}

#[test]
fn test_check_builtin_rules() {
    let (out, _) = run(pcb().args(["rules", "check"]), true);
    assert!(out.starts_with("OK "));
    assert!(out.contains("classification rule(s)"));
}

#[test]
fn test_check_reports_every_violation() {
    let temp = TempDir::new().unwrap();
    temp.child("rules.yaml")
        .write_str(
            r#"
net_classification_rules:
  SDC:
    keywords: [SDC]
    patterns: ['(unclosed']
    category: Storage
    signal_type: SDC
    priority: high
layout_rules:
  SDC:
    impedance: Not specified (assume single-ended impedance control)
  MIPI:
    impedance: Not specified
"#,
        )
        .unwrap();

    let (_, err) = run(
        pcb()
            .current_dir(temp.path())
            .args(["rules", "check", "--config", "rules.yaml"]),
        false,
    );
    assert!(err.contains("Configuration validation failed with 4 error(s)"));
    assert!(err.contains("Layout rule 'SDC': Impedance should include 'Ohm' or 'Ω' unit"));
    assert!(err.contains("Layout rule 'MIPI': Impedance should include 'Ohm' or 'Ω' unit"));
    assert!(err.contains("Classification rule 'SDC': invalid pattern '(unclosed'"));
    assert!(err.contains("Classification rule 'SDC': priority must be an integer"));
}

#[test]
fn test_check_unsupported_format() {
    let temp = TempDir::new().unwrap();
    temp.child("rules.toml").write_str("").unwrap();
    let (_, err) = run(
        pcb()
            .current_dir(temp.path())
            .args(["rules", "check", "-c", "rules.toml"]),
        false,
    );
    assert!(err.contains("Unsupported config file format: .toml"));
}

#[test]
fn test_init_then_check() {
    let temp = TempDir::new().unwrap();
    let (_, err) = run(
        pcb()
            .current_dir(temp.path())
            .args(["rules", "init", "custom.yaml"]),
        true,
    );
    assert!(err.contains("Wrote custom.yaml"));

    let (out, err) = run(
        pcb()
            .current_dir(temp.path())
            .args(["rules", "check", "-c", "custom.yaml"]),
        true,
    );
    assert!(out.contains("1 classification rule(s), 2 layout rule(s)"));
    assert!(!err.contains("Warning"));

    let (_, err) = run(
        pcb()
            .current_dir(temp.path())
            .args(["rules", "init", "custom.yaml"]),
        false,
    );
    assert!(err.contains("File already exists"));

    run(
        pcb()
            .current_dir(temp.path())
            .args(["rules", "init", "custom.yaml", "--force"]),
        true,
    );
}

#[test]
fn test_list_rules() {
    let (out, _) = run(pcb().args(["rules", "list"]), true);
    assert!(out.contains("Classification rules"));
    assert!(out.contains("Layout rules"));
    assert!(out.contains("90 Ohm differential"));
    assert!(out.contains("Unmatched nets: category 'Other', signal type 'Single-End', layout rule 'Default'"));
}

#[test]
fn test_classify_nets() {
    let (out, _) = run(pcb().args(["classify", "VDD_CORE", "I2C0_SCL", "TP1"]), true);
    assert!(out.contains("VDD_CORE"));
    assert!(out.contains("Communication Interface"));
    assert!(out.contains("Other"));
}
