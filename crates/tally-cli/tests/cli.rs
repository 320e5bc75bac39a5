use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const SCHOOL: &str = "昨天给中心小学焊支架，数量两个，单价一百元";

/// `tally` with its config directory pointed into `home`.
fn tally(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("tally").unwrap();
    cmd.env("XDG_CONFIG_HOME", home.path());
    cmd
}

#[test]
fn parse_prints_json_draft() {
    let home = TempDir::new().unwrap();

    tally(&home)
        .args(["parse", SCHOOL, "--date", "2024-03-15"])
        .assert()
        .success()
        .stdout(predicate::str::contains("中心小学"))
        .stdout(predicate::str::contains("2024-03-14"))
        .stdout(predicate::str::contains("\"status\": \"ACTIVE\""));
}

#[test]
fn parse_csv_resolves_known_customer() {
    let home = TempDir::new().unwrap();
    let customers = home.path().join("customers.txt");
    fs::write(&customers, "中心小学\n\n红星公司\n").unwrap();

    tally(&home)
        .args(["parse", SCHOOL, "--date", "2024-03-15", "--format", "csv", "--customers"])
        .arg(&customers)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("work_date,customer,customer_status"))
        .stdout(predicate::str::contains("2024-03-14,中心小学,known,支架,2,100,200,1.00"));
}

#[test]
fn parse_rejects_recognition_failure() {
    let home = TempDir::new().unwrap();

    tally(&home)
        .args(["parse", "语音转录失败"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("speech recognition failed"));
}

#[test]
fn parse_rejects_low_confidence() {
    let home = TempDir::new().unwrap();
    let config = home.path().join("strict.json");
    fs::write(&config, r#"{"intake": {"min_confidence": 0.9}}"#).unwrap();

    tally(&home)
        .arg("--config")
        .arg(&config)
        .args(["parse", "你好"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("未知客户"))
        .stderr(predicate::str::contains("below the threshold 0.90"));
}

#[test]
fn batch_continues_past_rejected_lines() {
    let home = TempDir::new().unwrap();
    let input = home.path().join("transcripts.txt");
    let output = home.path().join("drafts.csv");
    let summary = home.path().join("summary.csv");
    fs::write(
        &input,
        format!("{SCHOOL}\n\n无法识别语音\n给张三做书架 数量4 总价20000元\n"),
    )
    .unwrap();

    tally(&home)
        .args(["batch", "--format", "csv", "--date", "2024-03-15", "--continue-on-error"])
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .arg("--summary")
        .arg(&summary)
        .assert()
        .success()
        .stderr(predicate::str::contains("line 3"));

    let drafts = fs::read_to_string(&output).unwrap();
    assert_eq!(drafts.lines().count(), 3);
    assert!(drafts.contains("张三,provisional,书架,4,5000,20000"));

    let summary = fs::read_to_string(&summary).unwrap();
    assert!(summary.contains("3,error,无法识别语音"));
}

#[test]
fn batch_stops_on_first_rejection() {
    let home = TempDir::new().unwrap();
    let input = home.path().join("transcripts.txt");
    fs::write(&input, "语音识别错误\n给张三做书架 数量4 总价20000元\n").unwrap();

    tally(&home)
        .arg("batch")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Line 1 rejected"));
}

#[test]
fn config_set_then_get() {
    let home = TempDir::new().unwrap();
    let config = home.path().join("tally.json");

    tally(&home)
        .arg("--config")
        .arg(&config)
        .args(["config", "init"])
        .assert()
        .success();

    tally(&home)
        .arg("--config")
        .arg(&config)
        .args(["config", "set", "intake.min_confidence", "0.75"])
        .assert()
        .success();

    tally(&home)
        .arg("--config")
        .arg(&config)
        .args(["config", "get", "intake.min_confidence"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0.75"));

    tally(&home)
        .arg("--config")
        .arg(&config)
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));
}

#[test]
fn config_get_unknown_key_fails() {
    let home = TempDir::new().unwrap();

    tally(&home)
        .args(["config", "get", "parser.missing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration key not found"));
}
