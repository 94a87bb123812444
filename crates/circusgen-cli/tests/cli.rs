use std::fs;
use std::path::PathBuf;
use std::process::Command;

fn temp_out_dir(label: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    dir.push(format!("circusgen_cli_{label}_{}", uuid::Uuid::new_v4()));
    dir
}

fn line_count(path: &PathBuf) -> usize {
    fs::read_to_string(path)
        .unwrap_or_else(|_| panic!("read {}", path.display()))
        .lines()
        .count()
}

#[test]
fn generate_writes_tables_and_summary() {
    let out_dir = temp_out_dir("generate");
    let output = Command::new(env!("CARGO_BIN_EXE_circusgen"))
        .args(["-c", "12", "-s", "8", "-t", "50", "-v", "5", "-j", "3", "--report"])
        .arg("--out-dir")
        .arg(&out_dir)
        .output()
        .expect("run circusgen");
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let stdout = String::from_utf8_lossy(&output.stdout);
    let mut lines = stdout.lines();
    assert_eq!(
        lines.next(),
        Some("Generated: 12 cities, 8 shows, 50 tickets, 5 viewers")
    );
    let timing = lines.next().expect("timing line");
    assert!(timing.starts_with("Execution time: ") && timing.ends_with(" seconds"));

    assert_eq!(line_count(&out_dir.join("cities.csv")), 12);
    assert_eq!(line_count(&out_dir.join("shows.csv")), 8);
    assert_eq!(line_count(&out_dir.join("tickets.csv")), 50);
    assert_eq!(line_count(&out_dir.join("viewers.csv")), 5);

    let report: serde_json::Value = serde_json::from_str(
        &fs::read_to_string(out_dir.join("generation_report.json")).expect("read report"),
    )
    .expect("parse report");
    let tables = report
        .get("tables")
        .and_then(|value| value.as_array())
        .expect("tables array");
    assert_eq!(tables.len(), 4);
}

#[test]
fn config_file_and_second_batch() {
    let out_dir = temp_out_dir("config");
    fs::create_dir_all(&out_dir).expect("create out dir");
    let config_path = out_dir.join("circusgen.toml");
    fs::write(
        &config_path,
        "cities = 30\nshows = 20\ntickets = 40\nviewers = 0\nsecond_batch = true\n",
    )
    .expect("write config");

    let output = Command::new(env!("CARGO_BIN_EXE_circusgen"))
        .arg("--config")
        .arg(&config_path)
        .arg("--out-dir")
        .arg(&out_dir)
        .output()
        .expect("run circusgen");
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    assert_eq!(line_count(&out_dir.join("cities_t1.csv")), 30);
    assert_eq!(line_count(&out_dir.join("cities_t2.csv")), 6);
    assert_eq!(line_count(&out_dir.join("shows_t2.csv")), 2);
    assert_eq!(line_count(&out_dir.join("tickets_t2.csv")), 4);
    assert!(!out_dir.join("viewers.csv").exists());
}

#[test]
fn second_batch_flag_overrides_config_file() {
    let out_dir = temp_out_dir("no_second_batch");
    fs::create_dir_all(&out_dir).expect("create out dir");
    let config_path = out_dir.join("circusgen.toml");
    fs::write(
        &config_path,
        "cities = 5\nshows = 5\ntickets = 8\nviewers = 3\nsecond_batch = true\n",
    )
    .expect("write config");

    let output = Command::new(env!("CARGO_BIN_EXE_circusgen"))
        .arg("--config")
        .arg(&config_path)
        .arg("--second-batch=false")
        .arg("--out-dir")
        .arg(&out_dir)
        .output()
        .expect("run circusgen");
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    assert_eq!(line_count(&out_dir.join("cities.csv")), 5);
    assert_eq!(line_count(&out_dir.join("tickets.csv")), 8);
    assert!(!out_dir.join("cities_t1.csv").exists());
    assert!(!out_dir.join("tickets_t2.csv").exists());
}

#[test]
fn log_file_receives_json_events() {
    let out_dir = temp_out_dir("log_file");
    fs::create_dir_all(&out_dir).expect("create out dir");
    let log_path = out_dir.join("circusgen.log");

    let output = Command::new(env!("CARGO_BIN_EXE_circusgen"))
        .args(["-c", "3", "-s", "3", "-t", "6", "-v", "2"])
        .arg("--out-dir")
        .arg(&out_dir)
        .arg("--log-file")
        .arg(&log_path)
        .env("RUST_LOG", "info")
        .output()
        .expect("run circusgen");
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let log = fs::read_to_string(&log_path).expect("read log");
    let events: Vec<serde_json::Value> = log
        .lines()
        .map(|line| serde_json::from_str(line).expect("json log line"))
        .collect();
    assert!(events.iter().any(|event| event["fields"]["message"] == "generation completed"));
    assert!(events.iter().all(|event| event.get("timestamp").is_some()));
}

#[test]
fn zero_threads_fails() {
    let out_dir = temp_out_dir("zero_threads");
    let output = Command::new(env!("CARGO_BIN_EXE_circusgen"))
        .args(["-j", "0"])
        .arg("--out-dir")
        .arg(&out_dir)
        .output()
        .expect("run circusgen");
    assert!(!output.status.success());
}

#[test]
fn list_enums_prints_vocabularies() {
    let output = Command::new(env!("CARGO_BIN_EXE_circusgen"))
        .arg("--list-enums")
        .output()
        .expect("run circusgen");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("payment_type: cash, card"));
    assert!(stdout.contains("show_type: Acrobatic Troupe, Fire Jugglers"));
}
