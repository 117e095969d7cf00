//! Smoke tests to verify command wiring

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_serve_help() {
    let mut cmd = Command::cargo_bin("catalog").unwrap();
    cmd.arg("serve").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Request timeout in seconds"))
        .stdout(predicate::str::contains("--dist-dir"));
}

#[test]
fn test_serve_without_database_config_fails() {
    let mut cmd = Command::cargo_bin("catalog").unwrap();
    cmd.arg("serve")
        .env_remove("DATABASE_URL")
        .env_remove("APP_DB_USERNAME")
        .env_remove("APP_DB_NAME")
        .env_remove("APP_DB_HOST")
        .current_dir(std::env::temp_dir());

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("APP_DB_USERNAME"));
}
