#![allow(clippy::unwrap_used)]
// CLI smoke tests: argument surface, usage errors, and offline paths.
// Anything touching the network stays in scrapedeck-core's wiremock tests.

use assert_cmd::Command;
use predicates::prelude::*;

fn scrapedeck() -> Command {
    let mut cmd = Command::cargo_bin("scrapedeck").unwrap();
    // Keep host environment out of the tests.
    cmd.env_remove("SCRAPEDECK_API_URL");
    cmd.env_remove("SCRAPEDECK_OUTPUT");
    cmd
}

#[test]
fn help_lists_all_commands() {
    scrapedeck()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("scrape"))
        .stdout(predicate::str::contains("delete"))
        .stdout(predicate::str::contains("export"));
}

#[test]
fn no_subcommand_shows_usage() {
    scrapedeck()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn delete_requires_at_least_one_id() {
    scrapedeck()
        .args(["delete"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("required"));
}

#[test]
fn scrape_rejects_malformed_url_without_touching_the_network() {
    scrapedeck()
        .args([
            "--api-url",
            "http://127.0.0.1:1",
            "--quiet",
            "scrape",
            "definitely not a url",
        ])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("invalid URL"));
}

#[test]
fn list_without_api_url_is_a_usage_error() {
    scrapedeck()
        .env("HOME", env!("CARGO_TARGET_TMPDIR"))
        .env("XDG_CONFIG_HOME", env!("CARGO_TARGET_TMPDIR"))
        .args(["list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No scraping service URL"));
}

#[test]
fn completions_generate_for_bash() {
    scrapedeck()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("scrapedeck"));
}

#[test]
fn config_path_prints_a_path() {
    scrapedeck()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}
