use assert_cmd::Command;
use predicates::str::contains;
use std::io::ErrorKind;
use std::net::TcpListener;

fn cmd() -> Command {
    let mut cmd = Command::cargo_bin("droplet-inventory").unwrap();
    cmd.env_remove("DROPLET_INVENTORY_CONFIG")
        .env_remove("DO_API_URL")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn missing_token_exits_before_any_request() {
    let api = TcpListener::bind("127.0.0.1:0").unwrap();
    api.set_nonblocking(true).unwrap();
    let base_url = format!("http://{}/v2", api.local_addr().unwrap());

    cmd()
        .env_remove("DO_API_TOKEN")
        .env("DO_API_URL", &base_url)
        .args(["--list", "--pages", "3"])
        .assert()
        .code(1)
        .stdout(contains("Set DO_API_TOKEN before use:"))
        .stdout(contains("export DO_API_TOKEN=<token>"));

    match api.accept() {
        Err(e) => assert_eq!(e.kind(), ErrorKind::WouldBlock),
        Ok((_, peer)) => panic!("unexpected connection from {}", peer),
    }
}

#[test]
fn missing_token_is_checked_before_arguments() {
    cmd()
        .env_remove("DO_API_TOKEN")
        .arg("--no-such-flag")
        .assert()
        .code(1)
        .stdout(contains("Set DO_API_TOKEN before use:"));
}

#[test]
fn no_mode_prints_usage_hint() {
    cmd()
        .env("DO_API_TOKEN", "test-token")
        .assert()
        .success()
        .stdout(contains("Please pass --ip"));
}

#[test]
fn invalid_filter_is_reported() {
    cmd()
        .env("DO_API_TOKEN", "test-token")
        .env("DO_API_URL", "http://127.0.0.1:9/v2")
        .args(["-f", "web-("])
        .assert()
        .success()
        .stdout(contains("Invalid name filter 'web-('"));
}

#[test]
fn zero_pages_is_rejected() {
    cmd()
        .env("DO_API_TOKEN", "test-token")
        .args(["--list", "--pages", "0"])
        .assert()
        .failure();
}

#[test]
fn modes_are_mutually_exclusive() {
    cmd()
        .env("DO_API_TOKEN", "test-token")
        .args(["--list", "--images"])
        .assert()
        .failure();
}
