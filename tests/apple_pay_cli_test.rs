use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use serde_json::json;
use std::io::Write;
use std::process::Command;
use tempfile::NamedTempFile;

mod common;

fn apple_pay_command(items: &std::path::Path) -> Command {
    let mut cmd = Command::new(cargo_bin!("stripe-bridge"));
    cmd.env_remove("STRIPE_PUBLISHABLE_KEY");
    cmd.arg("apple-pay")
        .arg(items)
        .args(["--merchant-id", "merchant.com.example"])
        .args(["--country", "US"])
        .args(["--currency", "USD"])
        .args(["--mode", "test"]);
    cmd
}

#[test]
fn test_items_are_sent_as_strings() {
    let mut cmd = apple_pay_command(std::path::Path::new("tests/fixtures/items.csv"));

    let output = cmd.assert().success().get_output().clone();
    let frames = common::frames(&output.stdout);

    // No token scripted: the transaction fails to open, so nothing is finalized.
    assert_eq!(frames.len(), 1);
    assert_eq!(frames[0]["verb"], "initializeApplePayTransaction");
    assert_eq!(
        frames[0]["args"],
        json!([
            "merchant.com.example",
            "US",
            "USD",
            [
                { "label": "Coffee", "amount": "3" },
                { "label": "Cake", "amount": "4.50" }
            ],
            "test"
        ])
    );
}

#[test]
fn test_commit_after_token() {
    let mut cmd = apple_pay_command(std::path::Path::new("tests/fixtures/items.csv"));
    cmd.arg("--processed").arg("--reply").arg(format!(
        "initializeApplePayTransaction={}",
        common::token_json("tok_cli")
    ));

    let output = cmd
        .assert()
        .success()
        .stderr(predicate::str::contains("tok_cli"))
        .get_output()
        .clone();
    let frames = common::frames(&output.stdout);

    assert_eq!(frames.len(), 2);
    assert_eq!(frames[1]["verb"], "finalizeApplePayTransaction");
    assert_eq!(frames[1]["args"], json!([true]));
}

#[test]
fn test_rollback_by_default() {
    let mut cmd = apple_pay_command(std::path::Path::new("tests/fixtures/items.csv"));
    cmd.arg("--reply").arg(format!(
        "initializeApplePayTransaction={}",
        common::token_json("tok_cli")
    ));

    let output = cmd.assert().success().get_output().clone();
    let frames = common::frames(&output.stdout);

    assert_eq!(frames.len(), 2);
    assert_eq!(frames[1]["args"], json!([false]));
}

#[test]
fn test_empty_item_file_fails_locally() {
    let mut items = NamedTempFile::new().unwrap();
    writeln!(items, "label,amount").unwrap();

    let mut cmd = apple_pay_command(items.path());

    cmd.assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Missing one or more payment options."));
}

#[test]
fn test_malformed_item_file() {
    let mut items = NamedTempFile::new().unwrap();
    writeln!(items, "label,amount").unwrap();
    writeln!(items, "Coffee").unwrap();

    let mut cmd = apple_pay_command(items.path());

    cmd.assert().failure();
}
