//! End-to-end CLI tests
//!
//! Each test gets its own data directory via FINTRACK_DATA_DIR and names
//! the owner explicitly, so no session state leaks between tests.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn fintrack(data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("fintrack").unwrap();
    cmd.env("FINTRACK_DATA_DIR", data_dir.path());
    cmd.env_remove("FINTRACK_OWNER");
    cmd
}

#[test]
fn init_seeds_default_categories() {
    let dir = TempDir::new().unwrap();

    fintrack(&dir)
        .args(["--owner", "maria", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized partition for maria"));

    fintrack(&dir)
        .args(["--owner", "maria", "category", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Salário"));
}

#[test]
fn transaction_add_and_list_roundtrip() {
    let dir = TempDir::new().unwrap();

    fintrack(&dir)
        .args([
            "--owner", "maria", "tx", "add", "Luz", "50.00", "--category", "Contas",
            "--date", "2025-01-10",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added transaction: Luz"));

    fintrack(&dir)
        .args(["--owner", "maria", "tx", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Luz"))
        .stdout(predicate::str::contains("-50.00"));
}

#[test]
fn installment_plan_expands_to_all_records() {
    let dir = TempDir::new().unwrap();

    fintrack(&dir)
        .args([
            "--owner", "maria", "tx", "add", "TV", "300.00", "--category", "Casa",
            "--date", "2025-01-15", "--installments", "3",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added 3 transactions"));

    fintrack(&dir)
        .args(["--owner", "maria", "tx", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1/3"))
        .stdout(predicate::str::contains("3/3"))
        .stdout(predicate::str::contains("2025-03-15"));
}

#[test]
fn person_add_generates_salary_series() {
    let dir = TempDir::new().unwrap();

    fintrack(&dir)
        .args(["--owner", "maria", "person", "add", "Ana", "1000.00", "-d", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Generated 12 salary records."));

    fintrack(&dir)
        .args(["--owner", "maria", "tx", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Ana - Salário"));
}

#[test]
fn payout_add_splits_installments() {
    let dir = TempDir::new().unwrap();

    fintrack(&dir)
        .args([
            "--owner", "maria", "payout", "add", "1000.00", "2025-06-01",
            "--installments", "2",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added payout: 13º Salário"));

    fintrack(&dir)
        .args(["--owner", "maria", "tx", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("13º Salário - 1ª parcela"))
        .stdout(predicate::str::contains("13º Salário - 2ª parcela"))
        .stdout(predicate::str::contains("500.00"));
}

#[test]
fn report_summary_balances_income_and_expenses() {
    let dir = TempDir::new().unwrap();

    fintrack(&dir)
        .args([
            "--owner", "maria", "tx", "add", "--type", "income", "Freela", "1000.00",
            "--category", "Salário", "--date", "2025-01-05",
        ])
        .assert()
        .success();

    fintrack(&dir)
        .args([
            "--owner", "maria", "tx", "add", "Luz", "300.00", "--category", "Contas",
            "--date", "2025-01-10",
        ])
        .assert()
        .success();

    fintrack(&dir)
        .args(["--owner", "maria", "report", "summary"])
        .assert()
        .success()
        .stdout(predicate::str::contains("R$700.00"));
}

#[test]
fn sync_rebuilds_missing_payout_records() {
    let dir = TempDir::new().unwrap();

    fintrack(&dir)
        .args([
            "--owner", "maria", "payout", "add", "1000.00", "2025-06-01",
            "--installments", "2",
        ])
        .assert()
        .success();

    // Remove the generated records by hand
    let txn_file = dir.path().join("data").join("maria").join("transactions.json");
    std::fs::write(&txn_file, "{\"transactions\":[]}").unwrap();

    fintrack(&dir)
        .args(["--owner", "maria", "sync"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Payout installments: 2"));

    fintrack(&dir)
        .args(["--owner", "maria", "sync"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing to repair."));
}

#[test]
fn login_flow_resolves_owner_from_session() {
    let dir = TempDir::new().unwrap();

    fintrack(&dir)
        .args(["user", "add", "maria", "--password", "s3cret"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Registered user: maria"));

    fintrack(&dir)
        .args(["login", "maria", "--password", "wrong"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid username or password"));

    fintrack(&dir)
        .args(["login", "maria", "--password", "s3cret"])
        .assert()
        .success();

    fintrack(&dir)
        .args(["whoami"])
        .assert()
        .success()
        .stdout(predicate::str::contains("maria"));

    // Session now supplies the owner
    fintrack(&dir)
        .args(["tx", "add", "Luz", "50.00", "--category", "Contas"])
        .assert()
        .success();

    fintrack(&dir)
        .args(["logout"])
        .assert()
        .success();

    fintrack(&dir)
        .args(["tx", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No active session"));
}

#[test]
fn owners_have_disjoint_partitions() {
    let dir = TempDir::new().unwrap();

    fintrack(&dir)
        .args([
            "--owner", "maria", "tx", "add", "Luz", "50.00", "--category", "Contas",
        ])
        .assert()
        .success();

    fintrack(&dir)
        .args(["--owner", "joao", "tx", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No transactions found."));
}
