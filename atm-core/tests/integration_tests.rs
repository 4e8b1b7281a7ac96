//! Integration tests for atm-core
//!
//! Full dialogs run against a real JSON data file in a temp directory, with
//! user input scripted through `ScriptedConsole`.
//!
//! Run with: cargo test --test integration_tests -- --nocapture

use std::fs;
use std::path::Path;
use std::sync::Arc;

use tempfile::TempDir;

use atm_core::adapters::{JsonFileStore, ScriptedConsole, DEFAULT_DATA_FILE};
use atm_core::config::Config;
use atm_core::ports::AccountStore;
use atm_core::services::{make_pin_record, EntryPoint, SessionController};
use atm_core::{Account, AtmContext, LogEntry};

// ============================================================================
// Test Helpers
// ============================================================================

const NUMBER: &str = "0000000123";

fn create_test_store(temp_dir: &TempDir) -> Arc<JsonFileStore> {
    Arc::new(JsonFileStore::new(temp_dir.path().join(DEFAULT_DATA_FILE)))
}

/// Store one account with PIN "1234" and the given balance
fn seed_account(store: &JsonFileStore, balance_cents: u64) -> Account {
    let record = make_pin_record("1234");
    let mut account = Account::new(
        NUMBER,
        "Kirill",
        "Momotov",
        "ID123",
        record.salt_hex,
        record.hash_hex,
    );
    account.balance_cents = balance_cents;
    store.upsert_account(&account).unwrap();
    account
}

fn run_dialog(store: Arc<JsonFileStore>, lines: &[&str]) -> ScriptedConsole {
    let mut controller = SessionController::new(store, ScriptedConsole::new(lines.iter().copied()));
    controller.run().expect("dialog should end with the quit item");
    controller.into_console()
}

fn test_context(data_file: &Path) -> AtmContext {
    let config = Config::load_with_override(data_file, None).unwrap();
    AtmContext::with_config(config, EntryPoint::Test, "0.0.0-test").unwrap()
}

fn read_log(path: &Path) -> Vec<LogEntry> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

// ============================================================================
// Dialog scenarios
// ============================================================================

#[test]
fn test_first_run_creates_account_and_deposits() {
    let temp_dir = TempDir::new().unwrap();
    let store = create_test_store(&temp_dir);

    let console = run_dialog(
        store.clone(),
        &["", "Kirill", "Momotov", "ID123", "1234", "1234", "10.00", "0"],
    );

    let doc = store.load().unwrap();
    assert_eq!(doc.accounts.len(), 1);
    let account = doc.accounts.values().next().unwrap();
    assert_eq!(account.balance_cents, 1000);
    assert_eq!(account.name, "Kirill");
    assert_eq!(account.surname, "Momotov");
    assert_eq!(account.id_number, "ID123");
    assert!(Account::is_valid_number(&account.account_number));

    let out = console.output();
    assert!(out.contains("first run"));
    assert!(out.contains(&format!("Your account number: {}", account.account_number)));
    assert!(out.contains("Current balance: 10.00"));
    // First run never shows the startup menu and ends after the session
    assert!(!out.contains("Log in to an existing account"));
    assert!(out.trim_end().ends_with("Goodbye!"));
    assert_eq!(console.remaining(), 0);
}

#[test]
fn test_withdraw_more_than_balance_is_refused() {
    let temp_dir = TempDir::new().unwrap();
    let store = create_test_store(&temp_dir);
    seed_account(&store, 100);
    let before = fs::read_to_string(store.path()).unwrap();

    let console = run_dialog(store.clone(), &["2", NUMBER, "1234", "2", "2.00", "0", "0"]);

    assert!(console.output().to_lowercase().contains("insufficient funds"));
    assert_eq!(store.get_account(NUMBER).unwrap().unwrap().balance_cents, 100);
    assert_eq!(fs::read_to_string(store.path()).unwrap(), before);
}

#[test]
fn test_wrong_pin_binds_no_session() {
    let temp_dir = TempDir::new().unwrap();
    let store = create_test_store(&temp_dir);
    seed_account(&store, 500);
    let before = fs::read_to_string(store.path()).unwrap();

    let console = run_dialog(store.clone(), &["2", NUMBER, "9999", "0"]);

    let out = console.output();
    assert!(out.contains("[Error] Incorrect PIN."));
    assert!(!out.contains("Welcome"));
    assert!(!out.contains("1) Deposit money"));
    assert_eq!(fs::read_to_string(store.path()).unwrap(), before);
}

#[test]
fn test_login_rejects_malformed_and_unknown_numbers() {
    let temp_dir = TempDir::new().unwrap();
    let store = create_test_store(&temp_dir);
    seed_account(&store, 0);

    let console = run_dialog(store, &["2", "123", "12345678901", "9999999999", "0"]);

    let out = console.output();
    assert!(out.contains("At least 10 digits required."));
    assert!(out.contains("At most 10 digits allowed."));
    assert!(out.contains("[Error] Account not found."));
}

#[test]
fn test_amount_input_reprompts_until_valid() {
    let temp_dir = TempDir::new().unwrap();
    let store = create_test_store(&temp_dir);
    seed_account(&store, 0);

    let console = run_dialog(
        store.clone(),
        &["2", NUMBER, "1234", "1", "abc", "-5", "100,50", "0", "0"],
    );

    let out = console.output();
    assert!(out.contains("Enter a valid number"));
    assert!(out.contains("Amount cannot be negative."));
    assert!(out.contains("Deposited: 100.50"));
    assert_eq!(store.get_account(NUMBER).unwrap().unwrap().balance_cents, 10050);
}

#[test]
fn test_deposit_withdraw_and_balance_round() {
    let temp_dir = TempDir::new().unwrap();
    let store = create_test_store(&temp_dir);
    seed_account(&store, 0);

    let console = run_dialog(
        store.clone(),
        &["2", NUMBER, "1234", "1", "50", "2", "20.25", "3", "0", "0"],
    );

    assert!(console.output().contains("Dispensed: 20.25"));
    assert!(console.output().contains("Current balance: 29.75"));
    assert_eq!(store.get_account(NUMBER).unwrap().unwrap().balance_cents, 2975);
}

#[test]
fn test_create_second_account_from_startup_menu_then_log_in() {
    let temp_dir = TempDir::new().unwrap();
    let store = create_test_store(&temp_dir);
    seed_account(&store, 0);

    let console = run_dialog(
        store.clone(),
        &["1", "Ann", "Lee", "P-77", "5555", "5555", "0", "0", "0"],
    );
    assert!(console.output().contains("1) Create a new account"));

    let doc = store.load().unwrap();
    assert_eq!(doc.accounts.len(), 2);
    let new_account = doc
        .accounts
        .values()
        .find(|a| a.name == "Ann")
        .unwrap()
        .clone();
    assert_ne!(new_account.account_number, NUMBER);
    assert_eq!(new_account.balance_cents, 0);

    let console = run_dialog(
        store,
        &["2", new_account.account_number.as_str(), "5555", "3", "0", "0"],
    );
    assert!(console.output().contains("Welcome, Ann Lee!"));
}

#[test]
fn test_unknown_startup_item_reshows_menu() {
    let temp_dir = TempDir::new().unwrap();
    let store = create_test_store(&temp_dir);
    seed_account(&store, 0);

    let console = run_dialog(store, &["7", "0"]);
    let out = console.output();
    assert!(out.contains("[Error] Unknown menu item."));
    assert_eq!(out.matches("0) Exit").count(), 2);
}

#[test]
fn test_end_of_input_is_not_swallowed() {
    let temp_dir = TempDir::new().unwrap();
    let store = create_test_store(&temp_dir);

    let mut controller = SessionController::new(store.clone(), ScriptedConsole::new(["", "Kirill"]));
    let err = controller.run().unwrap_err();

    assert!(err.is_input_exhausted());
    assert!(store.load().unwrap().is_empty());
}

// ============================================================================
// Store behaviour on disk
// ============================================================================

#[test]
fn test_store_load_yields_empty_document_for_foreign_content() {
    let temp_dir = TempDir::new().unwrap();
    let store = create_test_store(&temp_dir);
    let empty = serde_json::json!({"accounts": {}});

    assert_eq!(serde_json::to_value(store.load().unwrap()).unwrap(), empty);
    for content in ["{}", r#"{"accounts": []}"#, r#"{"accounts": "x"}"#, "[1, 2]"] {
        fs::write(store.path(), content).unwrap();
        assert_eq!(serde_json::to_value(store.load().unwrap()).unwrap(), empty);
    }
}

#[test]
fn test_damaged_record_keeps_other_accounts_through_account_creation() {
    let temp_dir = TempDir::new().unwrap();
    let store = create_test_store(&temp_dir);
    let good = seed_account(&store, 5000);

    let mut raw: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(store.path()).unwrap()).unwrap();
    let damaged = serde_json::json!({
        "account_number": "0000000002",
        "name": "Lost",
        "surname": "Record",
        "id_number": "X",
        "pin_salt_hex": "00"
    });
    raw["accounts"]["0000000002"] = damaged.clone();
    fs::write(store.path(), serde_json::to_string_pretty(&raw).unwrap()).unwrap();

    assert!(store.has_any_accounts().unwrap());
    let console = run_dialog(
        store.clone(),
        &["1", "Ann", "Lee", "P-77", "5555", "5555", "0", "0", "0"],
    );
    assert!(!console.output().contains("first run"));

    let reopened = JsonFileStore::new(store.path());
    assert_eq!(reopened.get_account(NUMBER).unwrap(), Some(good));
    let doc = reopened.load().unwrap();
    assert_eq!(doc.accounts.len(), 2);
    assert!(doc.accounts.values().any(|a| a.name == "Ann"));

    let on_disk: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(store.path()).unwrap()).unwrap();
    assert_eq!(on_disk["accounts"]["0000000002"], damaged);
    assert_eq!(on_disk["accounts"][NUMBER]["balance_cents"], 5000);
}

#[test]
fn test_store_round_trip_through_file() {
    let temp_dir = TempDir::new().unwrap();
    let store = create_test_store(&temp_dir);
    let account = seed_account(&store, 4242);

    let reopened = JsonFileStore::new(store.path());
    assert_eq!(reopened.get_account(NUMBER).unwrap(), Some(account));
}

#[test]
fn test_generated_numbers_avoid_persisted_accounts() {
    let temp_dir = TempDir::new().unwrap();
    let store = create_test_store(&temp_dir);
    seed_account(&store, 0);

    for _ in 0..50 {
        let number = store.generate_unique_account_number().unwrap();
        assert_eq!(number.len(), 10);
        assert!(number.bytes().all(|b| b.is_ascii_digit()));
        assert!(!store.account_exists(&number).unwrap());
    }
}

// ============================================================================
// Context and event log
// ============================================================================

#[test]
fn test_context_logs_events_without_customer_data() {
    let temp_dir = TempDir::new().unwrap();
    let ctx = test_context(&temp_dir.path().join(DEFAULT_DATA_FILE));

    let mut controller = ctx.controller(ScriptedConsole::new([
        "", "Kirill", "Momotov", "ID123", "1234", "1234", "10.00", "2", "99", "0",
    ]));
    controller.run().unwrap();

    let logger = ctx.logger.as_ref().unwrap();
    assert_eq!(logger.log_path(), temp_dir.path().join("events.jsonl"));
    let entries = read_log(logger.log_path());
    let events: Vec<&str> = entries.iter().map(|e| e.event.as_str()).collect();
    assert_eq!(
        events,
        vec![
            "session_started",
            "account_created",
            "deposit_completed",
            "withdraw_rejected",
            "session_closed",
        ]
    );
    let errors: Vec<&LogEntry> = entries.iter().filter(|e| e.error_message.is_some()).collect();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].command.as_deref(), Some("withdraw"));

    let account = ctx.store.load().unwrap().accounts.into_values().next().unwrap();
    let raw_log = fs::read_to_string(logger.log_path()).unwrap();
    assert!(!raw_log.contains(&account.account_number));
    assert!(!raw_log.contains("Kirill"));
    assert!(!raw_log.contains(&account.pin_hash_hex));
}

#[test]
fn test_context_without_event_log() {
    let temp_dir = TempDir::new().unwrap();
    let data_dir = temp_dir.path().join("nested");
    let data_file = data_dir.join("bank.json");

    let ctx = test_context(&data_file);
    assert!(ctx.logger.is_some());
    assert!(data_dir.is_dir());

    fs::write(data_dir.join("settings.json"), r#"{"app": {"eventLog": false}}"#).unwrap();
    let ctx = test_context(&data_file);
    assert!(ctx.logger.is_none());
    assert_eq!(ctx.store.path(), data_file);

    ctx.controller(ScriptedConsole::new(["", "Ann", "Lee", "P-1", "1111", "1111", "0", "0"]))
        .run()
        .unwrap();
    assert!(data_file.exists());
    assert!(!data_dir.join("events.jsonl").exists());
}
