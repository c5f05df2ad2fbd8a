mod common;

use std::fs;

use common::clock_at;
use expense_core::{
    ledger::{default_quick_buttons, Category, DEFAULT_BUDGET, DEFAULT_PERIOD_START_DAY},
    storage::{
        JsonFileStore, KeyValueStore, BUDGET_KEY, EXPENSES_KEY, PERIOD_DAY_KEY, QUICK_BUTTONS_KEY,
    },
};

#[test]
fn malformed_entries_fall_back_to_defaults() {
    let dir = common::temp_base().join("data");
    let store = JsonFileStore::new(&dir).unwrap();
    store.set(EXPENSES_KEY, "[{not json").unwrap();
    store.set(BUDGET_KEY, "\"lots\"").unwrap();
    store.set(PERIOD_DAY_KEY, "45").unwrap();

    let ledger = common::open_ledger(&dir, clock_at(2024, 5, 10));
    assert!(ledger.expenses().is_empty());
    assert_eq!(ledger.budget(), DEFAULT_BUDGET);
    assert_eq!(ledger.period_start_day(), DEFAULT_PERIOD_START_DAY);
    assert_eq!(ledger.quick_buttons().len(), 4);
}

#[test]
fn quick_buttons_with_wrong_arity_load_as_defaults() {
    let dir = common::temp_base().join("data");
    let store = JsonFileStore::new(&dir).unwrap();
    store
        .set(
            QUICK_BUTTONS_KEY,
            r#"[{"amount":10,"category":"Food"},{"amount":20,"category":"Living"},{"amount":30,"category":"Other"}]"#,
        )
        .unwrap();

    let ledger = common::open_ledger(&dir, clock_at(2024, 5, 10));
    assert_eq!(ledger.quick_buttons(), default_quick_buttons().as_slice());
}

#[test]
fn quick_buttons_with_unusable_amount_load_as_defaults() {
    let dir = common::temp_base().join("data");
    let store = JsonFileStore::new(&dir).unwrap();
    store
        .set(
            QUICK_BUTTONS_KEY,
            r#"[{"amount":10,"category":"Food"},{"amount":0,"category":"Food"},{"amount":30,"category":"Living"},{"amount":40,"category":"Living"}]"#,
        )
        .unwrap();

    let ledger = common::open_ledger(&dir, clock_at(2024, 5, 10));
    assert_eq!(ledger.quick_buttons(), default_quick_buttons().as_slice());
}

#[test]
fn stored_quick_buttons_survive_reload() {
    let dir = common::temp_base().join("data");
    let mut ledger = common::open_ledger(&dir, clock_at(2024, 5, 10));
    ledger
        .set_quick_button(1, 75.0, Category::Other("Pets".into()))
        .unwrap();
    let expected = ledger.quick_buttons().to_vec();
    drop(ledger);

    let reloaded = common::open_ledger(&dir, clock_at(2024, 5, 10));
    assert_eq!(reloaded.quick_buttons(), expected.as_slice());
}

#[test]
fn custom_label_naming_a_builtin_reloads_equal() {
    let dir = common::temp_base().join("data");
    let mut ledger = common::open_ledger(&dir, clock_at(2024, 5, 10));
    let added = ledger
        .add_expense(Category::Other("food".into()), 12.0, "")
        .unwrap();
    assert_eq!(added.category, Category::Food);
    ledger
        .set_quick_button(0, 9.0, Category::Other("TRANSPORT".into()))
        .unwrap();
    let expenses = ledger.expenses().to_vec();
    let buttons = ledger.quick_buttons().to_vec();
    drop(ledger);

    let reloaded = common::open_ledger(&dir, clock_at(2024, 5, 10));
    assert_eq!(reloaded.expenses(), expenses.as_slice());
    assert_eq!(reloaded.quick_buttons(), buttons.as_slice());
    assert_eq!(reloaded.quick_buttons()[0].category, Category::Transport);
}

#[test]
fn zero_budget_is_kept_on_load() {
    let dir = common::temp_base().join("data");
    JsonFileStore::new(&dir).unwrap().set(BUDGET_KEY, "0").unwrap();

    let ledger = common::open_ledger(&dir, clock_at(2024, 5, 10));
    assert_eq!(ledger.budget(), 0.0);
}

#[test]
fn browser_export_loads_with_legacy_labels() {
    let dir = common::temp_base().join("data");
    let store = JsonFileStore::new(&dir).unwrap();
    store
        .set(
            EXPENSES_KEY,
            r#"[
                {"id":1715331600000,"category":"交通","amount":35,"note":"MRT","date":"2024-05-10T09:00:00.000Z"},
                {"id":1715245200000,"category":"Snacks","amount":12.5,"date":"2024-05-09T09:00:00.000Z"}
            ]"#,
        )
        .unwrap();
    store.set(BUDGET_KEY, "25000").unwrap();
    store.set(PERIOD_DAY_KEY, "1").unwrap();

    let mut ledger = common::open_ledger(&dir, clock_at(2024, 5, 10));
    assert_eq!(ledger.expenses().len(), 2);
    assert_eq!(ledger.expenses()[0].category, Category::Transport);
    assert_eq!(ledger.expenses()[1].category, Category::Other("Snacks".into()));
    assert_eq!(ledger.expenses()[1].note, "");
    assert_eq!(ledger.budget(), 25000.0);
    assert_eq!(ledger.period_start_day(), 1);

    let added = ledger.add_expense(Category::Food, 1.0, "").unwrap();
    assert!(added.id > 1715331600000);
}

#[test]
fn failed_write_preserves_previous_value() {
    let dir = common::temp_base().join("data");
    let store = JsonFileStore::new(&dir).unwrap();
    store.set(BUDGET_KEY, "500").unwrap();

    let path = store.entry_path(BUDGET_KEY);
    let mut tmp = path.clone().into_os_string();
    tmp.push(".tmp");
    // A directory where the staging file should go makes File::create fail.
    fs::create_dir_all(&tmp).unwrap();

    assert!(store.set(BUDGET_KEY, "900").is_err());
    assert_eq!(fs::read_to_string(&path).unwrap(), "500");
}

#[test]
fn failed_persist_keeps_in_memory_change() {
    let dir = common::temp_base().join("data");
    let mut ledger = common::open_ledger(&dir, clock_at(2024, 5, 10));
    ledger.add_expense(Category::Food, 5.0, "").unwrap();

    let store = JsonFileStore::new(&dir).unwrap();
    let mut tmp = store.entry_path(EXPENSES_KEY).into_os_string();
    tmp.push(".tmp");
    fs::create_dir_all(&tmp).unwrap();

    assert!(ledger.add_expense(Category::Food, 7.0, "").is_err());
    assert_eq!(ledger.expenses().len(), 2);

    let reloaded = common::open_ledger(&dir, clock_at(2024, 5, 10));
    assert_eq!(reloaded.expenses().len(), 1);
}
