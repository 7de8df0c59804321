mod common;

use std::{
    sync::{Arc, Mutex},
    thread,
};

use common::{day, setup_tracker, temp_data_dir};
use dinario::{
    AppConfig, ConfigManager, ExpenseDraft, FinanceTracker, FixedClock, Identifiable, IncomeDraft,
    RecordId, RecordKind, SavingsDraft,
};

#[test]
fn dashboard_figures_for_the_current_month() {
    let (tracker, _) = setup_tracker(day(2026, 2, 20));
    tracker
        .add_income(IncomeDraft::new(100.0).on(day(2026, 2, 3)))
        .expect("income");
    tracker
        .add_income(IncomeDraft::new(200.0).on(day(2026, 2, 17)))
        .expect("income");
    tracker
        .add_expense(ExpenseDraft::new("Internet", 50.0).on(day(2026, 2, 10)))
        .expect("expense");
    tracker
        .add_savings(SavingsDraft::new(30.0).on(day(2026, 2, 20)))
        .expect("savings");
    tracker
        .add_savings(SavingsDraft::new(500.0).on(day(2026, 1, 12)))
        .expect("savings");

    let metrics = tracker.get_derived_metrics().expect("metrics");
    assert_eq!(metrics.gross_income, 300.0);
    assert_eq!(metrics.total_expenses, 50.0);
    assert_eq!(metrics.month_savings, 30.0);
    assert_eq!(metrics.net_income, 220.0);
    assert_eq!(metrics.total_savings_all_time, 530.0);
    assert_eq!(tracker.format_amount(metrics.net_income), "$220");

    let savings = tracker.get_all_savings().expect("savings");
    assert_eq!(savings.len(), 2);
    assert_eq!(savings[0].record().description(), "Savings");
}

#[test]
fn movements_merge_three_collections_newest_first() {
    let (tracker, _) = setup_tracker(day(2026, 2, 20));
    tracker
        .add_income(IncomeDraft::new(900.0).on(day(2026, 2, 1)).with_description("Salary"))
        .expect("income");
    tracker
        .add_expense(ExpenseDraft::new("Groceries", 80.0).on(day(2026, 2, 14)))
        .expect("expense");
    tracker
        .add_savings(SavingsDraft::new(40.0).on(day(2026, 2, 14)))
        .expect("savings");

    let movements = tracker.movements().expect("movements");
    let kinds: Vec<RecordKind> = movements.iter().map(|movement| movement.kind).collect();
    assert_eq!(
        kinds,
        vec![RecordKind::Expense, RecordKind::Savings, RecordKind::Income]
    );
    assert_eq!(movements[0].signed_amount(), -80.0);
    assert_eq!(movements[2].label, "Salary");
}

#[test]
fn rejected_input_leaves_data_untouched() {
    let (tracker, _) = setup_tracker(day(2026, 2, 20));
    tracker.add_income(IncomeDraft::new(10.0)).expect("income");

    for amount in [0.0, -1.0, f64::NAN] {
        let err = tracker.add_income(IncomeDraft::new(amount)).expect_err("rejected");
        assert!(err.is_validation());
    }
    assert!(tracker.add_expense(ExpenseDraft::new("  ", 10.0)).is_err());
    assert!(tracker.save_configuration(2.0).expect_err("rejected").is_validation());

    assert_eq!(tracker.get_current_month_income().expect("income").len(), 1);
    assert!(tracker.get_current_month_expenses().expect("expenses").is_empty());
    assert!(tracker.get_configuration().expect("configuration").is_none());
}

#[test]
fn reset_then_reopen_starts_from_defaults() {
    let (tracker, dir) = setup_tracker(day(2026, 2, 20));
    tracker.save_configuration(0.3).expect("configuration");
    tracker.add_income(IncomeDraft::new(10.0)).expect("income");
    tracker.add_expense(ExpenseDraft::new("Bus", 2.0)).expect("expense");
    tracker.add_savings(SavingsDraft::new(3.0)).expect("savings");
    tracker.reset_all().expect("reset");

    let reopened = FinanceTracker::open(&dir)
        .expect("reopen")
        .with_clock(Box::new(FixedClock(day(2026, 2, 20))));
    let snapshot = reopened.snapshot().expect("snapshot");
    assert!(snapshot.configuration.is_none());
    assert!(snapshot.income.is_empty());
    assert!(snapshot.expenses.is_empty());
    assert!(snapshot.savings.is_empty());
    assert_eq!(snapshot.metrics.tax_rate, 0.0);

    let created = reopened.save_configuration(0.0).expect("configuration");
    assert_eq!(created.tax_rate, 0.0);
    assert_eq!(reopened.get_configuration().expect("get"), Some(created));
}

#[test]
fn subscribers_receive_recomputed_snapshots() {
    let (tracker, _) = setup_tracker(day(2026, 2, 20));
    let nets = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&nets);
    tracker.subscribe(move |snapshot| {
        sink.lock().expect("lock").push(snapshot.metrics.net_income);
    });

    let id = tracker.add_income(IncomeDraft::new(100.0)).expect("income");
    tracker.add_expense(ExpenseDraft::new("Gas", 25.0)).expect("expense");
    tracker.delete_income(id).expect("delete");
    tracker.delete_income(id).expect("second delete");

    assert_eq!(*nets.lock().expect("lock"), vec![100.0, 75.0, -25.0]);
}

#[test]
fn concurrent_adds_keep_every_record() {
    let (tracker, dir) = setup_tracker(day(2026, 2, 20));
    let tracker = Arc::new(tracker);
    let handles: Vec<_> = (0..4)
        .map(|worker| {
            let tracker = Arc::clone(&tracker);
            thread::spawn(move || {
                for n in 0..10 {
                    tracker
                        .add_expense(ExpenseDraft::new(format!("w{worker}-{n}"), 1.0))
                        .expect("expense");
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("worker");
    }

    let reopened = FinanceTracker::open(&dir)
        .expect("reopen")
        .with_clock(Box::new(FixedClock(day(2026, 2, 20))));
    let expenses = reopened.get_current_month_expenses().expect("expenses");
    assert_eq!(expenses.len(), 40);
    assert_eq!(expenses.iter().map(|e| e.id()).max(), Some(RecordId(40)));
}

#[test]
fn preferences_drive_storage_location_and_currency() {
    let base = temp_data_dir();
    let manager = ConfigManager::with_base_dir(base.clone()).expect("manager");
    let config = AppConfig {
        currency: "EUR".into(),
        show_cents: true,
        data_dir: Some(base.join("finance")),
        ..AppConfig::default()
    };
    manager.save(&config).expect("save preferences");

    let loaded = manager.load().expect("load preferences");
    let tracker = FinanceTracker::from_config(&loaded).expect("tracker");
    tracker.add_income(IncomeDraft::new(12.0)).expect("income");

    assert!(base.join("finance").join("income.json").exists());
    assert_eq!(tracker.format_amount(1234.5), "€1,234.50");

    let german = AppConfig {
        locale: "de-DE".into(),
        ..loaded
    };
    let tracker = FinanceTracker::from_config(&german).expect("tracker");
    assert_eq!(tracker.format_amount(1234.5), "€1.234,50");
}
