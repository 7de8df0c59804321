use chrono::NaiveDate;

use crate::{
    memory::MemoryStorage, metrics_service::MetricsService, mutation_service::MutationService,
    storage::FinanceStorage, time::FixedClock, CoreError,
};
use dinario_domain::{
    Dated, ExpenseDraft, Identifiable, IncomeDraft, RecordId, RecordKind, SavingsDraft,
    DEFAULT_TAX_RATE,
};

fn feb(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 2, day).unwrap()
}

fn clock() -> FixedClock {
    FixedClock(feb(20))
}

#[test]
fn month_metrics_subtract_expenses_and_savings() {
    let storage = MemoryStorage::new();
    let clock = clock();
    MutationService::add_income(&storage, &clock, IncomeDraft::new(100.0).on(feb(3))).unwrap();
    MutationService::add_income(&storage, &clock, IncomeDraft::new(200.0).on(feb(17))).unwrap();
    MutationService::add_expense(&storage, &clock, ExpenseDraft::new("Phone", 50.0).on(feb(10)))
        .unwrap();
    MutationService::add_savings(&storage, &clock, SavingsDraft::new(30.0).on(feb(20))).unwrap();

    let metrics = MetricsService::derived_metrics(&storage, &clock).unwrap();
    assert_eq!(metrics.gross_income, 300.0);
    assert_eq!(metrics.total_expenses, 50.0);
    assert_eq!(metrics.month_savings, 30.0);
    assert_eq!(metrics.net_income, 220.0);
    assert_eq!(metrics.total_savings_all_time, 30.0);
    assert_eq!(metrics.range.start, feb(1));
    assert_eq!(metrics.range.end, feb(28));
}

#[test]
fn previous_month_savings_only_count_all_time() {
    let storage = MemoryStorage::new();
    let clock = clock();
    let january = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
    MutationService::add_savings(&storage, &clock, SavingsDraft::new(500.0).on(january)).unwrap();
    MutationService::add_income(&storage, &clock, IncomeDraft::new(80.0).on(january)).unwrap();

    let snapshot = MetricsService::snapshot(&storage, &clock).unwrap();
    assert_eq!(snapshot.metrics.month_savings, 0.0);
    assert_eq!(snapshot.metrics.total_savings_all_time, 500.0);
    assert_eq!(snapshot.metrics.gross_income, 0.0);
    assert!(snapshot.income.is_empty());
    assert_eq!(snapshot.savings.len(), 1);
    assert_eq!(snapshot.movements.len(), 1);
}

#[test]
fn month_boundaries_are_inclusive() {
    let storage = MemoryStorage::new();
    let clock = clock();
    MutationService::add_income(&storage, &clock, IncomeDraft::new(1.0).on(feb(1))).unwrap();
    MutationService::add_income(&storage, &clock, IncomeDraft::new(2.0).on(feb(28))).unwrap();
    MutationService::add_income(
        &storage,
        &clock,
        IncomeDraft::new(4.0).on(NaiveDate::from_ymd_opt(2026, 3, 1).unwrap()),
    )
    .unwrap();

    let income = MetricsService::current_month_income(&storage, &clock).unwrap();
    assert_eq!(income.len(), 2);
    assert_eq!(income[0].date(), feb(28));
}

#[test]
fn same_day_records_list_latest_id_first() {
    let storage = MemoryStorage::new();
    let clock = clock();
    let mut ids = Vec::new();
    for amount in [10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0] {
        let draft = ExpenseDraft::new("Bill", amount).on(feb(9));
        ids.push(MutationService::add_expense(&storage, &clock, draft).unwrap());
    }
    for id in &ids[..4] {
        MutationService::delete(&storage, RecordKind::Expense, *id).unwrap();
    }
    MutationService::delete(&storage, RecordKind::Expense, ids[5]).unwrap();

    let snapshot = MetricsService::snapshot(&storage, &clock).unwrap();
    let listed: Vec<RecordId> = snapshot.movements.iter().map(|m| m.id()).collect();
    assert_eq!(listed, vec![RecordId(7), RecordId(5)]);
}

#[test]
fn invalid_submissions_do_not_grow_collections() {
    let storage = MemoryStorage::new();
    let clock = clock();
    for amount in [0.0, -10.0, f64::NAN] {
        let err =
            MutationService::add_income(&storage, &clock, IncomeDraft::new(amount)).unwrap_err();
        assert!(err.is_validation());
        let savings = SavingsDraft::new(amount);
        assert!(MutationService::add_savings(&storage, &clock, savings).is_err());
        let expense = ExpenseDraft::new("Rent", amount);
        assert!(MutationService::add_expense(&storage, &clock, expense).is_err());
    }
    assert!(MutationService::add_expense(&storage, &clock, ExpenseDraft::new("", 5.0)).is_err());

    for kind in RecordKind::ALL {
        assert_eq!(storage.count(kind).unwrap(), 0);
    }
}

#[test]
fn added_record_defaults_to_today() {
    let storage = MemoryStorage::new();
    let clock = clock();
    let id = MutationService::add_income(&storage, &clock, IncomeDraft::new(75.0)).unwrap();
    let income = MetricsService::current_month_income(&storage, &clock).unwrap();
    assert_eq!(income.len(), 1);
    assert_eq!(income[0].id(), id);
    assert_eq!(income[0].date(), feb(20));
    assert_eq!(income[0].record().description(), "Income");
}

#[test]
fn deleting_twice_is_a_no_op() {
    let storage = MemoryStorage::new();
    let clock = clock();
    let keep = MutationService::add_savings(&storage, &clock, SavingsDraft::new(5.0)).unwrap();
    let drop = MutationService::add_savings(&storage, &clock, SavingsDraft::new(6.0)).unwrap();

    assert!(MutationService::delete(&storage, RecordKind::Savings, drop).unwrap());
    let after_first = MetricsService::all_savings(&storage).unwrap();
    assert!(!MutationService::delete(&storage, RecordKind::Savings, drop).unwrap());
    assert_eq!(MetricsService::all_savings(&storage).unwrap(), after_first);
    assert_eq!(after_first[0].id(), keep);

    let err = MutationService::delete_existing(&storage, RecordKind::Savings, drop).unwrap_err();
    assert!(matches!(err, CoreError::NotFound { kind: RecordKind::Savings, .. }));
}

#[test]
fn configuration_is_a_singleton() {
    let storage = MemoryStorage::new();
    assert!(MetricsService::configuration(&storage).unwrap().is_none());

    let first = MutationService::save_configuration(&storage, 0.15).unwrap();
    let second = MutationService::save_configuration(&storage, 0.2).unwrap();
    assert_eq!(first.id, second.id);
    assert_eq!(MetricsService::configuration(&storage).unwrap(), Some(second));

    assert!(MutationService::save_configuration(&storage, 1.5).unwrap_err().is_validation());
    assert!(MutationService::save_configuration(&storage, f64::NAN).is_err());
    assert_eq!(
        MetricsService::configuration(&storage).unwrap().map(|c| c.tax_rate),
        Some(0.2)
    );
}

#[test]
fn tax_rate_is_reported_but_not_deducted() {
    let storage = MemoryStorage::new();
    let clock = clock();
    MutationService::save_configuration(&storage, 0.25).unwrap();
    MutationService::add_income(&storage, &clock, IncomeDraft::new(1000.0)).unwrap();

    let metrics = MetricsService::derived_metrics(&storage, &clock).unwrap();
    assert_eq!(metrics.tax_rate, 0.25);
    assert_eq!(metrics.net_income, 1000.0);
}

#[test]
fn reset_clears_everything_and_keeps_ids_retired() {
    let storage = MemoryStorage::new();
    let clock = clock();
    MutationService::save_configuration(&storage, 0.3).unwrap();
    let old = MutationService::add_income(&storage, &clock, IncomeDraft::new(10.0)).unwrap();
    MutationService::add_expense(&storage, &clock, ExpenseDraft::new("Gym", 5.0)).unwrap();
    MutationService::add_savings(&storage, &clock, SavingsDraft::new(2.0)).unwrap();

    MutationService::reset_all(&storage).unwrap();

    let snapshot = MetricsService::snapshot(&storage, &clock).unwrap();
    assert!(snapshot.configuration.is_none());
    assert!(snapshot.income.is_empty());
    assert!(snapshot.expenses.is_empty());
    assert!(snapshot.savings.is_empty());
    assert!(snapshot.movements.is_empty());
    assert_eq!(snapshot.metrics.tax_rate, DEFAULT_TAX_RATE);
    assert_eq!(snapshot.metrics.net_income, 0.0);

    let fresh = MutationService::add_income(&storage, &clock, IncomeDraft::new(10.0)).unwrap();
    assert!(fresh > old);
}
