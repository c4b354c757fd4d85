use proptest::prelude::*;
use super_bot::bot::handlers::finance::{FINANCE_USAGE, INVALID_EXPENSE, INVALID_INCOME};
use super_bot::bot::ledger::AMOUNT_TOO_LARGE;
use super_bot::bot::{Event, Ledger};
use super_bot::testing::{test_router, TestCollaborators};

fn cmd(text: &str) -> Event {
    Event::parse(1, 1, text)
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-6 * (1.0 + a.abs().max(b.abs()))
}

#[tokio::test]
async fn finance_session_reports_running_totals() {
    let router = test_router(&TestCollaborators::default());

    assert_eq!(
        router.dispatch(&cmd("/finance income 50")).await.as_deref(),
        Some("Income of 50 added. Total income: 50")
    );
    assert_eq!(
        router.dispatch(&cmd("/finance income 25")).await.as_deref(),
        Some("Income of 25 added. Total income: 75")
    );
    assert_eq!(
        router.dispatch(&cmd("/finance expense 30")).await.as_deref(),
        Some("Expense of 30 added. Total expenses: 30")
    );
    assert_eq!(
        router.dispatch(&cmd("/finance balance")).await.as_deref(),
        Some("Your balance is: 45")
    );
}

#[tokio::test]
async fn invalid_amounts_leave_totals_unchanged() {
    let router = test_router(&TestCollaborators::default());

    for (text, expected) in [
        ("/finance income abc", INVALID_INCOME),
        ("/finance income", INVALID_INCOME),
        ("/finance income -10", INVALID_INCOME),
        ("/finance expense NaN", INVALID_EXPENSE),
        ("/finance expense", INVALID_EXPENSE),
    ] {
        let reply = router.dispatch(&cmd(text)).await;
        assert_eq!(reply.as_deref(), Some(expected), "{text}");
    }

    let totals = router.context().ledger.totals().await;
    assert_eq!(totals.income, 0.0);
    assert_eq!(totals.expenses, 0.0);
}

#[tokio::test]
async fn totals_stay_finite_when_amounts_overflow() {
    let router = test_router(&TestCollaborators::default());

    for text in ["/finance income 1e308", "/finance expense 1e308"] {
        let first = router.dispatch(&cmd(text)).await.expect("reply");
        assert!(!first.contains("inf"), "{first}");
    }
    for text in ["/finance income 1e308", "/finance expense 1e308"] {
        let second = router.dispatch(&cmd(text)).await;
        assert_eq!(second.as_deref(), Some(AMOUNT_TOO_LARGE), "{text}");
    }

    let totals = router.context().ledger.totals().await;
    assert!(totals.income.is_finite());
    assert!(totals.expenses.is_finite());
    assert_eq!(
        router.dispatch(&cmd("/finance balance")).await.as_deref(),
        Some("Your balance is: 0")
    );
}

#[tokio::test]
async fn unknown_or_missing_sub_command_shows_usage() {
    let router = test_router(&TestCollaborators::default());

    for text in ["/finance", "/finance invest 10", "/finance balance now"] {
        let reply = router.dispatch(&cmd(text)).await;
        assert_eq!(reply.as_deref(), Some(FINANCE_USAGE), "{text}");
    }
}

#[tokio::test]
async fn ledger_is_shared_between_users() {
    let router = test_router(&TestCollaborators::default());

    router
        .dispatch(&Event::parse(1, 1, "/finance income 10"))
        .await;
    let reply = router.dispatch(&Event::parse(2, 2, "/finance balance")).await;
    assert_eq!(reply.as_deref(), Some("Your balance is: 10"));
}

#[tokio::test]
async fn concurrent_updates_are_not_lost() {
    let ledger = std::sync::Arc::new(Ledger::new());
    let mut tasks = Vec::new();
    for _ in 0..50 {
        let ledger = ledger.clone();
        tasks.push(tokio::spawn(async move {
            ledger.log_income(2.0).await.expect("income");
            ledger.log_expense(1.0).await.expect("expense");
        }));
    }
    for task in tasks {
        task.await.expect("task");
    }

    let totals = ledger.totals().await;
    assert!(close(totals.income, 100.0));
    assert!(close(totals.expenses, 50.0));
    assert!(close(totals.balance(), 50.0));
}

#[derive(Debug, Clone)]
enum Entry {
    Income(f64),
    Expense(f64),
}

fn entry() -> impl Strategy<Value = Entry> {
    prop_oneof![
        (0.0..10_000.0f64).prop_map(Entry::Income),
        (0.0..10_000.0f64).prop_map(Entry::Expense),
    ]
}

fn apply(entries: &[Entry]) -> (f64, f64, f64) {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("runtime");
    runtime.block_on(async {
        let ledger = Ledger::new();
        for entry in entries {
            let logged = match entry {
                Entry::Income(a) => ledger.log_income(*a).await,
                Entry::Expense(a) => ledger.log_expense(*a).await,
            };
            logged.expect("bounded amounts never overflow");
        }
        let totals = ledger.totals().await;
        (totals.income, totals.expenses, ledger.balance().await)
    })
}

proptest! {
    #[test]
    fn balance_is_income_minus_expenses(entries in prop::collection::vec(entry(), 0..40)) {
        let (income, expenses, balance) = apply(&entries);

        let expected_income: f64 = entries
            .iter()
            .filter_map(|e| match e { Entry::Income(a) => Some(*a), Entry::Expense(_) => None })
            .sum();
        let expected_expenses: f64 = entries
            .iter()
            .filter_map(|e| match e { Entry::Expense(a) => Some(*a), Entry::Income(_) => None })
            .sum();

        prop_assert!(close(income, expected_income));
        prop_assert!(close(expenses, expected_expenses));
        prop_assert!(close(balance, expected_income - expected_expenses));
    }

    #[test]
    fn order_of_entries_does_not_change_totals(entries in prop::collection::vec(entry(), 0..40)) {
        let mut reversed = entries.clone();
        reversed.reverse();

        let (i1, e1, b1) = apply(&entries);
        let (i2, e2, b2) = apply(&reversed);

        prop_assert!(close(i1, i2));
        prop_assert!(close(e1, e2));
        prop_assert!(close(b1, b2));
    }
}
