use cashflow_minimizer::config::Config;
use cashflow_minimizer::core::error::LedgerError;
use cashflow_minimizer::optimization::settlement::SettlementEngine;
use cashflow_minimizer::session::Session;
use cashflow_minimizer::store::audit::{AuditSink, FileAuditLog, MemoryAuditLog};
use cashflow_minimizer::store::snapshot::Snapshot;

fn session_with(names: &[&str]) -> Session<MemoryAuditLog> {
    let mut session = Session::new(MemoryAuditLog::new());
    for name in names {
        session.add_entity(name).unwrap();
    }
    session
}

/// A → B 100, B → C 100, C → A 50: one payment, A pays 50 to C.
#[test]
fn three_party_cycle_settles_with_one_payment() {
    let mut session = session_with(&["A", "B", "C"]);
    session.record_debt("A", "B", 100).unwrap();
    session.record_debt("B", "C", 100).unwrap();
    session.record_debt("C", "A", 50).unwrap();

    assert_eq!(session.net_balances(), vec![-50, 0, 50]);

    let report = session.settle();
    assert_eq!(report.instructions().len(), 1);
    let payment = &report.instructions()[0];
    assert_eq!(payment.debtor_name, "A");
    assert_eq!(payment.creditor_name, "C");
    assert_eq!(payment.amount, 50);
    assert_eq!(payment.to_string(), "A pays 50 to C");
    assert!(report.is_valid());
}

/// A → B 30, B → A 30: nothing to pay.
#[test]
fn mutual_debts_need_no_payments() {
    let mut session = session_with(&["A", "B"]);
    session.record_debt("A", "B", 30).unwrap();
    session.record_debt("B", "A", 30).unwrap();

    assert_eq!(session.net_balances(), vec![0, 0]);
    let report = session.settle();
    assert!(report.is_settled());
    assert_eq!(report.gross_total(), 60);
    assert_eq!(report.net_total(), 0);
}

#[test]
fn undo_redo_round_trip_through_session() {
    let mut session = session_with(&["A", "B"]);
    session.record_debt("A", "B", 10).unwrap();
    let after_append: Vec<_> = session.current_transactions().cloned().collect();

    session.undo().unwrap();
    assert_eq!(session.current_transactions().count(), 0);
    session.redo().unwrap();

    let after_redo: Vec<_> = session.current_transactions().cloned().collect();
    assert_eq!(after_append, after_redo);
}

#[test]
fn new_debt_after_undo_discards_redo() {
    let mut session = session_with(&["A", "B"]);
    session.record_debt("A", "B", 10).unwrap();
    session.undo().unwrap();
    session.record_debt("B", "A", 20).unwrap();

    assert_eq!(session.redo(), Err(LedgerError::NothingToRedo));
    let amounts: Vec<_> = session.current_transactions().map(|t| t.amount()).collect();
    assert_eq!(amounts, vec![20]);
}

/// The sorted view indexes every insertion, regardless of undo or clear.
#[test]
fn sorted_view_ignores_history_navigation() {
    let mut session = session_with(&["A", "B", "C"]);
    session.record_debt("A", "B", 50).unwrap();
    session.record_debt("B", "C", 10).unwrap();
    session.record_debt("C", "A", 30).unwrap();
    session.undo().unwrap();
    session.clear_transactions();

    let sorted: Vec<_> = session.sorted_transactions().map(|t| t.amount()).collect();
    assert_eq!(sorted, vec![10, 30, 50]);
    assert_eq!(session.current_transactions().count(), 0);
}

/// Save a session, load it back in a new one, and settle it there.
#[test]
fn persisted_session_resumes_and_settles() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        data_file: dir.path().join("data.txt"),
        history_file: dir.path().join("history.txt"),
        user_file: dir.path().join("users.txt"),
    };

    {
        let mut session = Session::new(FileAuditLog::new(&config.history_file));
        for name in ["Alice", "Bob", "Carol", "Dave"] {
            session.add_entity(name).unwrap();
        }
        session.record_debt("Alice", "Bob", 120).unwrap();
        session.record_debt("Bob", "Carol", 40).unwrap();
        session.record_debt("Dave", "Alice", 20).unwrap();
        session.save(&config.data_file).unwrap();
    }

    let snapshot = Snapshot::load(&config.data_file).unwrap();
    assert_eq!(snapshot.entity_count(), 4);

    let mut resumed =
        Session::from_snapshot(snapshot, FileAuditLog::new(&config.history_file)).unwrap();
    // Alice -100, Bob +80, Carol +40, Dave -20
    assert_eq!(resumed.net_balances(), vec![-100, 80, 40, -20]);

    let report = resumed.settle();
    assert!(report.is_valid());
    assert!(report.instructions().len() <= 3);
    let remaining = SettlementEngine::apply(&resumed.net_balances(), report.instructions());
    assert!(remaining.iter().all(|&b| b == 0));

    // 3 recorded debts from the first session plus the settlement lines.
    let history = resumed.audit().entries().unwrap();
    assert_eq!(history.len(), 3 + report.instructions().len());
    assert!(history[0].starts_with("Alice pays 120 to Bob | Time: "));
}

#[test]
fn corrupt_snapshot_is_rejected() {
    let snapshot = Snapshot {
        names: vec!["A".into(), "B".into()],
        matrix: vec![vec![0, 5]],
    };
    let err = Session::from_snapshot(snapshot, MemoryAuditLog::new()).unwrap_err();
    assert!(matches!(err, LedgerError::InvalidSnapshot(_)));
}

#[test]
fn report_serializes_to_json() {
    let mut session = session_with(&["A", "B"]);
    session.record_debt("A", "B", 100).unwrap();
    session.record_debt("B", "A", 60).unwrap();

    let report = session.settle();
    let json = serde_json::to_string_pretty(&report).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(parsed["gross_total"], 160);
    assert_eq!(parsed["net_total"], 40);
    assert_eq!(parsed["instructions"][0]["description"], "A pays B");
}
