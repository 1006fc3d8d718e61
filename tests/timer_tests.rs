use rovertime::core::TimerStateMachine;
use rovertime::core::ledger::{EntryLedger, LedgerOutcome};
use rovertime::models::{Entry, Settings, TimerPhase, TimerState};

const MIN: i64 = 60_000;
const T0: i64 = 1_750_000_000_000;

fn entry(id: i64, date: &str, diff: i64) -> Entry {
    Entry {
        id,
        date: date.to_string(),
        start_time: "08:00".into(),
        end_time: "16:30".into(),
        break_minutes: 30,
        worked_minutes: 480 + diff,
        diff_minutes: diff,
    }
}

#[test]
fn pause_is_counted_exactly_once() {
    let mut t = TimerStateMachine::new();
    t.start(T0, None).unwrap();
    t.pause(T0 + 60 * MIN).unwrap();
    t.resume(T0 + 65 * MIN).unwrap();

    // sampling must not move the accumulated pause
    let settings = Settings::default();
    for _ in 0..3 {
        t.snapshot(T0 + 65 * MIN, &settings);
    }
    t.stop(T0 + 65 * MIN).unwrap();

    assert_eq!(t.state().total_paused_ms, 300_000);
    assert_eq!(t.pause_minutes(T0 + 200 * MIN, true), 5);
}

#[test]
fn stop_while_paused_folds_open_pause() {
    let mut t = TimerStateMachine::new();
    t.start(T0, None).unwrap();
    t.pause(T0 + 10 * MIN).unwrap();
    t.stop(T0 + 25 * MIN).unwrap();

    assert_eq!(t.phase(), TimerPhase::Stopped);
    assert_eq!(t.state().total_paused_ms, 15 * MIN);
    assert_eq!(t.state().pause_start_timestamp, None);
    assert_eq!(t.state().start_timestamp, Some(T0));
    assert_eq!(t.state().stop_timestamp, Some(T0 + 25 * MIN));
    assert!(t.has_uncommitted_shift());
}

#[test]
fn ongoing_pause_is_included_only_on_request() {
    let mut t = TimerStateMachine::new();
    t.start(T0, None).unwrap();
    t.pause(T0 + 10 * MIN).unwrap();

    assert_eq!(t.total_pause_ms(T0 + 13 * MIN, false), 0);
    assert_eq!(t.total_pause_ms(T0 + 13 * MIN, true), 3 * MIN);
    assert_eq!(t.state().total_paused_ms, 0);
}

#[test]
fn invalid_transitions_are_rejected_without_change() {
    let mut t = TimerStateMachine::new();
    assert!(t.pause(T0).is_err());
    assert!(t.resume(T0).is_err());
    assert!(t.stop(T0).is_err());
    assert_eq!(t.state(), &TimerState::default());

    t.start(T0, None).unwrap();
    let before = t.state().clone();
    assert!(t.start(T0 + MIN, None).is_err());
    assert!(t.resume(T0 + MIN).is_err());
    assert_eq!(t.state(), &before);

    t.pause(T0 + MIN).unwrap();
    assert!(t.pause(T0 + 2 * MIN).is_err());
}

#[test]
fn toggle_alternates_between_running_and_paused() {
    let mut t = TimerStateMachine::new();
    assert!(t.toggle_pause(T0).is_err());
    t.start(T0, None).unwrap();
    assert_eq!(t.toggle_pause(T0 + MIN).unwrap(), TimerPhase::Paused);
    assert_eq!(t.toggle_pause(T0 + 3 * MIN).unwrap(), TimerPhase::Running);
    assert_eq!(t.state().total_paused_ms, 2 * MIN);
}

#[test]
fn restart_resets_pause_total() {
    let mut t = TimerStateMachine::new();
    t.start(T0, None).unwrap();
    t.pause(T0 + MIN).unwrap();
    t.stop(T0 + 5 * MIN).unwrap();
    t.start(T0 + 10 * MIN, None).unwrap();
    assert_eq!(t.state().total_paused_ms, 0);
    assert_eq!(t.state().stop_timestamp, None);
}

#[test]
fn snapshot_of_stopped_shift_is_frozen_at_stop() {
    let mut t = TimerStateMachine::new();
    let settings = Settings::default();
    assert!(t.snapshot(T0, &settings).is_none());

    t.start(T0, None).unwrap();
    t.stop(T0 + 400 * MIN).unwrap();

    let a = t.snapshot(T0 + 500 * MIN, &settings).unwrap();
    let b = t.snapshot(T0 + 900 * MIN, &settings).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.balance.gross_worked_minutes, 400);
    assert_eq!(a.phase, TimerPhase::Stopped);
}

#[test]
fn persisted_state_round_trips_mid_pause() {
    let mut t = TimerStateMachine::new();
    t.start(T0, None).unwrap();
    t.pause(T0 + 30 * MIN).unwrap();

    let json = serde_json::to_value(t.state()).unwrap();
    assert_eq!(json["isRunning"], true);
    assert_eq!(json["isPaused"], true);
    assert_eq!(json["pauseStartTimestamp"], T0 + 30 * MIN);

    let restored: TimerState = serde_json::from_value(json).unwrap();
    let mut r = TimerStateMachine::restore(restored);
    assert_eq!(r.phase(), TimerPhase::Paused);
    r.resume(T0 + 40 * MIN).unwrap();
    assert_eq!(r.state().total_paused_ms, 10 * MIN);
}

#[test]
fn lenient_timer_state_repairs_garbage() {
    let raw = serde_json::json!({
        "isRunning": 1,
        "isPaused": "yes",
        "startTimestamp": "1750000000000",
        "pauseStartTimestamp": null,
        "totalPausedMs": "oops"
    });
    let state: TimerState = serde_json::from_value(raw).unwrap();
    let t = TimerStateMachine::restore(state);

    assert_eq!(t.phase(), TimerPhase::Running);
    assert_eq!(t.state().start_timestamp, Some(T0));
    assert_eq!(t.state().total_paused_ms, 0);
}

#[test]
fn ledger_keeps_one_entry_per_date_sorted_descending() {
    let mut l = EntryLedger::new();
    assert_eq!(l.add_or_replace(entry(1, "2025-01-02", 0), |_| true), LedgerOutcome::Inserted);
    assert_eq!(l.add_or_replace(entry(2, "2025-03-01", 0), |_| true), LedgerOutcome::Inserted);
    assert_eq!(l.add_or_replace(entry(3, "2024-12-31", 0), |_| true), LedgerOutcome::Inserted);

    let dates: Vec<&str> = l.entries().iter().map(|e| e.date.as_str()).collect();
    assert_eq!(dates, ["2025-03-01", "2025-01-02", "2024-12-31"]);

    assert_eq!(l.add_or_replace(entry(4, "2025-01-02", 15), |_| true), LedgerOutcome::Replaced);
    assert_eq!(l.len(), 3);
    assert_eq!(l.find_by_date("2025-01-02").map(|e| e.id), Some(4));
}

#[test]
fn ledger_declined_overwrite_changes_nothing() {
    let mut l = EntryLedger::from_entries(vec![entry(1, "2025-01-02", 10)]);
    let before = l.clone();

    let mut asked = 0;
    let outcome = l.add_or_replace(entry(2, "2025-01-02", -60), |existing| {
        asked += 1;
        assert_eq!(existing.id, 1);
        false
    });

    assert_eq!(outcome, LedgerOutcome::Declined);
    assert_eq!(asked, 1);
    assert_eq!(l, before);
}

#[test]
fn ledger_new_date_never_asks() {
    let mut l = EntryLedger::new();
    let outcome = l.add_or_replace(entry(1, "2025-01-02", 0), |_| panic!("no prompt expected"));
    assert_eq!(outcome, LedgerOutcome::Inserted);
}

#[test]
fn ledger_delete_and_clear() {
    let mut l = EntryLedger::from_entries(vec![entry(1, "2025-01-01", 5), entry(2, "2025-01-02", 7)]);
    assert_eq!(l.delete(1).map(|e| e.date), Some("2025-01-01".to_string()));
    assert!(l.delete(1).is_none());
    assert_eq!(l.clear(), 1);
    assert!(l.is_empty());
    assert_eq!(l.total_balance(), 0);
}

#[test]
fn ledger_total_tolerates_garbage_diffs() {
    let raw = serde_json::json!([
        {"id": 1, "date": "2025-01-01", "diffMinutes": 30},
        {"id": 2, "date": "2025-01-02", "diffMinutes": "abc"},
        {"id": 3, "date": "2025-01-03"},
        {"id": 4, "date": "2025-01-04", "diffMinutes": null},
        {"id": 5, "date": "2025-01-05", "diffMinutes": "-12"}
    ]);
    let entries: Vec<Entry> = serde_json::from_value(raw).unwrap();
    let l = EntryLedger::from_entries(entries);
    assert_eq!(l.total_balance(), 18);
}

#[test]
fn ledger_range_filter() {
    let l = EntryLedger::from_entries(vec![
        entry(1, "2025-01-31", 1),
        entry(2, "2025-02-01", 2),
        entry(3, "2025-02-28", 3),
        entry(4, "bogus", 4),
    ]);
    let from = chrono::NaiveDate::from_ymd_opt(2025, 2, 1).unwrap();
    let to = chrono::NaiveDate::from_ymd_opt(2025, 2, 28).unwrap();
    let ids: Vec<i64> = l.in_range(from, to).iter().map(|e| e.id).collect();
    assert_eq!(ids, [3, 2]);
}
