mod common;

use common::{ScriptedConfirm, local_ms};
use rovertime::core::tracker::{CLEAR_TITLE, OVERWRITE_TITLE};
use rovertime::core::{
    AutoConfirm, Clock, LedgerOutcome, ManualClock, SampleRun, Sampler, StopReason, Tracker,
};
use rovertime::db::SqliteStore;
use rovertime::db::migrate::{applied_versions, run_pending_migrations};
use rovertime::db::pool::DbPool;
use rovertime::errors::AppError;
use rovertime::models::TimerPhase;
use rovertime::storage::{
    KEY_ENTRIES, KEY_SETTINGS, KEY_TIMER_STATE, KeyValueStore, MemoryStore, StoreResult,
    open_store,
};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::ops::ControlFlow;
use std::time::Duration;

const MIN: i64 = 60_000;

/// A backend where every call fails.
struct BrokenStore;

impl KeyValueStore for BrokenStore {
    fn get(&self, _keys: &[&str]) -> StoreResult<HashMap<String, Option<Value>>> {
        Err(AppError::Storage("offline".into()))
    }
    fn set(&mut self, _items: Vec<(String, Value)>) -> StoreResult<()> {
        Err(AppError::Storage("offline".into()))
    }
    fn backend_name(&self) -> &'static str {
        "broken"
    }
}

#[test]
fn live_shift_over_the_threshold() {
    let clock = ManualClock::new(local_ms(2025, 3, 10, 8, 0));
    let mut t = Tracker::open(MemoryStore::new(), AutoConfirm(true), &clock);

    t.start(None).unwrap();
    clock.advance_minutes(360);
    let s = t.snapshot().unwrap();
    assert_eq!(s.balance.mandatory_break_minutes, 0);
    assert_eq!(s.balance.balance_minutes, -120);

    clock.advance_minutes(1);
    let s = t.snapshot().unwrap();
    assert_eq!(s.balance.gross_worked_minutes, 361);
    assert_eq!(s.balance.mandatory_break_minutes, 30);
    assert_eq!(s.balance.balance_minutes, -149);
}

#[test]
fn manual_start_is_today_at_that_time() {
    let clock = ManualClock::new(local_ms(2025, 3, 10, 9, 30));
    let mut t = Tracker::open(MemoryStore::new(), AutoConfirm(true), &clock);

    let start = t.start(Some("08:00")).unwrap();
    assert_eq!(start, local_ms(2025, 3, 10, 8, 0));
    assert_eq!(t.snapshot().unwrap().balance.gross_worked_minutes, 90);

    assert!(matches!(t.start(None), Err(AppError::Timer(_))));
}

#[test]
fn manual_start_must_be_a_clock_time() {
    let clock = ManualClock::new(local_ms(2025, 3, 10, 9, 30));
    let mut t = Tracker::open(MemoryStore::new(), AutoConfirm(true), &clock);
    assert!(matches!(t.start(Some("eight")), Err(AppError::InvalidTime(_))));
    assert_eq!(t.timer().phase(), TimerPhase::Stopped);
}

#[test]
fn commit_turns_stopped_timer_into_entry() {
    let clock = ManualClock::new(local_ms(2025, 3, 10, 8, 0));
    let mut t = Tracker::open(MemoryStore::new(), AutoConfirm(true), &clock);

    t.start(None).unwrap();
    clock.advance_minutes(240);
    t.pause().unwrap();
    clock.advance_minutes(20);
    t.resume().unwrap();
    clock.advance_minutes(250);
    t.stop().unwrap();

    let pending = t.stopped_summary().unwrap();
    assert_eq!(pending.start_time, "08:00");
    assert_eq!(pending.end_time, "16:30");
    assert_eq!(pending.pause_minutes, 20);

    let res = t.commit().unwrap();
    assert_eq!(res.outcome, LedgerOutcome::Inserted);
    assert_eq!(res.entry.date, "2025-03-10");
    assert_eq!(res.entry.break_minutes, 50);
    assert_eq!(res.entry.worked_minutes, 460);
    assert_eq!(res.entry.diff_minutes, -20);
    assert_eq!(res.next_date, "2025-03-11");

    assert_eq!(t.timer().phase(), TimerPhase::Stopped);
    assert!(t.timer().state().start_timestamp.is_none());
    assert!(matches!(t.commit(), Err(AppError::Timer(_))));
}

#[test]
fn commit_refuses_running_timer() {
    let clock = ManualClock::new(local_ms(2025, 3, 10, 8, 0));
    let mut t = Tracker::open(MemoryStore::new(), AutoConfirm(true), &clock);
    t.start(None).unwrap();
    assert!(matches!(t.commit(), Err(AppError::Timer(_))));
    assert!(t.timer().is_running());
}

#[test]
fn overwrite_asks_and_decline_keeps_entry() {
    let clock = ManualClock::new(local_ms(2025, 3, 11, 18, 0));
    let confirm = ScriptedConfirm::new(&[false, true]);
    let mut t = Tracker::open(MemoryStore::new(), &confirm, &clock);

    let first = t.add_entry("2025-03-10", "08:00", "16:30", None).unwrap();
    assert_eq!(first.outcome, LedgerOutcome::Inserted);
    assert_eq!(confirm.calls.get(), 0);

    let declined = t.add_entry("2025-03-10", "09:00", "12:00", None).unwrap();
    assert_eq!(declined.outcome, LedgerOutcome::Declined);
    assert_eq!(t.ledger().len(), 1);
    assert_eq!(t.ledger().entries()[0].start_time, "08:00");

    let replaced = t.add_entry("2025-03-10", "09:00", "12:00", None).unwrap();
    assert_eq!(replaced.outcome, LedgerOutcome::Replaced);
    assert_eq!(t.ledger().len(), 1);
    assert_eq!(t.ledger().entries()[0].start_time, "09:00");
    assert_eq!(t.ledger().entries()[0].diff_minutes, 180 - 480);

    assert_eq!(confirm.calls.get(), 2);
    assert!(confirm.asked.borrow().iter().all(|(title, _)| title == OVERWRITE_TITLE));
}

#[test]
fn add_entry_validates_input() {
    let clock = ManualClock::new(local_ms(2025, 3, 11, 18, 0));
    let mut t = Tracker::open(MemoryStore::new(), AutoConfirm(true), &clock);

    assert!(matches!(
        t.add_entry("yesterday", "08:00", "16:00", None),
        Err(AppError::InvalidDate(_))
    ));
    assert!(matches!(
        t.add_entry("2025-03-10", "8am", "16:00", None),
        Err(AppError::InvalidTime(_))
    ));
    assert!(t.ledger().is_empty());
}

#[test]
fn add_entry_uses_stopped_timer_pause_and_resets_it() {
    let clock = ManualClock::new(local_ms(2025, 3, 10, 8, 0));
    let mut t = Tracker::open(MemoryStore::new(), AutoConfirm(true), &clock);

    t.start(None).unwrap();
    clock.advance_minutes(60);
    t.pause().unwrap();
    clock.advance_minutes(15);
    t.stop().unwrap();

    let res = t.add_entry("2025-03-10", "08:00", "17:00", None).unwrap();
    // 540 gross - 30 mandatory - 15 pause
    assert_eq!(res.entry.worked_minutes, 495);
    assert_eq!(res.entry.diff_minutes, 15);
    assert!(!t.timer().has_uncommitted_shift());

    let explicit = t.add_entry("2025-03-09", "08:00", "17:00", Some(0)).unwrap();
    assert_eq!(explicit.entry.worked_minutes, 510);
}

#[test]
fn overnight_entry_is_stored_under_its_start_date() {
    let clock = ManualClock::new(local_ms(2025, 3, 11, 7, 0));
    let mut t = Tracker::open(MemoryStore::new(), AutoConfirm(true), &clock);

    let res = t.add_entry("2025-03-10", "22:00", "06:00", None).unwrap();
    assert_eq!(res.entry.date, "2025-03-10");
    assert_eq!(res.entry.worked_minutes, 450);
    assert_eq!(res.entry.break_minutes, 30);
}

#[test]
fn clear_needs_confirmation() {
    let clock = ManualClock::new(local_ms(2025, 3, 11, 18, 0));
    let confirm = ScriptedConfirm::new(&[false, true]);
    let mut t = Tracker::open(MemoryStore::new(), &confirm, &clock);
    t.add_entry("2025-03-10", "08:00", "16:30", None).unwrap();
    t.add_entry("2025-03-11", "08:00", "17:30", None).unwrap();

    assert_eq!(t.clear_entries(), None);
    assert_eq!(t.ledger().len(), 2);

    assert_eq!(t.clear_entries(), Some(2));
    assert!(t.ledger().is_empty());

    let asked = confirm.asked.borrow();
    assert_eq!(asked[0].0, CLEAR_TITLE);
    assert_eq!(asked[0].1, "Delete all entries?");
}

#[test]
fn delete_unknown_entry_is_an_error() {
    let clock = ManualClock::new(local_ms(2025, 3, 11, 18, 0));
    let mut t = Tracker::open(MemoryStore::new(), AutoConfirm(true), &clock);
    let res = t.add_entry("2025-03-10", "08:00", "16:30", None).unwrap();

    assert!(matches!(t.delete_entry(42), Err(AppError::EntryNotFound(42))));
    assert_eq!(t.delete_entry(res.entry.id).unwrap().date, "2025-03-10");
    assert!(t.ledger().is_empty());
}

#[test]
fn total_balance_sums_all_entries() {
    let clock = ManualClock::new(local_ms(2025, 3, 12, 18, 0));
    let mut t = Tracker::open(MemoryStore::new(), AutoConfirm(true), &clock);
    t.add_entry("2025-03-10", "08:00", "17:00", None).unwrap(); // +30
    t.add_entry("2025-03-11", "08:00", "15:00", None).unwrap(); // -90
    assert_eq!(t.total_balance(), -60);
}

#[test]
fn settings_change_the_target() {
    let clock = ManualClock::new(local_ms(2025, 3, 12, 18, 0));
    let mut t = Tracker::open(MemoryStore::new(), AutoConfirm(true), &clock);

    let s = t.update_settings(Some(468), None).unwrap();
    assert_eq!(s.daily_target_minutes, 468);
    assert_eq!(s.default_break_minutes, 60);

    let res = t.add_entry("2025-03-10", "15:00", "23:11", None).unwrap();
    assert_eq!(res.entry.diff_minutes, -7);

    assert!(t.update_settings(Some(-1), None).is_err());
    assert_eq!(t.settings().daily_target_minutes, 468);
}

#[test]
fn state_survives_a_restart_mid_pause() {
    let clock = ManualClock::new(local_ms(2025, 3, 10, 8, 0));
    let store = {
        let mut t = Tracker::open(MemoryStore::new(), AutoConfirm(true), &clock);
        t.update_settings(Some(450), None).unwrap();
        t.add_entry("2025-03-07", "08:00", "16:00", None).unwrap();
        t.start(None).unwrap();
        clock.advance_minutes(120);
        t.pause().unwrap();
        t.store().clone()
    };

    clock.advance_minutes(10);
    let mut t = Tracker::open(store, AutoConfirm(true), &clock);
    assert_eq!(t.settings().daily_target_minutes, 450);
    assert_eq!(t.ledger().len(), 1);
    assert_eq!(t.timer().phase(), TimerPhase::Paused);
    assert_eq!(t.snapshot().unwrap().total_pause_ms, 10 * MIN);

    let paused = t.resume().unwrap();
    assert_eq!(paused, 10 * MIN);
}

#[test]
fn saved_records_use_camel_case_keys() {
    let clock = ManualClock::new(local_ms(2025, 3, 10, 8, 0));
    let mut t = Tracker::open(MemoryStore::new(), AutoConfirm(true), &clock);
    t.add_entry("2025-03-07", "08:00", "16:00", Some(15)).unwrap();
    t.start(None).unwrap();

    let store = t.store();
    assert_eq!(store.raw(KEY_SETTINGS).unwrap()["dailyTargetMinutes"], 480);
    let entry = &store.raw(KEY_ENTRIES).unwrap()[0];
    assert_eq!(entry["startTime"], "08:00");
    assert_eq!(entry["breakMinutes"], 45);
    assert_eq!(entry["diffMinutes"], -45);
    assert_eq!(store.raw(KEY_TIMER_STATE).unwrap()["totalPausedMs"], 0);
}

#[test]
fn load_tolerates_malformed_records() {
    let store = MemoryStore::with_values([
        (KEY_SETTINGS, json!({"targetMinutes": "468"})),
        (
            KEY_ENTRIES,
            json!([
                {"id": 1, "date": "2025-01-01", "diffMinutes": 12},
                "not an entry",
                {"id": 2, "date": "2025-01-02", "diffMinutes": "x"}
            ]),
        ),
        (KEY_TIMER_STATE, json!("broken")),
    ]);
    let clock = ManualClock::new(0);
    let t = Tracker::open(store, AutoConfirm(true), &clock);

    assert_eq!(t.settings().daily_target_minutes, 468);
    assert_eq!(t.settings().default_break_minutes, 60);
    assert_eq!(t.ledger().len(), 2);
    assert_eq!(t.total_balance(), 12);
    assert_eq!(t.timer().phase(), TimerPhase::Stopped);
}

#[test]
fn explicit_zero_target_is_kept() {
    let store = MemoryStore::with_values([(KEY_SETTINGS, json!({"dailyTargetMinutes": 0}))]);
    let clock = ManualClock::new(0);
    let t = Tracker::open(store, AutoConfirm(true), &clock);
    assert_eq!(t.settings().daily_target_minutes, 0);
}

#[test]
fn unreadable_target_falls_back_to_default() {
    for raw in [json!(null), json!("abc"), json!(true), json!([1])] {
        let store = MemoryStore::with_values([(
            KEY_SETTINGS,
            json!({"dailyTargetMinutes": raw.clone(), "defaultBreakMinutes": null}),
        )]);
        let clock = ManualClock::new(0);
        let t = Tracker::open(store, AutoConfirm(true), &clock);
        assert_eq!(t.settings().daily_target_minutes, 480, "{raw}");
        assert_eq!(t.settings().default_break_minutes, 60, "{raw}");
    }
}

#[test]
fn oversized_settings_are_rejected() {
    let clock = ManualClock::new(local_ms(2025, 3, 10, 8, 0));
    let mut t = Tracker::open(MemoryStore::new(), AutoConfirm(true), &clock);

    assert!(matches!(
        t.update_settings(Some(i64::MAX), None),
        Err(AppError::InvalidDuration(_))
    ));
    assert!(matches!(
        t.update_settings(None, Some(1441)),
        Err(AppError::InvalidDuration(_))
    ));
    assert_eq!(t.settings().daily_target_minutes, 480);
}

#[test]
fn stored_huge_target_does_not_break_the_timer() {
    let store = MemoryStore::with_values([(
        KEY_SETTINGS,
        json!({"dailyTargetMinutes": i64::MAX}),
    )]);
    let clock = ManualClock::new(local_ms(2025, 3, 10, 8, 0));
    let mut t = Tracker::open(store, AutoConfirm(true), &clock);

    t.start(None).unwrap();
    clock.advance_minutes(90);
    let snap = t.snapshot().unwrap();
    assert_eq!(snap.balance.effective_worked_minutes, 90);
    assert_eq!(snap.balance.expected_end_timestamp, i64::MAX);
    assert_eq!(
        t.expected_end(Some("153722867280912930:00")).expected_end_timestamp,
        i64::MAX
    );

    t.stop().unwrap();
    assert!(t.stopped_summary().is_some());
}

#[test]
fn broken_backend_never_blocks_the_user() {
    let clock = ManualClock::new(local_ms(2025, 3, 10, 8, 0));
    let mut t = Tracker::open(BrokenStore, AutoConfirm(true), &clock);

    t.start(None).unwrap();
    clock.advance_minutes(30);
    t.stop().unwrap();
    let res = t.commit().unwrap();
    assert_eq!(res.outcome, LedgerOutcome::Inserted);
    assert_eq!(t.ledger().len(), 1);
}

#[test]
fn unopenable_database_falls_back_to_memory() {
    let dir = std::env::temp_dir().join("rovertime_not_a_db_dir");
    std::fs::create_dir_all(&dir).unwrap();

    // a directory cannot be opened as a database file
    let store = open_store(&dir.to_string_lossy());
    assert_eq!(store.backend_name(), "memory");
}

#[test]
fn sqlite_store_persists_and_audits() {
    let clock = ManualClock::new(local_ms(2025, 3, 10, 8, 0));
    let store = SqliteStore::open_in_memory().unwrap();
    let mut t = Tracker::open(store, AutoConfirm(true), &clock);

    t.add_entry("2025-03-07", "08:00", "16:00", None).unwrap();
    t.start(None).unwrap();

    let values = t.store().get(&[KEY_ENTRIES, KEY_TIMER_STATE, "missing"]).unwrap();
    assert_eq!(values[KEY_ENTRIES].as_ref().unwrap()[0]["date"], "2025-03-07");
    assert_eq!(values[KEY_TIMER_STATE].as_ref().unwrap()["isRunning"], true);
    assert!(values["missing"].is_none());

    let ops: Vec<String> = t
        .store()
        .log_rows()
        .unwrap()
        .into_iter()
        .map(|r| r.operation)
        .collect();
    assert!(ops.iter().filter(|o| *o == "migration_applied").count() >= 2);
    assert!(ops.contains(&"add".to_string()));
    assert!(ops.contains(&"start".to_string()));
}

#[test]
fn sampler_ends_when_timer_stops() {
    let clock = ManualClock::new(local_ms(2025, 3, 10, 8, 0));
    let mut t = Tracker::open(MemoryStore::new(), AutoConfirm(true), &clock);
    t.start(None).unwrap();

    let sampler = Sampler::new(Duration::from_secs(60));
    let mut seen = Vec::new();
    let mut ticker = |_: Duration| clock.advance_minutes(1);

    let run: SampleRun = sampler.run(
        &mut ticker,
        Some(100),
        || {
            if clock.now_ms() >= local_ms(2025, 3, 10, 8, 3) && t.timer().is_running() {
                t.stop().unwrap();
            }
            if t.timer().is_running() {
                t.snapshot()
            } else {
                None
            }
        },
        |s| {
            seen.push(s.balance.gross_worked_minutes);
            ControlFlow::Continue(())
        },
    );

    assert_eq!(run.reason, StopReason::TimerStopped);
    assert_eq!(seen, [0, 1, 2]);
    assert_eq!(run.ticks, 3);
}

#[test]
fn sampler_respects_tick_limit_and_sink_break() {
    let clock = ManualClock::new(local_ms(2025, 3, 10, 8, 0));
    let mut t = Tracker::open(MemoryStore::new(), AutoConfirm(true), &clock);
    t.start(None).unwrap();

    let sampler = Sampler::new(Duration::from_secs(1));
    let mut ticker = |_: Duration| clock.advance_ms(1000);

    let limited = sampler.run(&mut ticker, Some(5), || t.snapshot(), |_| ControlFlow::Continue(()));
    assert_eq!(limited, SampleRun { ticks: 5, reason: StopReason::TickLimit });

    let interrupted = sampler.run(&mut ticker, None, || t.snapshot(), |_| ControlFlow::Break(()));
    assert_eq!(interrupted.reason, StopReason::Interrupted);
    assert_eq!(interrupted.ticks, 1);
}

#[test]
fn migrations_run_once() {
    let pool = DbPool::in_memory().unwrap();
    let first = run_pending_migrations(&pool.conn).unwrap();
    assert!(first >= 2);
    assert_eq!(run_pending_migrations(&pool.conn).unwrap(), 0);

    let versions = applied_versions(&pool.conn).unwrap();
    assert_eq!(versions.len(), first);
    assert_eq!(versions[0], "20251019_0001_create_kv");
}
