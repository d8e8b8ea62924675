use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::thread;

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use tempfile::TempDir;

use idiom_quest_lib::catalog::write_reference_dataset;
use idiom_quest_lib::progress::{ProgressStore, UserDatabase};
use idiom_quest_lib::review::interval;
use idiom_quest_lib::{Handle, Idiom, ReferenceCatalog, StoreError, StoreEvent};

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 10, 1, 8, 0, 0).unwrap()
}

fn reference(dir: &Path, words: &[&str]) -> PathBuf {
    let path = dir.join("IdiomData.sqlite");
    let idioms: Vec<Idiom> = words
        .iter()
        .enumerate()
        .map(|(i, w)| Idiom::new(*w, format!("pron {}", i), format!("definition of {}", w)))
        .collect();
    write_reference_dataset(&path, &idioms).unwrap();
    path
}

fn numbered(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("W{:04}", i)).collect()
}

fn open(dir: &Path, words: &[&str]) -> Handle {
    let ref_path = reference(dir, words);
    Handle::open(&ref_path, &dir.join("UserData.sqlite")).unwrap()
}

#[test]
fn three_word_catalog_learn_and_due() {
    let temp_dir = TempDir::new().unwrap();
    let handle = open(temp_dir.path(), &["A", "B", "C"]);
    let progress = handle.progress();

    assert_eq!(progress.count().unwrap(), 3);
    assert!(progress.list_learned().unwrap().is_empty());
    assert!(progress.list_due(t0()).unwrap().is_empty());

    progress.mark_learned("A", t0()).unwrap();
    let learned: Vec<String> = progress.list_learned().unwrap().into_iter().map(|r| r.word).collect();
    assert_eq!(learned, vec!["A"]);

    let boundary = t0() + interval(1);
    assert!(progress.list_due(boundary - Duration::seconds(1)).unwrap().is_empty());
    let due: Vec<String> = progress
        .list_due(boundary + Duration::seconds(1))
        .unwrap()
        .into_iter()
        .map(|r| r.word)
        .collect();
    assert_eq!(due, vec!["A"]);
}

#[test]
fn relearning_starts_over() {
    let temp_dir = TempDir::new().unwrap();
    let handle = open(temp_dir.path(), &["A", "B", "C"]);
    let progress = handle.progress();

    progress.mark_learned("A", t0()).unwrap();
    progress.record_review("A", t0() + Duration::days(1)).unwrap();
    progress.record_review("A", t0() + Duration::days(4)).unwrap();
    progress.mark_unlearned("A").unwrap();
    assert!(progress.list_learned().unwrap().is_empty());

    let t1 = t0() + Duration::days(10);
    let record = progress.mark_learned("A", t1).unwrap();
    assert_eq!(record.review_count, 1);
    assert_eq!(record.last_reviewed_at, Some(t1));
}

#[test]
fn reviews_are_monotone() {
    let temp_dir = TempDir::new().unwrap();
    let handle = open(temp_dir.path(), &["A"]);

    handle.toggle_learned("A", t0()).unwrap();
    let mut now = t0();
    let mut last_count = 1;
    for _ in 0..8 {
        now = now + Duration::days(2);
        let record = handle.mark_reviewed("A", now).unwrap();
        assert_eq!(record.review_count, last_count + 1);
        assert!(record.next_review_due_at.unwrap() > record.last_reviewed_at.unwrap());
        last_count = record.review_count;
    }
}

#[test]
fn reopening_keeps_progress_and_does_not_duplicate() {
    let temp_dir = TempDir::new().unwrap();
    let words = ["A", "B", "C", "D"];
    {
        let handle = open(temp_dir.path(), &words);
        handle.toggle_learned("B", t0()).unwrap();
    }

    let handle = Handle::open(
        &temp_dir.path().join("IdiomData.sqlite"),
        &temp_dir.path().join("UserData.sqlite"),
    )
    .unwrap();

    let rows = handle.progress().list_all().unwrap();
    assert_eq!(rows.len(), words.len());
    let learned: Vec<&str> = rows.iter().filter(|r| r.is_learned).map(|r| r.word.as_str()).collect();
    assert_eq!(learned, vec!["B"]);
}

#[test]
fn catalog_growth_is_seeded_on_next_open() {
    let temp_dir = TempDir::new().unwrap();
    {
        let handle = open(temp_dir.path(), &["A", "B"]);
        handle.toggle_learned("A", t0()).unwrap();
    }

    let handle = open(temp_dir.path(), &["A", "B", "C", "D", "E"]);
    assert_eq!(handle.progress().count().unwrap(), 5);
    assert_eq!(handle.catalog_size().unwrap(), 5);
    assert!(handle.get_idiom("A").unwrap().progress.is_learned);
}

#[test]
fn seeding_races_with_interactive_writes() {
    let temp_dir = TempDir::new().unwrap();
    let words = numbered(600);
    let word_refs: Vec<&str> = words.iter().map(String::as_str).collect();
    let ref_path = reference(temp_dir.path(), &word_refs);

    let catalog = Arc::new(ReferenceCatalog::open(&ref_path).unwrap());
    let db = Arc::new(UserDatabase::open(&temp_dir.path().join("UserData.sqlite")).unwrap());
    let store = Arc::new(ProgressStore::new(db, catalog));

    let mut workers = Vec::new();
    for _ in 0..3 {
        let store = Arc::clone(&store);
        let words = words.clone();
        workers.push(thread::spawn(move || {
            let refs: Vec<&str> = words.iter().map(String::as_str).collect();
            for batch in refs.chunks(50) {
                store.seed_batch(batch).unwrap();
            }
        }));
    }
    {
        let store = Arc::clone(&store);
        let words = words.clone();
        workers.push(thread::spawn(move || {
            for word in words.iter().rev().take(40) {
                store.mark_learned(word, t0()).unwrap();
            }
        }));
    }
    for worker in workers {
        worker.join().unwrap();
    }

    let rows = store.list_all().unwrap();
    assert_eq!(rows.len(), 600);
    let stored: Vec<&str> = rows.iter().map(|r| r.word.as_str()).collect();
    assert_eq!(stored, word_refs);

    let learned = store.list_learned().unwrap();
    assert_eq!(learned.len(), 40);
    assert!(learned.iter().all(|r| r.review_count == 1));
}

#[test]
fn background_reconcile_runs_beside_writes() {
    let temp_dir = TempDir::new().unwrap();
    let words = numbered(120);
    let word_refs: Vec<&str> = words.iter().map(String::as_str).collect();
    let handle = Arc::new(open(temp_dir.path(), &word_refs));

    let seeding = handle.reconcile_in_background().unwrap();
    for word in word_refs.iter().take(10) {
        handle.toggle_learned(word, t0()).unwrap();
    }
    assert_eq!(seeding.join().unwrap().unwrap(), 0);

    assert_eq!(handle.progress().count().unwrap(), 120);
    assert_eq!(handle.list_learned_idioms().unwrap().len(), 10);
}

#[test]
fn corrupted_progress_is_rebuilt() {
    let temp_dir = TempDir::new().unwrap();
    let progress_path = temp_dir.path().join("UserData.sqlite");
    {
        let handle = open(temp_dir.path(), &["A", "B", "C"]);
        handle.toggle_learned("A", t0()).unwrap();
    }

    fs::write(&progress_path, "this is not a database file\n".repeat(300)).unwrap();

    let handle = Handle::open(&temp_dir.path().join("IdiomData.sqlite"), &progress_path).unwrap();
    assert_eq!(handle.progress().count().unwrap(), 3);
    assert!(handle.list_learned_idioms().unwrap().is_empty());
}

#[test]
fn reference_writes_fail_loudly() {
    let temp_dir = TempDir::new().unwrap();
    let handle = open(temp_dir.path(), &["A"]);

    let result = handle.catalog().try_insert(&Idiom::new("Z", "z", "z"));
    assert!(matches!(result, Err(StoreError::ReadOnlyViolation(_))));
    assert!(handle.catalog().get_by_word("Z").is_none());
}

#[test]
fn empty_catalog_has_no_daily_idiom() {
    let temp_dir = TempDir::new().unwrap();
    let handle = open(temp_dir.path(), &[]);

    let today = NaiveDate::from_ymd_opt(2025, 10, 1).unwrap();
    assert!(matches!(handle.daily_idiom(today), Err(StoreError::EmptyCatalog)));
    assert!(handle.random_idioms(3).is_empty());
}

#[test]
fn daily_idiom_changes_across_days() {
    let temp_dir = TempDir::new().unwrap();
    let words = numbered(40);
    let word_refs: Vec<&str> = words.iter().map(String::as_str).collect();
    let handle = open(temp_dir.path(), &word_refs);

    let first = handle.daily_idiom(NaiveDate::from_ymd_opt(2025, 10, 3).unwrap()).unwrap();
    let second = handle.daily_idiom(NaiveDate::from_ymd_opt(2025, 10, 4).unwrap()).unwrap();
    assert_ne!(first.idiom.word, second.idiom.word);
}

#[test]
fn repeated_search_replaces_history() {
    let temp_dir = TempDir::new().unwrap();
    let handle = open(temp_dir.path(), &["一心一意", "三心二意", "一马当先"]);

    assert_eq!(handle.search("一", t0()).unwrap().len(), 2);
    let hits = handle.search("一", t0() + Duration::minutes(5)).unwrap();
    assert_eq!(hits.len(), 2);

    let entries = handle.history().entries("一").unwrap();
    assert_eq!(entries.len(), 2);
    assert!(entries.iter().all(|e| e.searched_at == t0() + Duration::minutes(5)));

    let groups = handle.recent_searches(t0() + Duration::hours(1)).unwrap();
    assert_eq!(groups.len(), 1);
}

#[test]
fn empty_search_has_no_side_effects() {
    let temp_dir = TempDir::new().unwrap();
    let handle = open(temp_dir.path(), &["A", "B"]);

    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&events);
    handle
        .subscribe(Arc::new(move |event: &StoreEvent| sink.lock().unwrap().push(event.clone())))
        .unwrap();

    assert!(handle.search("", t0()).unwrap().is_empty());
    assert!(handle.search("   ", t0()).unwrap().is_empty());
    assert!(handle.recent_searches(t0()).unwrap().is_empty());
    assert!(events.lock().unwrap().is_empty());
}

#[test]
fn observers_see_committed_changes() {
    let temp_dir = TempDir::new().unwrap();
    let handle = open(temp_dir.path(), &["A", "B"]);

    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&events);
    handle
        .subscribe(Arc::new(move |event: &StoreEvent| sink.lock().unwrap().push(event.clone())))
        .unwrap();

    handle.toggle_learned("A", t0()).unwrap();
    handle.mark_reviewed("A", t0() + Duration::days(1)).unwrap();
    let _ = handle.mark_reviewed("B", t0());
    handle.toggle_learned("A", t0()).unwrap();

    assert_eq!(
        *events.lock().unwrap(),
        vec![
            StoreEvent::Learned { word: "A".to_string() },
            StoreEvent::Reviewed { word: "A".to_string(), review_count: 2 },
            StoreEvent::Unlearned { word: "A".to_string() },
        ]
    );
}
