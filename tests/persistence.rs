use replhist::{HistoryConfig, HistoryStore};
use std::fs;

fn lines(store: &HistoryStore) -> Vec<&str> {
    store.iter().map(|e| e.as_str()).collect()
}

#[test]
fn save_merges_with_what_another_process_wrote() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("history");

    // B starts while the file is still empty
    let mut b = HistoryStore::new(100);
    b.load(&path).unwrap();
    b.add("z");

    let mut a = HistoryStore::new(100);
    a.add("x");
    a.add("y");
    a.save(&path).unwrap();

    b.save(&path).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "x\ny\nz\n");
    assert_eq!(lines(&b), ["x", "y", "z"]);
}

#[test]
fn merge_deduplicates_across_sessions() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("history");
    fs::write(&path, "make\nls\ncargo test\n").unwrap();

    let mut store = HistoryStore::new(100);
    store.add("ls");
    store.add("vim");
    store.save(&path).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "make\ncargo test\nls\nvim\n");
}

#[test]
fn merge_respects_capacity_lag() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("history");
    fs::write(&path, "a\nb\nc\n").unwrap();

    let mut store = HistoryStore::with_config(&HistoryConfig::default().with_capacity(2).with_unique(false));
    store.add("d");
    store.save(&path).unwrap();
    assert_eq!(lines(&store), ["b", "c", "d"]);
    assert_eq!(fs::read_to_string(&path).unwrap(), "b\nc\nd\n");
}

#[test]
fn round_trip_drops_only_empty_entries() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("history");
    let config = HistoryConfig::default().with_capacity(50).with_unique(false);

    let mut original = HistoryStore::with_config(&config);
    for l in ["echo ü", "", "ls", "echo ü", "  spaced  "] {
        original.add(l);
    }
    original.save(&path).unwrap();

    let mut reloaded = HistoryStore::with_config(&config);
    reloaded.load(&path).unwrap();
    let expected: Vec<&str> = lines(&original).into_iter().filter(|l| !l.is_empty()).collect();
    assert_eq!(lines(&reloaded), expected);
}

#[test]
fn repeated_saves_are_stable() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("history");
    let mut store = HistoryStore::new(100);
    store.add("one");
    store.add("two");
    store.save(&path).unwrap();
    store.save(&path).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "one\ntwo\n");
}

#[test]
fn interleaved_processes_keep_everything() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("history");
    let mut sessions: Vec<HistoryStore> = (0..3).map(|_| HistoryStore::new(100)).collect();
    for (i, s) in sessions.iter_mut().enumerate() {
        s.add(format!("cmd {}", i));
    }
    for s in sessions.iter_mut() {
        s.save(&path).unwrap();
    }
    assert_eq!(fs::read_to_string(&path).unwrap(), "cmd 0\ncmd 1\ncmd 2\n");
}

#[test]
fn saving_from_threads_loses_no_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("history");
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let path = path.clone();
            std::thread::spawn(move || {
                let mut store = HistoryStore::new(100);
                store.add(format!("thread {}", i));
                store.save(&path).unwrap();
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }
    let mut saved: Vec<String> = fs::read_to_string(&path)
        .unwrap()
        .lines()
        .map(String::from)
        .collect();
    saved.sort();
    assert_eq!(saved, ["thread 0", "thread 1", "thread 2", "thread 3"]);
}
