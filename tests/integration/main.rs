//! Integration tests for keystamp

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    struct Workspace {
        dir: TempDir,
    }

    impl Workspace {
        fn new() -> Self {
            Self {
                dir: TempDir::new().unwrap(),
            }
        }

        fn state(&self) -> PathBuf {
            self.dir.path().join("state.json")
        }

        fn config(&self) -> PathBuf {
            self.dir.path().join("config.toml")
        }

        fn keystamp(&self) -> Command {
            let mut cmd = cargo_bin_cmd!("keystamp");
            cmd.env("KEYSTAMP_CONFIG", self.config())
                .env("KEYSTAMP_STATE", self.state())
                .env("NO_COLOR", "1");
            cmd
        }

        fn path(&self) -> &Path {
            self.dir.path()
        }
    }

    #[test]
    fn help_displays() {
        Workspace::new()
            .keystamp()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("cache keys"));
    }

    #[test]
    fn version_displays() {
        Workspace::new()
            .keystamp()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("keystamp"));
    }

    #[test]
    fn untouched_key_time_is_zero() {
        Workspace::new()
            .keystamp()
            .args(["time", "never-written"])
            .assert()
            .success()
            .stdout("0\n");
    }

    #[test]
    fn update_persists_state_file() {
        let ws = Workspace::new();
        ws.keystamp()
            .args(["update", "build/app"])
            .assert()
            .success()
            .stdout(predicate::str::starts_with("build/app\t"));

        let content = std::fs::read_to_string(ws.state()).unwrap();
        let doc: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert!(doc["__cache"]["build/app"].as_i64().unwrap() > 0);
    }

    #[test]
    fn dependency_ordering_across_invocations() {
        let ws = Workspace::new();
        ws.keystamp().args(["update", "A"]).assert().success();
        ws.keystamp().args(["update", "B"]).assert().success();

        ws.keystamp()
            .args(["valid", "A", "--deps", "B"])
            .assert()
            .success()
            .stdout("stale\n");
        ws.keystamp()
            .args(["valid", "B", "--deps", "A"])
            .assert()
            .success()
            .stdout("valid\n");
    }

    #[test]
    fn invalidate_makes_key_stale() {
        let ws = Workspace::new();
        ws.keystamp().args(["update", "A", "B"]).assert().success();
        ws.keystamp()
            .args(["invalidate", "B"])
            .assert()
            .success()
            .stdout(predicate::str::contains("invalidated B"));

        ws.keystamp()
            .args(["valid", "B"])
            .assert()
            .success()
            .stdout("stale\n");
        ws.keystamp()
            .args(["time", "B"])
            .assert()
            .success()
            .stdout("0\n");
    }

    #[test]
    fn valid_exit_code_on_stale() {
        let ws = Workspace::new();
        ws.keystamp()
            .args(["valid", "missing", "--exit-code"])
            .assert()
            .failure()
            .stdout("stale\n")
            .stderr(predicate::str::contains("missing is stale"));
    }

    #[test]
    fn show_lists_keys_as_json() {
        let ws = Workspace::new();
        ws.keystamp().args(["update", "a", "b"]).assert().success();
        ws.keystamp().args(["invalidate", "b"]).assert().success();

        let output = ws
            .keystamp()
            .args(["show", "--format", "json"])
            .output()
            .unwrap();
        assert!(output.status.success());

        let keys: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(keys.as_array().unwrap().len(), 2);
        assert_eq!(keys[0]["key"], "a");
        assert_eq!(keys[0]["set"], true);
        assert_eq!(keys[1]["key"], "b");
        assert_eq!(keys[1]["key_time"], 0);
        assert_eq!(keys[1]["set"], false);
    }

    #[test]
    fn show_empty() {
        Workspace::new()
            .keystamp()
            .args(["show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("No keys recorded"));
    }

    #[test]
    fn corrupt_state_file_fails_with_hint() {
        let ws = Workspace::new();
        std::fs::write(ws.state(), "not json").unwrap();

        ws.keystamp()
            .args(["time", "a"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Corrupt state file"))
            .stderr(predicate::str::contains("Hint:"));
    }

    #[test]
    fn namespace_from_config() {
        let ws = Workspace::new();
        std::fs::write(ws.config(), "[store]\nnamespace = \"builds\"\n").unwrap();

        ws.keystamp().args(["update", "a"]).assert().success();

        let doc: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(ws.state()).unwrap()).unwrap();
        assert!(doc["builds"]["a"].is_i64());
    }

    #[test]
    fn journal_records_dispatches() {
        let ws = Workspace::new();
        let journal = ws.path().join("journal.log");
        std::fs::write(
            ws.config(),
            format!(
                "[journal]\nenabled = true\npath = {:?}\n",
                journal.display().to_string()
            ),
        )
        .unwrap();

        ws.keystamp().args(["update", "a"]).assert().success();
        ws.keystamp().args(["invalidate", "a"]).assert().success();

        let content = std::fs::read_to_string(&journal).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("keystamp/UPDATE"));
        assert!(lines[1].contains("keystamp/INVALIDATE"));
    }

    #[test]
    fn config_path() {
        let ws = Workspace::new();
        ws.keystamp()
            .args(["config", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains("config.toml"));
    }

    #[test]
    fn config_show() {
        Workspace::new()
            .keystamp()
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("[store]"));
    }

    #[test]
    fn config_init_writes_file() {
        let ws = Workspace::new();
        ws.keystamp().args(["config", "init"]).assert().success();
        assert!(ws.config().exists());

        ws.keystamp()
            .args(["config", "init"])
            .assert()
            .success()
            .stdout(predicate::str::contains("--force"));
    }

    #[test]
    fn invalid_config_fails() {
        let ws = Workspace::new();
        std::fs::write(ws.config(), "[store\n").unwrap();

        ws.keystamp()
            .args(["show"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid configuration"));
    }
}

mod tracker_tests {
    use keystamp::keys::{ManualTimeSource, UNSET_KEY_TIME};
    use keystamp::{
        FileStore, KeyTracker, KeystampError, MemoryStore, MonotonicClock, MIN_VALID_KEY,
    };
    use std::sync::Arc;
    use std::thread;
    use tempfile::TempDir;

    const NO_DEPS: &[&str] = &[];

    #[test]
    fn operations_fail_before_registration() {
        let tracker = KeyTracker::new();
        assert!(matches!(
            tracker.update_key("a"),
            Err(KeystampError::UninitializedStore)
        ));
        assert!(matches!(
            tracker.key_is_valid("a", NO_DEPS),
            Err(KeystampError::UninitializedStore)
        ));
    }

    #[test]
    fn end_to_end_scenario_on_file_store() {
        let dir = TempDir::new().unwrap();
        let mut tracker = KeyTracker::new();
        let store = FileStore::open(dir.path().join("state.json"), tracker.reducer()).unwrap();
        tracker.register(store);

        tracker.dispatch(tracker.update_key("A").unwrap()).unwrap();
        let t1 = tracker.key_time("A").unwrap();
        tracker.dispatch(tracker.update_key("B").unwrap()).unwrap();
        let t2 = tracker.key_time("B").unwrap();

        assert!(t1 >= MIN_VALID_KEY);
        assert!(t2 > t1);
        assert!(!tracker.key_is_valid("A", &["B"]).unwrap());
        assert!(tracker.key_is_valid("B", &["A"]).unwrap());

        tracker.dispatch(tracker.invalidate_key("B").unwrap()).unwrap();
        assert!(!tracker.key_is_valid("B", NO_DEPS).unwrap());
        assert_eq!(tracker.key_time("B").unwrap(), UNSET_KEY_TIME);
    }

    #[test]
    fn frozen_clock_still_orders_writes() {
        let source = Arc::new(ManualTimeSource::new(42));
        let mut tracker = KeyTracker::with_clock(Arc::new(MonotonicClock::with_source(source)));
        let store = MemoryStore::new(tracker.reducer());
        tracker.register(store);

        let keys: Vec<String> = (0..50).map(|i| format!("k{}", i)).collect();
        for key in &keys {
            tracker.dispatch(tracker.update_key(key.as_str()).unwrap()).unwrap();
        }

        for pair in keys.windows(2) {
            assert!(tracker.key_is_valid(&pair[1], &[&pair[0]]).unwrap());
            assert!(!tracker.key_is_valid(&pair[0], &[&pair[1]]).unwrap());
        }
    }

    #[test]
    fn concurrent_writers_through_one_tracker() {
        let tracker = Arc::new(KeyTracker::in_memory());

        let handles: Vec<_> = (0..4)
            .map(|t| {
                let tracker = tracker.clone();
                thread::spawn(move || {
                    for i in 0..25 {
                        let action = tracker.update_key(format!("t{}-{}", t, i)).unwrap();
                        tracker.dispatch(action).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let state = tracker.current_state().unwrap();
        assert_eq!(state.len(), 100);

        let mut times: Vec<_> = state.entries().map(|(_, t)| t).collect();
        times.sort_unstable();
        times.dedup();
        assert_eq!(times.len(), 100, "every write gets a distinct timestamp");
    }
}
