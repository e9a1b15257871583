//! Integration tests for asset-cache

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use std::path::Path;
    use tempfile::TempDir;

    /// Command isolated from the user's config and cache
    fn asset_cache(temp: &TempDir) -> Command {
        let mut cmd = cargo_bin_cmd!("asset-cache");
        cmd.env("ASSET_CACHE_CONFIG", temp.path().join("config.toml"))
            .env("ASSET_CACHE_DIR", temp.path().join("cache"));
        cmd
    }

    fn cache_dir(temp: &TempDir) -> std::path::PathBuf {
        temp.path().join("cache")
    }

    fn write_snapshot(dir: &Path, body: &str) -> std::path::PathBuf {
        let path = dir.join("snapshot.json");
        std::fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn help_displays() {
        let temp = TempDir::new().unwrap();
        asset_cache(&temp)
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("music player shell"));
    }

    #[test]
    fn version_displays() {
        let temp = TempDir::new().unwrap();
        asset_cache(&temp)
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("asset-cache"));
    }

    #[test]
    fn list_empty() {
        let temp = TempDir::new().unwrap();
        asset_cache(&temp)
            .arg("list")
            .assert()
            .success()
            .stdout(predicate::str::contains("No cached assets"));

        asset_cache(&temp)
            .args(["list", "--format", "json"])
            .assert()
            .success()
            .stdout(predicate::str::diff("[]\n"));
    }

    #[test]
    fn show_missing_slot() {
        let temp = TempDir::new().unwrap();
        asset_cache(&temp)
            .args(["show", "main.css"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Slot not found: main.css"))
            .stderr(predicate::str::contains("asset-cache list"));
    }

    #[test]
    fn show_rejects_path_names() {
        let temp = TempDir::new().unwrap();
        asset_cache(&temp)
            .args(["show", "../config.toml"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid slot name"));
    }

    #[test]
    fn config_path_and_show() {
        let temp = TempDir::new().unwrap();
        asset_cache(&temp)
            .args(["config", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains("config.toml"));

        asset_cache(&temp)
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("[cache]"))
            .stdout(predicate::str::contains("freshness_hours = 24"));
    }

    #[test]
    fn config_init_writes_file() {
        let temp = TempDir::new().unwrap();
        asset_cache(&temp)
            .args(["config", "init"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Configuration initialized"));

        assert!(temp.path().join("config.toml").exists());

        asset_cache(&temp)
            .args(["config", "init"])
            .assert()
            .success()
            .stdout(predicate::str::contains("already exists"));
    }

    #[test]
    fn reconcile_stores_loaded_stylesheet() {
        let temp = TempDir::new().unwrap();
        let snapshot = write_snapshot(
            temp.path(),
            r#"{
                "origin": "https://music.example",
                "assets": [
                    {"kind": "stylesheet", "href": "https://music.example/s/_/x.css",
                     "rules": [".a{color:red}", ".b{color:blue}"]},
                    {"kind": "stylesheet", "href": "https://cdn.example/s/_/other.css",
                     "rules": [".c{}"]}
                ]
            }"#,
        );

        asset_cache(&temp)
            .args(["reconcile", "--format", "plain"])
            .arg(&snapshot)
            .assert()
            .success()
            .stdout(predicate::str::diff("x.css stored\n"));

        let stored = std::fs::read_to_string(cache_dir(&temp).join("x.css")).unwrap();
        assert_eq!(stored, ".a{color:red}\n.b{color:blue}\n");
        assert!(!cache_dir(&temp).join("other.css").exists());

        // Second load within the freshness window leaves the slot alone
        asset_cache(&temp)
            .args(["reconcile", "--format", "plain"])
            .arg(&snapshot)
            .assert()
            .success()
            .stdout(predicate::str::diff("x.css fresh\n"));
    }

    #[test]
    fn reconcile_restores_from_slots() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir_all(cache_dir(&temp)).unwrap();
        std::fs::write(cache_dir(&temp).join("main.css"), ".cached{}\n").unwrap();
        std::fs::write(cache_dir(&temp).join("logo.svg"), "<svg/>").unwrap();

        let snapshot = write_snapshot(
            temp.path(),
            r#"{
                "origin": "https://music.example",
                "assets": [
                    {"kind": "stylesheet", "href": "https://music.example/s/_/ss/k=abc", "slot": "main.css"},
                    {"kind": "image", "src": "https://music.example/img/logo.svg"},
                    {"kind": "image", "src": "https://music.example/img/banner.png"}
                ]
            }"#,
        );

        asset_cache(&temp)
            .args(["reconcile"])
            .arg(&snapshot)
            .assert()
            .success()
            .stdout(predicate::str::contains("2 restored"))
            .stdout(predicate::str::contains("1 stylesheet(s) adopted"))
            .stdout(predicate::str::contains("miss"));
    }

    #[test]
    fn reconcile_json_output() {
        let temp = TempDir::new().unwrap();
        let snapshot = write_snapshot(
            temp.path(),
            r#"{"assets": [{"kind": "image", "src": "https://music.youtube.com/img/logo.svg"}]}"#,
        );

        let output = asset_cache(&temp)
            .args(["reconcile", "--format", "json"])
            .arg(&snapshot)
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();

        let rows: serde_json::Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(rows[0]["kind"], "image");
        assert_eq!(rows[0]["slot"], "logo.svg");
        assert_eq!(rows[0]["outcome"], "miss");
    }

    #[test]
    fn reconcile_missing_snapshot_fails() {
        let temp = TempDir::new().unwrap();
        asset_cache(&temp)
            .args(["reconcile"])
            .arg(temp.path().join("nope.json"))
            .assert()
            .failure()
            .stderr(predicate::str::contains("reading snapshot"));
    }

    #[test]
    fn track_then_resume_once() {
        let temp = TempDir::new().unwrap();
        asset_cache(&temp)
            .args(["track", "https://music.example/watch?v=abc123"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Recorded track abc123"));

        asset_cache(&temp)
            .args(["resume", "https://music.example/"])
            .assert()
            .success()
            .stdout(predicate::str::diff("https://music.example/watch?v=abc123\n"));

        asset_cache(&temp)
            .args(["resume", "https://music.example/"])
            .assert()
            .success()
            .stdout(predicate::str::is_empty());
    }

    #[test]
    fn recorded_track_survives_list_and_clear() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir_all(cache_dir(&temp)).unwrap();
        std::fs::write(cache_dir(&temp).join("main.css"), "x").unwrap();

        asset_cache(&temp)
            .args(["track", "https://music.example/watch?v=keep1"])
            .assert()
            .success();

        asset_cache(&temp)
            .args(["list", "--format", "json"])
            .assert()
            .success()
            .stdout(predicate::str::contains("main.css"))
            .stdout(predicate::str::contains("last-played-id").not());

        asset_cache(&temp)
            .args(["clear", "--yes"])
            .assert()
            .success()
            .stdout(predicate::str::contains("cleared 1 slot(s)"));

        asset_cache(&temp)
            .args(["resume", "https://music.example/"])
            .assert()
            .success()
            .stdout(predicate::str::diff("https://music.example/watch?v=keep1\n"));
    }

    #[test]
    fn clear_with_yes() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir_all(cache_dir(&temp)).unwrap();
        std::fs::write(cache_dir(&temp).join("main.css"), "x").unwrap();

        asset_cache(&temp)
            .args(["clear", "--yes"])
            .assert()
            .success()
            .stdout(predicate::str::contains("cleared 1 slot(s)"));

        assert!(!cache_dir(&temp).join("main.css").exists());
    }
}
