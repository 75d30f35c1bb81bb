use std::fs;

use pixie_devsetup::{ensure_profile_snippet, run, SetupConfig, MARKER};

fn config_in(dir: &tempfile::TempDir) -> SetupConfig {
    SetupConfig::new(dir.path(), dir.path())
}

#[test]
fn running_twice_writes_marker_once() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = config_in(&dir);

    assert!(run(&cfg).unwrap());
    assert!(!run(&cfg).unwrap());

    let profile = fs::read_to_string(&cfg.profile).unwrap();
    assert_eq!(profile.matches(MARKER).count(), 1);
}

#[test]
fn creates_missing_profile() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = config_in(&dir);
    assert!(!cfg.profile.exists());

    run(&cfg).unwrap();

    assert_eq!(fs::read_to_string(&cfg.profile).unwrap(), cfg.snippet());
}

#[test]
fn preserves_existing_profile_contents() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = config_in(&dir);
    fs::write(&cfg.profile, "alias ll='ls -l'").unwrap();

    run(&cfg).unwrap();

    let profile = fs::read_to_string(&cfg.profile).unwrap();
    assert!(profile.starts_with("alias ll='ls -l'\n"));
    assert!(profile.ends_with(&cfg.snippet()));
}

#[test]
fn existing_marker_anywhere_skips_write() {
    let dir = tempfile::tempdir().unwrap();
    let profile = dir.path().join(".profile");
    let original = format!("echo hi\n{MARKER}\n# edited by hand\n");
    fs::write(&profile, &original).unwrap();

    assert!(!ensure_profile_snippet(&profile, MARKER, "something else\n").unwrap());
    assert_eq!(fs::read_to_string(&profile).unwrap(), original);
}

#[test]
fn unreadable_profile_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    // A directory cannot be read as a profile.
    assert!(ensure_profile_snippet(dir.path(), MARKER, "x\n").is_err());
}
