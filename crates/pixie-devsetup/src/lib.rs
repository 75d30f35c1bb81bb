//! Devcontainer display setup.
//!
//! Appends a marker-delimited snippet to the login profile that exports
//! `DISPLAY` and starts `supervisord` (which runs `Xvfb`) when it is not
//! already running. Running the setup again is a no-op.

use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// First line of the appended block. Its presence means setup already ran.
pub const MARKER: &str = "# >>> pixie devcontainer display >>>";
const END_MARKER: &str = "# <<< pixie devcontainer display <<<";

/// Where and what to write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupConfig {
    /// Login profile to append to.
    pub profile: PathBuf,
    /// Guard line; the block is skipped when the profile contains it.
    pub marker: String,
    /// Supervisor config that defines the `Xvfb` program.
    pub supervisor_conf: PathBuf,
    /// X display the virtual framebuffer listens on.
    pub display: String,
}

impl SetupConfig {
    pub fn new(home: &Path, workspace: &Path) -> Self {
        Self {
            profile: home.join(".bashrc"),
            marker: MARKER.to_string(),
            supervisor_conf: workspace.join(".devcontainer").join("supervisord.conf"),
            display: ":1".to_string(),
        }
    }

    /// Uses the current user's home directory and the working directory.
    pub fn detect() -> Result<Self> {
        let dirs = directories::BaseDirs::new().context("cannot determine home directory")?;
        let workspace = std::env::current_dir().context("cannot determine working directory")?;
        Ok(Self::new(dirs.home_dir(), &workspace))
    }

    /// Shell block appended to the profile.
    pub fn snippet(&self) -> String {
        format!(
            "{marker}\n\
             export DISPLAY={display}\n\
             if ! pgrep -x supervisord >/dev/null 2>&1; then\n\
             \x20   supervisord -c \"{conf}\" >/dev/null 2>&1\n\
             fi\n\
             {END_MARKER}\n",
            marker = self.marker,
            display = self.display,
            conf = self.supervisor_conf.display(),
        )
    }
}

/// Appends `snippet` to `profile` unless the file already contains `marker`.
///
/// Creates the profile if it does not exist. Returns whether anything was written.
pub fn ensure_profile_snippet(profile: &Path, marker: &str, snippet: &str) -> Result<bool> {
    let existing = match std::fs::read_to_string(profile) {
        Ok(s) => s,
        Err(e) if e.kind() == ErrorKind::NotFound => String::new(),
        Err(e) => return Err(e).with_context(|| format!("failed to read {}", profile.display())),
    };

    if existing.contains(marker) {
        return Ok(false);
    }

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(profile)
        .with_context(|| format!("failed to open {}", profile.display()))?;

    let separator = if existing.is_empty() || existing.ends_with('\n') { "" } else { "\n" };
    write!(file, "{separator}{snippet}")
        .with_context(|| format!("failed to write {}", profile.display()))?;

    Ok(true)
}

/// Runs the setup for `config`. Returns whether the profile was modified.
pub fn run(config: &SetupConfig) -> Result<bool> {
    let wrote = ensure_profile_snippet(&config.profile, &config.marker, &config.snippet())?;
    if wrote {
        log::info!("added display supervisor startup to {}", config.profile.display());
    } else {
        log::info!("{} already configured", config.profile.display());
    }
    Ok(wrote)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snippet_is_delimited_and_references_config() {
        let cfg = SetupConfig::new(Path::new("/home/dev"), Path::new("/workspaces/pixie"));
        let s = cfg.snippet();
        assert!(s.starts_with(MARKER));
        assert!(s.trim_end().ends_with(END_MARKER));
        assert!(s.contains("export DISPLAY=:1\n"));
        assert!(s.contains("/workspaces/pixie/.devcontainer/supervisord.conf"));
        assert!(s.contains("    supervisord -c"));
    }

    #[test]
    fn default_profile_is_bashrc() {
        let cfg = SetupConfig::new(Path::new("/home/dev"), Path::new("/w"));
        assert_eq!(cfg.profile, PathBuf::from("/home/dev/.bashrc"));
    }
}
