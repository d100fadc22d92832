//! External image viewer programs.

use std::path::{Path, PathBuf};
use std::process::Command;

use log::{debug, info};

use crate::plotting::{PlotError, PlotResult};

#[cfg(target_os = "macos")]
const CANDIDATES: &[(&str, &[&str])] = &[("open", &["-W"])];

#[cfg(windows)]
const CANDIDATES: &[(&str, &[&str])] = &[("mspaint", &[])];

#[cfg(not(any(target_os = "macos", windows)))]
const CANDIDATES: &[(&str, &[&str])] = &[
    ("feh", &[]),
    ("eog", &[]),
    ("sxiv", &[]),
    ("display", &[]),
    ("xdg-open", &[]),
];

// Launchers that hand the file to another process and return at once.
const DETACHING: &[&str] = &["xdg-open", "gio", "start"];

/// A program that can display an image file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewer {
    pub program: PathBuf,
    pub args: Vec<String>,
    /// Whether the program runs until the window is closed.
    pub blocking: bool,
}

impl Viewer {
    pub fn new(program: impl Into<PathBuf>, args: Vec<String>) -> Self {
        let program = program.into();
        let blocking = program
            .file_stem()
            .and_then(|s| s.to_str())
            .map_or(true, |name| !DETACHING.contains(&name));
        Viewer {
            program,
            args,
            blocking,
        }
    }

    /// Find a viewer: `HICKORY_VIEWER` if set, else the first platform candidate on `PATH`.
    pub fn find(lookup: &dyn Fn(&str) -> Option<String>) -> Option<Viewer> {
        let path_var = lookup("PATH").unwrap_or_default();

        if let Some(requested) = lookup("HICKORY_VIEWER").filter(|v| !v.trim().is_empty()) {
            let mut parts = requested.split_whitespace();
            let name = parts.next()?;
            let args = parts.map(str::to_string).collect();
            let found = locate(name, &path_var);
            if found.is_none() {
                debug!("HICKORY_VIEWER program '{}' not found", name);
            }
            return found.map(|program| Viewer::new(program, args));
        }

        CANDIDATES.iter().find_map(|(name, args)| {
            let program = search_path(name, &path_var)?;
            debug!("Found viewer candidate {}", program.display());
            Some(Viewer::new(
                program,
                args.iter().map(|a| a.to_string()).collect(),
            ))
        })
    }

    /// Open `path` in the viewer. Blocking viewers are waited on.
    pub fn open(&self, path: &Path) -> PlotResult<()> {
        let mut command = Command::new(&self.program);
        command.args(&self.args).arg(path);
        info!("Showing {} with {}", path.display(), self.program.display());

        if !self.blocking {
            command
                .spawn()
                .map_err(|e| PlotError::Viewer(format!("{}: {}", self.program.display(), e)))?;
            return Ok(());
        }

        let status = command
            .status()
            .map_err(|e| PlotError::Viewer(format!("{}: {}", self.program.display(), e)))?;
        if !status.success() {
            return Err(PlotError::Viewer(format!(
                "{} exited with {}",
                self.program.display(),
                status
            )));
        }
        Ok(())
    }
}

/// An absolute or relative path is taken as is; a bare name is searched on `PATH`.
fn locate(name: &str, path_var: &str) -> Option<PathBuf> {
    let candidate = Path::new(name);
    if candidate.components().count() > 1 || candidate.is_absolute() {
        return is_executable(candidate).then(|| candidate.to_path_buf());
    }
    search_path(name, path_var)
}

fn search_path(name: &str, path_var: &str) -> Option<PathBuf> {
    std::env::split_paths(path_var).find_map(|dir| {
        let candidate = dir.join(name);
        if is_executable(&candidate) {
            return Some(candidate);
        }
        if cfg!(windows) {
            let exe = dir.join(format!("{}.exe", name));
            if is_executable(&exe) {
                return Some(exe);
            }
        }
        None
    })
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;

    fn fake_program(dir: &Path, name: &str, mode: u32) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, "#!/bin/sh\nexit 0\n").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(mode)).unwrap();
        path
    }

    #[test]
    fn test_requested_viewer_on_path() {
        let dir = tempfile::tempdir().unwrap();
        let program = fake_program(dir.path(), "myview", 0o755);
        let path = dir.path().to_string_lossy().to_string();
        let lookup = move |key: &str| match key {
            "PATH" => Some(path.clone()),
            "HICKORY_VIEWER" => Some("myview --fullscreen".to_string()),
            _ => None,
        };
        let viewer = Viewer::find(&lookup).unwrap();
        assert_eq!(viewer.program, program);
        assert_eq!(viewer.args, vec!["--fullscreen".to_string()]);
        assert!(viewer.blocking);
    }

    #[test]
    fn test_non_executable_skipped() {
        let dir = tempfile::tempdir().unwrap();
        fake_program(dir.path(), "myview", 0o644);
        let path = dir.path().to_string_lossy().to_string();
        let lookup = move |key: &str| match key {
            "PATH" => Some(path.clone()),
            "HICKORY_VIEWER" => Some("myview".to_string()),
            _ => None,
        };
        assert!(Viewer::find(&lookup).is_none());
    }

    #[test]
    fn test_xdg_open_detaches() {
        assert!(!Viewer::new("/usr/bin/xdg-open", vec![]).blocking);
        assert!(Viewer::new("/usr/bin/feh", vec![]).blocking);
    }

    #[test]
    fn test_empty_path_finds_nothing() {
        let lookup = |_: &str| -> Option<String> { None };
        assert!(Viewer::find(&lookup).is_none());
    }

    #[test]
    fn test_open_reports_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fail");
        fs::write(&path, "#!/bin/sh\nexit 3\n").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        let viewer = Viewer::new(&path, vec![]);
        let err = viewer.open(Path::new("image.png")).unwrap_err();
        assert!(matches!(err, PlotError::Viewer(_)));
    }
}
