//! Deferred selection of the interactive display path.
//!
//! Nothing here runs at load or construction time. The first call to
//! [`BackendResolver::resolve`] probes the environment and the result is
//! cached for the life of the resolver.

mod viewer;

pub use viewer::Viewer;

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock};

use log::{debug, info, warn};

use crate::plotting::{Figure, PlotError, PlotResult};

/// Why no interactive path exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadlessReason {
    /// `HICKORY_BACKEND` asked for file output only
    Forced,
    NoDisplay,
    NoViewer,
}

/// Outcome of the probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Backend {
    Interactive(Viewer),
    Headless(HeadlessReason),
}

impl Backend {
    pub fn is_interactive(&self) -> bool {
        matches!(self, Backend::Interactive(_))
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Backend::Interactive(viewer) => write!(f, "interactive ({})", viewer.program.display()),
            Backend::Headless(HeadlessReason::Forced) => write!(f, "headless (forced)"),
            Backend::Headless(HeadlessReason::NoDisplay) => write!(f, "headless (no display)"),
            Backend::Headless(HeadlessReason::NoViewer) => write!(f, "headless (no viewer)"),
        }
    }
}

type Lookup = Box<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Lazily probes for an interactive display and caches the answer.
pub struct BackendResolver {
    lookup: Lookup,
    cache: OnceLock<Backend>,
}

static GLOBAL: OnceLock<Arc<BackendResolver>> = OnceLock::new();

impl BackendResolver {
    /// A resolver over an arbitrary environment lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        BackendResolver {
            lookup: Box::new(lookup),
            cache: OnceLock::new(),
        }
    }

    /// A resolver over a fixed set of variables; everything else is unset.
    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let vars: HashMap<String, String> = vars
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self::from_lookup(move |key| vars.get(key).cloned())
    }

    /// A resolver over the real process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// The process-wide resolver.
    pub fn global() -> Arc<BackendResolver> {
        GLOBAL
            .get_or_init(|| Arc::new(BackendResolver::from_env()))
            .clone()
    }

    /// Probe on first call; later calls return the cached result.
    pub fn resolve(&self) -> &Backend {
        self.cache.get_or_init(|| {
            let backend = self.probe();
            info!("Display backend: {}", backend);
            backend
        })
    }

    /// Whether a probe has happened.
    pub fn is_resolved(&self) -> bool {
        self.cache.get().is_some()
    }

    /// The viewer to show with, or the error saying why there is none.
    pub fn require_interactive(&self) -> PlotResult<Viewer> {
        match self.resolve() {
            Backend::Interactive(viewer) => Ok(viewer.clone()),
            Backend::Headless(HeadlessReason::Forced) => Err(PlotError::HeadlessForced),
            Backend::Headless(HeadlessReason::NoDisplay) => Err(PlotError::NoDisplay),
            Backend::Headless(HeadlessReason::NoViewer) => Err(PlotError::NoViewer),
        }
    }

    fn probe(&self) -> Backend {
        let lookup = |key: &str| (self.lookup)(key);

        if let Some(requested) = lookup("HICKORY_BACKEND") {
            match requested.trim().to_ascii_lowercase().as_str() {
                "headless" | "file" | "agg" | "none" => {
                    debug!("HICKORY_BACKEND={} forces headless output", requested);
                    return Backend::Headless(HeadlessReason::Forced);
                }
                "" | "auto" | "interactive" => {}
                other => warn!("Ignoring unknown HICKORY_BACKEND value '{}'", other),
            }
        }

        // The display check comes first: a viewer without a display is NoDisplay.
        if !has_display(&lookup) {
            warn!("No display found, interactive show is unavailable");
            return Backend::Headless(HeadlessReason::NoDisplay);
        }

        match Viewer::find(&lookup) {
            Some(viewer) => Backend::Interactive(viewer),
            None => {
                warn!("No image viewer found, interactive show is unavailable");
                Backend::Headless(HeadlessReason::NoViewer)
            }
        }
    }
}

impl fmt::Debug for BackendResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendResolver")
            .field("cache", &self.cache.get())
            .finish()
    }
}

#[cfg(any(target_os = "macos", windows))]
fn has_display(_lookup: &dyn Fn(&str) -> Option<String>) -> bool {
    true
}

#[cfg(not(any(target_os = "macos", windows)))]
fn has_display(lookup: &dyn Fn(&str) -> Option<String>) -> bool {
    ["DISPLAY", "WAYLAND_DISPLAY"]
        .iter()
        .any(|key| lookup(key).is_some_and(|v| !v.trim().is_empty()))
}

/// Render `figure` to a temporary PNG and open it in the resolved viewer.
pub(crate) fn show_figure(figure: &Figure, resolver: &BackendResolver, dpi: f64) -> PlotResult<()> {
    let viewer = resolver.require_interactive()?;
    let file = tempfile::Builder::new()
        .prefix("hickory-")
        .suffix(".png")
        .tempfile()?;
    figure.save_with_dpi(file.path(), dpi)?;

    if viewer.blocking {
        viewer.open(file.path())?;
        // Dropping `file` removes it.
        return Ok(());
    }

    // The launcher returns before the image is read, so the file must outlive us.
    let (_, path) = file.keep().map_err(|e| PlotError::Io(e.error))?;
    debug!("Kept {} for a detaching viewer", path.display());
    viewer.open(&path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forced_headless() {
        for value in ["headless", "FILE", "agg", "none"] {
            let resolver = BackendResolver::from_vars([("HICKORY_BACKEND", value), ("DISPLAY", ":0")]);
            assert_eq!(
                resolver.resolve(),
                &Backend::Headless(HeadlessReason::Forced)
            );
            assert!(matches!(
                resolver.require_interactive(),
                Err(PlotError::HeadlessForced)
            ));
        }
    }

    #[test]
    fn test_lazy_and_cached() {
        let resolver = BackendResolver::from_vars([("HICKORY_BACKEND", "headless")]);
        assert!(!resolver.is_resolved());
        let first = resolver.resolve().clone();
        assert!(resolver.is_resolved());
        assert_eq!(resolver.resolve(), &first);
    }

    #[cfg(not(any(target_os = "macos", windows)))]
    #[test]
    fn test_no_display_before_viewer() {
        // A usable viewer does not matter without a display.
        let resolver = BackendResolver::from_vars([
            ("HICKORY_VIEWER", "/bin/sh"),
            ("PATH", "/bin:/usr/bin"),
        ]);
        assert_eq!(
            resolver.resolve(),
            &Backend::Headless(HeadlessReason::NoDisplay)
        );
        let err = resolver.require_interactive().unwrap_err();
        assert!(matches!(err, PlotError::NoDisplay));
        assert!(err.is_display_error());
    }

    #[cfg(not(any(target_os = "macos", windows)))]
    #[test]
    fn test_display_without_viewer() {
        let resolver = BackendResolver::from_vars([("DISPLAY", ":0"), ("PATH", "")]);
        assert_eq!(
            resolver.resolve(),
            &Backend::Headless(HeadlessReason::NoViewer)
        );
        assert!(matches!(
            resolver.require_interactive(),
            Err(PlotError::NoViewer)
        ));
    }

    #[cfg(not(any(target_os = "macos", windows)))]
    #[test]
    fn test_empty_display_is_no_display() {
        let resolver = BackendResolver::from_vars([("DISPLAY", " "), ("WAYLAND_DISPLAY", "")]);
        assert_eq!(
            resolver.resolve(),
            &Backend::Headless(HeadlessReason::NoDisplay)
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_interactive_with_viewer() {
        let resolver = BackendResolver::from_vars([
            ("DISPLAY", ":0"),
            ("HICKORY_VIEWER", "/bin/sh"),
        ]);
        let viewer = resolver.require_interactive().unwrap();
        assert_eq!(viewer.program, std::path::PathBuf::from("/bin/sh"));
        assert!(resolver.resolve().is_interactive());
    }

    #[test]
    fn test_show_headless_writes_nothing() {
        let resolver = BackendResolver::from_vars([("HICKORY_BACKEND", "none")]);
        let figure = Figure::default();
        let err = show_figure(&figure, &resolver, 100.0).unwrap_err();
        assert!(err.is_display_error());
    }
}
