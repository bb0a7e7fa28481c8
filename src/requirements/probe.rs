//! Environment probe for discovering `site-packages` directories.
//!
//! The gate is only as good as the directories it searches. The probe
//! collects them from three sources, in priority order:
//!
//! 1. Directories named explicitly (CLI flags, `FSDD_SITE_PACKAGES`, config)
//! 2. The active virtualenv (`VIRTUAL_ENV`)
//! 3. The Python interpreter itself, asked for its `sys.path`
//!
//! The interpreter's `sys.path` is what `import` and `importlib.metadata`
//! search, so it covers `PYTHONPATH`, `.pth` files and path-based editable
//! installs, and leaves out the user site when the interpreter disables it.
//! Duplicates and directories that do not exist are dropped.
//!
//! # Example
//!
//! ```no_run
//! use fsdd::requirements::probe::{EnvironmentProbe, ProbeOptions};
//!
//! let probe = EnvironmentProbe::run(&ProbeOptions::default());
//! for dir in probe.site_packages() {
//!     println!("{} ({})", dir.path.display(), dir.source);
//! }
//! ```

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use serde::Serialize;

use super::site_packages::SitePackagesRegistry;
use crate::error::{FsddError, Result};

/// Script run by the interpreter to report its import path.
///
/// `''` (the working directory) and zip archives are left out.
const SYS_PATH_QUERY: &str = concat!(
    "import os, sys\n",
    "for entry in sys.path:\n",
    "    if entry and os.path.isdir(entry):\n",
    "        print(entry)\n",
);

/// Interpreter names tried on PATH when none is configured.
const DEFAULT_INTERPRETERS: &[&str] = &["python3", "python"];

/// Inputs to a probe run, already merged from CLI, env and config.
#[derive(Debug, Clone)]
pub struct ProbeOptions {
    /// Interpreter to query; looked up on PATH when it is a bare name.
    pub python: Option<PathBuf>,
    /// Directories searched before anything discovered.
    pub site_packages: Vec<PathBuf>,
    /// Whether to ask the interpreter for its site directories.
    pub probe_interpreter: bool,
}

impl Default for ProbeOptions {
    fn default() -> Self {
        Self {
            python: None,
            site_packages: Vec::new(),
            probe_interpreter: true,
        }
    }
}

/// Where a search directory came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SiteSource {
    Explicit,
    VirtualEnv,
    Interpreter,
}

impl fmt::Display for SiteSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SiteSource::Explicit => "explicit",
            SiteSource::VirtualEnv => "virtualenv",
            SiteSource::Interpreter => "interpreter",
        };
        f.write_str(label)
    }
}

/// A directory the registry will search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SiteDir {
    pub path: PathBuf,
    pub source: SiteSource,
}

/// Result of probing the environment.
#[derive(Debug, Clone, Default, Serialize)]
pub struct EnvironmentProbe {
    interpreter: Option<PathBuf>,
    site_packages: Vec<SiteDir>,
}

/// Check whether a file has executable permission bits set.
#[cfg(unix)]
pub fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

/// On Windows, executability is determined by file extension, not permission bits.
#[cfg(not(unix))]
pub fn is_executable(_path: &Path) -> bool {
    true
}

/// Resolve a tool's binary path by iterating over PATH entries.
///
/// Returns the first match that exists and is executable.
pub fn resolve_tool_path(tool: &str, path_entries: &[PathBuf]) -> Option<PathBuf> {
    let file_name = if cfg!(windows) && !tool.ends_with(".exe") {
        format!("{}.exe", tool)
    } else {
        tool.to_string()
    };
    path_entries
        .iter()
        .map(|dir| dir.join(&file_name))
        .find(|candidate| candidate.is_file() && is_executable(candidate))
}

/// Split a PATH-style list into directories.
pub fn split_path_list(value: &str) -> Vec<PathBuf> {
    std::env::split_paths(value)
        .filter(|p| !p.as_os_str().is_empty())
        .collect()
}

/// Site directories inside a virtualenv root.
pub fn virtualenv_site_packages(venv: &Path) -> Vec<PathBuf> {
    if cfg!(windows) {
        let dir = venv.join("Lib").join("site-packages");
        return if dir.is_dir() { vec![dir] } else { Vec::new() };
    }

    let Ok(entries) = fs::read_dir(venv.join("lib")) else {
        return Vec::new();
    };
    let mut dirs: Vec<PathBuf> = entries
        .flatten()
        .filter(|entry| entry.file_name().to_string_lossy().starts_with("python"))
        .map(|entry| entry.path().join("site-packages"))
        .filter(|dir| dir.is_dir())
        .collect();
    dirs.sort();
    dirs
}

/// Ask an interpreter for the directories on its `sys.path`.
///
/// The interpreter inherits this process's environment, so `PYTHONPATH`,
/// `PYTHONNOUSERSITE` and friends apply as they would to `import`.
///
/// # Errors
///
/// Returns `InterpreterFailed` if the interpreter cannot be spawned or exits
/// with a failure status.
pub fn query_interpreter(python: &Path) -> Result<Vec<PathBuf>> {
    run_query(Command::new(python))
}

fn run_query(mut command: Command) -> Result<Vec<PathBuf>> {
    let label = command.get_program().to_string_lossy().to_string();
    let output = command
        .args(["-c", SYS_PATH_QUERY])
        .output()
        .map_err(|e| FsddError::InterpreterFailed {
            command: label.clone(),
            message: e.to_string(),
        })?;

    if !output.status.success() {
        return Err(FsddError::InterpreterFailed {
            command: label,
            message: format!(
                "{}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            ),
        });
    }

    Ok(parse_query_output(&String::from_utf8_lossy(&output.stdout)))
}

/// Parse the interpreter's answer: one directory per line.
fn parse_query_output(stdout: &str) -> Vec<PathBuf> {
    stdout
        .lines()
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| !line.trim().is_empty())
        .filter(|line| !line.to_ascii_lowercase().ends_with(".zip"))
        .map(PathBuf::from)
        .collect()
}

impl EnvironmentProbe {
    /// Probe using the real environment and interpreter.
    pub fn run(options: &ProbeOptions) -> Self {
        Self::run_with(options, |key: &str| std::env::var(key), query_interpreter)
    }

    /// Probe with custom env var lookup and interpreter query functions.
    ///
    /// This allows testing without touching the process environment or
    /// spawning Python.
    pub fn run_with<F, Q>(options: &ProbeOptions, env_fn: F, query_fn: Q) -> Self
    where
        F: Fn(&str) -> std::result::Result<String, std::env::VarError>,
        Q: Fn(&Path) -> Result<Vec<PathBuf>>,
    {
        let mut probe = Self::default();

        for dir in &options.site_packages {
            probe.push(dir.clone(), SiteSource::Explicit);
        }

        let venv = env_fn("VIRTUAL_ENV").ok().filter(|v| !v.is_empty());
        if let Some(venv) = &venv {
            for dir in virtualenv_site_packages(Path::new(venv)) {
                probe.push(dir, SiteSource::VirtualEnv);
            }
        }

        let path_entries = env_fn("PATH")
            .map(|p| split_path_list(&p))
            .unwrap_or_default();
        let interpreter =
            find_interpreter(options.python.as_deref(), venv.as_deref(), &path_entries);

        if options.probe_interpreter {
            match &interpreter {
                Some(python) => match query_fn(python) {
                    Ok(dirs) => {
                        for dir in dirs {
                            probe.push(dir, SiteSource::Interpreter);
                        }
                    }
                    Err(e) => tracing::warn!("{}", e),
                },
                None => tracing::debug!("No Python interpreter found on PATH"),
            }
        }

        probe.interpreter = interpreter;
        probe
    }

    /// Build a probe from a fixed list of directories, skipping discovery.
    pub fn from_dirs(dirs: Vec<PathBuf>) -> Self {
        let mut probe = Self::default();
        for dir in dirs {
            probe.push(dir, SiteSource::Explicit);
        }
        probe
    }

    fn push(&mut self, path: PathBuf, source: SiteSource) {
        if !path.is_dir() {
            tracing::debug!("Skipping {} ({}): not a directory", path.display(), source);
            return;
        }
        if self.site_packages.iter().any(|d| d.path == path) {
            return;
        }
        tracing::debug!("Search {} ({})", path.display(), source);
        self.site_packages.push(SiteDir { path, source });
    }

    /// The interpreter selected for discovery, if any.
    pub fn interpreter(&self) -> Option<&Path> {
        self.interpreter.as_deref()
    }

    /// Search directories, highest priority first.
    pub fn site_packages(&self) -> &[SiteDir] {
        &self.site_packages
    }

    /// Build the registry that searches these directories.
    pub fn registry(&self) -> SitePackagesRegistry {
        SitePackagesRegistry::new(self.site_packages.iter().map(|d| d.path.clone()).collect())
    }
}

/// Pick the interpreter: configured value, then the virtualenv's, then PATH.
fn find_interpreter(
    configured: Option<&Path>,
    venv: Option<&str>,
    path_entries: &[PathBuf],
) -> Option<PathBuf> {
    if let Some(python) = configured {
        // A bare name is looked up on PATH, anything else is taken as given.
        if python.components().count() == 1 && !python.is_absolute() {
            if let Some(found) = resolve_tool_path(&python.to_string_lossy(), path_entries) {
                return Some(found);
            }
        }
        return Some(python.to_path_buf());
    }

    if let Some(venv) = venv {
        let bin = if cfg!(windows) { "Scripts" } else { "bin" };
        let dir = Path::new(venv).join(bin);
        if let Some(found) = DEFAULT_INTERPRETERS
            .iter()
            .find_map(|name| resolve_tool_path(name, std::slice::from_ref(&dir)))
        {
            return Some(found);
        }
    }

    DEFAULT_INTERPRETERS
        .iter()
        .find_map(|name| resolve_tool_path(name, path_entries))
}
