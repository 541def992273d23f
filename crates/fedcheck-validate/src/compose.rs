//! Composition capability
//!
//! Validation never interprets GraphQL itself. It asks a `Composer` to
//! compose a descriptor inside a working directory and only looks at
//! pass/fail plus the diagnostics the tool printed.

use crate::error::{ValidateError, ValidateResult};
use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Environment variable rover requires to run non-interactively
pub const LICENSE_ENV: &str = "APOLLO_ELV2_LICENSE";

/// Value accepting the license
pub const LICENSE_ACCEPT: &str = "accept";

/// Environment variable overriding the rover binary location
pub const ROVER_PATH_ENV: &str = "ROVER_PATH";

/// Result of one composition attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompositionOutcome {
    /// Tool exited with status 0
    pub success: bool,
    /// Exit code, if the tool exited normally
    pub exit_code: Option<i32>,
    /// Everything the tool wrote to standard error
    ///
    /// Kept byte for byte when it is valid UTF-8. Invalid sequences are
    /// replaced with U+FFFD, the rest of the text is untouched.
    pub stderr: String,
}

impl CompositionOutcome {
    /// Successful outcome with no diagnostics
    #[must_use]
    pub fn passed() -> Self {
        Self {
            success: true,
            exit_code: Some(0),
            stderr: String::new(),
        }
    }

    /// Failed outcome carrying diagnostics
    #[must_use]
    pub fn failed(exit_code: i32, stderr: impl Into<String>) -> Self {
        Self {
            success: false,
            exit_code: Some(exit_code),
            stderr: stderr.into(),
        }
    }
}

/// Composes a supergraph descriptor
pub trait Composer {
    /// Compose `config` with `work_dir` as the working directory
    ///
    /// A non-zero exit is an `Ok` outcome with `success == false`; `Err` is
    /// reserved for failing to run the tool at all.
    ///
    /// # Errors
    /// The tool could not be started or its output could not be collected.
    fn compose(&self, config: &Path, work_dir: &Path) -> ValidateResult<CompositionOutcome>;
}

impl<C: Composer + ?Sized> Composer for &C {
    fn compose(&self, config: &Path, work_dir: &Path) -> ValidateResult<CompositionOutcome> {
        (**self).compose(config, work_dir)
    }
}

/// Runs `rover supergraph compose --config <config>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoverComposer {
    program: PathBuf,
}

impl RoverComposer {
    /// Use the given rover binary
    #[inline]
    #[must_use]
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Locate rover from the explicit path, the environment, runfiles or `PATH`
    #[must_use]
    pub fn locate(explicit: Option<&Path>) -> Self {
        Self::new(resolve_rover_path(
            explicit,
            env::var_os(ROVER_PATH_ENV),
            env::var_os("RUNFILES_DIR"),
        ))
    }

    /// Binary that will be executed
    #[inline]
    #[must_use]
    pub fn program(&self) -> &Path {
        &self.program
    }
}

impl Composer for RoverComposer {
    fn compose(&self, config: &Path, work_dir: &Path) -> ValidateResult<CompositionOutcome> {
        tracing::info!(
            dir = %work_dir.display(),
            config = %config.display(),
            "running rover composition"
        );
        let output = Command::new(&self.program)
            .args(["supergraph", "compose", "--config"])
            .arg(config)
            .current_dir(work_dir)
            .env(LICENSE_ENV, LICENSE_ACCEPT)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .map_err(|source| ValidateError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        Ok(CompositionOutcome {
            success: output.status.success(),
            exit_code: output.status.code(),
            stderr: decode_stderr(output.stderr),
        })
    }
}

fn decode_stderr(raw: Vec<u8>) -> String {
    String::from_utf8(raw)
        .unwrap_or_else(|err| String::from_utf8_lossy(err.as_bytes()).into_owned())
}

/// Pick the rover binary: explicit flag, then `ROVER_PATH`, then the
/// `apollo_rover_<os>_<arch>/rover` runfile, then plain `rover`
fn resolve_rover_path(
    explicit: Option<&Path>,
    from_env: Option<OsString>,
    runfiles_dir: Option<OsString>,
) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    if let Some(path) = from_env.filter(|p| !p.is_empty()) {
        return PathBuf::from(path);
    }
    if let Some(root) = runfiles_dir.filter(|p| !p.is_empty()) {
        let candidate = PathBuf::from(root)
            .join(format!("apollo_rover_{}_{}", platform_os(), platform_arch()))
            .join("rover");
        if candidate.is_file() {
            return candidate;
        }
    }
    PathBuf::from("rover")
}

fn platform_os() -> &'static str {
    match env::consts::OS {
        "macos" => "darwin",
        other => other,
    }
}

fn platform_arch() -> &'static str {
    match env::consts::ARCH {
        "x86_64" => "amd64",
        "aarch64" => "arm64",
        "x86" => "386",
        other => other,
    }
}
