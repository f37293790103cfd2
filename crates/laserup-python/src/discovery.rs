//! Python interpreter discovery.
//!
//! Probes a per-OS candidate list with `--version` and accepts only an exact
//! major.minor match — there is no fallback version. The required version is
//! a hard precondition; everything that was probed ends up in the error so
//! the user sees what was tried.

use anyhow::Result;
use laserup_core::config::PythonVersion;
use std::path::{Path, PathBuf};
use std::process::Command;
use thiserror::Error;

use crate::process;

/// A located interpreter that satisfied the version requirement.
///
/// `args` is usually empty; for the Windows `py` launcher it carries the
/// `-X.Y` selector so every later invocation picks the same interpreter.
#[derive(Debug, Clone)]
pub struct PythonRuntime {
    pub program: PathBuf,
    pub args: Vec<String>,
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl PythonRuntime {
    /// Start a `Command` for this runtime (program + selector args).
    pub fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        cmd
    }

    pub fn version_string(&self) -> String {
        format!("{}.{}.{}", self.major, self.minor, self.patch)
    }

    pub fn display(&self) -> String {
        if self.args.is_empty() {
            self.program.display().to_string()
        } else {
            format!("{} {}", self.program.display(), self.args.join(" "))
        }
    }
}

/// The required interpreter version is not installed on this host.
#[derive(Debug, Error)]
#[error("Python {required} not found (probed: {})", .probed.join(", "))]
pub struct PythonNotFound {
    pub required: PythonVersion,
    /// One entry per candidate, with what the probe saw.
    pub probed: Vec<String>,
}

/// A candidate invocation to probe: program name plus selector args.
#[derive(Debug, Clone)]
struct Candidate {
    program: String,
    args: Vec<String>,
}

impl Candidate {
    fn describe(&self) -> String {
        if self.args.is_empty() {
            self.program.clone()
        } else {
            format!("{} {}", self.program, self.args.join(" "))
        }
    }
}

/// Candidate list per OS. The Windows `py` launcher with a version selector
/// goes first; the generic names come last.
fn candidates(required: PythonVersion) -> Vec<Candidate> {
    let mut out = Vec::new();
    if cfg!(windows) {
        out.push(Candidate {
            program: "py".to_string(),
            args: vec![format!("-{required}")],
        });
    }
    out.push(Candidate {
        program: format!("python{required}"),
        args: Vec::new(),
    });
    out.push(Candidate {
        program: "python3".to_string(),
        args: Vec::new(),
    });
    out.push(Candidate {
        program: "python".to_string(),
        args: Vec::new(),
    });
    out
}

/// Parse `Python X.Y.Z` (or `Python X.Y`) out of a `--version` output.
pub(crate) fn parse_version_output(text: &str) -> Option<(u32, u32, u32)> {
    use std::sync::OnceLock;
    static RE: OnceLock<regex::Regex> = OnceLock::new();
    let re = RE.get_or_init(|| {
        regex::Regex::new(r"Python\s+(\d+)\.(\d+)(?:\.(\d+))?").expect("valid regex")
    });
    let caps = re.captures(text)?;
    let major = caps.get(1)?.as_str().parse().ok()?;
    let minor = caps.get(2)?.as_str().parse().ok()?;
    let patch = caps
        .get(3)
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0);
    Some((major, minor, patch))
}

/// Run `<program> [args] --version` and parse the reported version.
/// Old interpreters print the banner to stderr, so both streams are checked.
pub(crate) fn probe(program: &Path, args: &[String]) -> Result<Option<(u32, u32, u32)>> {
    let mut cmd = Command::new(program);
    cmd.args(args).arg("--version");
    let out = match process::capture(&mut cmd, "runtime probe") {
        Ok(out) => out,
        // Not runnable counts as "no version", not a hard error.
        Err(_) => return Ok(None),
    };
    if !out.status.success() {
        return Ok(None);
    }
    let stdout = String::from_utf8_lossy(&out.stdout);
    let stderr = String::from_utf8_lossy(&out.stderr);
    Ok(parse_version_output(&stdout).or_else(|| parse_version_output(&stderr)))
}

/// Locate an interpreter matching the required major.minor exactly.
pub fn find_python(required: PythonVersion) -> Result<PythonRuntime, PythonNotFound> {
    let mut probed = Vec::new();
    for cand in candidates(required) {
        let resolved = which::which(&cand.program).ok();
        let Some(program) = resolved else {
            probed.push(format!("{} (not in PATH)", cand.describe()));
            continue;
        };
        match probe(&program, &cand.args) {
            Ok(Some((major, minor, patch))) => {
                if required.matches(major, minor) {
                    tracing::info!(
                        program = %program.display(),
                        version = %format!("{major}.{minor}.{patch}"),
                        "found matching Python runtime"
                    );
                    return Ok(PythonRuntime {
                        program,
                        args: cand.args,
                        major,
                        minor,
                        patch,
                    });
                }
                probed.push(format!(
                    "{} (Python {major}.{minor}.{patch}, need {required})",
                    cand.describe()
                ));
            }
            Ok(None) => probed.push(format!("{} (no version reported)", cand.describe())),
            Err(e) => probed.push(format!("{} ({e})", cand.describe())),
        }
    }
    Err(PythonNotFound { required, probed })
}
