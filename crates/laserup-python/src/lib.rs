//! laserup Python toolchain layer.
//!
//! Every Python, pip, and engine invocation goes through an explicit
//! interpreter path; nothing here mutates the process environment or relies
//! on activation scripts.

pub mod discovery;
pub mod launch;
pub mod pip;
pub mod process;
pub mod venv;

pub use discovery::{find_python, PythonNotFound, PythonRuntime};
pub use launch::{run_engine, EngineRun};
pub use pip::{sync_dependencies, SyncOutcome};
pub use venv::{ensure_venv, is_provisioned, venv_python, VenvOutcome};
