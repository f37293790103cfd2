//! 按领域分组的配置结构体
//!
//! 从环境变量加载，CLI 覆盖优先级最高：CLI flag > 环境变量（含 .env）> 内置默认。

use super::env_keys::{bootstrap as boot_keys, observability as obv_keys};
use super::loader::{env_bool, env_optional, env_or};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// 要求的 Python 版本（精确匹配 major.minor，无回退版本）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PythonVersion {
    pub major: u32,
    pub minor: u32,
}

impl PythonVersion {
    /// 内置默认：3.11
    pub const DEFAULT: PythonVersion = PythonVersion { major: 3, minor: 11 };

    /// 实际解释器版本是否满足要求（patch 不参与比较）
    pub fn matches(&self, actual_major: u32, actual_minor: u32) -> bool {
        self.major == actual_major && self.minor == actual_minor
    }
}

impl FromStr for PythonVersion {
    type Err = anyhow::Error;

    /// 接受 `X.Y`（如 "3.11"）；`X.Y.Z` 也接受但忽略 patch。
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.trim().splitn(3, '.');
        let major = parts
            .next()
            .filter(|p| !p.is_empty())
            .ok_or_else(|| anyhow::anyhow!("invalid python version: {:?}", s))?
            .parse::<u32>()
            .map_err(|_| anyhow::anyhow!("invalid python version: {:?}", s))?;
        let minor = parts
            .next()
            .ok_or_else(|| anyhow::anyhow!("python version needs major.minor, got {:?}", s))?
            .parse::<u32>()
            .map_err(|_| anyhow::anyhow!("invalid python version: {:?}", s))?;
        if let Some(patch) = parts.next() {
            if patch.parse::<u32>().is_err() {
                anyhow::bail!("invalid python version: {:?}", s);
            }
        }
        Ok(PythonVersion { major, minor })
    }
}

impl fmt::Display for PythonVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// 引导管线配置（不可变，显式传入每个步骤）
#[derive(Debug, Clone)]
pub struct BootstrapConfig {
    pub python: PythonVersion,
    pub venv_dir: PathBuf,
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub entry_point: PathBuf,
    pub manifest: PathBuf,
}

/// CLI 覆盖项（None 表示未提供该 flag）
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub python: Option<PythonVersion>,
    pub venv_dir: Option<String>,
    pub input_dir: Option<String>,
    pub output_dir: Option<String>,
    pub entry_point: Option<String>,
    pub manifest: Option<String>,
}

impl BootstrapConfig {
    /// 从环境变量加载（会自动加载 .env），非法的 LASERUP_PYTHON 回退到默认并警告
    pub fn from_env() -> Self {
        super::loader::load_dotenv();
        let python = env_optional(boot_keys::PYTHON)
            .and_then(|s| match s.parse::<PythonVersion>() {
                Ok(v) => Some(v),
                Err(e) => {
                    tracing::warn!("ignoring {}: {}", boot_keys::PYTHON, e);
                    None
                }
            })
            .unwrap_or(PythonVersion::DEFAULT);
        Self {
            python,
            venv_dir: PathBuf::from(env_or(boot_keys::VENV_DIR, || "venv".to_string())),
            input_dir: PathBuf::from(env_or(boot_keys::INPUT_DIR, || "input".to_string())),
            output_dir: PathBuf::from(env_or(boot_keys::OUTPUT_DIR, || "output".to_string())),
            entry_point: PathBuf::from(env_or(boot_keys::ENTRY_POINT, || "main.py".to_string())),
            manifest: PathBuf::from(env_or(boot_keys::MANIFEST, || "requirements.txt".to_string())),
        }
    }

    /// 应用 CLI 覆盖项
    pub fn with_overrides(mut self, overrides: Overrides) -> Self {
        if let Some(python) = overrides.python {
            self.python = python;
        }
        if let Some(venv_dir) = overrides.venv_dir {
            self.venv_dir = PathBuf::from(venv_dir);
        }
        if let Some(input_dir) = overrides.input_dir {
            self.input_dir = PathBuf::from(input_dir);
        }
        if let Some(output_dir) = overrides.output_dir {
            self.output_dir = PathBuf::from(output_dir);
        }
        if let Some(entry_point) = overrides.entry_point {
            self.entry_point = PathBuf::from(entry_point);
        }
        if let Some(manifest) = overrides.manifest {
            self.manifest = PathBuf::from(manifest);
        }
        self
    }
}

/// 可观测性配置
#[derive(Debug, Clone)]
pub struct ObservabilityConfig {
    pub quiet: bool,
    pub log_level: String,
    pub log_json: bool,
    pub audit_log: Option<String>,
    pub no_pause: bool,
}

impl ObservabilityConfig {
    pub fn from_env() -> &'static Self {
        use std::sync::OnceLock;
        static CACHE: OnceLock<ObservabilityConfig> = OnceLock::new();
        CACHE.get_or_init(|| {
            super::loader::load_dotenv();
            Self {
                quiet: env_bool(obv_keys::QUIET, false),
                log_level: env_or(obv_keys::LOG_LEVEL, || "laserup=info".to_string()),
                log_json: env_bool(obv_keys::LOG_JSON, false),
                audit_log: env_optional(obv_keys::AUDIT_LOG),
                no_pause: env_bool(obv_keys::NO_PAUSE, false),
            }
        })
    }
}
