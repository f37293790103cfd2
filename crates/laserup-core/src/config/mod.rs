//! laserup 统一配置层
//!
//! 所有环境变量读取集中在此模块，业务代码通过结构化配置访问，避免直接 `std::env::var`。
//!
//! - `loader`：.env 加载与 env_or、env_optional、env_bool 辅助函数
//! - `schema`：BootstrapConfig、ObservabilityConfig、PythonVersion
//! - `env_keys`：key 常量

pub mod env_keys;
pub mod loader;
pub mod schema;

pub use loader::{env_bool, env_optional, env_or, load_dotenv};
pub use loader::{remove_env_var, set_env_var, ScopedEnvGuard};
pub use schema::{BootstrapConfig, ObservabilityConfig, Overrides, PythonVersion};
