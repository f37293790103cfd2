//! 环境变量 key 常量定义
//!
//! 所有 `LASERUP_*` 变量集中在此，业务代码不直接写字符串字面量。

/// 引导管线配置
pub mod bootstrap {
    /// 要求的 Python 版本（MAJOR.MINOR，如 "3.11"）
    pub const PYTHON: &str = "LASERUP_PYTHON";
    /// 虚拟环境目录
    pub const VENV_DIR: &str = "LASERUP_VENV_DIR";
    /// 输入图片目录
    pub const INPUT_DIR: &str = "LASERUP_INPUT_DIR";
    /// 输出目录（原样传给引擎 `--out`）
    pub const OUTPUT_DIR: &str = "LASERUP_OUTPUT_DIR";
    /// 引擎入口脚本
    pub const ENTRY_POINT: &str = "LASERUP_ENTRY_POINT";
    /// 依赖清单（requirements.txt）
    pub const MANIFEST: &str = "LASERUP_MANIFEST";
}

/// 可观测性配置
pub mod observability {
    pub const QUIET: &str = "LASERUP_QUIET";
    pub const LOG_LEVEL: &str = "LASERUP_LOG_LEVEL";
    pub const LOG_JSON: &str = "LASERUP_LOG_JSON";
    /// JSONL 审计日志路径（未设置则不写）
    pub const AUDIT_LOG: &str = "LASERUP_AUDIT_LOG";
    /// 非交互模式：跳过按键确认
    pub const NO_PAUSE: &str = "LASERUP_NO_PAUSE";
}
