//! 错误处理模块
//!
//! 错误分为三类：配置/校验错误（发请求前抛出）、传输错误、远端应用错误。

/// 错误类型
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("配置错误: {0}")]
    Config(String),

    #[error("参数校验错误: {0}")]
    Validation(String),

    #[error("网络错误: {0}")]
    Network(String),

    #[error("认证错误: {0}")]
    Auth(String),

    /// 飞书开放平台返回的非零业务码（HTTP 状态本身是 2xx）
    #[error("飞书 API 错误 [{code}]: {msg}")]
    Api { code: i64, msg: String },

    /// 删除时目标记录不存在（HTTP 404 的专用映射）
    #[error("记录不存在 (ID: {0})")]
    NotFound(String),

    #[error("序列化错误: {0}")]
    Serialization(String),

    #[error("IO 错误: {0}")]
    Io(String),

    #[error("未知错误: {0}")]
    Unknown(String),
}

/// 结果类型
pub type Result<T> = std::result::Result<T, Error>;

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Self::Unknown(s.to_string())
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Self::Unknown(s)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}
