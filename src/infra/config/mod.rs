//! 配置管理系统模块
//!
//! 本模块负责加载和管理系统配置。
//!
//! # 配置文件示例
//! ```toml
//! [credentials]
//! app_id = "${LARK_APP_ID}"
//! app_secret = "${LARK_APP_SECRET}"
//! app_token = "bascnXXXXXXXX"
//! table_id = "tblXXXXXXXX"
//!
//! [node]
//! operation = "getRecordList"
//! limit = 100
//!
//! [logging]
//! level = "info"
//! ```

use serde::{Deserialize, Serialize};
use std::{env, fs};
use std::path::PathBuf;

use super::error::Error;

/// 主配置结构
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// 凭证配置片段（应用凭证 + 多维表格定位）
    #[serde(default)]
    pub credentials: CredentialsConfig,
    /// 节点参数配置
    #[serde(default)]
    pub node: NodeConfig,
    /// 日志配置
    #[serde(default)]
    pub logging: LoggingSection,
}

/// 凭证配置
///
/// 对应一份完整的飞书应用凭证档案。
///
/// # 敏感信息
/// - `app_secret` 是应用密钥，必须保密
/// - 建议通过 `${LARK_APP_SECRET}` 环境变量注入，不要硬编码
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CredentialsConfig {
    /// 应用 ID
    #[serde(default)]
    pub app_id: String,
    /// 应用密钥
    #[serde(default)]
    pub app_secret: String,
    /// 多维表格的 App Token（Base 容器标识）
    #[serde(default)]
    pub app_token: String,
    /// 数据表 ID
    #[serde(default)]
    pub table_id: String,
}

/// 节点参数配置
///
/// 对应记录节点在流水线上的每节点参数。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeConfig {
    /// 操作选择器（getRecordList / createRecord / updateRecord / deleteRecord）
    pub operation: Option<String>,
    /// 列表操作的分页大小，API 上限为 500
    pub limit: Option<u32>,
    /// 创建/更新操作的字段 JSON 文本
    pub fields: Option<String>,
    /// 更新/删除操作的目标记录 ID
    pub record_id: Option<String>,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            operation: None,
            limit: Some(100),
            fields: None,
            record_id: None,
        }
    }
}

/// 日志配置片段
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LoggingSection {
    /// 日志级别
    pub level: Option<String>,
    /// 日志格式（"default" 或 "json"）
    pub format: Option<String>,
}

/// 配置加载器
#[derive(Debug, Clone)]
pub struct ConfigLoader;

impl ConfigLoader {
    /// 创建新的配置加载器
    pub fn new() -> Self {
        Self
    }

    /// 加载配置
    pub async fn load(&self, path: &str) -> Result<Config, Error> {
        tracing::info!(path = path, "加载配置文件");

        // 检查文件是否存在
        if !PathBuf::from(path).exists() {
            tracing::warn!(path = path, "配置文件不存在，使用默认配置");
            return Ok(Config::default());
        }

        // 读取文件内容
        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("读取配置文件失败: {}", e)))?;

        // 解析 TOML
        let mut config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("解析配置文件失败: {}", e)))?;

        // 环境变量替换
        self.substitute_env_vars(&mut config);

        tracing::info!("配置加载成功");
        Ok(config)
    }

    /// 替换环境变量
    ///
    /// 将 `${VAR_NAME}` 格式的字符串替换为对应的环境变量值
    fn substitute_env_vars(&self, config: &mut Config) {
        let creds = &mut config.credentials;
        creds.app_id = self.replace_env_vars(&creds.app_id);
        creds.app_secret = self.replace_env_vars(&creds.app_secret);
        creds.app_token = self.replace_env_vars(&creds.app_token);
        creds.table_id = self.replace_env_vars(&creds.table_id);

        if let Some(fields) = &config.node.fields {
            config.node.fields = Some(self.replace_env_vars(fields));
        }
        if let Some(record_id) = &config.node.record_id {
            config.node.record_id = Some(self.replace_env_vars(record_id));
        }
    }

    /// 替换字符串中的环境变量
    fn replace_env_vars(&self, input: &str) -> String {
        let pattern = r"\$\{([^}]+)\}";

        let re = regex::Regex::new(pattern).unwrap();
        let result = re.replace_all(input, |caps: &regex::Captures| {
            let var_name = &caps[1];
            env::var(var_name).unwrap_or_else(|_| caps[0].to_string())
        });

        result.to_string()
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
