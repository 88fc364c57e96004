//! 飞书客户端模块
//!
//! 封装飞书开放平台 API 的 HTTP 客户端。
//!
//! # 功能
//! 1. 获取租户访问令牌（Tenant Access Token）
//! 2. 发送携带 Bearer 令牌的 API 请求
//!
//! # 认证流程
//! ```text
//! 1. 使用 app_id 和 app_secret 获取 tenant_access_token
//! 2. 在 HTTP 请求头中添加 Authorization: Bearer {token}
//! ```
//!
//! 令牌不在客户端内缓存，由调用方（认证节点）获取后显式传入每次请求。

use reqwest;
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;

use crate::infra::error::{Error, Result};

/// 默认的开放平台基础 URL
pub const DEFAULT_BASE_URL: &str = "https://open.larksuite.com/open-apis";

/// 飞书应用凭证
///
/// # 敏感信息
/// - `app_secret` 是应用密钥，必须保密
/// - 不要将凭据硬编码在代码中
#[derive(Clone)]
pub struct LarkCredentials {
    /// 应用 ID
    pub app_id: String,
    /// 应用密钥
    pub app_secret: String,
}

impl std::fmt::Debug for LarkCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LarkCredentials")
            .field("app_id", &self.app_id)
            .field("app_secret", &"<redacted>")
            .finish()
    }
}

/// 租户访问令牌
///
/// 认证节点的产物，记录节点的每次出站请求都携带它。
/// 本适配器不缓存、不刷新、不跟踪过期时间。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TenantAccessToken(String);

impl TenantAccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 拼装 Authorization 请求头的值
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

/// 飞书 API 响应包络
///
/// 开放平台所有接口统一的 `{code, msg, data}` 包装，`code == 0` 表示成功。
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    pub code: i64,
    #[serde(default)]
    pub msg: String,
    pub data: Option<T>,
}

/// 飞书客户端
///
/// # 字段说明
/// * `credentials` - 认证凭证
/// * `http_client` - HTTP 客户端
/// * `base_url` - API 基础 URL（测试时可替换）
#[derive(Clone)]
pub struct LarkClient {
    /// 认证凭证
    credentials: Arc<LarkCredentials>,
    /// HTTP 客户端
    http_client: reqwest::Client,
    /// API 基础 URL
    base_url: String,
}

impl std::fmt::Debug for LarkClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LarkClient")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl LarkClient {
    /// 创建飞书客户端
    ///
    /// # 参数说明
    /// * `credentials` - 认证凭证
    pub fn new(credentials: LarkCredentials) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("创建 HTTP 客户端失败");

        Self {
            credentials: Arc::new(credentials),
            http_client,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// 替换 API 基础 URL（集成测试指向 mock 服务器）
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// 当前基础 URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// 凭证引用
    pub fn credentials(&self) -> &LarkCredentials {
        &self.credentials
    }

    /// 发送未认证的 POST 请求（仅令牌签发接口使用）
    pub(crate) async fn post_unauthorized(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<reqwest::Response> {
        let url = format!("{}{}", self.base_url, path);
        debug!(url = %url, "发送未认证请求");

        self.http_client
            .post(&url)
            .header("Content-Type", "application/json")
            .header("Accept", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|e| Error::Network(format!("API 请求失败: {}", e)))
    }

    /// 发送携带 Bearer 令牌的 API 请求
    ///
    /// # 参数说明
    /// * `method` - HTTP 方法
    /// * `path` - API 路径（相对 base_url，可含查询串）
    /// * `token` - 租户访问令牌
    /// * `body` - 请求体（可选）
    ///
    /// # 返回值
    /// 原始响应，由调用方解析包络
    pub(crate) async fn send_authorized(
        &self,
        method: reqwest::Method,
        path: &str,
        token: &TenantAccessToken,
        body: Option<&serde_json::Value>,
    ) -> Result<reqwest::Response> {
        let url = format!("{}{}", self.base_url, path);
        debug!(method = %method, url = %url, "发送认证请求");

        let mut request = self
            .http_client
            .request(method, &url)
            .header("Authorization", token.bearer())
            .header("Content-Type", "application/json")
            .header("Accept", "application/json");

        if let Some(body) = body {
            request = request.json(body);
        }

        request
            .send()
            .await
            .map_err(|e| Error::Network(format!("API 请求失败: {}", e)))
    }

    /// 解析响应包络
    pub(crate) async fn decode_envelope<T: for<'de> Deserialize<'de>>(
        response: reqwest::Response,
    ) -> Result<ApiResponse<T>> {
        response
            .json()
            .await
            .map_err(|e| Error::Network(format!("解析 API 响应失败: {}", e)))
    }
}
