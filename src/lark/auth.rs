//! 租户令牌签发模块
//!
//! 调用 `/auth/v3/tenant_access_token/internal` 接口换取租户访问令牌。
//!
//! 该接口不走统一的 `data` 包络，令牌直接挂在响应顶层的
//! `tenant_access_token` 字段上。

use serde::Deserialize;
use tracing::{debug, error, info};

use super::client::{LarkClient, TenantAccessToken};
use crate::infra::error::{Error, Result};

/// 令牌签发路径
const TOKEN_PATH: &str = "/auth/v3/tenant_access_token/internal";

/// 令牌签发响应
#[derive(Debug, Deserialize)]
struct TokenResponse {
    code: i64,
    #[serde(default)]
    msg: String,
    tenant_access_token: Option<String>,
}

impl LarkClient {
    /// 获取租户访问令牌
    ///
    /// 每次调用都发起一次真实请求，没有缓存或过期跟踪；
    /// 失败即失败，不重试。
    ///
    /// # 返回值
    /// 租户访问令牌
    pub async fn fetch_tenant_access_token(&self) -> Result<TenantAccessToken> {
        let creds = self.credentials();
        debug!(app_id = %creds.app_id, "请求租户访问令牌");

        let body = serde_json::json!({
            "app_id": creds.app_id,
            "app_secret": creds.app_secret,
        });

        let response = self.post_unauthorized(TOKEN_PATH, &body).await?;

        let response_body: TokenResponse = response
            .json()
            .await
            .map_err(|e| Error::Network(format!("解析访问令牌响应失败: {}", e)))?;

        if response_body.code != 0 {
            error!(code = response_body.code, msg = %response_body.msg, "获取访问令牌失败");
            return Err(Error::Auth(format!(
                "获取 tenant_access_token 失败: {}",
                if response_body.msg.is_empty() {
                    "Unknown error"
                } else {
                    &response_body.msg
                }
            )));
        }

        match response_body.tenant_access_token {
            Some(token) => {
                info!("获取租户访问令牌成功");
                Ok(TenantAccessToken::new(token))
            }
            None => Err(Error::Auth("响应中未包含访问令牌".to_string())),
        }
    }
}
