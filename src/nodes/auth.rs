//! 认证节点模块
//!
//! 调用令牌签发接口，把租户访问令牌作为条目负载向下游传递。

use async_trait::async_trait;
use tracing::{debug, error};

use super::traits::Node;
use crate::flow::Item;
use crate::infra::error::Result;
use crate::lark::{LarkClient, LarkCredentials};

/// 认证节点
///
/// 每个输入条目换取一枚新令牌并输出一个
/// `{ tenantAccessToken: <token> }` 条目。令牌不缓存，
/// 过期由下游自行承担（重跑本节点即可续期）。
pub struct AuthenticationNode {
    client: LarkClient,
}

impl AuthenticationNode {
    /// 以应用凭证创建认证节点
    pub fn new(credentials: LarkCredentials) -> Self {
        Self {
            client: LarkClient::new(credentials),
        }
    }

    /// 复用已有客户端创建认证节点（测试时注入 mock 地址）
    pub fn from_client(client: LarkClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Node for AuthenticationNode {
    fn name(&self) -> &str {
        "lark_authentication"
    }

    /// 逐条签发令牌
    ///
    /// 输入为空时视作一次触发，仍然签发一枚令牌输出一个条目。
    async fn execute(&self, items: Vec<Item>) -> Result<Vec<Item>> {
        let trigger_count = if items.is_empty() { 1 } else { items.len() };
        let mut return_data = Vec::with_capacity(trigger_count);

        for index in 0..trigger_count {
            debug!(item_index = index, "签发租户访问令牌");

            let token = match self.client.fetch_tenant_access_token().await {
                Ok(token) => token,
                Err(e) => {
                    error!(item_index = index, error = %e, "认证节点执行失败");
                    return Err(e);
                }
            };

            return_data.push(Item::with_tenant_access_token(&token));
        }

        Ok(return_data)
    }
}
