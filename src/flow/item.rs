//! 流水线条目类型定义模块
//!
//! 条目（Item）是节点之间传递的数据单元：一个不透明的 JSON 对象负载。
//! 认证节点与记录节点之间唯一的"协议"是租户访问令牌的传递，
//! 这里把它做成一等公民：令牌通过类型化的存取方法读写，
//! 线上的字段名保持约定的 `tenantAccessToken` 以兼容既有数据流。

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::lark::TenantAccessToken;

/// 条目负载中承载令牌的约定字段名
pub const TENANT_ACCESS_TOKEN_KEY: &str = "tenantAccessToken";

/// 流水线条目
///
/// # 使用示例
/// ```rust
/// use larkflow::flow::Item;
/// use larkflow::lark::TenantAccessToken;
///
/// let item = Item::with_tenant_access_token(&TenantAccessToken::new("t1"));
/// assert!(item.tenant_access_token().is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// JSON 负载
    pub json: Value,
}

impl Item {
    /// 以给定负载创建条目
    pub fn new(json: Value) -> Self {
        Self { json }
    }

    /// 空对象负载的条目
    pub fn empty() -> Self {
        Self {
            json: Value::Object(serde_json::Map::new()),
        }
    }

    /// 创建只承载令牌的条目（认证节点的输出形态）
    pub fn with_tenant_access_token(token: &TenantAccessToken) -> Self {
        Self {
            json: serde_json::json!({ TENANT_ACCESS_TOKEN_KEY: token.as_str() }),
        }
    }

    /// 读取负载上的租户访问令牌
    ///
    /// # 返回值
    /// 字段缺失或不是非空字符串时返回 `None`
    pub fn tenant_access_token(&self) -> Option<TenantAccessToken> {
        match self.json.get(TENANT_ACCESS_TOKEN_KEY) {
            Some(Value::String(s)) if !s.is_empty() => Some(TenantAccessToken::new(s.clone())),
            _ => None,
        }
    }
}

impl Default for Item {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_roundtrip_through_payload() {
        let token = TenantAccessToken::new("t-xyz");
        let item = Item::with_tenant_access_token(&token);

        assert_eq!(item.json[TENANT_ACCESS_TOKEN_KEY], "t-xyz");
        assert_eq!(item.tenant_access_token(), Some(token));
    }

    #[test]
    fn test_missing_or_malformed_token() {
        assert!(Item::empty().tenant_access_token().is_none());

        let item = Item::new(serde_json::json!({ TENANT_ACCESS_TOKEN_KEY: "" }));
        assert!(item.tenant_access_token().is_none());

        let item = Item::new(serde_json::json!({ TENANT_ACCESS_TOKEN_KEY: 42 }));
        assert!(item.tenant_access_token().is_none());
    }
}
