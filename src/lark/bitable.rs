//! 多维表格记录操作模块
//!
//! 封装 Bitable v1 records 接口的增删改查。
//!
//! # 接口
//! - `GET    /bitable/v1/apps/{app_token}/tables/{table_id}/records?page_size={n}`
//! - `POST   /bitable/v1/apps/{app_token}/tables/{table_id}/records`
//! - `PUT    /bitable/v1/apps/{app_token}/tables/{table_id}/records/{record_id}`
//! - `DELETE /bitable/v1/apps/{app_token}/tables/{table_id}/records/{record_id}`
//!
//! 所有参数校验都发生在发起网络请求之前；校验失败的条目不会产生出站流量。

use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error, info};

use super::client::{LarkClient, TenantAccessToken};
use crate::infra::error::{Error, Result};

/// 多维表格定位
///
/// `app_token` 标识 Base 容器，`table_id` 标识其中一张数据表。
/// 静态来源于节点配置，一次调用内不变。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BitableLocator {
    /// Base 的 App Token
    pub app_token: String,
    /// 数据表 ID
    pub table_id: String,
}

impl BitableLocator {
    /// 记录集合路径
    fn records_path(&self) -> String {
        format!(
            "/bitable/v1/apps/{}/tables/{}/records",
            self.app_token, self.table_id
        )
    }

    /// 单条记录路径
    fn record_path(&self, record_id: &str) -> String {
        format!("{}/{}", self.records_path(), record_id)
    }
}

/// 已校验的记录字段请求体
///
/// 持有发往 API 的完整 `{"fields": {...}}` 结构。
/// 字段内容视为不透明 JSON，不与表结构比对。
#[derive(Debug, Clone, Serialize)]
pub struct RecordFields(Value);

impl RecordFields {
    /// 解析字段 JSON 文本
    ///
    /// 接受两种形式：
    /// - 裸字段对象 `{"Name": "Alice"}`，自动包一层 `fields`
    /// - 已包好的 `{"fields": {"Name": "Alice"}}`，原样使用
    ///
    /// # 返回值
    /// 解析失败或 `fields` 不是对象时返回 `Error::Validation`
    pub fn parse(text: &str) -> Result<Self> {
        let parsed: Value = serde_json::from_str(text)
            .map_err(|_| Error::Validation("字段必须是合法的 JSON 格式".to_string()))?;

        let body = match &parsed {
            Value::Object(map) if map.contains_key("fields") => parsed,
            Value::Object(_) => serde_json::json!({ "fields": parsed }),
            _ => {
                return Err(Error::Validation(
                    "字段必须是 JSON 对象".to_string(),
                ))
            }
        };

        if !body["fields"].is_object() {
            return Err(Error::Validation("fields 结构无效".to_string()));
        }

        Ok(Self(body))
    }

    /// 请求体引用
    pub fn body(&self) -> &Value {
        &self.0
    }
}

/// 删除确认
///
/// 删除接口成功但未返回 `data` 时合成的确认对象。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteReceipt {
    /// 是否成功
    pub success: bool,
    /// 被删除的记录 ID
    #[serde(rename = "recordId")]
    pub record_id: String,
    /// 服务端消息
    pub message: String,
    /// 删除时间（RFC 3339）
    #[serde(rename = "deletedAt")]
    pub deleted_at: String,
}

/// 校验记录 ID 非空
fn validate_record_id(record_id: &str) -> Result<&str> {
    if record_id.trim().is_empty() {
        return Err(Error::Validation("记录 ID 必须是非空字符串".to_string()));
    }
    Ok(record_id)
}

impl LarkClient {
    /// 获取记录列表
    ///
    /// # 参数说明
    /// * `locator` - 表格定位
    /// * `token` - 租户访问令牌
    /// * `page_size` - 分页大小（API 上限 500）
    ///
    /// # 返回值
    /// 包络中的 `data` 对象（items 列表 + 分页游标）
    pub async fn list_records(
        &self,
        locator: &BitableLocator,
        token: &TenantAccessToken,
        page_size: u32,
    ) -> Result<Value> {
        let path = format!("{}?page_size={}", locator.records_path(), page_size);

        let response = self
            .send_authorized(Method::GET, &path, token, None)
            .await?;
        let envelope = Self::decode_envelope::<Value>(response).await?;

        match (envelope.code, envelope.data) {
            (0, Some(data)) => {
                debug!(table_id = %locator.table_id, "记录列表获取成功");
                Ok(data)
            }
            (code, _) => {
                error!(code = code, msg = %envelope.msg, "获取记录列表失败");
                Err(Error::Api {
                    code,
                    msg: non_empty_msg(envelope.msg),
                })
            }
        }
    }

    /// 创建记录
    ///
    /// # 返回值
    /// 包络中的 `data`（含服务端分配的记录 ID）
    pub async fn create_record(
        &self,
        locator: &BitableLocator,
        token: &TenantAccessToken,
        fields: &RecordFields,
    ) -> Result<Value> {
        let path = locator.records_path();

        let response = self
            .send_authorized(Method::POST, &path, token, Some(fields.body()))
            .await?;
        let envelope = Self::decode_envelope::<Value>(response).await?;

        match (envelope.code, envelope.data) {
            (0, Some(data)) => {
                info!(table_id = %locator.table_id, "记录创建成功");
                Ok(data)
            }
            (code, _) => {
                error!(code = code, msg = %envelope.msg, "创建记录失败");
                Err(Error::Api {
                    code,
                    msg: non_empty_msg(envelope.msg),
                })
            }
        }
    }

    /// 更新记录
    ///
    /// 统一使用 PUT，对应 Bitable v1 的记录更新接口。
    pub async fn update_record(
        &self,
        locator: &BitableLocator,
        token: &TenantAccessToken,
        record_id: &str,
        fields: &RecordFields,
    ) -> Result<Value> {
        let record_id = validate_record_id(record_id)?;
        let path = locator.record_path(record_id);

        let response = self
            .send_authorized(Method::PUT, &path, token, Some(fields.body()))
            .await?;
        let envelope = Self::decode_envelope::<Value>(response).await?;

        match (envelope.code, envelope.data) {
            (0, Some(data)) => {
                info!(record_id = %record_id, "记录更新成功");
                Ok(data)
            }
            (code, _) => {
                error!(code = code, msg = %envelope.msg, "更新记录失败");
                Err(Error::Api {
                    code,
                    msg: non_empty_msg(envelope.msg),
                })
            }
        }
    }

    /// 删除记录
    ///
    /// HTTP 404 映射为 `Error::NotFound`；成功但无 `data` 时
    /// 合成一份 [`DeleteReceipt`] 确认对象。
    pub async fn delete_record(
        &self,
        locator: &BitableLocator,
        token: &TenantAccessToken,
        record_id: &str,
    ) -> Result<Value> {
        let record_id = validate_record_id(record_id)?;
        let path = locator.record_path(record_id);

        let response = self
            .send_authorized(Method::DELETE, &path, token, None)
            .await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            error!(record_id = %record_id, "删除目标不存在");
            return Err(Error::NotFound(record_id.to_string()));
        }

        let envelope = Self::decode_envelope::<Value>(response).await?;

        if envelope.code != 0 {
            error!(code = envelope.code, msg = %envelope.msg, "删除记录失败");
            return Err(Error::Api {
                code: envelope.code,
                msg: non_empty_msg(envelope.msg),
            });
        }

        match envelope.data {
            Some(data) => Ok(data),
            None => {
                info!(record_id = %record_id, "记录删除成功");
                let receipt = DeleteReceipt {
                    success: true,
                    record_id: record_id.to_string(),
                    message: if envelope.msg.is_empty() {
                        "记录删除成功".to_string()
                    } else {
                        envelope.msg
                    },
                    deleted_at: chrono::Utc::now().to_rfc3339(),
                };
                serde_json::to_value(receipt)
                    .map_err(|e| Error::Serialization(format!("序列化删除确认失败: {}", e)))
            }
        }
    }
}

/// 空消息回落
fn non_empty_msg(msg: String) -> String {
    if msg.is_empty() {
        "Unknown error".to_string()
    } else {
        msg
    }
}
