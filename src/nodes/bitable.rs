//! 记录节点模块
//!
//! 对配置选定的一种操作（列表/创建/更新/删除），逐条处理输入条目：
//! 校验参数 → 构造请求 → 发送 → 解析包络 → 整形输出。
//!
//! 每个条目恰好产生一次出站请求；校验失败的条目不产生任何流量。

use async_trait::async_trait;
use tracing::{debug, error};

use super::traits::{Node, Operation};
use crate::flow::Item;
use crate::infra::config::NodeConfig;
use crate::infra::error::{Error, Result};
use crate::lark::{BitableLocator, LarkClient, RecordFields};

/// 记录节点参数
///
/// 对应宿主侧的每节点配置：操作选择器 + 操作相关参数。
#[derive(Debug, Clone)]
pub struct BitableParams {
    /// 操作类型
    pub operation: Operation,
    /// 列表操作的分页大小（API 上限 500，不在客户端截断）
    pub limit: u32,
    /// 创建/更新操作的字段 JSON 文本
    pub fields: Option<String>,
    /// 更新/删除操作的目标记录 ID
    pub record_id: Option<String>,
}

impl BitableParams {
    /// 指定操作、其余参数取默认值
    pub fn for_operation(operation: Operation) -> Self {
        Self {
            operation,
            limit: 100,
            fields: None,
            record_id: None,
        }
    }

    /// 从配置文件的节点片段构造参数
    pub fn from_node_config(config: &NodeConfig) -> Result<Self> {
        let operation = config
            .operation
            .as_deref()
            .ok_or_else(|| Error::Config("节点配置缺少 operation".to_string()))?
            .parse::<Operation>()?;

        Ok(Self {
            operation,
            limit: config.limit.unwrap_or(100),
            fields: config.fields.clone(),
            record_id: config.record_id.clone(),
        })
    }
}

/// 记录节点
///
/// 持有表格定位与节点参数，对每个输入条目执行同一种操作。
pub struct BitableNode {
    client: LarkClient,
    locator: BitableLocator,
    params: BitableParams,
}

impl BitableNode {
    pub fn new(client: LarkClient, locator: BitableLocator, params: BitableParams) -> Self {
        Self {
            client,
            locator,
            params,
        }
    }

    /// 取字段参数并完成 JSON 校验（发请求之前）
    fn parsed_fields(&self) -> Result<RecordFields> {
        let text = self
            .params
            .fields
            .as_deref()
            .ok_or_else(|| Error::Validation("缺少 fields 参数".to_string()))?;
        RecordFields::parse(text)
    }

    /// 取记录 ID 参数
    fn record_id(&self) -> Result<&str> {
        self.params
            .record_id
            .as_deref()
            .ok_or_else(|| Error::Validation("缺少 recordId 参数".to_string()))
    }
}

#[async_trait]
impl Node for BitableNode {
    fn name(&self) -> &str {
        "lark_bitable"
    }

    async fn execute(&self, items: Vec<Item>) -> Result<Vec<Item>> {
        let mut return_data = Vec::with_capacity(items.len());
        let operation = self.params.operation;

        for (item_index, item) in items.into_iter().enumerate() {
            // 令牌缺失在发起任何网络请求之前失败
            let token = item.tenant_access_token().ok_or_else(|| {
                Error::Auth(
                    "输入数据中未找到租户访问令牌，请在此节点之前连接认证节点".to_string(),
                )
            })?;

            debug!(item_index = item_index, operation = %operation, "处理条目");

            let result = match operation {
                Operation::GetRecordList => {
                    self.client
                        .list_records(&self.locator, &token, self.params.limit)
                        .await
                }
                Operation::CreateRecord => {
                    let fields = self.parsed_fields()?;
                    self.client
                        .create_record(&self.locator, &token, &fields)
                        .await
                }
                Operation::UpdateRecord => {
                    let record_id = self.record_id()?;
                    let fields = self.parsed_fields()?;
                    self.client
                        .update_record(&self.locator, &token, record_id, &fields)
                        .await
                }
                Operation::DeleteRecord => {
                    let record_id = self.record_id()?;
                    self.client
                        .delete_record(&self.locator, &token, record_id)
                        .await
                }
            };

            match result {
                Ok(data) => return_data.push(Item::new(data)),
                Err(e) => {
                    error!(operation = %operation, error = %e, "记录节点操作失败");
                    return Err(e);
                }
            }
        }

        Ok(return_data)
    }
}
