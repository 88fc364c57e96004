//! 节点 Trait 定义模块
//!
//! 定义流水线节点的统一接口。
//!
//! # 设计原则
//! 1. 使用 `async-trait` 支持异步方法
//! 2. 所有方法返回 `Result` 类型
//! 3. 节点串行处理条目，条目顺序在输出中保持不变

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::flow::Item;
use crate::infra::error::{Error, Result};

/// 记录节点支持的操作
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Hash)]
#[serde(rename_all = "camelCase")]
pub enum Operation {
    /// 获取记录列表
    GetRecordList,
    /// 创建记录
    CreateRecord,
    /// 更新记录
    UpdateRecord,
    /// 删除记录
    DeleteRecord,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::GetRecordList => write!(f, "getRecordList"),
            Operation::CreateRecord => write!(f, "createRecord"),
            Operation::UpdateRecord => write!(f, "updateRecord"),
            Operation::DeleteRecord => write!(f, "deleteRecord"),
        }
    }
}

impl FromStr for Operation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "getRecordList" => Ok(Operation::GetRecordList),
            "createRecord" => Ok(Operation::CreateRecord),
            "updateRecord" => Ok(Operation::UpdateRecord),
            "deleteRecord" => Ok(Operation::DeleteRecord),
            other => Err(Error::Config(format!("未知的操作类型: {}", other))),
        }
    }
}

/// 流水线节点 Trait
///
/// # 方法说明
/// - `name()`: 返回节点名称（日志用）
/// - `execute()`: 处理一批条目并返回输出条目
#[async_trait::async_trait]
pub trait Node: Send + Sync {
    /// 节点名称
    fn name(&self) -> &str;

    /// 处理一批条目
    ///
    /// 条目逐条串行处理；任一条目失败即返回错误，
    /// 本批剩余条目不再处理。
    ///
    /// # 参数说明
    /// * `items` - 输入条目序列
    ///
    /// # 返回值
    /// 成功条目的输出序列，保持输入顺序
    async fn execute(&self, items: Vec<Item>) -> Result<Vec<Item>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_display_matches_selector_values() {
        assert_eq!(Operation::GetRecordList.to_string(), "getRecordList");
        assert_eq!(Operation::CreateRecord.to_string(), "createRecord");
        assert_eq!(Operation::UpdateRecord.to_string(), "updateRecord");
        assert_eq!(Operation::DeleteRecord.to_string(), "deleteRecord");
    }

    #[test]
    fn test_operation_from_str_roundtrip() {
        for op in [
            Operation::GetRecordList,
            Operation::CreateRecord,
            Operation::UpdateRecord,
            Operation::DeleteRecord,
        ] {
            assert_eq!(op.to_string().parse::<Operation>().unwrap(), op);
        }

        assert!(matches!(
            "listRecords".parse::<Operation>(),
            Err(Error::Config(_))
        ));
    }
}
