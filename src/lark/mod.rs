//! 飞书开放平台适配模块
//!
//! 本模块实现对飞书（Lark）开放平台 REST API 的封装。
//!
//! # 功能
//! - 租户令牌签发（auth/v3）
//! - 多维表格记录 CRUD（bitable/v1）
//!
//! # 配置文件示例
//! ```toml
//! [credentials]
//! app_id = "${LARK_APP_ID}"
//! app_secret = "${LARK_APP_SECRET}"
//! app_token = "bascnXXXXXXXX"
//! table_id = "tblXXXXXXXX"
//! ```

pub mod auth; // 令牌签发
pub mod bitable; // 记录 CRUD
pub mod client; // HTTP 客户端

// 重新导出常用类型
pub use bitable::{BitableLocator, DeleteReceipt, RecordFields};
pub use client::{ApiResponse, LarkClient, LarkCredentials, TenantAccessToken, DEFAULT_BASE_URL};
