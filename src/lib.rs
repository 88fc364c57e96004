//! larkflow 库入口
//!
//! 飞书（Lark）多维表格的流水线节点适配器：
//! 认证节点换取租户访问令牌，记录节点对 Bitable 数据表做增删改查。
//!
//! # 使用示例
//! ```rust,no_run
//! use larkflow::flow::{Item, Pipeline};
//! use larkflow::lark::{BitableLocator, LarkClient, LarkCredentials};
//! use larkflow::nodes::{AuthenticationNode, BitableNode, BitableParams, Operation};
//!
//! # async fn run() -> larkflow::infra::error::Result<()> {
//! let credentials = LarkCredentials {
//!     app_id: "cli_xxx".to_string(),
//!     app_secret: "secret".to_string(),
//! };
//! let locator = BitableLocator {
//!     app_token: "bascn_xxx".to_string(),
//!     table_id: "tbl_xxx".to_string(),
//! };
//!
//! let pipeline = Pipeline::new()
//!     .add_node(Box::new(AuthenticationNode::new(credentials.clone())))
//!     .add_node(Box::new(BitableNode::new(
//!         LarkClient::new(credentials),
//!         locator,
//!         BitableParams::for_operation(Operation::GetRecordList),
//!     )));
//!
//! let output = pipeline.run(vec![Item::empty()]).await?;
//! # Ok(())
//! # }
//! ```

pub mod flow;
pub mod infra;
pub mod lark;
pub mod nodes;
