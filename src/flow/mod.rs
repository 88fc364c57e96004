//! 数据流模块
//!
//! 定义节点之间流转的条目类型与串行流水线。

pub mod item;
pub mod pipeline;

pub use item::{Item, TENANT_ACCESS_TOKEN_KEY};
pub use pipeline::Pipeline;
