//! 流水线节点模块
//!
//! 本模块定义节点的统一接口，并实现认证节点与记录节点。

pub mod auth;
pub mod bitable;
pub mod traits;

pub use auth::AuthenticationNode;
pub use bitable::{BitableNode, BitableParams};
pub use traits::{Node, Operation};
