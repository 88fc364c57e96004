//! 流水线执行模块
//!
//! 按节点顺序串行处理条目序列。上一个节点的全部输出
//! 作为下一个节点的输入，任一节点报错即中止整条流水线。

use tracing::{error, info};

use super::item::Item;
use crate::infra::error::Result;
use crate::nodes::traits::Node;

/// 节点流水线
///
/// 节点按加入顺序依次执行；节点内部再对条目逐条处理。
/// 没有并行、没有重试：第一个错误终止本次运行的剩余条目与剩余节点。
pub struct Pipeline {
    nodes: Vec<Box<dyn Node>>,
}

impl Pipeline {
    /// 创建空流水线
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// 追加一个节点
    pub fn add_node(mut self, node: Box<dyn Node>) -> Self {
        self.nodes.push(node);
        self
    }

    /// 节点数量
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// 运行流水线
    ///
    /// # 参数说明
    /// * `items` - 初始输入条目序列
    ///
    /// # 返回值
    /// 最后一个节点的输出条目，保持输入顺序
    pub async fn run(&self, mut items: Vec<Item>) -> Result<Vec<Item>> {
        for node in &self.nodes {
            info!(node = node.name(), input_count = items.len(), "执行节点");

            items = match node.execute(items).await {
                Ok(output) => output,
                Err(e) => {
                    error!(node = node.name(), error = %e, "节点执行失败，中止流水线");
                    return Err(e);
                }
            };
        }

        Ok(items)
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::error::Error;
    use async_trait::async_trait;

    /// 给每个条目打标记的测试节点
    struct TagNode {
        tag: &'static str,
    }

    #[async_trait]
    impl Node for TagNode {
        fn name(&self) -> &str {
            "tag"
        }

        async fn execute(&self, items: Vec<Item>) -> Result<Vec<Item>> {
            Ok(items
                .into_iter()
                .map(|mut item| {
                    item.json[self.tag] = serde_json::json!(true);
                    item
                })
                .collect())
        }
    }

    /// 永远失败的测试节点
    struct FailNode;

    #[async_trait]
    impl Node for FailNode {
        fn name(&self) -> &str {
            "fail"
        }

        async fn execute(&self, _items: Vec<Item>) -> Result<Vec<Item>> {
            Err(Error::Unknown("boom".to_string()))
        }
    }

    #[tokio::test]
    async fn test_nodes_run_in_order() {
        let pipeline = Pipeline::new()
            .add_node(Box::new(TagNode { tag: "first" }))
            .add_node(Box::new(TagNode { tag: "second" }));

        let output = pipeline.run(vec![Item::empty()]).await.unwrap();

        assert_eq!(output.len(), 1);
        assert_eq!(output[0].json["first"], true);
        assert_eq!(output[0].json["second"], true);
    }

    #[tokio::test]
    async fn test_first_error_aborts_run() {
        let pipeline = Pipeline::new()
            .add_node(Box::new(FailNode))
            .add_node(Box::new(TagNode { tag: "unreached" }));

        let result = pipeline.run(vec![Item::empty()]).await;

        assert!(matches!(result, Err(Error::Unknown(_))));
    }

    #[tokio::test]
    async fn test_empty_pipeline_passes_items_through() {
        let pipeline = Pipeline::new();
        let items = vec![Item::new(serde_json::json!({"k": "v"}))];

        let output = pipeline.run(items.clone()).await.unwrap();

        assert_eq!(output, items);
    }
}
