//! 多维表格 CRUD 演示
//!
//! 依次演示：获取令牌 → 创建记录 → 更新记录 → 列出记录 → 删除记录。
//!
//! # 使用方法
//! ```bash
//! cargo run --example bitable_crud -- \
//!     --app-id "cli_xxx" --app-secret "xxx" \
//!     --app-token "bascn_xxx" --table-id "tbl_xxx"
//! ```
//!
//! 参数省略时回落到 LARK_APP_ID / LARK_APP_SECRET /
//! LARK_APP_TOKEN / LARK_TABLE_ID 环境变量。

use clap::Parser;
use tracing::{info, Level};

use larkflow::flow::{Item, Pipeline};
use larkflow::lark::{BitableLocator, LarkClient, LarkCredentials};
use larkflow::nodes::{AuthenticationNode, BitableNode, BitableParams, Operation};

/// 演示参数
#[derive(Parser, Debug)]
#[command(name = "bitable-crud")]
#[command(about = "多维表格记录 CRUD 演示", long_about = None)]
struct Args {
    /// 飞书应用 ID
    #[arg(long)]
    app_id: Option<String>,

    /// 飞书应用密钥
    #[arg(long)]
    app_secret: Option<String>,

    /// Base 的 App Token
    #[arg(long)]
    app_token: Option<String>,

    /// 数据表 ID
    #[arg(long)]
    table_id: Option<String>,

    /// 演示创建的字段 JSON
    #[arg(long, default_value = r#"{"Name":"larkflow demo"}"#)]
    fields: String,
}

fn arg_or_env(value: Option<String>, env_key: &str) -> Option<String> {
    value.or_else(|| std::env::var(env_key).ok())
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("设置日志 subscriber 失败");

    let args = Args::parse();

    let (app_id, app_secret, app_token, table_id) = match (
        arg_or_env(args.app_id, "LARK_APP_ID"),
        arg_or_env(args.app_secret, "LARK_APP_SECRET"),
        arg_or_env(args.app_token, "LARK_APP_TOKEN"),
        arg_or_env(args.table_id, "LARK_TABLE_ID"),
    ) {
        (Some(a), Some(b), Some(c), Some(d)) => (a, b, c, d),
        _ => {
            eprintln!("缺少凭证参数，请通过命令行或环境变量提供");
            std::process::exit(1);
        }
    };

    let credentials = LarkCredentials {
        app_id,
        app_secret,
    };
    let locator = BitableLocator {
        app_token,
        table_id,
    };

    // 第一步：创建一条记录
    let mut create_params = BitableParams::for_operation(Operation::CreateRecord);
    create_params.fields = Some(args.fields.clone());

    let output = run(&credentials, &locator, create_params).await;
    let record_id = output[0].json["record"]["record_id"]
        .as_str()
        .expect("创建响应中应包含 record_id")
        .to_string();
    info!(record_id = %record_id, "记录已创建");

    // 第二步：更新这条记录
    let mut update_params = BitableParams::for_operation(Operation::UpdateRecord);
    update_params.record_id = Some(record_id.clone());
    update_params.fields = Some(r#"{"Name":"larkflow demo (updated)"}"#.to_string());
    run(&credentials, &locator, update_params).await;
    info!(record_id = %record_id, "记录已更新");

    // 第三步：列出记录
    let mut list_params = BitableParams::for_operation(Operation::GetRecordList);
    list_params.limit = 10;
    let output = run(&credentials, &locator, list_params).await;
    println!("{}", serde_json::to_string_pretty(&output[0].json).unwrap());

    // 第四步：删除这条记录
    let mut delete_params = BitableParams::for_operation(Operation::DeleteRecord);
    delete_params.record_id = Some(record_id.clone());
    let output = run(&credentials, &locator, delete_params).await;
    println!("{}", serde_json::to_string_pretty(&output[0].json).unwrap());
    info!(record_id = %record_id, "记录已删除");
}

/// 每一步都是完整的认证 → 记录两节点流水线（令牌不缓存）
async fn run(
    credentials: &LarkCredentials,
    locator: &BitableLocator,
    params: BitableParams,
) -> Vec<Item> {
    let pipeline = Pipeline::new()
        .add_node(Box::new(AuthenticationNode::new(credentials.clone())))
        .add_node(Box::new(BitableNode::new(
            LarkClient::new(credentials.clone()),
            locator.clone(),
            params,
        )));

    match pipeline.run(vec![Item::empty()]).await {
        Ok(output) => output,
        Err(e) => {
            eprintln!("流水线执行失败: {}", e);
            std::process::exit(1);
        }
    }
}
