//! larkflow 主入口

use clap::{Parser, Subcommand};
use tracing::{error, info};

use larkflow::flow::{Item, Pipeline};
use larkflow::infra::config::{Config, ConfigLoader};
use larkflow::infra::error::Result;
use larkflow::infra::logging::{self, LogFormat, LogLevel, LoggingConfig};
use larkflow::lark::{BitableLocator, LarkClient, LarkCredentials};
use larkflow::nodes::{AuthenticationNode, BitableNode, BitableParams};

// 命令行参数解析结构体
#[derive(Parser, Debug)]
#[command(name = "larkflow")]
#[command(version = "0.1.0")]
#[command(about = "飞书多维表格流水线节点：令牌认证 + 记录 CRUD", long_about = None)]
struct Args {
    /// 配置文件路径
    #[arg(short, long, default_value = "larkflow.toml")]
    config: String,

    /// 是否启用 verbose 模式（显示 DEBUG 日志）
    #[arg(short, long)]
    verbose: bool,

    /// 子命令
    #[command(subcommand)]
    command: Commands,
}

// 子命令枚举
#[derive(Subcommand, Debug)]
enum Commands {
    /// 获取租户访问令牌并输出
    Auth,
    /// 执行配置选定的记录操作（认证节点 → 记录节点）
    Records {
        /// 覆盖配置文件中的 operation
        #[arg(long)]
        operation: Option<String>,
        /// 覆盖配置文件中的 limit
        #[arg(long)]
        limit: Option<u32>,
        /// 覆盖配置文件中的 fields JSON 文本
        #[arg(long)]
        fields: Option<String>,
        /// 覆盖配置文件中的 record_id
        #[arg(long)]
        record_id: Option<String>,
    },
    /// 检查配置文件是否有效
    Check,
}

// 主函数
#[tokio::main]
async fn main() {
    // 加载 .env 文件
    dotenv::dotenv().ok();

    let args = Args::parse();

    let loader = ConfigLoader::new();
    let config = match loader.load(&args.config).await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("配置加载失败: {}", e);
            std::process::exit(1);
        }
    };

    // 日志级别：--verbose 优先于配置文件
    let level = if args.verbose {
        LogLevel::Debug
    } else {
        config
            .logging
            .level
            .as_deref()
            .map(LogLevel::from_str_or_default)
            .unwrap_or(LogLevel::Info)
    };
    let format = match config.logging.format.as_deref() {
        Some("json") => LogFormat::Json,
        _ => LogFormat::Default,
    };
    logging::init(&LoggingConfig { level, format });

    info!(version = "0.1.0", "larkflow 启动");

    let outcome = match args.command {
        Commands::Auth => run_auth(&config).await,
        Commands::Records {
            operation,
            limit,
            fields,
            record_id,
        } => run_records(&config, operation, limit, fields, record_id).await,
        Commands::Check => {
            check_config(&config);
            Ok(())
        }
    };

    if let Err(e) = outcome {
        error!(error = %e, "执行失败");
        std::process::exit(1);
    }
}

// 提取应用凭证
fn credentials_of(config: &Config) -> LarkCredentials {
    LarkCredentials {
        app_id: config.credentials.app_id.clone(),
        app_secret: config.credentials.app_secret.clone(),
    }
}

// 获取并输出租户访问令牌
async fn run_auth(config: &Config) -> Result<()> {
    let pipeline =
        Pipeline::new().add_node(Box::new(AuthenticationNode::new(credentials_of(config))));

    let output = pipeline.run(vec![Item::empty()]).await?;

    for item in &output {
        println!("{}", serde_json::to_string_pretty(&item.json)?);
    }
    Ok(())
}

// 运行认证节点 → 记录节点的两节点流水线
async fn run_records(
    config: &Config,
    operation: Option<String>,
    limit: Option<u32>,
    fields: Option<String>,
    record_id: Option<String>,
) -> Result<()> {
    // 命令行覆盖配置文件
    let mut node_config = config.node.clone();
    if operation.is_some() {
        node_config.operation = operation;
    }
    if limit.is_some() {
        node_config.limit = limit;
    }
    if fields.is_some() {
        node_config.fields = fields;
    }
    if record_id.is_some() {
        node_config.record_id = record_id;
    }

    let params = BitableParams::from_node_config(&node_config)?;
    let locator = BitableLocator {
        app_token: config.credentials.app_token.clone(),
        table_id: config.credentials.table_id.clone(),
    };

    let pipeline = Pipeline::new()
        .add_node(Box::new(AuthenticationNode::new(credentials_of(config))))
        .add_node(Box::new(BitableNode::new(
            LarkClient::new(credentials_of(config)),
            locator,
            params,
        )));

    let output = pipeline.run(vec![Item::empty()]).await?;

    info!(output_count = output.len(), "流水线执行完成");
    for item in &output {
        println!("{}", serde_json::to_string_pretty(&item.json)?);
    }
    Ok(())
}

// 检查配置文件是否有效
fn check_config(config: &Config) {
    println!("配置验证成功!");
    println!("- App ID: {}", mask(&config.credentials.app_id));
    println!("- App Token: {}", mask(&config.credentials.app_token));
    println!("- Table ID: {}", config.credentials.table_id);
    println!(
        "- Operation: {}",
        config.node.operation.as_deref().unwrap_or("(未设置)")
    );
}

// 打码敏感字段，仅保留前四位
fn mask(value: &str) -> String {
    if value.len() <= 4 {
        value.to_string()
    } else {
        format!("{}****", &value[..4])
    }
}
