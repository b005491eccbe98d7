//! FlowViz 服务器入口
//!
//! 启动 HTTP API 服务器

use clap::Parser;
use flowviz::render::SnapshotFormat;
use flowviz::server::{start_server, ServerConfig};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "flowviz-server")]
#[command(about = "FlowViz 最大流 HTTP API 服务器")]
struct Args {
    /// 监听地址
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// 监听端口
    #[arg(short, long, default_value = "5000")]
    port: u16,

    /// 允许跨域访问的前端地址
    #[arg(long, default_value = "http://localhost:3000")]
    cors_origin: String,

    /// 快照格式: json, dot
    #[arg(short, long, value_enum, default_value_t = SnapshotFormat::Json)]
    format: SnapshotFormat,

    /// 增广次数上限（默认不限制）
    #[arg(long)]
    max_iterations: Option<usize>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    tracing::info!(
        version = flowviz::VERSION,
        format = %args.format,
        max_iterations = ?args.max_iterations,
        "FlowViz - 最大流可视化服务"
    );

    let config = ServerConfig {
        host: args.host,
        port: args.port,
        cors_origin: args.cors_origin,
        format: args.format,
        max_iterations: args.max_iterations,
    };

    start_server(config).await?;

    Ok(())
}
