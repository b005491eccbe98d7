//! FlowViz CLI 工具
//!
//! 从 JSON 文件读取一张网络，计算最大流并打印结果

use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use flowviz::cli::Printer;
use flowviz::render::SnapshotFormat;
use flowviz::{FordFulkerson, FlowNetworkInput, MaxFlowOptions};
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "flowviz-cli")]
#[command(about = "FlowViz 命令行工具")]
struct Args {
    /// 输入文件（{nodes, edges, source, sink}）
    #[arg(short, long)]
    input: PathBuf,

    /// 快照格式: json, dot
    #[arg(short, long, value_enum, default_value_t = SnapshotFormat::Json)]
    format: SnapshotFormat,

    /// 增广次数上限
    #[arg(long)]
    max_iterations: Option<usize>,

    /// 输出每次增广后的快照
    #[arg(short, long)]
    snapshots: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let input = FlowNetworkInput::from_json_file(&args.input)
        .with_context(|| format!("读取输入文件失败: {:?}", args.input))?;

    let start = Instant::now();
    let result = FordFulkerson::from_input(&input)?
        .with_options(MaxFlowOptions {
            max_iterations: args.max_iterations,
        })
        .run()?;
    let elapsed_ms = start.elapsed().as_millis() as u64;

    let printer = Printer::new();

    println!("{}", "最大流".bold().green());
    print!("{}", printer.print_summary(&result, elapsed_ms));

    println!("\n{}", "增广路径".bold().green());
    print!("{}", printer.print_paths(&result));

    println!("\n{}", "流量分配".bold().green());
    print!("{}", printer.print_edges(&result.flow));

    println!("\n{}", "最小割".bold().green());
    print!("{}", printer.print_edges(&result.min_cut));

    if args.snapshots {
        let renderer = args.format.renderer();
        println!("\n{}", format!("快照 ({})", args.format).bold().green());
        for (snapshot, rendered) in result
            .snapshots
            .iter()
            .zip(renderer.render_all(&result.snapshots)?)
        {
            print!("{}", printer.print_snapshot(snapshot));
            match rendered {
                serde_json::Value::String(text) => println!("{}", text),
                other => println!("{}", serde_json::to_string_pretty(&other)?),
            }
        }
    }

    Ok(())
}
