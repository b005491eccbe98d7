//! FlowViz - 最大流计算与增广过程可视化
//!
//! 对用户提供的有向带容量图计算最大流，并在每次增广后记录图快照：
//! - 残量图模型，增广时按需补建反向边
//! - 基于 DFS 的 Ford-Fulkerson（显式栈，路径选择确定）
//! - 快照渲染为结构化 JSON 或 Graphviz DOT
//! - HTTP 接口与命令行工具

pub mod algorithm;
pub mod cli;
pub mod error;
pub mod graph;
pub mod metrics;
pub mod render;
pub mod server;
pub mod types;

// 重导出常用类型
pub use algorithm::{max_flow, FordFulkerson, GraphSnapshot, MaxFlowOptions, MaxFlowResult};
pub use error::{Error, Result};
pub use graph::{FlowEdge, FlowGraph};
pub use render::{SnapshotFormat, SnapshotRenderer};
pub use types::{Capacity, EdgeInput, FlowNetworkInput, MaxFlowResponse, NodeId};

/// 库版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
