//! 图模型模块
//!
//! 定义带容量的有向边和残量图

mod edge;
mod graph;

pub use edge::FlowEdge;
pub use graph::FlowGraph;
