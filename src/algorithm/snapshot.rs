//! 图快照
//!
//! 每次增广后记录原始边的 (流量, 容量)，交给外部渲染器。
//! 补建的反向边只参与残量计算，不出现在快照中。

use crate::graph::FlowGraph;
use crate::types::{format_amount, serialize_amount, Capacity, NodeId};
use serde::Serialize;

/// 快照中的一条原始边
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SnapshotEdge {
    pub source: NodeId,
    pub target: NodeId,
    #[serde(serialize_with = "serialize_amount")]
    pub flow: Capacity,
    #[serde(serialize_with = "serialize_amount")]
    pub capacity: Capacity,
}

impl SnapshotEdge {
    /// "flow/capacity" 形式的边标签
    pub fn label(&self) -> String {
        format!("{}/{}", format_amount(self.flow), format_amount(self.capacity))
    }

    pub fn is_saturated(&self) -> bool {
        self.flow >= self.capacity
    }
}

/// 某次增广后的只读图快照（不含布局信息）
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphSnapshot {
    /// 第几次增广（从 1 开始）
    pub iteration: usize,
    /// 截至本次增广的总流量
    #[serde(serialize_with = "serialize_amount")]
    pub flow_value: Capacity,
    pub nodes: Vec<NodeId>,
    pub edges: Vec<SnapshotEdge>,
}

/// 快照收集器
pub struct SnapshotCollector;

impl SnapshotCollector {
    /// 记录当前图状态
    pub fn capture(graph: &FlowGraph, iteration: usize, flow_value: Capacity) -> GraphSnapshot {
        GraphSnapshot {
            iteration,
            flow_value,
            nodes: graph.nodes().cloned().collect(),
            edges: graph
                .original_edges()
                .map(|e| SnapshotEdge {
                    source: e.source().clone(),
                    target: e.target().clone(),
                    flow: e.flow(),
                    capacity: e.capacity(),
                })
                .collect(),
        }
    }
}
