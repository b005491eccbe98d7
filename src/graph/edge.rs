//! 边定义
//!
//! 有向带容量边：容量、当前流量与残量

use crate::types::{Capacity, NodeId};
use serde::{Deserialize, Serialize};

/// 有向带容量边
///
/// 原始边满足 `0 <= flow <= capacity`；增广时补建的反向边容量为 0，
/// 流量可为负，其残量 `-flow` 表示可以撤销的已发送流量。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowEdge {
    /// 起点
    source: NodeId,
    /// 终点
    target: NodeId,
    /// 容量
    capacity: Capacity,
    /// 当前流量
    flow: Capacity,
}

impl FlowEdge {
    /// 创建新边
    pub fn new(source: NodeId, target: NodeId, capacity: Capacity, flow: Capacity) -> Self {
        Self {
            source,
            target,
            capacity,
            flow,
        }
    }

    pub fn source(&self) -> &NodeId {
        &self.source
    }

    pub fn target(&self) -> &NodeId {
        &self.target
    }

    pub fn capacity(&self) -> Capacity {
        self.capacity
    }

    pub fn flow(&self) -> Capacity {
        self.flow
    }

    /// 残量 = 容量 - 流量
    ///
    /// 判断可达性时必须使用残量而不是容量。
    pub fn residual(&self) -> Capacity {
        self.capacity - self.flow
    }

    /// 流量已占满容量
    pub fn is_saturated(&self) -> bool {
        self.residual() <= 0.0
    }

    /// 覆盖容量并重置流量
    pub(crate) fn reset(&mut self, capacity: Capacity, flow: Capacity) {
        self.capacity = capacity;
        self.flow = flow;
    }

    pub(crate) fn add_flow(&mut self, delta: Capacity) {
        self.flow += delta;
    }
}
