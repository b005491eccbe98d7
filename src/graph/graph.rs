//! 残量图数据结构
//!
//! 节点 -> 有序出边表。出边保持插入顺序，该顺序决定路径搜索的先后。

use super::edge::FlowEdge;
use crate::error::{Error, Result};
use crate::types::{Capacity, FlowNetworkInput, NodeId};
use indexmap::{IndexMap, IndexSet};
use std::collections::{HashSet, VecDeque};

/// 带容量的有向图（每个有序节点对至多一条边）
#[derive(Debug, Clone, Default)]
pub struct FlowGraph {
    /// 邻接表：节点 -> (邻居 -> 边)
    adjacency: IndexMap<NodeId, IndexMap<NodeId, FlowEdge>>,
    /// 调用方提供的原始边
    original: IndexSet<(NodeId, NodeId)>,
}

impl FlowGraph {
    /// 创建空图
    pub fn new() -> Self {
        Self::default()
    }

    /// 从一次请求的输入构建图
    ///
    /// 先按顺序添加节点，再按顺序添加边（同一节点对后写覆盖前写）。
    /// 边端点不在节点列表中时隐式添加该节点。
    pub fn from_input(input: &FlowNetworkInput) -> Result<Self> {
        let mut graph = Self::new();

        for node in &input.nodes {
            graph.add_node(node.clone());
        }

        for edge in &input.edges {
            if !edge.capacity.is_finite() || edge.capacity < 0.0 {
                return Err(Error::InvalidInput(format!(
                    "边 {} -> {} 的容量无效: {}",
                    edge.source, edge.target, edge.capacity
                )));
            }
            graph.add_original_edge(edge.source.clone(), edge.target.clone(), edge.capacity);
        }

        Ok(graph)
    }

    // ==================== 节点操作 ====================

    /// 添加节点（已存在则忽略）
    pub fn add_node(&mut self, id: NodeId) {
        self.adjacency.entry(id).or_default();
    }

    pub fn contains_node(&self, id: &NodeId) -> bool {
        self.adjacency.contains_key(id)
    }

    /// 按插入顺序遍历节点
    pub fn nodes(&self) -> impl Iterator<Item = &NodeId> {
        self.adjacency.keys()
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    // ==================== 边操作 ====================

    /// 添加或覆盖边，流量置 0
    pub fn add_edge(&mut self, u: NodeId, v: NodeId, capacity: Capacity) {
        self.insert_edge(u, v, capacity, 0.0);
    }

    /// 添加调用方提供的原始边
    pub fn add_original_edge(&mut self, u: NodeId, v: NodeId, capacity: Capacity) {
        self.original.insert((u.clone(), v.clone()));
        self.add_edge(u, v, capacity);
    }

    fn insert_edge(&mut self, u: NodeId, v: NodeId, capacity: Capacity, flow: Capacity) {
        // 先起点后终点，隐式补建的节点按此顺序排列
        self.add_node(u.clone());
        self.add_node(v.clone());
        let out = self.adjacency.entry(u.clone()).or_default();
        match out.get_mut(&v) {
            // 覆盖时保留原位置
            Some(edge) => edge.reset(capacity, flow),
            None => {
                out.insert(v.clone(), FlowEdge::new(u, v, capacity, flow));
            }
        }
    }

    /// 边不存在时以给定容量、流量 0 创建，否则不做任何事
    pub fn ensure_edge(&mut self, u: &NodeId, v: &NodeId, default_capacity: Capacity) {
        if !self.has_edge(u, v) {
            self.insert_edge(u.clone(), v.clone(), default_capacity, 0.0);
        }
    }

    pub fn has_edge(&self, u: &NodeId, v: &NodeId) -> bool {
        self.get_edge(u, v).is_some()
    }

    pub fn get_edge(&self, u: &NodeId, v: &NodeId) -> Option<&FlowEdge> {
        self.adjacency.get(u)?.get(v)
    }

    /// 边的 (容量, 流量)
    pub fn edge_state(&self, u: &NodeId, v: &NodeId) -> Option<(Capacity, Capacity)> {
        self.get_edge(u, v).map(|e| (e.capacity(), e.flow()))
    }

    /// 调整边的流量
    pub fn adjust_flow(&mut self, u: &NodeId, v: &NodeId, delta: Capacity) -> Result<()> {
        let edge = self
            .adjacency
            .get_mut(u)
            .and_then(|out| out.get_mut(v))
            .ok_or_else(|| Error::UnknownEdge {
                from: u.clone(),
                to: v.clone(),
            })?;
        edge.add_flow(delta);
        Ok(())
    }

    /// 按插入顺序获取出边
    pub fn outgoing_edges(&self, u: &NodeId) -> impl Iterator<Item = &FlowEdge> {
        self.adjacency.get(u).into_iter().flat_map(|out| out.values())
    }

    /// 节点在邻接表中的位置
    pub(crate) fn node_index(&self, id: &NodeId) -> Option<usize> {
        self.adjacency.get_index_of(id)
    }

    /// 第 `node` 个节点的第 `pos` 条出边
    pub(crate) fn edge_at(&self, node: usize, pos: usize) -> Option<&FlowEdge> {
        self.adjacency
            .get_index(node)
            .and_then(|(_, out)| out.get_index(pos))
            .map(|(_, edge)| edge)
    }

    /// 全部边（含补建的反向边）
    pub fn edges(&self) -> impl Iterator<Item = &FlowEdge> {
        self.adjacency.values().flat_map(|out| out.values())
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(|out| out.len()).sum()
    }

    // ==================== 原始边 ====================

    pub fn is_original(&self, u: &NodeId, v: &NodeId) -> bool {
        self.original.contains(&(u.clone(), v.clone()))
    }

    /// 原始边，按邻接顺序（节点插入顺序，其次边插入顺序）
    pub fn original_edges(&self) -> impl Iterator<Item = &FlowEdge> {
        self.edges()
            .filter(|e| self.original.contains(&(e.source().clone(), e.target().clone())))
    }

    pub fn original_edge_count(&self) -> usize {
        self.original.len()
    }

    // ==================== 残量图查询 ====================

    /// 残量图中从 `source` 可达的节点（BFS）
    pub fn residual_reachable(&self, source: &NodeId) -> HashSet<NodeId> {
        let mut visited = HashSet::new();
        let mut queue = VecDeque::new();

        if !self.contains_node(source) {
            return visited;
        }

        visited.insert(source.clone());
        queue.push_back(source);

        while let Some(u) = queue.pop_front() {
            for edge in self.outgoing_edges(u) {
                if edge.residual() > 0.0 && !visited.contains(edge.target()) {
                    visited.insert(edge.target().clone());
                    queue.push_back(edge.target());
                }
            }
        }

        visited
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EdgeInput;

    fn n(s: &str) -> NodeId {
        NodeId::from(s)
    }

    #[test]
    fn test_add_edge_and_state() {
        let mut g = FlowGraph::new();
        g.add_node(n("A"));
        g.add_node(n("B"));
        g.add_edge(n("A"), n("B"), 10.0);

        assert!(g.has_edge(&n("A"), &n("B")));
        assert!(!g.has_edge(&n("B"), &n("A")));
        assert_eq!(g.edge_state(&n("A"), &n("B")), Some((10.0, 0.0)));
        assert_eq!(g.edge_state(&n("B"), &n("A")), None);
    }

    #[test]
    fn test_add_edge_overwrites() {
        let mut g = FlowGraph::new();
        g.add_edge(n("A"), n("B"), 10.0);
        g.add_edge(n("A"), n("C"), 3.0);
        g.adjust_flow(&n("A"), &n("B"), 4.0).unwrap();

        g.add_edge(n("A"), n("B"), 7.0);
        assert_eq!(g.edge_state(&n("A"), &n("B")), Some((7.0, 0.0)));
        assert_eq!(g.edge_count(), 2);

        // 覆盖不改变出边顺序
        let targets: Vec<_> = g.outgoing_edges(&n("A")).map(|e| e.target().clone()).collect();
        assert_eq!(targets, vec![n("B"), n("C")]);
    }

    #[test]
    fn test_adjust_flow_unknown_edge() {
        let mut g = FlowGraph::new();
        g.add_edge(n("A"), n("B"), 1.0);

        let err = g.adjust_flow(&n("B"), &n("A"), 1.0).unwrap_err();
        assert!(matches!(err, Error::UnknownEdge { .. }));
    }

    #[test]
    fn test_ensure_edge() {
        let mut g = FlowGraph::new();
        g.add_edge(n("A"), n("B"), 5.0);
        g.adjust_flow(&n("A"), &n("B"), 2.0).unwrap();

        // 已存在：不改变
        g.ensure_edge(&n("A"), &n("B"), 0.0);
        assert_eq!(g.edge_state(&n("A"), &n("B")), Some((5.0, 2.0)));

        // 不存在：创建
        g.ensure_edge(&n("B"), &n("A"), 0.0);
        assert_eq!(g.edge_state(&n("B"), &n("A")), Some((0.0, 0.0)));
        assert!(!g.is_original(&n("B"), &n("A")));
    }

    #[test]
    fn test_from_input_implicit_nodes_and_originals() {
        let input = FlowNetworkInput {
            nodes: vec![n("A"), n("B")],
            edges: vec![
                EdgeInput::new("A", "B", 2.0),
                EdgeInput::new("B", "C", 1.0),
            ],
            source: n("A"),
            sink: n("C"),
        };
        let mut g = FlowGraph::from_input(&input).unwrap();

        assert_eq!(g.node_count(), 3);
        assert!(g.contains_node(&n("C")));
        assert_eq!(g.original_edge_count(), 2);

        g.ensure_edge(&n("B"), &n("A"), 0.0);
        let originals: Vec<_> = g
            .original_edges()
            .map(|e| (e.source().clone(), e.target().clone()))
            .collect();
        assert_eq!(originals, vec![(n("A"), n("B")), (n("B"), n("C"))]);
    }

    #[test]
    fn test_from_input_rejects_negative_capacity() {
        let input = FlowNetworkInput {
            nodes: vec![n("A"), n("B")],
            edges: vec![EdgeInput::new("A", "B", -1.0)],
            source: n("A"),
            sink: n("B"),
        };
        assert!(matches!(
            FlowGraph::from_input(&input),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_residual_reachable() {
        let mut g = FlowGraph::new();
        g.add_edge(n("A"), n("B"), 1.0);
        g.add_edge(n("B"), n("C"), 1.0);
        g.add_edge(n("C"), n("D"), 0.0);

        let reach = g.residual_reachable(&n("A"));
        assert_eq!(reach.len(), 3);
        assert!(!reach.contains(&n("D")));
    }
}
