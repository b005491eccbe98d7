//! 增广路径查找
//!
//! 在残量图上做深度优先搜索，返回第一条找到的增广路径（不保证最短或最宽）。
//! 使用显式栈代替递归，避免大图上的栈溢出。

use crate::graph::FlowGraph;
use crate::types::{Capacity, NodeId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// 路径上的一条有向边
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathEdge {
    pub from: NodeId,
    pub to: NodeId,
}

/// 增广路径
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AugmentingPath {
    /// source -> ... -> sink 的边序列
    pub edges: Vec<PathEdge>,
    /// 路径上残量的最小值
    pub bottleneck: Capacity,
}

impl AugmentingPath {
    /// 路径经过的节点序列
    pub fn nodes(&self) -> Vec<NodeId> {
        let mut nodes = Vec::with_capacity(self.edges.len() + 1);
        if let Some(first) = self.edges.first() {
            nodes.push(first.from.clone());
        }
        nodes.extend(self.edges.iter().map(|e| e.to.clone()));
        nodes
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

/// 搜索栈帧：节点位置 + 下一条待检查出边的位置
struct Frame {
    node: usize,
    next: usize,
}

/// 路径查找器
pub struct PathFinder<'a> {
    graph: &'a FlowGraph,
}

impl<'a> PathFinder<'a> {
    /// 创建路径查找器
    pub fn new(graph: &'a FlowGraph) -> Self {
        Self { graph }
    }

    /// 使用全新的访问集合查找一条增广路径
    pub fn find_augmenting_path(&self, source: &NodeId, sink: &NodeId) -> Option<AugmentingPath> {
        let mut visited = HashSet::new();
        self.find_path(source, sink, &mut visited)
    }

    /// 深度优先查找一条增广路径
    ///
    /// 出边按插入顺序检查，只走残量 > 0 且未访问的邻居。
    /// 回溯时不撤销访问标记：一个节点一旦在本次搜索中被访问过，
    /// 其他分支也不会再经过它。因此结果是"第一条找到的路径"，
    /// 相同输入总是选出相同的路径。
    ///
    /// `source == sink` 时返回空路径，瓶颈为 +∞。
    pub fn find_path(
        &self,
        source: &NodeId,
        sink: &NodeId,
        visited: &mut HashSet<NodeId>,
    ) -> Option<AugmentingPath> {
        if source == sink {
            return Some(AugmentingPath {
                edges: Vec::new(),
                bottleneck: Capacity::INFINITY,
            });
        }

        let start = self.graph.node_index(source)?;
        visited.insert(source.clone());

        let mut stack = vec![Frame {
            node: start,
            next: 0,
        }];
        // path[i] 是进入 stack[i + 1] 的边及其残量
        let mut path: Vec<(PathEdge, Capacity)> = Vec::new();

        while let Some(frame) = stack.last_mut() {
            let Some(edge) = self.graph.edge_at(frame.node, frame.next) else {
                // 出边耗尽，此节点走不通
                stack.pop();
                path.pop();
                continue;
            };
            frame.next += 1;

            let residual = edge.residual();
            let neighbor = edge.target();
            if residual <= 0.0 || visited.contains(neighbor) {
                continue;
            }

            let step = PathEdge {
                from: edge.source().clone(),
                to: neighbor.clone(),
            };

            if neighbor == sink {
                path.push((step, residual));
                let bottleneck = path
                    .iter()
                    .map(|(_, r)| *r)
                    .fold(Capacity::INFINITY, Capacity::min);
                return Some(AugmentingPath {
                    edges: path.into_iter().map(|(e, _)| e).collect(),
                    bottleneck,
                });
            }

            visited.insert(neighbor.clone());
            if let Some(next) = self.graph.node_index(neighbor) {
                path.push((step, residual));
                stack.push(Frame { node: next, next: 0 });
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn n(s: &str) -> NodeId {
        NodeId::from(s)
    }

    fn diamond() -> FlowGraph {
        let mut g = FlowGraph::new();
        for id in ["A", "B", "C", "D"] {
            g.add_node(n(id));
        }
        g.add_original_edge(n("A"), n("B"), 10.0);
        g.add_original_edge(n("A"), n("C"), 5.0);
        g.add_original_edge(n("B"), n("D"), 5.0);
        g.add_original_edge(n("C"), n("D"), 10.0);
        g
    }

    #[test]
    fn test_first_path_follows_insertion_order() {
        let g = diamond();
        let path = PathFinder::new(&g)
            .find_augmenting_path(&n("A"), &n("D"))
            .unwrap();

        assert_eq!(path.nodes(), vec![n("A"), n("B"), n("D")]);
        assert_eq!(path.bottleneck, 5.0);
        assert_eq!(path.len(), 2);
    }

    #[test]
    fn test_no_path() {
        let mut g = FlowGraph::new();
        g.add_edge(n("A"), n("B"), 1.0);
        g.add_edge(n("C"), n("D"), 1.0);

        assert!(PathFinder::new(&g)
            .find_augmenting_path(&n("A"), &n("D"))
            .is_none());
    }

    #[test]
    fn test_unknown_source_is_no_path() {
        let g = diamond();
        assert!(PathFinder::new(&g)
            .find_augmenting_path(&n("Z"), &n("D"))
            .is_none());
    }

    #[test]
    fn test_skips_zero_residual() {
        let mut g = diamond();
        g.adjust_flow(&n("B"), &n("D"), 5.0).unwrap();

        let path = PathFinder::new(&g)
            .find_augmenting_path(&n("A"), &n("D"))
            .unwrap();
        assert_eq!(path.nodes(), vec![n("A"), n("C"), n("D")]);
        assert_eq!(path.bottleneck, 5.0);
    }

    #[test]
    fn test_visited_not_undone_on_backtrack() {
        // A -> B -> X 是死路；B 已被标记，从 C 出发时不再进入 B
        // 也就不会走 A -> C -> B -> ...
        let mut g = FlowGraph::new();
        g.add_edge(n("A"), n("B"), 1.0);
        g.add_edge(n("A"), n("C"), 1.0);
        g.add_edge(n("B"), n("X"), 1.0);
        g.add_edge(n("C"), n("B"), 1.0);
        g.add_edge(n("C"), n("D"), 1.0);
        g.add_edge(n("B"), n("D"), 0.0);

        let path = PathFinder::new(&g)
            .find_augmenting_path(&n("A"), &n("D"))
            .unwrap();
        assert_eq!(path.nodes(), vec![n("A"), n("C"), n("D")]);
    }

    #[test]
    fn test_visited_set_is_caller_owned() {
        let g = diamond();
        let mut visited = HashSet::new();
        visited.insert(n("B"));

        let path = PathFinder::new(&g)
            .find_path(&n("A"), &n("D"), &mut visited)
            .unwrap();
        assert_eq!(path.nodes(), vec![n("A"), n("C"), n("D")]);
        assert!(visited.contains(&n("A")));
        assert!(visited.contains(&n("C")));
    }

    #[test]
    fn test_source_equals_sink() {
        let g = diamond();
        let path = PathFinder::new(&g)
            .find_augmenting_path(&n("A"), &n("A"))
            .unwrap();
        assert!(path.is_empty());
        assert!(path.bottleneck.is_infinite());
    }

    #[test]
    fn test_long_chain_does_not_overflow() {
        let mut g = FlowGraph::new();
        let len = 100_000i64;
        for i in 0..len {
            g.add_edge(NodeId::Int(i), NodeId::Int(i + 1), 1.0);
        }

        let path = PathFinder::new(&g)
            .find_augmenting_path(&NodeId::Int(0), &NodeId::Int(len))
            .unwrap();
        assert_eq!(path.len() as i64, len);
        assert_eq!(path.bottleneck, 1.0);
    }
}
