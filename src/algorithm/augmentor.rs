//! 沿增广路径更新流量
//!
//! 正向边流量 += b；反向边存在则流量 -= b，否则补建容量 0、流量 -b 的反向边。

use super::path_finder::AugmentingPath;
use crate::error::{Error, Result};
use crate::graph::FlowGraph;
use crate::types::Capacity;

/// 增广器
pub struct Augmentor<'a> {
    graph: &'a mut FlowGraph,
}

impl<'a> Augmentor<'a> {
    pub fn new(graph: &'a mut FlowGraph) -> Self {
        Self { graph }
    }

    /// 以瓶颈值 `bottleneck` 沿路径增广
    ///
    /// 先校验路径上每条边都存在，再逐边修改，不会留下部分增广的状态。
    pub fn augment(&mut self, path: &AugmentingPath, bottleneck: Capacity) -> Result<()> {
        if bottleneck <= 0.0 || !bottleneck.is_finite() {
            return Err(Error::InconsistentGraphState(format!(
                "无效的增广量: {}",
                bottleneck
            )));
        }

        if let Some(missing) = path
            .edges
            .iter()
            .find(|e| !self.graph.has_edge(&e.from, &e.to))
        {
            return Err(Error::InconsistentGraphState(format!(
                "路径上的边 {} -> {} 已不存在",
                missing.from, missing.to
            )));
        }

        for step in &path.edges {
            self.graph.adjust_flow(&step.from, &step.to, bottleneck)?;

            // 反向边：已存在（原始边或之前补建的）则减流，否则以容量 0 补建
            self.graph.ensure_edge(&step.to, &step.from, 0.0);
            self.graph.adjust_flow(&step.to, &step.from, -bottleneck)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::path_finder::PathEdge;
    use crate::types::NodeId;

    fn n(s: &str) -> NodeId {
        NodeId::from(s)
    }

    fn path(nodes: &[&str], bottleneck: Capacity) -> AugmentingPath {
        AugmentingPath {
            edges: nodes
                .windows(2)
                .map(|w| PathEdge {
                    from: n(w[0]),
                    to: n(w[1]),
                })
                .collect(),
            bottleneck,
        }
    }

    #[test]
    fn test_creates_reverse_edges() {
        let mut g = FlowGraph::new();
        g.add_original_edge(n("A"), n("B"), 10.0);
        g.add_original_edge(n("B"), n("C"), 4.0);

        let p = path(&["A", "B", "C"], 4.0);
        Augmentor::new(&mut g).augment(&p, p.bottleneck).unwrap();

        assert_eq!(g.edge_state(&n("A"), &n("B")), Some((10.0, 4.0)));
        assert_eq!(g.edge_state(&n("B"), &n("C")), Some((4.0, 4.0)));
        assert_eq!(g.edge_state(&n("B"), &n("A")), Some((0.0, -4.0)));
        assert_eq!(g.edge_state(&n("C"), &n("B")), Some((0.0, -4.0)));
        assert!(!g.is_original(&n("B"), &n("A")));
    }

    #[test]
    fn test_existing_reverse_edge_is_decremented() {
        let mut g = FlowGraph::new();
        g.add_original_edge(n("A"), n("B"), 10.0);

        let p = path(&["A", "B"], 3.0);
        Augmentor::new(&mut g).augment(&p, 3.0).unwrap();
        Augmentor::new(&mut g).augment(&p, 2.0).unwrap();

        assert_eq!(g.edge_state(&n("A"), &n("B")), Some((10.0, 5.0)));
        assert_eq!(g.edge_state(&n("B"), &n("A")), Some((0.0, -5.0)));

        // 沿反向边撤销流量
        let back = path(&["B", "A"], 5.0);
        Augmentor::new(&mut g).augment(&back, 5.0).unwrap();
        assert_eq!(g.edge_state(&n("A"), &n("B")), Some((10.0, 0.0)));
        assert_eq!(g.edge_state(&n("B"), &n("A")), Some((0.0, 0.0)));
    }

    #[test]
    fn test_missing_edge_leaves_graph_untouched() {
        let mut g = FlowGraph::new();
        g.add_original_edge(n("A"), n("B"), 10.0);

        let p = path(&["A", "B", "C"], 1.0);
        let err = Augmentor::new(&mut g).augment(&p, 1.0).unwrap_err();

        assert!(matches!(err, Error::InconsistentGraphState(_)));
        assert_eq!(g.edge_state(&n("A"), &n("B")), Some((10.0, 0.0)));
        assert!(!g.has_edge(&n("B"), &n("A")));
    }

    #[test]
    fn test_rejects_non_positive_bottleneck() {
        let mut g = FlowGraph::new();
        g.add_original_edge(n("A"), n("B"), 10.0);

        let p = path(&["A", "B"], 0.0);
        assert!(Augmentor::new(&mut g).augment(&p, 0.0).is_err());
    }
}
