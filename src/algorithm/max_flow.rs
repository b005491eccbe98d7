//! 最大流算法
//!
//! 实现基于 DFS 的 Ford-Fulkerson：反复查找增广路径并增广，
//! 每次增广后记录一个图快照，供前端逐步展示。

use super::augmentor::Augmentor;
use super::path_finder::{AugmentingPath, PathFinder};
use super::snapshot::{GraphSnapshot, SnapshotCollector, SnapshotEdge};
use crate::error::{Error, Result};
use crate::graph::FlowGraph;
use crate::types::{serialize_amount, Capacity, FlowNetworkInput, NodeId};
use serde::Serialize;
use std::collections::HashSet;
use tracing::{debug, info};

/// 引擎选项
#[derive(Debug, Clone, Copy, Default)]
pub struct MaxFlowOptions {
    /// 增广次数上限；`None` 表示不限制
    ///
    /// 整数容量一定终止；非整数容量可能不终止，设置上限后超出会返回
    /// `Error::NonTerminating`。
    pub max_iterations: Option<usize>,
}

/// 引擎状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Running,
    Done,
}

/// 最大流结果
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaxFlowResult {
    /// 最大流量值
    #[serde(serialize_with = "serialize_amount")]
    pub value: Capacity,
    /// 每次增广后的快照
    pub snapshots: Vec<GraphSnapshot>,
    /// 依次使用的增广路径
    pub paths: Vec<AugmentingPath>,
    /// 结束时原始边的流量分配
    pub flow: Vec<SnapshotEdge>,
    /// 最小割的源侧顶点集（按节点插入顺序）
    pub source_side: Vec<NodeId>,
    /// 最小割上的原始边
    pub min_cut: Vec<SnapshotEdge>,
}

impl MaxFlowResult {
    pub fn iterations(&self) -> usize {
        self.snapshots.len()
    }

    /// 流量等于容量的原始边
    pub fn saturated_edges(&self) -> impl Iterator<Item = &SnapshotEdge> {
        self.flow.iter().filter(|e| e.is_saturated())
    }

    /// 最小割容量（整数容量下等于最大流）
    pub fn min_cut_capacity(&self) -> Capacity {
        self.min_cut.iter().map(|e| e.capacity).sum()
    }
}

/// Ford-Fulkerson 最大流引擎
///
/// 两个状态：`Running` 时每一步用全新的访问集合查找增广路径，
/// 找到则增广、累加总流量并记录快照；找不到则进入终态 `Done`。
pub struct FordFulkerson {
    graph: FlowGraph,
    source: NodeId,
    sink: NodeId,
    options: MaxFlowOptions,
    state: EngineState,
    total_flow: Capacity,
    snapshots: Vec<GraphSnapshot>,
    paths: Vec<AugmentingPath>,
}

impl FordFulkerson {
    /// 创建引擎实例
    ///
    /// 在搜索开始前检查 source / sink 是否存在于图中。
    pub fn new(graph: FlowGraph, source: NodeId, sink: NodeId) -> Result<Self> {
        if !graph.contains_node(&source) {
            return Err(Error::UnknownNode(source));
        }
        if !graph.contains_node(&sink) {
            return Err(Error::UnknownNode(sink));
        }
        if source == sink {
            return Err(Error::InvalidInput(format!(
                "源点与汇点相同: {}",
                source
            )));
        }

        Ok(Self {
            graph,
            source,
            sink,
            options: MaxFlowOptions::default(),
            state: EngineState::Running,
            total_flow: 0.0,
            snapshots: Vec::new(),
            paths: Vec::new(),
        })
    }

    /// 从请求输入构建图并创建引擎
    ///
    /// source / sink 必须出现在 `input.nodes` 中；只在边里出现的节点
    /// 会被隐式加入图，但不能作为源点或汇点。
    pub fn from_input(input: &FlowNetworkInput) -> Result<Self> {
        for terminal in [&input.source, &input.sink] {
            if !input.nodes.contains(terminal) {
                return Err(Error::UnknownNode(terminal.clone()));
            }
        }

        let graph = FlowGraph::from_input(input)?;
        Self::new(graph, input.source.clone(), input.sink.clone())
    }

    /// 设置选项
    pub fn with_options(mut self, options: MaxFlowOptions) -> Self {
        self.options = options;
        self
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn total_flow(&self) -> Capacity {
        self.total_flow
    }

    pub fn graph(&self) -> &FlowGraph {
        &self.graph
    }

    pub fn snapshots(&self) -> &[GraphSnapshot] {
        &self.snapshots
    }

    /// 执行一次状态转移
    ///
    /// 增广成功返回本次的快照；已到终态返回 `None`。
    pub fn step(&mut self) -> Result<Option<&GraphSnapshot>> {
        if self.state == EngineState::Done {
            return Ok(None);
        }

        let path = {
            let mut visited = HashSet::new();
            PathFinder::new(&self.graph).find_path(&self.source, &self.sink, &mut visited)
        };

        let path = match path {
            Some(path) if path.bottleneck > 0.0 => path,
            _ => {
                self.state = EngineState::Done;
                info!(
                    source = %self.source,
                    sink = %self.sink,
                    max_flow = self.total_flow,
                    iterations = self.snapshots.len(),
                    "最大流计算完成"
                );
                return Ok(None);
            }
        };

        if let Some(limit) = self.options.max_iterations {
            if self.snapshots.len() >= limit {
                return Err(Error::NonTerminating { iterations: limit });
            }
        }

        let bottleneck = path.bottleneck;
        Augmentor::new(&mut self.graph).augment(&path, bottleneck)?;
        self.total_flow += bottleneck;

        let iteration = self.snapshots.len() + 1;
        debug!(
            iteration,
            bottleneck,
            total_flow = self.total_flow,
            hops = path.len(),
            "增广路径"
        );

        self.paths.push(path);
        self.snapshots.push(SnapshotCollector::capture(
            &self.graph,
            iteration,
            self.total_flow,
        ));

        Ok(self.snapshots.last())
    }

    /// 运行到终态并返回结果
    pub fn run(mut self) -> Result<MaxFlowResult> {
        while self.step()?.is_some() {}
        Ok(self.into_result())
    }

    fn into_result(self) -> MaxFlowResult {
        // 找最小割（残量图中从源点可达的顶点属于源侧）
        let reachable = self.graph.residual_reachable(&self.source);
        let source_side: Vec<NodeId> = self
            .graph
            .nodes()
            .filter(|id| reachable.contains(*id))
            .cloned()
            .collect();

        let final_state = SnapshotCollector::capture(
            &self.graph,
            self.snapshots.len(),
            self.total_flow,
        );

        let min_cut = final_state
            .edges
            .iter()
            .filter(|e| reachable.contains(&e.source) && !reachable.contains(&e.target))
            .cloned()
            .collect();

        MaxFlowResult {
            value: self.total_flow,
            snapshots: self.snapshots,
            paths: self.paths,
            flow: final_state.edges,
            source_side,
            min_cut,
        }
    }
}

/// 计算一次请求的最大流
pub fn max_flow(input: &FlowNetworkInput, options: MaxFlowOptions) -> Result<MaxFlowResult> {
    FordFulkerson::from_input(input)?.with_options(options).run()
}
