//! 图算法模块
//!
//! 增广路径查找、增广、快照以及 Ford-Fulkerson 最大流引擎

mod augmentor;
mod max_flow;
mod path_finder;
mod snapshot;

pub use augmentor::Augmentor;
pub use max_flow::{max_flow, EngineState, FordFulkerson, MaxFlowOptions, MaxFlowResult};
pub use path_finder::{AugmentingPath, PathEdge, PathFinder};
pub use snapshot::{GraphSnapshot, SnapshotCollector, SnapshotEdge};
