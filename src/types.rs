//! 通用类型定义
//!
//! 节点标识、容量数值以及边界层的输入输出结构

use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// 容量 / 流量数值
///
/// 整数容量在 f64 中精确表示（|x| < 2^53），非整数容量允许但不保证终止。
pub type Capacity = f64;

/// 节点 ID（调用方提供的不透明标识，整数或字符串）
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeId {
    Int(i64),
    Str(String),
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeId::Int(i) => write!(f, "{}", i),
            NodeId::Str(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        NodeId::Str(s.to_string())
    }
}

impl From<String> for NodeId {
    fn from(s: String) -> Self {
        NodeId::Str(s)
    }
}

impl From<i64> for NodeId {
    fn from(i: i64) -> Self {
        NodeId::Int(i)
    }
}

/// 输入边
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeInput {
    pub source: NodeId,
    pub target: NodeId,
    pub capacity: Capacity,
}

impl EdgeInput {
    pub fn new(source: impl Into<NodeId>, target: impl Into<NodeId>, capacity: Capacity) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            capacity,
        }
    }
}

/// 一次最大流计算的完整输入
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowNetworkInput {
    pub nodes: Vec<NodeId>,
    pub edges: Vec<EdgeInput>,
    pub source: NodeId,
    pub sink: NodeId,
}

impl FlowNetworkInput {
    /// 从 JSON 文件读取
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }
}

/// 最大流响应（边界层输出格式）
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaxFlowResponse {
    #[serde(serialize_with = "serialize_amount")]
    pub max_flow: Capacity,
    pub graph_images: Vec<serde_json::Value>,
}

/// 整数值按整数输出（`10` 而不是 `10.0`），其余按浮点输出
pub fn serialize_amount<S: Serializer>(value: &Capacity, serializer: S) -> Result<S::Ok, S::Error> {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 9_007_199_254_740_992.0 {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

/// 数值的展示形式，与 `serialize_amount` 规则一致
pub fn format_amount(value: Capacity) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 9_007_199_254_740_992.0 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}
