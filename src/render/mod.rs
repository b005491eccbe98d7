//! 快照渲染模块
//!
//! 把结构化快照转换为可传输的形式。图片生成不在本库范围内，
//! 这里提供结构化 JSON 与 Graphviz DOT 两种格式，由前端或外部工具绘制。

mod dot;

pub use dot::DotRenderer;

use crate::algorithm::GraphSnapshot;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;
use std::str::FromStr;

/// 快照渲染器
pub trait SnapshotRenderer: Send + Sync {
    /// 渲染单个快照
    fn render(&self, snapshot: &GraphSnapshot) -> Result<Value>;

    /// 按顺序渲染全部快照
    fn render_all(&self, snapshots: &[GraphSnapshot]) -> Result<Vec<Value>> {
        snapshots.iter().map(|s| self.render(s)).collect()
    }
}

/// 快照输出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SnapshotFormat {
    /// 结构化 JSON
    #[default]
    Json,
    /// Graphviz DOT 文本
    Dot,
}

impl SnapshotFormat {
    /// 对应的渲染器
    pub fn renderer(&self) -> Box<dyn SnapshotRenderer> {
        match self {
            SnapshotFormat::Json => Box::new(JsonRenderer),
            SnapshotFormat::Dot => Box::new(DotRenderer::default()),
        }
    }
}

impl fmt::Display for SnapshotFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotFormat::Json => write!(f, "json"),
            SnapshotFormat::Dot => write!(f, "dot"),
        }
    }
}

impl FromStr for SnapshotFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(SnapshotFormat::Json),
            "dot" | "graphviz" => Ok(SnapshotFormat::Dot),
            other => Err(format!("不支持的快照格式: {}", other)),
        }
    }
}

/// 结构化 JSON 渲染器
///
/// 在快照基础上为每条边附加 "flow/capacity" 标签。
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer;

impl SnapshotRenderer for JsonRenderer {
    fn render(&self, snapshot: &GraphSnapshot) -> Result<Value> {
        let mut value = serde_json::to_value(snapshot)?;

        if let Some(edges) = value.get_mut("edges").and_then(Value::as_array_mut) {
            for (edge, src) in edges.iter_mut().zip(&snapshot.edges) {
                if let Some(obj) = edge.as_object_mut() {
                    obj.insert("label".to_string(), json!(src.label()));
                }
            }
        }

        Ok(value)
    }
}
