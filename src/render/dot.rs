//! Graphviz DOT 渲染
//!
//! 只绘制原始边，边标签为 "flow/capacity"。可用 `dot -Tpng` 生成图片。

use super::SnapshotRenderer;
use crate::algorithm::GraphSnapshot;
use crate::error::{Error, Result};
use crate::types::{format_amount, NodeId};
use serde_json::Value;
use std::fmt::Write;

/// DOT 渲染器
#[derive(Debug, Clone)]
pub struct DotRenderer {
    /// 图名称
    name: String,
    /// 饱和边是否标红
    highlight_saturated: bool,
}

impl Default for DotRenderer {
    fn default() -> Self {
        Self {
            name: "flow".to_string(),
            highlight_saturated: true,
        }
    }
}

impl DotRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = name.into();
        self
    }

    pub fn highlight_saturated(mut self, highlight: bool) -> Self {
        self.highlight_saturated = highlight;
        self
    }

    /// 生成 DOT 文本
    pub fn to_dot(&self, snapshot: &GraphSnapshot) -> Result<String> {
        self.write_dot(snapshot)
            .map_err(|e| Error::RenderError(e.to_string()))
    }

    fn write_dot(&self, snapshot: &GraphSnapshot) -> std::result::Result<String, std::fmt::Error> {
        let mut out = String::new();

        writeln!(out, "digraph {} {{", quote(&self.name))?;
        writeln!(
            out,
            "  label={};",
            quote(&format!(
                "iteration {} / flow {}",
                snapshot.iteration,
                format_amount(snapshot.flow_value)
            ))
        )?;
        writeln!(out, "  node [shape=circle, style=filled, fillcolor=lightblue];")?;

        for node in &snapshot.nodes {
            writeln!(out, "  {};", quote_node(node))?;
        }

        for edge in &snapshot.edges {
            let color = if self.highlight_saturated && edge.is_saturated() {
                "red"
            } else {
                "blue"
            };
            writeln!(
                out,
                "  {} -> {} [label={}, color={}];",
                quote_node(&edge.source),
                quote_node(&edge.target),
                quote(&edge.label()),
                color
            )?;
        }

        writeln!(out, "}}")?;
        Ok(out)
    }
}

impl SnapshotRenderer for DotRenderer {
    fn render(&self, snapshot: &GraphSnapshot) -> Result<Value> {
        Ok(Value::String(self.to_dot(snapshot)?))
    }
}

fn quote(s: &str) -> String {
    format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
}

fn quote_node(id: &NodeId) -> String {
    quote(&id.to_string())
}
