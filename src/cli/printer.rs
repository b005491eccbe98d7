//! 结果打印器
//!
//! 以表格形式输出最大流结果、增广路径和流量分配

use crate::algorithm::{GraphSnapshot, MaxFlowResult, SnapshotEdge};
use crate::types::format_amount;
use prettytable::{format, row, Cell, Row, Table};

/// 结果打印器
#[derive(Debug, Default)]
pub struct Printer;

impl Printer {
    pub fn new() -> Self {
        Self
    }

    /// 打印结果摘要
    pub fn print_summary(&self, result: &MaxFlowResult, execution_time_ms: u64) -> String {
        let max_flow = format_amount(result.value);
        let iterations = result.iterations().to_string();
        let cut_capacity = format_amount(result.min_cut_capacity());
        let source_side = result
            .source_side
            .iter()
            .map(|n| n.to_string())
            .collect::<Vec<_>>()
            .join(", ");

        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_BOX_CHARS);
        table.set_titles(row!["Property", "Value"]);
        table.add_row(row!["Max Flow", max_flow]);
        table.add_row(row!["Augmentations", iterations]);
        table.add_row(row!["Min Cut Capacity", cut_capacity]);
        table.add_row(row!["Source Side", source_side]);

        format!("{}({} ms)\n", table, execution_time_ms)
    }

    /// 打印增广路径
    pub fn print_paths(&self, result: &MaxFlowResult) -> String {
        if result.paths.is_empty() {
            return "Empty set\n".to_string();
        }

        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_BOX_CHARS);
        table.set_titles(row!["#", "Path", "Bottleneck", "Total"]);

        for (path, snapshot) in result.paths.iter().zip(&result.snapshots) {
            let hops = path
                .nodes()
                .iter()
                .map(|n| n.to_string())
                .collect::<Vec<_>>()
                .join(" -> ");
            table.add_row(Row::new(vec![
                Cell::new(&snapshot.iteration.to_string()),
                Cell::new(&hops),
                Cell::new(&format_amount(path.bottleneck)),
                Cell::new(&format_amount(snapshot.flow_value)),
            ]));
        }

        table.to_string()
    }

    /// 打印边的流量分配
    pub fn print_edges(&self, edges: &[SnapshotEdge]) -> String {
        if edges.is_empty() {
            return "Empty set\n".to_string();
        }

        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_BOX_CHARS);
        table.set_titles(Row::new(
            ["Source", "Target", "Flow/Capacity", "Saturated"]
                .iter()
                .map(|c| Cell::new(c))
                .collect(),
        ));

        for edge in edges {
            table.add_row(Row::new(vec![
                Cell::new(&edge.source.to_string()),
                Cell::new(&edge.target.to_string()),
                Cell::new(&edge.label()),
                Cell::new(if edge.is_saturated() { "yes" } else { "" }),
            ]));
        }

        table.to_string()
    }

    /// 打印单个快照
    pub fn print_snapshot(&self, snapshot: &GraphSnapshot) -> String {
        format!(
            "*************************** {}. augmentation (flow {}) ***************************\n{}",
            snapshot.iteration,
            format_amount(snapshot.flow_value),
            self.print_edges(&snapshot.edges)
        )
    }
}
