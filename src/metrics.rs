//! 性能指标收集模块
//!
//! 提供最大流计算的运行时指标收集和 Prometheus 导出

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// 系统全局指标
#[derive(Debug)]
pub struct Metrics {
    /// 计算统计
    computation_stats: ComputationStats,
    /// 启动时间
    start_time: Instant,
}

/// 计算统计
#[derive(Debug)]
struct ComputationStats {
    /// 总计算数
    total: AtomicU64,
    /// 成功数
    succeeded: AtomicU64,
    /// 失败数
    failed: AtomicU64,
    /// 被拒绝的请求数（输入校验失败）
    rejected: AtomicU64,
    /// 累计增广次数
    augmentations: AtomicU64,
    /// 总耗时（微秒）
    total_duration_us: AtomicU64,
    /// 最近一次的最大流（f64 位模式）
    last_max_flow_bits: AtomicU64,
}

/// 可导出的指标快照
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub total_computations: u64,
    pub succeeded_computations: u64,
    pub failed_computations: u64,
    pub rejected_requests: u64,
    pub augmentations: u64,
    pub avg_computation_ms: f64,
    pub last_max_flow: f64,
    pub uptime_seconds: u64,
}

/// Prometheus 格式指标
#[derive(Debug, Clone)]
pub struct PrometheusMetrics {
    pub content: String,
}

impl Metrics {
    /// 创建新的指标收集器
    pub fn new() -> Self {
        Self {
            computation_stats: ComputationStats {
                total: AtomicU64::new(0),
                succeeded: AtomicU64::new(0),
                failed: AtomicU64::new(0),
                rejected: AtomicU64::new(0),
                augmentations: AtomicU64::new(0),
                total_duration_us: AtomicU64::new(0),
                last_max_flow_bits: AtomicU64::new(0f64.to_bits()),
            },
            start_time: Instant::now(),
        }
    }

    /// 记录计算开始
    pub fn record_computation_start(&self) -> ComputationTimer {
        self.computation_stats.total.fetch_add(1, Ordering::Relaxed);
        ComputationTimer::new()
    }

    /// 记录计算成功
    pub fn record_computation_success(
        &self,
        timer: ComputationTimer,
        augmentations: usize,
        max_flow: f64,
    ) {
        let stats = &self.computation_stats;
        stats.succeeded.fetch_add(1, Ordering::Relaxed);
        stats
            .augmentations
            .fetch_add(augmentations as u64, Ordering::Relaxed);
        stats
            .last_max_flow_bits
            .store(max_flow.to_bits(), Ordering::Relaxed);
        self.record_duration(timer.elapsed());
    }

    /// 记录计算失败
    pub fn record_computation_failure(&self, timer: ComputationTimer) {
        self.computation_stats.failed.fetch_add(1, Ordering::Relaxed);
        self.record_duration(timer.elapsed());
    }

    /// 记录被拒绝的请求
    pub fn record_rejected(&self) {
        self.computation_stats.rejected.fetch_add(1, Ordering::Relaxed);
    }

    fn record_duration(&self, duration: Duration) {
        self.computation_stats
            .total_duration_us
            .fetch_add(duration.as_micros() as u64, Ordering::Relaxed);
    }

    /// 获取指标快照
    pub fn snapshot(&self) -> MetricsSnapshot {
        let stats = &self.computation_stats;
        let total = stats.total.load(Ordering::Relaxed);
        let total_duration_us = stats.total_duration_us.load(Ordering::Relaxed);

        let avg_computation_ms = if total > 0 {
            (total_duration_us as f64) / (total as f64) / 1000.0
        } else {
            0.0
        };

        MetricsSnapshot {
            total_computations: total,
            succeeded_computations: stats.succeeded.load(Ordering::Relaxed),
            failed_computations: stats.failed.load(Ordering::Relaxed),
            rejected_requests: stats.rejected.load(Ordering::Relaxed),
            augmentations: stats.augmentations.load(Ordering::Relaxed),
            avg_computation_ms,
            last_max_flow: f64::from_bits(stats.last_max_flow_bits.load(Ordering::Relaxed)),
            uptime_seconds: self.start_time.elapsed().as_secs(),
        }
    }

    /// 导出为 Prometheus 格式
    pub fn to_prometheus(&self) -> PrometheusMetrics {
        let snapshot = self.snapshot();
        let mut content = String::new();

        let mut push = |name: &str, kind: &str, help: &str, value: String| {
            content.push_str(&format!("# HELP flowviz_{} {}\n", name, help));
            content.push_str(&format!("# TYPE flowviz_{} {}\n", name, kind));
            content.push_str(&format!("flowviz_{} {}\n", name, value));
        };

        push(
            "computations_total",
            "counter",
            "Total number of max-flow computations",
            snapshot.total_computations.to_string(),
        );
        push(
            "computations_succeeded_total",
            "counter",
            "Number of successful computations",
            snapshot.succeeded_computations.to_string(),
        );
        push(
            "computations_failed_total",
            "counter",
            "Number of failed computations",
            snapshot.failed_computations.to_string(),
        );
        push(
            "requests_rejected_total",
            "counter",
            "Number of requests rejected by input validation",
            snapshot.rejected_requests.to_string(),
        );
        push(
            "augmentations_total",
            "counter",
            "Total augmenting paths applied",
            snapshot.augmentations.to_string(),
        );
        push(
            "computation_duration_avg_ms",
            "gauge",
            "Average computation duration in milliseconds",
            format!("{:.2}", snapshot.avg_computation_ms),
        );
        push(
            "last_max_flow",
            "gauge",
            "Max-flow value of the most recent successful computation",
            snapshot.last_max_flow.to_string(),
        );
        push(
            "uptime_seconds",
            "counter",
            "System uptime in seconds",
            snapshot.uptime_seconds.to_string(),
        );

        PrometheusMetrics { content }
    }

    /// 重置所有指标
    pub fn reset(&self) {
        let stats = &self.computation_stats;
        stats.total.store(0, Ordering::Relaxed);
        stats.succeeded.store(0, Ordering::Relaxed);
        stats.failed.store(0, Ordering::Relaxed);
        stats.rejected.store(0, Ordering::Relaxed);
        stats.augmentations.store(0, Ordering::Relaxed);
        stats.total_duration_us.store(0, Ordering::Relaxed);
        stats.last_max_flow_bits.store(0f64.to_bits(), Ordering::Relaxed);
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

/// 计算计时器
pub struct ComputationTimer {
    start: Instant,
}

impl ComputationTimer {
    fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

/// 全局指标实例
static METRICS: once_cell::sync::Lazy<Arc<Metrics>> =
    once_cell::sync::Lazy::new(|| Arc::new(Metrics::new()));

/// 获取全局指标实例
pub fn global_metrics() -> Arc<Metrics> {
    METRICS.clone()
}
