//! HTTP 服务器模块
//!
//! 提供最大流计算接口，供前端逐步展示增广过程

use crate::algorithm::{max_flow, MaxFlowOptions};
use crate::error::{Error, Result};
use crate::metrics;
use crate::render::SnapshotFormat;
use crate::types::{EdgeInput, FlowNetworkInput, MaxFlowResponse, NodeId};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

/// 服务器配置
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// 允许跨域访问的前端地址
    pub cors_origin: String,
    /// 快照输出格式
    pub format: SnapshotFormat,
    /// 增广次数上限
    pub max_iterations: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            cors_origin: "http://localhost:3000".to_string(),
            format: SnapshotFormat::Json,
            max_iterations: None,
        }
    }
}

/// 应用状态
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
}

/// 构建路由
pub fn build_router(config: ServerConfig) -> Result<Router> {
    let origin = HeaderValue::from_str(&config.cors_origin)
        .map_err(|e| Error::ServerError(format!("无效的 CORS 地址 {}: {}", config.cors_origin, e)))?;

    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    let state = AppState {
        config: Arc::new(config),
    };

    Ok(Router::new()
        // 健康检查
        .route("/health", get(health_check))
        // 指标
        .route("/metrics", get(metrics_handler))
        .route("/stats", get(stats_handler))
        // 最大流
        .route("/calculate-max-flow", post(calculate_max_flow))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}

/// 启动服务器
pub async fn start_server(config: ServerConfig) -> Result<()> {
    let addr = format!("{}:{}", config.host, config.port);
    let app = build_router(config)?;

    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| Error::ServerError(format!("绑定地址失败: {}", e)))?;

    info!(%addr, "FlowViz 服务器启动");

    axum::serve(listener, app)
        .await
        .map_err(|e| Error::ServerError(format!("服务器错误: {}", e)))?;

    Ok(())
}

// ==================== 处理器 ====================

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Prometheus 格式指标
async fn metrics_handler() -> Response {
    let prom = metrics::global_metrics().to_prometheus();
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        prom.content,
    )
        .into_response()
}

/// 统计信息
async fn stats_handler() -> impl IntoResponse {
    Json(metrics::global_metrics().snapshot())
}

/// 最大流请求
///
/// 字段全部可缺省，缺失或为空由 `validate` 统一拒绝。
#[derive(Debug, Default, Deserialize)]
pub struct MaxFlowRequest {
    #[serde(default)]
    pub nodes: Option<Vec<NodeId>>,
    #[serde(default)]
    pub edges: Option<Vec<EdgeInput>>,
    #[serde(default)]
    pub source: Option<NodeId>,
    #[serde(default)]
    pub sink: Option<NodeId>,
}

impl MaxFlowRequest {
    /// 校验请求
    ///
    /// `nodes` / `edges` 缺失或为空、`source` / `sink` 缺失或为 null 时拒绝。
    /// `0`、`""` 这类取值是合法的节点标识，不会被拒绝。
    pub fn validate(self) -> Result<FlowNetworkInput> {
        let invalid = || Error::InvalidInput("Invalid input data".to_string());

        let nodes = self.nodes.filter(|n| !n.is_empty()).ok_or_else(invalid)?;
        let edges = self.edges.filter(|e| !e.is_empty()).ok_or_else(invalid)?;
        let source = self.source.ok_or_else(invalid)?;
        let sink = self.sink.ok_or_else(invalid)?;

        Ok(FlowNetworkInput {
            nodes,
            edges,
            source,
            sink,
        })
    }
}

/// 计算最大流并渲染全部快照
pub fn calculate(
    input: &FlowNetworkInput,
    options: MaxFlowOptions,
    format: SnapshotFormat,
) -> Result<MaxFlowResponse> {
    let result = max_flow(input, options)?;
    let graph_images = format.renderer().render_all(&result.snapshots)?;

    Ok(MaxFlowResponse {
        max_flow: result.value,
        graph_images,
    })
}

/// 最大流
async fn calculate_max_flow(
    State(state): State<AppState>,
    payload: std::result::Result<Json<MaxFlowRequest>, JsonRejection>,
) -> Response {
    let request_id = Uuid::new_v4();
    let span = info_span!("calculate_max_flow", %request_id);

    async move {
        let metrics = metrics::global_metrics();

        let input = match payload
            .map_err(|e| Error::InvalidInput(e.body_text()))
            .and_then(|Json(req)| req.validate())
        {
            Ok(input) => input,
            Err(e) => {
                warn!(error = %e, "拒绝请求");
                metrics.record_rejected();
                return e.into_response();
            }
        };

        info!(
            nodes = input.nodes.len(),
            edges = input.edges.len(),
            source = %input.source,
            sink = %input.sink,
            "开始计算最大流"
        );

        let options = MaxFlowOptions {
            max_iterations: state.config.max_iterations,
        };
        let format = state.config.format;

        let timer = metrics.record_computation_start();
        let outcome = tokio::task::spawn_blocking(move || calculate(&input, options, format))
            .await
            .map_err(|e| Error::ServerError(format!("计算任务异常退出: {}", e)))
            .and_then(|r| r);

        match outcome {
            Ok(response) => {
                metrics.record_computation_success(
                    timer,
                    response.graph_images.len(),
                    response.max_flow,
                );
                (StatusCode::OK, Json(response)).into_response()
            }
            Err(e) => {
                warn!(error = %e, "最大流计算失败");
                metrics.record_computation_failure(timer);
                e.into_response()
            }
        }
    }
    .instrument(span)
    .await
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = if self.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };

        let message = match self {
            Error::InvalidInput(msg) => msg,
            other => other.to_string(),
        };

        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}
