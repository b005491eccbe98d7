//! 错误类型定义

use crate::types::NodeId;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("节点不存在: {0}")]
    UnknownNode(NodeId),

    #[error("边不存在: {from} -> {to}")]
    UnknownEdge { from: NodeId, to: NodeId },

    #[error("图状态不一致: {0}")]
    InconsistentGraphState(String),

    #[error("增广迭代超过上限 {iterations} 次仍未终止")]
    NonTerminating { iterations: usize },

    #[error("无效的输入数据: {0}")]
    InvalidInput(String),

    #[error("渲染错误: {0}")]
    RenderError(String),

    #[error("服务器错误: {0}")]
    ServerError(String),

    #[error("IO 错误: {0}")]
    IoError(#[from] std::io::Error),

    #[error("序列化错误: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl Error {
    /// 是否属于调用方输入问题（而非内部故障）
    pub fn is_client_error(&self) -> bool {
        matches!(self, Error::UnknownNode(_) | Error::InvalidInput(_))
    }
}
