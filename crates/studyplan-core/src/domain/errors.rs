//! Errors - エラー型と分類
//!
//! このコアのエラーはすべて呼び出し側の入力から決定的に生じるもので、
//! 一時的な障害はない。したがってリトライ対象になるものは存在しない。

use thiserror::Error;

use super::ids::TaskId;
use super::state::TaskStatus;

/// ErrorKind は PlanError の運用分類
///
/// - Validation: 必須フィールドの欠落・不正な enum 値
/// - NotFound: 存在しない（またはスコープ外の）task id
/// - InvalidState: 操作の前提条件違反（missed でないタスクの carry forward など）
/// - Conflict: 楽観的並行制御の version 不一致
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    InvalidState,
    Conflict,
}

/// PlanError はドメインエラー
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanError {
    #[error("invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    #[error("task not found: {0}")]
    NotFound(TaskId),

    #[error("task {task_id} is {status}, expected missed")]
    InvalidState { task_id: TaskId, status: TaskStatus },

    #[error("task {task_id} changed concurrently (expected version {expected}, found {actual})")]
    VersionConflict {
        task_id: TaskId,
        expected: u64,
        actual: u64,
    },
}

impl PlanError {
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field,
            reason: reason.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            PlanError::Validation { .. } => ErrorKind::Validation,
            PlanError::NotFound(_) => ErrorKind::NotFound,
            PlanError::InvalidState { .. } => ErrorKind::InvalidState,
            PlanError::VersionConflict { .. } => ErrorKind::Conflict,
        }
    }

    /// 常に false。呼び出し側はそのまま報告すること。
    pub fn is_retryable(&self) -> bool {
        false
    }
}
