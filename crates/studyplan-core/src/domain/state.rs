//! State - タスクの状態と優先度
//!
//! 永続化される値（persisted status）と、Status Resolver が導出する
//! 実効状態（effective status）は同じ enum で表現する。

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::errors::PlanError;

/// TaskStatus はタスクの状態
///
/// # 状態遷移
/// - pending -> completed: ユーザーが完了にチェック
/// - completed -> pending: ユーザーがチェックを外す（再オープン、正当な遷移）
/// - pending -> missed: planned_date を過ぎた（導出される。永続化は別プロセス）
/// - missed -> pending: carry forward（planned_date を today に移動）
///
/// completed は resolver が自動で付けることはない。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Pending,
    Completed,
    Missed,
}

impl TaskStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::Completed => "completed",
            TaskStatus::Missed => "missed",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(TaskStatus::Pending),
            "completed" => Ok(TaskStatus::Completed),
            "missed" => Ok(TaskStatus::Missed),
            other => Err(PlanError::validation(
                "status",
                format!("unknown value {other:?} (expected pending, completed or missed)"),
            )),
        }
    }
}

/// Priority は学習タスクの優先度（作成時に省略されたら medium）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "high" => Ok(Priority::High),
            "medium" => Ok(Priority::Medium),
            "low" => Ok(Priority::Low),
            other => Err(PlanError::validation(
                "priority",
                format!("unknown value {other:?} (expected high, medium or low)"),
            )),
        }
    }
}
