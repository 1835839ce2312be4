//! Domain model (ids, task record, status rules, classification).
//!
//! - ids / state / errors: 基本型
//! - task: Task レコードと入力の検証、状態遷移（TaskMutation）
//! - resolver: 実効状態の導出（純粋関数）
//! - classify: Today / Upcoming / Missed / Completed への振り分けと集計
//! - carry_forward: missed タスクを today に移す規則

pub mod carry_forward;
pub mod classify;
pub mod errors;
pub mod ids;
pub mod resolver;
pub mod state;
pub mod task;

#[cfg(test)]
mod proptest_classify;

pub use self::classify::{Bucket, Buckets, Summary, classify, summarize};
pub use self::errors::{ErrorKind, PlanError};
pub use self::ids::{ScopeId, TaskId};
pub use self::resolver::effective_status;
pub use self::state::{Priority, TaskStatus};
pub use self::task::{
    NewTask, Task, TaskChanges, TaskCreateInput, TaskFilter, TaskMutation, TaskUpdateInput,
};
