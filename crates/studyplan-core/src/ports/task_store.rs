//! TaskStore port - タスクの正本（source of truth）
//!
//! すべての操作は scope（所有ユーザー/セッション）で修飾される。
//! 別の scope に属する task id は存在しないものとして NotFound を返す。
//!
//! # 実装
//! - **InMemoryTaskStore**: 開発・テスト用（`impls::inmem_store`）

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{PlanError, ScopeId, Task, TaskFilter, TaskId, TaskMutation};

/// TaskStore は scope ごとのタスク集合を管理する
///
/// # 設計原則
/// - `update` は読み出し・前提条件の検査・書き込みを 1 レコードに対して原子的に行う
///   （carry forward の「missed か」の判定と書き込みの間に他の更新が挟まらない）
/// - `expected_version` が指定されない限り last-write-wins
/// - `list` は挿入順を返す。並び替えは呼び出し側の責任
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// 新しいタスクを保存する（id と scope は Task 側が持つ）
    async fn insert(&self, task: Task) -> Result<Task, PlanError>;

    async fn get(&self, scope: ScopeId, id: TaskId) -> Result<Task, PlanError>;

    /// `filter.status` は永続化された status で比較する
    async fn list(&self, scope: ScopeId, filter: TaskFilter) -> Result<Vec<Task>, PlanError>;

    /// mutation を適用して更新後のタスクを返す。失敗時は何も書き込まない。
    async fn update(
        &self,
        scope: ScopeId,
        id: TaskId,
        mutation: TaskMutation,
        now: DateTime<Utc>,
    ) -> Result<Task, PlanError>;

    async fn delete(&self, scope: ScopeId, id: TaskId) -> Result<(), PlanError>;
}
