//! InMemoryTaskStore - 開発・テスト用の正本
//!
//! # 実装詳細
//! - `records`: TaskId -> Task（single source of truth）
//! - `order`: scope ごとの TaskId 列（挿入順、list の順序を決める）
//! - tokio の Mutex 1 つで排他制御。update は clone に mutation を適用し、
//!   成功したときだけ書き戻す

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use crate::domain::{PlanError, ScopeId, Task, TaskFilter, TaskId, TaskMutation};
use crate::ports::TaskStore;

#[derive(Default)]
struct InMemoryState {
    records: HashMap<TaskId, Task>,
    order: HashMap<ScopeId, Vec<TaskId>>,
}

impl InMemoryState {
    /// scope 外のレコードは見えない
    fn scoped(&self, scope: ScopeId, id: TaskId) -> Result<&Task, PlanError> {
        self.records
            .get(&id)
            .filter(|task| task.scope == scope)
            .ok_or(PlanError::NotFound(id))
    }
}

/// In-memory task store.
#[derive(Clone, Default)]
pub struct InMemoryTaskStore {
    state: Arc<Mutex<InMemoryState>>,
}

impl InMemoryTaskStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TaskStore for InMemoryTaskStore {
    async fn insert(&self, task: Task) -> Result<Task, PlanError> {
        let mut state = self.state.lock().await;
        if state.records.contains_key(&task.id) {
            return Err(PlanError::validation(
                "id",
                format!("{} already exists", task.id),
            ));
        }
        state.order.entry(task.scope).or_default().push(task.id);
        state.records.insert(task.id, task.clone());
        Ok(task)
    }

    async fn get(&self, scope: ScopeId, id: TaskId) -> Result<Task, PlanError> {
        let state = self.state.lock().await;
        state.scoped(scope, id).cloned()
    }

    async fn list(&self, scope: ScopeId, filter: TaskFilter) -> Result<Vec<Task>, PlanError> {
        let state = self.state.lock().await;
        let Some(ids) = state.order.get(&scope) else {
            return Ok(Vec::new());
        };
        Ok(ids
            .iter()
            .filter_map(|id| state.records.get(id))
            .filter(|task| filter.matches(task))
            .cloned()
            .collect())
    }

    async fn update(
        &self,
        scope: ScopeId,
        id: TaskId,
        mutation: TaskMutation,
        now: DateTime<Utc>,
    ) -> Result<Task, PlanError> {
        let mut state = self.state.lock().await;
        let mut task = state.scoped(scope, id)?.clone();
        mutation.apply_to(&mut task, now)?;
        state.records.insert(id, task.clone());
        Ok(task)
    }

    async fn delete(&self, scope: ScopeId, id: TaskId) -> Result<(), PlanError> {
        let mut state = self.state.lock().await;
        state.scoped(scope, id)?;
        state.records.remove(&id);
        if let Some(ids) = state.order.get_mut(&scope) {
            ids.retain(|existing| *existing != id);
        }
        Ok(())
    }
}
