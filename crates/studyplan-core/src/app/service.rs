//! StudyPlanService - データアクセス契約の表面
//!
//! ports（TaskStore / Clock / IdGenerator）を組み合わせて、
//! list / create / update / summary / carry forward を提供する。
//!
//! # today の扱い
//! `today()` はリクエストの最初に 1 回だけ呼び、同じ値を `get_summary` /
//! `overview` / `carry_forward` に渡すこと。サービス内部で日付を読み直すことはない。

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::PlannerConfig;
use crate::domain::{
    Buckets, NewTask, PlanError, ScopeId, Summary, Task, TaskChanges, TaskCreateInput,
    TaskFilter, TaskId, TaskMutation, TaskStatus, TaskUpdateInput, classify, summarize,
};
use crate::impls::InMemoryTaskStore;
use crate::ports::{Clock, IdGenerator, SystemClock, TaskStore, UlidGenerator};

/// Study plan ページの読み出し結果（1 回の list と 1 つの today から作る）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Overview {
    pub today: NaiveDate,
    pub summary: Summary,
    pub buckets: Buckets,
}

pub struct StudyPlanService<S, C, G> {
    store: S,
    clock: C,
    ids: G,
    config: PlannerConfig,
}

impl StudyPlanService<InMemoryTaskStore, SystemClock, UlidGenerator<SystemClock>> {
    /// 開発用: InMemoryTaskStore + SystemClock
    pub fn in_memory(config: PlannerConfig) -> Self {
        Self::new(
            InMemoryTaskStore::new(),
            SystemClock,
            UlidGenerator::new(SystemClock),
            config,
        )
    }
}

impl<S, C, G> StudyPlanService<S, C, G>
where
    S: TaskStore,
    C: Clock,
    G: IdGenerator,
{
    pub fn new(store: S, clock: C, ids: G, config: PlannerConfig) -> Self {
        Self {
            store,
            clock,
            ids,
            config,
        }
    }

    /// 設定の UTC オフセットでの今日
    pub fn today(&self) -> NaiveDate {
        self.clock.today(self.config.utc_offset)
    }

    pub async fn list_tasks(
        &self,
        scope: ScopeId,
        filter: TaskFilter,
    ) -> Result<Vec<Task>, PlanError> {
        let tasks = self.store.list(scope, filter).await?;
        debug!(%scope, ?filter, count = tasks.len(), "listed tasks");
        Ok(tasks)
    }

    pub async fn get_task(&self, scope: ScopeId, id: TaskId) -> Result<Task, PlanError> {
        self.store.get(scope, id).await
    }

    pub async fn create_task(
        &self,
        scope: ScopeId,
        input: TaskCreateInput,
    ) -> Result<Task, PlanError> {
        let new = NewTask::try_from(input)?;
        let task = Task::new(self.ids.generate_task_id(), scope, new, self.clock.now());
        let task = self.store.insert(task).await?;
        info!(%scope, task_id = %task.id, planned_date = %task.planned_date, "task created");
        Ok(task)
    }

    pub async fn update_task(
        &self,
        scope: ScopeId,
        id: TaskId,
        input: TaskUpdateInput,
    ) -> Result<Task, PlanError> {
        let changes = TaskChanges::try_from(input)?;
        self.apply(scope, id, TaskMutation::Edit(changes)).await
    }

    /// 完了チェックの付け外し（completed <-> pending）
    pub async fn set_completed(
        &self,
        scope: ScopeId,
        id: TaskId,
        done: bool,
    ) -> Result<Task, PlanError> {
        let status = if done {
            TaskStatus::Completed
        } else {
            TaskStatus::Pending
        };
        self.apply(scope, id, TaskMutation::Edit(TaskChanges::status(status)))
            .await
    }

    pub async fn delete_task(&self, scope: ScopeId, id: TaskId) -> Result<(), PlanError> {
        self.store.delete(scope, id).await?;
        info!(%scope, task_id = %id, "task deleted");
        Ok(())
    }

    pub async fn get_summary(&self, scope: ScopeId, today: NaiveDate) -> Result<Summary, PlanError> {
        let tasks = self.store.list(scope, TaskFilter::default()).await?;
        Ok(summarize(&tasks, today))
    }

    pub async fn overview(&self, scope: ScopeId, today: NaiveDate) -> Result<Overview, PlanError> {
        let tasks = self.store.list(scope, TaskFilter::default()).await?;
        let buckets = classify(tasks, today);
        let summary = buckets.summary();
        debug!(%scope, %today, ?summary, "built overview");
        Ok(Overview {
            today,
            summary,
            buckets,
        })
    }

    /// missed のタスクを today に移して pending に戻す
    ///
    /// missed でなければ `PlanError::InvalidState`。同じ日に 2 回呼ぶと 2 回目は拒否される。
    pub async fn carry_forward(
        &self,
        scope: ScopeId,
        id: TaskId,
        today: NaiveDate,
    ) -> Result<Task, PlanError> {
        match self
            .store
            .update(scope, id, TaskMutation::CarryForward { today }, self.clock.now())
            .await
        {
            Ok(task) => {
                info!(%scope, task_id = %id, %today, "task carried forward");
                Ok(task)
            }
            Err(err) => {
                warn!(%scope, task_id = %id, %today, error = %err, "carry forward rejected");
                Err(err)
            }
        }
    }

    async fn apply(
        &self,
        scope: ScopeId,
        id: TaskId,
        mutation: TaskMutation,
    ) -> Result<Task, PlanError> {
        let task = self
            .store
            .update(scope, id, mutation, self.clock.now())
            .await?;
        info!(%scope, task_id = %id, status = %task.status, version = task.version, "task updated");
        Ok(task)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::task::tests::date;
    use crate::domain::{Bucket, ErrorKind, Priority};
    use crate::ports::FixedClock;
    use chrono::{DateTime, TimeZone, Utc};
    use ulid::Ulid;

    type TestService = StudyPlanService<InMemoryTaskStore, FixedClock, UlidGenerator<FixedClock>>;

    fn noon(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    fn service_at(now: DateTime<Utc>) -> TestService {
        let clock = FixedClock::new(now);
        StudyPlanService::new(
            InMemoryTaskStore::new(),
            clock,
            UlidGenerator::new(clock),
            PlannerConfig::default(),
        )
    }

    fn scope() -> ScopeId {
        ScopeId::from_ulid(Ulid::new())
    }

    fn create(title: &str, planned: &str) -> TaskCreateInput {
        TaskCreateInput {
            title: title.to_string(),
            subject: "Chemistry".to_string(),
            planned_date: Some(date(planned)),
            ..TaskCreateInput::default()
        }
    }

    #[tokio::test]
    async fn create_defaults() {
        let svc = service_at(noon(2024, 1, 5));
        let scope = scope();
        let task = svc.create_task(scope, create("Titration lab", "2024-01-05")).await.unwrap();

        assert_eq!(task.scope, scope);
        assert_eq!(task.status, TaskStatus::Pending);
        assert_eq!(task.priority, Priority::Medium);
        assert!(!task.is_carried_forward);
        assert_eq!(task.created_at, noon(2024, 1, 5));
    }

    #[tokio::test]
    async fn create_rejects_missing_fields() {
        let svc = service_at(noon(2024, 1, 5));
        let err = svc
            .create_task(scope(), TaskCreateInput::default())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[tokio::test]
    async fn missed_task_is_carried_forward_into_today() {
        let svc = service_at(noon(2024, 1, 5));
        let scope = scope();
        let today = svc.today();
        assert_eq!(today, date("2024-01-05"));

        let task = svc.create_task(scope, create("Organic notes", "2024-01-01")).await.unwrap();
        let before = svc.overview(scope, today).await.unwrap();
        assert_eq!(before.buckets.missed.len(), 1);

        let carried = svc.carry_forward(scope, task.id, today).await.unwrap();
        assert_eq!(carried.planned_date, today);
        assert_eq!(carried.status, TaskStatus::Pending);
        assert!(carried.is_carried_forward);
        assert_eq!(Bucket::of(&carried, today), Bucket::Today);

        let err = svc.carry_forward(scope, task.id, today).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidState);
    }

    #[tokio::test]
    async fn carry_forward_unknown_task_is_not_found() {
        let svc = service_at(noon(2024, 1, 5));
        let id = TaskId::from_ulid(Ulid::new());
        let err = svc.carry_forward(scope(), id, date("2024-01-05")).await.unwrap_err();
        assert_eq!(err, PlanError::NotFound(id));
    }

    #[tokio::test]
    async fn summary_of_three_tasks() {
        let svc = service_at(noon(2024, 1, 5));
        let scope = scope();
        let done = svc.create_task(scope, create("Past paper", "2024-01-02")).await.unwrap();
        svc.set_completed(scope, done.id, true).await.unwrap();
        svc.create_task(scope, create("Flashcards", "2024-01-01")).await.unwrap();
        svc.create_task(scope, create("Mock exam", "2024-01-10")).await.unwrap();

        let summary = svc.get_summary(scope, date("2024-01-05")).await.unwrap();
        assert_eq!(
            summary,
            Summary {
                total: 3,
                completed: 1,
                pending: 1,
                missed: 1
            }
        );
    }

    #[tokio::test]
    async fn completed_in_the_past_stays_completed() {
        let svc = service_at(noon(2024, 1, 5));
        let scope = scope();
        let t = svc.create_task(scope, create("Old essay", "2023-01-01")).await.unwrap();
        svc.set_completed(scope, t.id, true).await.unwrap();

        let overview = svc.overview(scope, date("2024-01-05")).await.unwrap();
        assert_eq!(overview.buckets.completed.len(), 1);
        assert!(overview.buckets.missed.is_empty());

        // undo moves it back to missed
        svc.set_completed(scope, t.id, false).await.unwrap();
        let overview = svc.overview(scope, date("2024-01-05")).await.unwrap();
        assert_eq!(overview.buckets.missed.len(), 1);
    }

    #[tokio::test]
    async fn update_validates_enums_and_unknown_ids() {
        let svc = service_at(noon(2024, 1, 5));
        let scope = scope();
        let t = svc.create_task(scope, create("Lab report", "2024-01-06")).await.unwrap();

        let bad = TaskUpdateInput {
            priority: Some("urgent".into()),
            ..TaskUpdateInput::default()
        };
        let err = svc.update_task(scope, t.id, bad).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);

        let missing = TaskId::from_ulid(Ulid::new());
        let err = svc
            .update_task(scope, missing, TaskUpdateInput::default())
            .await
            .unwrap_err();
        assert_eq!(err, PlanError::NotFound(missing));

        let ok = TaskUpdateInput {
            priority: Some("high".into()),
            planned_date: Some(date("2024-01-08")),
            ..TaskUpdateInput::default()
        };
        let updated = svc.update_task(scope, t.id, ok).await.unwrap();
        assert_eq!(updated.priority, Priority::High);
        assert_eq!(updated.planned_date, date("2024-01-08"));
        assert_eq!(updated.title, "Lab report");
    }

    #[tokio::test]
    async fn expected_version_guards_concurrent_updates() {
        let svc = service_at(noon(2024, 1, 5));
        let scope = scope();
        let t = svc.create_task(scope, create("Reading", "2024-01-06")).await.unwrap();

        let first = TaskUpdateInput {
            title: Some("Reading ch. 1".into()),
            expected_version: Some(t.version),
            ..TaskUpdateInput::default()
        };
        svc.update_task(scope, t.id, first.clone()).await.unwrap();

        // same expected version again: someone else already wrote
        let err = svc.update_task(scope, t.id, first).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn list_filters_persisted_status_only() {
        let svc = service_at(noon(2024, 1, 5));
        let scope = scope();
        svc.create_task(scope, create("Overdue", "2024-01-01")).await.unwrap();

        let missed = svc
            .list_tasks(scope, TaskFilter::with_status(TaskStatus::Missed))
            .await
            .unwrap();
        assert!(missed.is_empty());

        let pending = svc
            .list_tasks(scope, TaskFilter::with_status(TaskStatus::Pending))
            .await
            .unwrap();
        assert_eq!(pending.len(), 1);
    }

    #[tokio::test]
    async fn delete_then_lookup_fails() {
        let svc = service_at(noon(2024, 1, 5));
        let scope = scope();
        let t = svc.create_task(scope, create("Scratch", "2024-01-06")).await.unwrap();
        svc.delete_task(scope, t.id).await.unwrap();
        assert_eq!(svc.get_task(scope, t.id).await.unwrap_err(), PlanError::NotFound(t.id));
    }

    #[tokio::test]
    async fn today_uses_configured_offset() {
        // 2024-01-05 20:00 UTC is already the 6th in Tokyo
        let clock = FixedClock::new(Utc.with_ymd_and_hms(2024, 1, 5, 20, 0, 0).unwrap());
        let config = PlannerConfig {
            utc_offset: chrono::FixedOffset::east_opt(9 * 3600).unwrap(),
            ..PlannerConfig::default()
        };
        let svc = StudyPlanService::new(
            InMemoryTaskStore::new(),
            clock,
            UlidGenerator::new(clock),
            config,
        );
        assert_eq!(svc.today(), date("2024-01-06"));
    }
}
