//! studyplan-core
//!
//! 学習タスクのライフサイクルと分類エンジン。
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（ids, state, task, errors）と純粋な規則
//!   （resolver: 実効状態, classify: bucket と集計, carry_forward）
//! - **ports**: 抽象化レイヤー（TaskStore, Clock, IdGenerator）
//! - **impls**: 実装（InMemoryTaskStore）
//! - **app**: アプリケーション層（StudyPlanService）
//! - **config**: 環境変数からの設定

pub mod app;
pub mod config;
pub mod domain;
pub mod impls;
pub mod ports;

pub use app::{Overview, StudyPlanService};
pub use config::{ConfigError, PlannerConfig};
pub use domain::{
    Bucket, Buckets, ErrorKind, PlanError, Priority, ScopeId, Summary, Task, TaskCreateInput,
    TaskFilter, TaskId, TaskStatus, TaskUpdateInput,
};
