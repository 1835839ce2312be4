//! App - アプリケーション層
//!
//! ports を組み合わせてアプリケーションロジックを実装します。
//!
//! # 主要コンポーネント
//! - **StudyPlanService**: list / create / update / summary / carry forward の表面

pub mod service;

pub use self::service::{Overview, StudyPlanService};
