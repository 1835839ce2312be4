//! Impls - 実装（開発用・テスト用）
//!
//! このモジュールには ports の実装を含めます。
//!
//! # 含まれる実装
//! - **InMemoryTaskStore**: 開発・テスト用の正本
//!
//! 永続化する実装（PostgreSQL など）は別クレートに配置する想定。

pub mod inmem_store;

pub use self::inmem_store::InMemoryTaskStore;
