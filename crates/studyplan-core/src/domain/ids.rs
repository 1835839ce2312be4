//! Domain identifiers (strongly-typed IDs).
//!
//! # ULID ベースの ID
//! Task と Scope（所有ユーザー/セッション）の ID は ULID を使います。
//! `Id<T>` の `T` は PhantomData のマーカー型で、実行時にはメモリを消費せず、
//! コンパイル時に TaskId と ScopeId の混同を防ぎます。
//!
//! Display 形式は `task-01H...` / `scope-01H...` で、`FromStr` で逆変換できます。

use serde::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;
use ulid::Ulid;

use super::errors::PlanError;

/// IdMarker は各 ID 型のマーカー trait
///
/// Display で使うプレフィックス（"task-", "scope-"）を提供します。
pub trait IdMarker: Send + Sync + 'static {
    fn prefix() -> &'static str;
}

/// ジェネリック ID 型
///
/// ```ignore
/// let task_id: TaskId = Id::from(Ulid::new());
/// let scope: ScopeId = Id::from(Ulid::new());
/// // task_id と scope は異なる型なので、混同できない
/// ```
#[repr(transparent)]
#[derive(Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Id<T: IdMarker> {
    ulid: Ulid,
    #[serde(skip)]
    _marker: PhantomData<T>,
}

// derive(Clone, Copy) は T: Clone を要求してしまうので手で実装する
impl<T: IdMarker> Clone for Id<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: IdMarker> Copy for Id<T> {}

impl<T: IdMarker> Id<T> {
    /// ULID から Id を作成
    pub fn from_ulid(ulid: Ulid) -> Self {
        Self {
            ulid,
            _marker: PhantomData,
        }
    }

    /// 内部の ULID を取得
    pub fn as_ulid(&self) -> Ulid {
        self.ulid
    }
}

impl<T: IdMarker> From<Ulid> for Id<T> {
    fn from(ulid: Ulid) -> Self {
        Self::from_ulid(ulid)
    }
}

impl<T: IdMarker> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", T::prefix(), self.ulid)
    }
}

impl<T: IdMarker> FromStr for Id<T> {
    type Err = PlanError;

    /// `task-<ULID>` 形式と、プレフィックスなしの生 ULID の両方を受け付ける
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.strip_prefix(T::prefix()).unwrap_or(s);
        Ulid::from_string(raw)
            .map(Self::from_ulid)
            .map_err(|e| PlanError::validation("id", format!("malformed id {s:?}: {e}")))
    }
}

// ========================================
// マーカー型の定義
// ========================================

/// Task のマーカー型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Task {}

impl IdMarker for Task {
    fn prefix() -> &'static str {
        "task-"
    }
}

/// Scope（タスクを所有するユーザー/セッション）のマーカー型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Scope {}

impl IdMarker for Scope {
    fn prefix() -> &'static str {
        "scope-"
    }
}

/// Identifier of a study Task.
pub type TaskId = Id<Task>;

/// Identifier of the owning user/session, supplied by the auth layer.
pub type ScopeId = Id<Scope>;
