//! Clock port - 時刻の抽象化
//!
//! 「today」はリクエストごとに 1 回だけ計算し、resolver と classifier に同じ値を渡す。
//! そのために Clock から取得するのは `now` だけで、日付への変換は呼び出し側
//! （`StudyPlanService::today`）が設定の UTC オフセットを使って行う。

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};

/// Clock は現在時刻を提供
///
/// # テスト容易性
/// - trait により時刻を差し替え可能
/// - テストでは FixedClock を使用
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    /// `offset` のローカル日付としての今日
    fn today(&self, offset: FixedOffset) -> NaiveDate {
        self.now().with_timezone(&offset).date_naive()
    }
}

/// 本番用
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// テスト用（常に同じ時刻を返す）
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    now: DateTime<Utc>,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self { now }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now
    }
}
