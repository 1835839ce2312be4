//! Classification & Summary - Today / Upcoming / Missed / Completed への振り分けと集計
//!
//! 振り分けは永続化された status ではなく、Status Resolver の実効状態で行う。
//! 4 つの bucket は分割（partition）になっており、同じ `today` の評価で
//! 1 つのタスクが 2 つの bucket に入ることはない。
//! `is_carried_forward` は振り分けに影響しない（表示専用）。

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::resolver::effective_status;
use super::state::TaskStatus;
use super::task::Task;

/// 表示用の bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Bucket {
    Today,
    Upcoming,
    Missed,
    Completed,
}

impl Bucket {
    pub const ALL: [Bucket; 4] = [
        Bucket::Today,
        Bucket::Upcoming,
        Bucket::Missed,
        Bucket::Completed,
    ];

    /// タスクが属する bucket を 1 つだけ返す
    pub fn of(task: &Task, today: NaiveDate) -> Self {
        match effective_status(task, today) {
            TaskStatus::Completed => Bucket::Completed,
            TaskStatus::Missed => Bucket::Missed,
            // pending は planned_date >= today が保証されている
            TaskStatus::Pending if task.planned_date == today => Bucket::Today,
            TaskStatus::Pending => Bucket::Upcoming,
        }
    }
}

/// 集計値
///
/// `completed + missed + pending == total`（pending は Today + Upcoming）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    pub missed: usize,
}

impl Summary {
    fn record(&mut self, bucket: Bucket) {
        self.total += 1;
        match bucket {
            Bucket::Today | Bucket::Upcoming => self.pending += 1,
            Bucket::Missed => self.missed += 1,
            Bucket::Completed => self.completed += 1,
        }
    }
}

/// 振り分け結果。各 bucket 内は入力順を保つ。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Buckets {
    pub today: Vec<Task>,
    pub upcoming: Vec<Task>,
    pub missed: Vec<Task>,
    pub completed: Vec<Task>,
}

impl Buckets {
    pub fn get(&self, bucket: Bucket) -> &[Task] {
        match bucket {
            Bucket::Today => &self.today,
            Bucket::Upcoming => &self.upcoming,
            Bucket::Missed => &self.missed,
            Bucket::Completed => &self.completed,
        }
    }

    fn get_mut(&mut self, bucket: Bucket) -> &mut Vec<Task> {
        match bucket {
            Bucket::Today => &mut self.today,
            Bucket::Upcoming => &mut self.upcoming,
            Bucket::Missed => &mut self.missed,
            Bucket::Completed => &mut self.completed,
        }
    }

    pub fn len(&self) -> usize {
        Bucket::ALL.iter().map(|&b| self.get(b).len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// bucket の大きさから集計値を作る（`summarize` と同じ結果になる）
    pub fn summary(&self) -> Summary {
        Summary {
            total: self.len(),
            completed: self.completed.len(),
            pending: self.today.len() + self.upcoming.len(),
            missed: self.missed.len(),
        }
    }
}

/// tasks を 4 つの bucket に振り分ける
pub fn classify(tasks: impl IntoIterator<Item = Task>, today: NaiveDate) -> Buckets {
    let mut buckets = Buckets::default();
    for task in tasks {
        let bucket = Bucket::of(&task, today);
        buckets.get_mut(bucket).push(task);
    }
    buckets
}

/// tasks の集計値を計算する（Task を複製しない）
pub fn summarize<'a>(tasks: impl IntoIterator<Item = &'a Task>, today: NaiveDate) -> Summary {
    let mut summary = Summary::default();
    for task in tasks {
        summary.record(Bucket::of(task, today));
    }
    summary
}
