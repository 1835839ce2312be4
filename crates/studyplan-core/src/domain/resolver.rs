//! Status Resolver - 永続化された status と planned_date から実効状態を導出する
//!
//! 純粋関数。`today` は必ず引数で受け取り、内部で現在時刻を読まない。
//! 同じ入力には常に同じ結果を返す。

use chrono::NaiveDate;

use super::state::TaskStatus;
use super::task::Task;

/// 実効状態を返す
///
/// 1. completed は日付に関係なく completed（完了が常に優先）
/// 2. それ以外で planned_date < today なら missed
/// 3. それ以外は pending
///
/// 永続化された `missed` も同じ規則で解釈される。過去日付なら missed のまま、
/// planned_date が today 以降なら pending として扱う。
pub fn effective_status(task: &Task, today: NaiveDate) -> TaskStatus {
    match task.status {
        TaskStatus::Completed => TaskStatus::Completed,
        _ if task.planned_date < today => TaskStatus::Missed,
        _ => TaskStatus::Pending,
    }
}
