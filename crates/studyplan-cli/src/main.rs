use anyhow::{Context, Result};
use chrono::{Duration, NaiveDate};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use studyplan_core::domain::ScopeId;
use studyplan_core::{PlannerConfig, StudyPlanService, TaskCreateInput};

/// 使い方: `studyplan-cli [YYYY-MM-DD]`（日付を省略すると設定のオフセットでの今日）
#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "studyplan_core=info,studyplan_cli=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // (A) 設定とサービスを用意
    let config = PlannerConfig::from_env()?;
    let svc = StudyPlanService::in_memory(config.clone());

    // (B) today は 1 回だけ決めて、以降すべてに同じ値を渡す
    let today = match std::env::args().nth(1) {
        Some(raw) => NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
            .with_context(|| format!("expected YYYY-MM-DD, got {raw:?}"))?,
        None => svc.today(),
    };
    info!(%today, "evaluating study plan");

    // (C) タスク投入（seed ファイルがなければデモ用のセット）
    let scope = ScopeId::from(ulid::Ulid::new());
    let inputs = match &config.seed_path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("reading seed file {}", path.display()))?;
            serde_json::from_str::<Vec<TaskCreateInput>>(&raw)
                .with_context(|| format!("parsing seed file {}", path.display()))?
        }
        None => demo_tasks(today)?,
    };
    for input in inputs {
        svc.create_task(scope, input).await?;
    }

    // (D) missed のタスクをすべて今日に繰り越す
    let before = svc.overview(scope, today).await?;
    for task in &before.buckets.missed {
        svc.carry_forward(scope, task.id, today).await?;
    }

    // (E) 結果を JSON で出力
    let after = svc.overview(scope, today).await?;
    println!("{}", serde_json::to_string_pretty(&after)?);
    Ok(())
}

fn demo_tasks(today: NaiveDate) -> Result<Vec<TaskCreateInput>> {
    let task = |title: &str,
                subject: &str,
                offset: i64,
                priority: &str|
     -> Result<TaskCreateInput> {
        let planned_date = today
            .checked_add_signed(Duration::days(offset))
            .with_context(|| format!("{today} {offset:+} days is out of range"))?;
        Ok(TaskCreateInput {
            title: title.to_string(),
            subject: subject.to_string(),
            priority: Some(priority.to_string()),
            planned_date: Some(planned_date),
            estimated_time: Some(1.0),
            ..TaskCreateInput::default()
        })
    };
    Ok(vec![
        task("Revise quadratic equations", "Maths", -3, "high")?,
        task("Read chapter 4", "History", 0, "medium")?,
        task("Practice past paper", "Physics", 2, "low")?,
    ])
}
