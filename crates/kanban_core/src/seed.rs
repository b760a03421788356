//! Demo board contents used by the smoke CLI and UI previews.

use crate::model::comment::Comment;
use crate::model::label::Label;
use crate::model::task::{Task, TaskStatus};
use crate::repo::board_repo::{BoardRepository, RepoResult};
use crate::service::clock::MonotonicClock;
use log::info;

/// Seeds three labels, three tasks and one comment into an empty store.
///
/// Returns `false` without writing anything when the store already holds
/// tasks or labels, so reopening a seeded database is harmless.
///
/// Listing order after seeding is `t1, t2, t3`.
pub fn seed_demo_board<R: BoardRepository + ?Sized>(
    repo: &R,
    clock: &MonotonicClock,
) -> RepoResult<bool> {
    if !repo.list_tasks()?.is_empty() || !repo.list_labels()?.is_empty() {
        info!("event=board_seed module=seed status=skipped reason=not_empty");
        return Ok(false);
    }

    for label in demo_labels() {
        repo.insert_label(&label)?;
    }

    let mut tasks = demo_tasks(clock);
    // Insertion prepends, so insert back to front to list t1 first.
    tasks.reverse();
    for task in &tasks {
        repo.insert_task(task)?;
    }

    repo.insert_comment(&Comment {
        id: "c1".to_string(),
        task_id: "t2".to_string(),
        body: "フォーム周りのバリデーションも確認予定です".to_string(),
        created_at: clock.now_ms(),
    })?;

    info!(
        "event=board_seed module=seed status=ok tasks={} labels=3 comments=1",
        tasks.len()
    );
    Ok(true)
}

fn demo_labels() -> [Label; 3] {
    [
        Label::new("l1", "General", "#64748b"),
        Label::new("l2", "Design", "#fbbf24"),
        Label::new("l3", "QA", "#10b981"),
    ]
}

fn demo_tasks(clock: &MonotonicClock) -> Vec<Task> {
    let mut first = Task::with_id("t1", "最初のタスク", clock.now_ms());
    first.description = Some("セットアップを確認する".to_string());
    first.label_id = Some("l1".to_string());

    let mut second = Task::with_id("t2", "UI ラフの作成", clock.now_ms());
    second.status = TaskStatus::InProgress;
    second.label_id = Some("l2".to_string());

    let mut third = Task::with_id("t3", "QA チェック", clock.now_ms());
    third.status = TaskStatus::Done;
    third.label_id = Some("l3".to_string());
    third.version = 1;

    vec![first, second, third]
}

#[cfg(test)]
mod tests {
    use super::seed_demo_board;
    use crate::repo::board_repo::BoardRepository;
    use crate::repo::memory_repo::InMemoryBoardRepository;
    use crate::service::clock::MonotonicClock;

    #[test]
    fn seeds_once_in_listing_order() {
        let repo = InMemoryBoardRepository::new();
        let clock = MonotonicClock::new();

        assert!(seed_demo_board(&repo, &clock).unwrap());
        assert!(!seed_demo_board(&repo, &clock).unwrap());

        let ids: Vec<_> = repo.list_tasks().unwrap().into_iter().map(|t| t.id).collect();
        assert_eq!(ids, ["t1", "t2", "t3"]);
        assert_eq!(repo.list_labels().unwrap().len(), 3);
        assert_eq!(repo.list_comments_for("t2").unwrap().len(), 1);
        assert_eq!(repo.get_task("t3").unwrap().version, 1);
    }
}
