use kanban_core::{
    open_board, BoardApi, BoardConfig, BoardErrorKind, CreateTaskRequest, TaskFilter, TaskStatus,
    UpdateTaskRequest,
};

fn boards() -> Vec<(&'static str, Box<dyn BoardApi>)> {
    vec![
        (
            "memory",
            open_board(&BoardConfig::memory().with_demo_data()).unwrap(),
        ),
        (
            "sqlite",
            open_board(&BoardConfig::sqlite(None).with_demo_data()).unwrap(),
        ),
    ]
}

fn ids(tasks: &[kanban_core::Task]) -> Vec<&str> {
    tasks.iter().map(|task| task.id.as_str()).collect()
}

#[test]
fn create_defaults_to_todo_at_version_zero() {
    for (name, board) in boards() {
        let task = board
            .create_task(CreateTaskRequest {
                title: "x".to_string(),
                description: Some(String::new()),
                label_id: Some("l2".to_string()),
            })
            .unwrap();
        assert_eq!(task.status, TaskStatus::Todo, "{name}");
        assert_eq!(task.version, 0, "{name}");
        assert!(task.created_at > 0, "{name}");
        assert_eq!(task.created_at, task.updated_at, "{name}");
        assert_eq!(task.description, None, "{name}");
        assert_eq!(task.label_id.as_deref(), Some("l2"), "{name}");
        assert_eq!(board.get_task(&task.id).unwrap(), task, "{name}");
    }
}

#[test]
fn create_rejects_blank_title() {
    for (name, board) in boards() {
        let before = board.list_tasks(&TaskFilter::default()).unwrap().len();
        let err = board.create_task(CreateTaskRequest::new("  \t")).unwrap_err();
        assert_eq!(err.kind(), BoardErrorKind::Validation, "{name}");
        assert_eq!(err.status_code(), 400, "{name}");
        assert_eq!(
            board.list_tasks(&TaskFilter::default()).unwrap().len(),
            before,
            "{name}"
        );
    }
}

#[test]
fn listing_is_most_recently_created_first() {
    for (name, board) in boards() {
        assert_eq!(
            ids(&board.list_tasks(&TaskFilter::default()).unwrap()),
            ["t1", "t2", "t3"],
            "{name}"
        );

        let created = board.create_task(CreateTaskRequest::new("newest")).unwrap();
        let listed = board.list_tasks(&TaskFilter::default()).unwrap();
        assert_eq!(listed[0].id, created.id, "{name}");
        assert_eq!(listed.len(), 4, "{name}");
    }
}

#[test]
fn updating_does_not_reorder_listing() {
    for (name, board) in boards() {
        board
            .update_task(UpdateTaskRequest::new("t3", 1).status(TaskStatus::Todo))
            .unwrap();
        assert_eq!(
            ids(&board.list_tasks(&TaskFilter::default()).unwrap()),
            ["t1", "t2", "t3"],
            "{name}"
        );
    }
}

#[test]
fn status_filter_returns_exact_subset_in_order() {
    for (name, board) in boards() {
        let extra = board.create_task(CreateTaskRequest::new("ship it")).unwrap();
        board
            .update_task(UpdateTaskRequest::new(extra.id.clone(), 0).status(TaskStatus::Done))
            .unwrap();

        let done = board.list_tasks(&TaskFilter::status(TaskStatus::Done)).unwrap();
        assert_eq!(ids(&done), [extra.id.as_str(), "t3"], "{name}");
        assert!(done.iter().all(|task| task.status == TaskStatus::Done));
    }
}

#[test]
fn text_filter_is_case_insensitive_substring() {
    for (name, board) in boards() {
        let hits = board.list_tasks(&TaskFilter::text("qa")).unwrap();
        assert_eq!(ids(&hits), ["t3"], "{name}");
        assert_eq!(hits[0].title, "QA チェック", "{name}");

        let japanese = board.list_tasks(&TaskFilter::text(" タスク ")).unwrap();
        assert_eq!(ids(&japanese), ["t1"], "{name}");

        assert!(board.list_tasks(&TaskFilter::text("zzz")).unwrap().is_empty());
    }
}

#[test]
fn label_and_combined_filters() {
    for (name, board) in boards() {
        assert_eq!(
            ids(&board.list_tasks(&TaskFilter::label("l2")).unwrap()),
            ["t2"],
            "{name}"
        );

        let combined = TaskFilter {
            text_query: Some("ui".to_string()),
            status: Some(TaskStatus::Done),
            label_id: Some("l2".to_string()),
        };
        assert!(board.list_tasks(&combined).unwrap().is_empty(), "{name}");
    }
}

#[test]
fn blank_request_filters_impose_no_constraint() {
    for (name, board) in boards() {
        let filter: TaskFilter = serde_json::from_str(r#"{"q":"","labelId":""}"#).unwrap();
        assert_eq!(
            ids(&board.list_tasks(&filter).unwrap()),
            ["t1", "t2", "t3"],
            "{name}"
        );

        let spaced = TaskFilter {
            status: Some(TaskStatus::InProgress),
            label_id: Some("  ".to_string()),
            ..TaskFilter::default()
        };
        assert_eq!(ids(&board.list_tasks(&spaced).unwrap()), ["t2"], "{name}");
    }
}

#[test]
fn returned_tasks_are_copies() {
    for (name, board) in boards() {
        let mut listed = board.list_tasks(&TaskFilter::default()).unwrap();
        listed[0].title = "tampered".to_string();
        listed[0].version = 99;
        let stored = board.get_task("t1").unwrap();
        assert_eq!(stored.title, "最初のタスク", "{name}");
        assert_eq!(stored.version, 0, "{name}");
    }
}

#[test]
fn get_task_missing_is_not_found() {
    for (name, board) in boards() {
        let err = board.get_task("missing").unwrap_err();
        assert_eq!(err.kind(), BoardErrorKind::NotFound, "{name}");
        assert_eq!(err.status_code(), 404, "{name}");
    }
}

#[test]
fn labels_are_listed_in_seed_order() {
    for (name, board) in boards() {
        let labels = board.list_labels().unwrap();
        let names: Vec<_> = labels.iter().map(|label| label.name.as_str()).collect();
        assert_eq!(names, ["General", "Design", "QA"], "{name}");
        assert_eq!(labels[2].color, "#10b981", "{name}");
    }
}

#[test]
fn board_columns_group_by_status() {
    for (name, board) in boards() {
        let columns = board.board_columns(&TaskFilter::default()).unwrap();
        assert_eq!(ids(&columns.todo), ["t1"], "{name}");
        assert_eq!(ids(&columns.in_progress), ["t2"], "{name}");
        assert_eq!(ids(&columns.done), ["t3"], "{name}");
        assert_eq!(columns.total(), 3, "{name}");

        let empty = board.board_columns(&TaskFilter::text("nothing")).unwrap();
        assert!(empty.is_empty(), "{name}");
    }
}

#[test]
fn dangling_label_reference_is_tolerated() {
    for (name, board) in boards() {
        let task = board
            .create_task(CreateTaskRequest {
                title: "orphan label".to_string(),
                description: None,
                label_id: Some("gone".to_string()),
            })
            .unwrap();
        assert_eq!(
            ids(&board.list_tasks(&TaskFilter::label("gone")).unwrap()),
            [task.id.as_str()],
            "{name}"
        );
        assert!(!board
            .list_labels()
            .unwrap()
            .iter()
            .any(|label| label.id == "gone"));
    }
}
