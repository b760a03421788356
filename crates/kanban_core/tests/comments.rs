use kanban_core::{
    open_board, AddCommentRequest, BoardApi, BoardConfig, BoardErrorKind, CreateTaskRequest,
    TaskFilter, COMMENTS_LIMIT,
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

#[test]
fn lists_at_most_ten_comments_newest_first() {
    for (name, board) in boards() {
        let task = board.create_task(CreateTaskRequest::new("chatty")).unwrap();
        let mut created = Vec::new();
        for index in 0..12 {
            created.push(
                board
                    .add_comment(AddCommentRequest::new(task.id.clone(), format!("comment {index}")))
                    .unwrap(),
            );
        }

        let listed = board.list_comments(&task.id).unwrap();
        assert_eq!(listed.len(), COMMENTS_LIMIT, "{name}");
        assert_eq!(listed[0].body, "comment 11", "{name}");
        assert_eq!(listed[9].body, "comment 2", "{name}");
        assert!(
            listed.windows(2).all(|pair| pair[0].created_at > pair[1].created_at),
            "{name}"
        );
        assert!(listed.iter().all(|comment| comment.task_id == task.id));
    }
}

#[test]
fn comments_are_scoped_to_their_task() {
    for (name, board) in boards() {
        let seeded = board.list_comments("t2").unwrap();
        assert_eq!(seeded.len(), 1, "{name}");
        assert_eq!(seeded[0].id, "c1", "{name}");
        assert!(board.list_comments("t1").unwrap().is_empty(), "{name}");
    }
}

#[test]
fn add_comment_validates_body() {
    for (name, board) in boards() {
        let err = board
            .add_comment(AddCommentRequest::new("t1", " \n "))
            .unwrap_err();
        assert_eq!(err.kind(), BoardErrorKind::Validation, "{name}");
        assert!(board.list_comments("t1").unwrap().is_empty(), "{name}");
    }
}

#[test]
fn add_comment_keeps_body_as_written() {
    for (name, board) in boards() {
        let comment = board
            .add_comment(AddCommentRequest::new("t1", "  indented\n"))
            .unwrap();
        assert_eq!(comment.body, "  indented\n", "{name}");
        assert_eq!(board.list_comments("t1").unwrap()[0], comment, "{name}");
    }
}

#[test]
fn add_comment_to_missing_task_is_not_found() {
    for (name, board) in boards() {
        let err = board
            .add_comment(AddCommentRequest::new("ghost", "hello"))
            .unwrap_err();
        assert_eq!(err.kind(), BoardErrorKind::NotFound, "{name}");
        assert!(board.list_comments("ghost").unwrap().is_empty(), "{name}");
    }
}

#[test]
fn delete_cascades_comments_and_is_idempotent() {
    for (name, board) in boards() {
        board
            .add_comment(AddCommentRequest::new("t2", "second"))
            .unwrap();
        assert_eq!(board.list_comments("t2").unwrap().len(), 2, "{name}");

        assert_eq!(board.delete_task("t2").unwrap().id, "t2", "{name}");
        assert_eq!(board.delete_task("t2").unwrap().id, "t2", "{name}");

        assert!(board.list_comments("t2").unwrap().is_empty(), "{name}");
        assert_eq!(
            board.get_task("t2").unwrap_err().kind(),
            BoardErrorKind::NotFound,
            "{name}"
        );
        assert_eq!(board.list_tasks(&TaskFilter::default()).unwrap().len(), 2, "{name}");
    }
}

#[test]
fn delete_of_unknown_id_returns_the_id() {
    for (name, board) in boards() {
        let deleted = board.delete_task("never-existed").unwrap();
        assert_eq!(deleted.id, "never-existed", "{name}");
        assert_eq!(board.list_tasks(&TaskFilter::default()).unwrap().len(), 3, "{name}");
    }
}

#[test]
fn recreated_task_does_not_inherit_comments() {
    for (name, board) in boards() {
        let task = board.create_task(CreateTaskRequest::new("temp")).unwrap();
        board
            .add_comment(AddCommentRequest::new(task.id.clone(), "bye"))
            .unwrap();
        board.delete_task(&task.id).unwrap();

        let again = board.create_task(CreateTaskRequest::new("temp")).unwrap();
        assert_ne!(again.id, task.id, "{name}");
        assert!(board.list_comments(&again.id).unwrap().is_empty(), "{name}");
    }
}
