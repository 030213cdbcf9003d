use taskify_core::error::{Error, ValidationError};
use taskify_core::session::Session;
use taskify_core::task::Priority;

fn seeded_session() -> Session {
    let mut session = Session::new();
    session
        .add_task("Write report", Priority::High)
        .expect("add high task");
    session
        .add_task("Buy milk", Priority::Low)
        .expect("add low task");
    session
        .add_task("Call Bob", Priority::High)
        .expect("add second high task");
    session
}

#[test]
fn adds_partition_into_ordered_buckets() {
    let session = seeded_session();
    let buckets = session.display_buckets();

    assert_eq!(buckets.high, vec!["Write report", "Call Bob"]);
    assert_eq!(buckets.medium, Vec::<String>::new());
    assert_eq!(buckets.low, vec!["Buy milk"]);
}

#[test]
fn update_moves_task_between_buckets() {
    let mut session = seeded_session();

    let task = session.select(Priority::High, 1).expect("resolves");
    assert_eq!(task.name, "Call Bob");
    assert_eq!(
        session.selection().expect("selected").master_index,
        2
    );

    session
        .update_task("Call Alice", Priority::Medium)
        .expect("update");

    let buckets = session.display_buckets();
    assert_eq!(buckets.high, vec!["Write report"]);
    assert_eq!(buckets.medium, vec!["Call Alice"]);
    assert_eq!(buckets.low, vec!["Buy milk"]);
    assert!(session.selection().is_none());
}

#[test]
fn delete_removes_selected_task_and_clears_selection() {
    let mut session = seeded_session();

    session.select(Priority::Low, 0).expect("resolves");
    let removed = session.delete_task().expect("delete");

    assert_eq!(removed.name, "Buy milk");
    assert_eq!(session.store().len(), 2);
    assert!(session.display_buckets().low.is_empty());
    assert!(session.selection().is_none());
}

#[test]
fn add_with_empty_name_fails_without_mutation() {
    let mut session = seeded_session();

    let err = session.add_task("", Priority::High).unwrap_err();
    assert_eq!(err, Error::Validation(ValidationError::EmptyName));
    assert_eq!(session.store().len(), 3);
}

#[test]
fn delete_without_selection_fails_without_mutation() {
    let mut session = seeded_session();

    let err = session.delete_task().unwrap_err();
    assert_eq!(err, Error::NoSelection);
    assert_eq!(session.store().len(), 3);
}

#[test]
fn selection_resolves_against_post_removal_indices() {
    let mut session = seeded_session();

    session.select(Priority::High, 0).expect("resolves");
    let removed = session.delete_task().expect("delete");
    assert_eq!(removed.name, "Write report");

    let task = session.select(Priority::High, 0).expect("resolves");
    assert_eq!(task.name, "Call Bob");
    assert_eq!(
        session.selection().expect("selected").master_index,
        1
    );
}
