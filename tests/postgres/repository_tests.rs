//! Task repository behaviour against a live database.

use crate::postgres::helpers::{
    CleanupGuard, ensure_template, setup_repository, test_runtime, unique_db_name,
};
use chrono::{TimeDelta, Utc};
use pg_embedded_setup_unpriv::TestCluster;
use pg_embedded_setup_unpriv::test_support::shared_test_cluster;
use rstest::rstest;
use task_manager::task::{
    domain::{Task, TaskStatus},
    ports::{TaskRepository, TaskRepositoryError},
};

#[rstest]
fn insert_without_timestamp_uses_column_default(shared_test_cluster: &'static TestCluster) {
    ensure_template(shared_test_cluster).expect("template setup");
    let db_name = unique_db_name("test_insert_default");
    let _guard = CleanupGuard::new(shared_test_cluster, db_name.clone());
    let repo = setup_repository(shared_test_cluster, &db_name).expect("repository setup");
    let rt = test_runtime();

    let before = Utc::now();
    let saved = rt
        .block_on(repo.save(Task::new("Unstamped", None, TaskStatus::Todo)))
        .expect("insert should succeed");
    let after = Utc::now();

    let created_at = saved.created_at().expect("database should stamp created_at");
    assert!(saved.id().is_some());
    assert!(created_at >= before - TimeDelta::seconds(5));
    assert!(created_at <= after + TimeDelta::seconds(5));
}

#[rstest]
fn insert_keeps_stamped_timestamp_and_round_trips(shared_test_cluster: &'static TestCluster) {
    ensure_template(shared_test_cluster).expect("template setup");
    let db_name = unique_db_name("test_insert_round_trip");
    let _guard = CleanupGuard::new(shared_test_cluster, db_name.clone());
    let repo = setup_repository(shared_test_cluster, &db_name).expect("repository setup");
    let rt = test_runtime();

    let mut task = Task::new("Stamped", Some("with notes".to_owned()), TaskStatus::InProgress);
    task.mark_created(&mockable::DefaultClock);
    let stamped = task.created_at().expect("stamped timestamp");

    let saved = rt.block_on(repo.save(task)).expect("insert should succeed");
    let id = saved.id().expect("saved task has an id");
    let fetched = rt
        .block_on(repo.find_by_id(id))
        .expect("lookup should succeed")
        .expect("task should exist");

    assert_eq!(fetched.title(), "Stamped");
    assert_eq!(fetched.description(), Some("with notes"));
    assert_eq!(fetched.status(), TaskStatus::InProgress);
    assert_eq!(
        fetched.created_at().map(|at| at.timestamp_micros()),
        Some(stamped.timestamp_micros())
    );
}

#[rstest]
fn update_of_deleted_row_is_not_found(shared_test_cluster: &'static TestCluster) {
    ensure_template(shared_test_cluster).expect("template setup");
    let db_name = unique_db_name("test_update_deleted");
    let _guard = CleanupGuard::new(shared_test_cluster, db_name.clone());
    let repo = setup_repository(shared_test_cluster, &db_name).expect("repository setup");
    let rt = test_runtime();

    let mut saved = rt
        .block_on(repo.save(Task::new("Doomed", None, TaskStatus::Todo)))
        .expect("insert should succeed");
    let id = saved.id().expect("saved task has an id");
    rt.block_on(repo.delete(&saved)).expect("delete should succeed");

    saved.set_status(TaskStatus::Done);
    let result = rt.block_on(repo.save(saved));

    assert!(
        matches!(result, Err(TaskRepositoryError::NotFound(missing)) if missing == id),
        "expected NotFound for {id:?}, got {result:?}"
    );
    let remaining = rt.block_on(repo.find_all()).expect("list should succeed");
    assert!(remaining.is_empty());
}

#[rstest]
fn update_returns_the_written_row(shared_test_cluster: &'static TestCluster) {
    ensure_template(shared_test_cluster).expect("template setup");
    let db_name = unique_db_name("test_update_returning");
    let _guard = CleanupGuard::new(shared_test_cluster, db_name.clone());
    let repo = setup_repository(shared_test_cluster, &db_name).expect("repository setup");
    let rt = test_runtime();

    let mut saved = rt
        .block_on(repo.save(Task::new("Draft", Some("old".to_owned()), TaskStatus::Todo)))
        .expect("insert should succeed");
    let created_at = saved.created_at();
    saved.set_title("Final");
    saved.set_status(TaskStatus::Done);

    let updated = rt.block_on(repo.save(saved)).expect("update should succeed");

    assert_eq!(updated.title(), "Final");
    assert_eq!(updated.status(), TaskStatus::Done);
    assert_eq!(updated.description(), Some("old"));
    assert_eq!(updated.created_at(), created_at);
}

#[rstest]
fn delete_of_missing_row_is_not_found(shared_test_cluster: &'static TestCluster) {
    ensure_template(shared_test_cluster).expect("template setup");
    let db_name = unique_db_name("test_delete_missing");
    let _guard = CleanupGuard::new(shared_test_cluster, db_name.clone());
    let repo = setup_repository(shared_test_cluster, &db_name).expect("repository setup");
    let rt = test_runtime();

    let saved = rt
        .block_on(repo.save(Task::new("Once", None, TaskStatus::Todo)))
        .expect("insert should succeed");
    let id = saved.id().expect("saved task has an id");
    rt.block_on(repo.delete(&saved)).expect("first delete should succeed");

    let result = rt.block_on(repo.delete(&saved));

    assert!(
        matches!(result, Err(TaskRepositoryError::NotFound(missing)) if missing == id),
        "expected NotFound for {id:?}, got {result:?}"
    );
}

#[rstest]
fn find_all_orders_by_id(shared_test_cluster: &'static TestCluster) {
    ensure_template(shared_test_cluster).expect("template setup");
    let db_name = unique_db_name("test_find_all_order");
    let _guard = CleanupGuard::new(shared_test_cluster, db_name.clone());
    let repo = setup_repository(shared_test_cluster, &db_name).expect("repository setup");
    let rt = test_runtime();

    for title in ["first", "second", "third"] {
        rt.block_on(repo.save(Task::new(title, None, TaskStatus::Todo)))
            .expect("insert should succeed");
    }

    let titles: Vec<String> = rt
        .block_on(repo.find_all())
        .expect("list should succeed")
        .iter()
        .map(|task| task.title().to_owned())
        .collect();

    assert_eq!(titles, ["first", "second", "third"]);
}
