//! Repository contract tests for the in-memory adapter.

use std::sync::Arc;

use super::helpers::{draft, repository};
use rstest::rstest;
use task_manager::task::{
    domain::{Task, TaskId, TaskStatus},
    ports::{TaskRepository, TaskRepositoryError},
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn saved_task_is_found_by_id(
    repository: Arc<dyn TaskRepository>,
) -> Result<(), eyre::Report> {
    let saved = repository
        .save(Task::new("Write report", Some("Q1".to_owned()), TaskStatus::InProgress))
        .await?;
    let id = saved
        .id()
        .ok_or_else(|| eyre::eyre!("saved task has no id"))?;

    let found = repository.find_by_id(id).await?;

    assert_eq!(found, Some(saved));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_id_is_absent(repository: Arc<dyn TaskRepository>) -> Result<(), eyre::Report> {
    let found = repository.find_by_id(TaskId::new(404)?).await?;

    assert!(found.is_none());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn saving_an_existing_task_updates_it_in_place(
    repository: Arc<dyn TaskRepository>,
) -> Result<(), eyre::Report> {
    let mut saved = repository.save(draft("Draft")).await?;
    saved.set_title("Final");
    saved.set_status(TaskStatus::Done);

    let updated = repository.save(saved.clone()).await?;
    let all = repository.find_all().await?;

    assert_eq!(updated, saved);
    assert_eq!(all, vec![saved]);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleted_task_disappears_from_listing(
    repository: Arc<dyn TaskRepository>,
) -> Result<(), eyre::Report> {
    let keep = repository.save(draft("keep")).await?;
    let gone = repository.save(draft("drop")).await?;

    repository.delete(&gone).await?;

    assert_eq!(repository.find_all().await?, vec![keep]);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_twice_reports_not_found(
    repository: Arc<dyn TaskRepository>,
) -> Result<(), eyre::Report> {
    let saved = repository.save(draft("once")).await?;
    repository.delete(&saved).await?;

    let result = repository.delete(&saved).await;

    assert!(matches!(result, Err(TaskRepositoryError::NotFound(id)) if Some(id) == saved.id()));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_an_unsaved_task_is_rejected(repository: Arc<dyn TaskRepository>) {
    let result = repository.delete(&draft("never saved")).await;

    assert!(matches!(result, Err(TaskRepositoryError::Unsaved)));
}
