//! Given steps for task CRUD BDD scenarios.

use super::world::TaskWorld;
use axum::http::{Method, StatusCode};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use serde_json::json;

#[given("an empty task store")]
fn empty_task_store(world: &mut TaskWorld) -> Result<(), eyre::Report> {
    let reply = world.send(Method::GET, "/api/tasks", None)?;
    eyre::ensure!(
        reply.body == json!([]),
        "expected an empty task list, found {}",
        reply.body
    );
    Ok(())
}

#[given(r#"a stored task titled "{title}" with status "{status}""#)]
fn stored_task(world: &mut TaskWorld, title: String, status: String) -> Result<(), eyre::Report> {
    let reply = world
        .send(
            Method::POST,
            "/api/tasks",
            Some(&json!({"title": title, "status": status})),
        )
        .wrap_err("create task for scenario setup")?;
    eyre::ensure!(
        reply.status == StatusCode::CREATED,
        "setup create failed with {}: {}",
        reply.status,
        reply.body
    );
    world.stored_id = Some(
        reply.body["id"]
            .as_i64()
            .ok_or_else(|| eyre::eyre!("created task has no numeric id"))?,
    );
    Ok(())
}
