//! Behaviour tests for group membership, task visibility, and cascade delete.

mod collaboration_steps;

use collaboration_steps::world::{CollaborationWorld, world};
use rstest_bdd_macros::scenario;

#[scenario(
    path = "tests/features/group_collaboration.feature",
    name = "Outsider cannot add a task to a group"
)]
#[tokio::test(flavor = "multi_thread")]
async fn outsider_cannot_add_group_task(world: CollaborationWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/group_collaboration.feature",
    name = "Member adds a task to a group"
)]
#[tokio::test(flavor = "multi_thread")]
async fn member_adds_group_task(world: CollaborationWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/group_collaboration.feature",
    name = "Deleting a group removes its tasks"
)]
#[tokio::test(flavor = "multi_thread")]
async fn group_deletion_cascades(world: CollaborationWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/group_collaboration.feature",
    name = "Only the owner deletes a group"
)]
#[tokio::test(flavor = "multi_thread")]
async fn only_owner_deletes_group(world: CollaborationWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/group_collaboration.feature",
    name = "Private tasks stay with their creator"
)]
#[tokio::test(flavor = "multi_thread")]
async fn private_tasks_stay_private(world: CollaborationWorld) {
    let _ = world;
}
