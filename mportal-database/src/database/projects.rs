use crate::get_database_connection;
use crate::models::preferences::{Column as PreferenceColumn, Entity as Preference};
use crate::models::projects::{Column, Entity as Project, Model as ProjectModel};
use sea_orm::{entity::*, query::*, Condition, DbErr, PaginatorTrait};

/**
 * Get an active project by id
 *
 * Inactive and missing projects are indistinguishable to this module.
 *
 * # Arguments
 * @param project_id: i32 - The project id
 *
 * # Returns
 * @return Result<Option<ProjectModel>, sea_orm::DbErr> - The result of the operation
 */
pub async fn get_active_project(project_id: i32) -> Result<Option<ProjectModel>, DbErr> {
    let conn = get_database_connection().await?;
    Project::find()
        .filter(Column::Id.eq(project_id))
        .filter(Column::IsActive.eq(true))
        .one(&conn)
        .await
}

/**
 * Get all active projects mentored by a user (as owner or co-mentor),
 * most recently updated first
 *
 * # Arguments
 * @param user_id: i32 - The mentor's user id
 *
 * # Returns
 * @return Result<Vec<ProjectModel>, sea_orm::DbErr> - The result of the operation
 */
pub async fn get_mentor_projects(user_id: i32) -> Result<Vec<ProjectModel>, DbErr> {
    let conn = get_database_connection().await?;
    Project::find()
        .filter(Column::IsActive.eq(true))
        .filter(
            Condition::any()
                .add(Column::OwnerId.eq(user_id))
                .add(Column::CoMentorId.eq(user_id)),
        )
        .order_by(Column::UpdatedAt, Order::Desc)
        .all(&conn)
        .await
}

/**
 * Count the preference rows submitted against a project
 *
 * # Arguments
 * @param project_id: i32 - The project id
 *
 * # Returns
 * @return Result<u64, sea_orm::DbErr> - The number of submissions
 */
pub async fn count_project_preferences(project_id: i32) -> Result<u64, DbErr> {
    let conn = get_database_connection().await?;
    Preference::find()
        .filter(PreferenceColumn::ProjectId.eq(project_id))
        .count(&conn)
        .await
}
