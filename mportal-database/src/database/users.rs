use crate::get_database_connection;
use crate::models::users::{Column, Entity as User, Model as UserModel};
use sea_orm::{entity::*, query::*, DbErr};

/**
 * Resolve a bearer token to its user
 *
 * # Arguments
 * @param token: &str - The opaque token presented by the caller
 *
 * # Returns
 * @return Result<Option<UserModel>, sea_orm::DbErr> - The matching user, if any
 */
pub async fn get_user_by_auth_token(token: &str) -> Result<Option<UserModel>, DbErr> {
    let conn = get_database_connection().await?;
    User::find()
        .filter(Column::AuthToken.eq(token))
        .one(&conn)
        .await
}
