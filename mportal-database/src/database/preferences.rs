use std::collections::HashMap;

use crate::get_database_connection;
use crate::models::preferences::{
    Column, Entity as Preference, Model as PreferenceModel,
};
use crate::models::users::{Entity as User, Model as UserModel};
use chrono::Utc;
use sea_orm::sea_query::NullOrdering;
use sea_orm::{entity::*, query::*, ConnectionTrait, DbBackend, DbErr, TransactionTrait};

/// Result of a batch rank update. Either every row in the write set was
/// applied atomically, or nothing was touched.
#[derive(Debug)]
pub enum RankingBatchOutcome {
    /// All rows applied; carries the write-set rows in submission order,
    /// including rows left untouched because their rank already matched.
    Applied(Vec<PreferenceModel>),
    /// Some user ids had no preference row for the project; no row mutated.
    MissingPreferences(Vec<i32>),
    /// The storage layer rejected a row during commit; rolled back.
    ConstraintViolation { message: String },
}

/**
 * Get the preference rows of a project in canonical presentation order:
 * rank ascending with nulls last, then submitted_at ascending. Each row
 * is paired with the submitting user.
 *
 * # Arguments
 * @param project_id: i32 - The project id
 *
 * # Returns
 * @return Result<Vec<(PreferenceModel, Option<UserModel>)>, sea_orm::DbErr> - The result of the operation
 */
pub async fn get_project_preferences(
    project_id: i32,
) -> Result<Vec<(PreferenceModel, Option<UserModel>)>, DbErr> {
    let conn = get_database_connection().await?;
    Preference::find()
        .filter(Column::ProjectId.eq(project_id))
        .order_by_with_nulls(Column::Rank, Order::Asc, NullOrdering::Last)
        .order_by(Column::SubmittedAt, Order::Asc)
        .find_also_related(User)
        .all(&conn)
        .await
}

/**
 * Apply a validated batch of rank updates to a project's preference rows
 * inside a single transaction.
 *
 * The rows named by the write set are read with an exclusive row lock so
 * concurrent batches against overlapping rows serialize instead of
 * interleaving. Rows whose stored rank already equals the requested value
 * are not rewritten and keep their updated_at.
 *
 * # Arguments
 * @param project_id: i32 - The project id
 * @param write_set: &[(i32, Option<i16>)] - (user_id, new rank) pairs, deduplicated by user_id
 *
 * # Returns
 * @return Result<RankingBatchOutcome, sea_orm::DbErr> - The result of the operation
 */
pub async fn update_rankings(
    project_id: i32,
    write_set: &[(i32, Option<i16>)],
) -> Result<RankingBatchOutcome, DbErr> {
    let conn = get_database_connection().await?;
    let txn = conn.begin().await?;

    let user_ids: Vec<i32> = write_set.iter().map(|(user_id, _)| *user_id).collect();
    let mut query = Preference::find()
        .filter(Column::ProjectId.eq(project_id))
        .filter(Column::UserId.is_in(user_ids.clone()));
    // SELECT ... FOR UPDATE. SQLite has no row locks; its transaction write
    // lock already serializes whole batches.
    if txn.get_database_backend() == DbBackend::Postgres {
        query = query.lock_exclusive();
    }
    let rows = query.all(&txn).await?;

    let mut by_user: HashMap<i32, PreferenceModel> =
        rows.into_iter().map(|row| (row.user_id, row)).collect();
    let missing: Vec<i32> = user_ids
        .iter()
        .copied()
        .filter(|user_id| !by_user.contains_key(user_id))
        .collect();
    if !missing.is_empty() {
        txn.rollback().await?;
        return Ok(RankingBatchOutcome::MissingPreferences(missing));
    }

    let mut updated = Vec::with_capacity(write_set.len());
    for (user_id, new_rank) in write_set {
        let row = by_user
            .remove(user_id)
            .ok_or_else(|| DbErr::Custom("duplicate user_id in write set".to_string()))?;
        if row.rank == *new_rank {
            updated.push(row);
            continue;
        }
        let mut active = row.into_active_model();
        active.rank = Set(*new_rank);
        active.updated_at = Set(Utc::now());
        match active.update(&txn).await {
            Ok(row) => updated.push(row),
            Err(e) => {
                txn.rollback().await?;
                return Ok(RankingBatchOutcome::ConstraintViolation {
                    message: e.to_string(),
                });
            }
        }
    }

    txn.commit().await?;
    Ok(RankingBatchOutcome::Applied(updated))
}

/**
 * Get the SOP texts of a project's preferences for a set of students
 *
 * # Arguments
 * @param project_id: i32 - The project id
 * @param user_ids: &[i32] - The student user ids
 *
 * # Returns
 * @return Result<HashMap<i32, String>, sea_orm::DbErr> - user_id to SOP text
 */
pub async fn get_sops_by_user_ids(
    project_id: i32,
    user_ids: &[i32],
) -> Result<HashMap<i32, String>, DbErr> {
    if user_ids.is_empty() {
        return Ok(HashMap::new());
    }
    let conn = get_database_connection().await?;
    let rows = Preference::find()
        .filter(Column::ProjectId.eq(project_id))
        .filter(Column::UserId.is_in(user_ids.to_vec()))
        .all(&conn)
        .await?;
    Ok(rows.into_iter().map(|row| (row.user_id, row.sop)).collect())
}
