use std::collections::HashMap;

use crate::database::preferences::get_sops_by_user_ids;
use crate::get_database_connection;
use crate::models::rankings::{Column, Entity as Ranking, Model as RankingModel};
use crate::models::users::{Column as UserColumn, Entity as User, Model as UserModel};
use sea_orm::sea_query::NullOrdering;
use sea_orm::{entity::*, query::*, DbErr};

/// One mentor ranking row joined with its student and, when the student
/// still has a preference row for the project, the SOP text.
#[derive(Debug, Clone)]
pub struct MentorRankingRow {
    pub ranking: RankingModel,
    pub student: UserModel,
    pub sop: Option<String>,
}

/**
 * Get the rankings a single mentor has saved for a project, rank ascending
 * with nulls last, then updated_at ascending. Only that mentor's rows are
 * returned; other mentors' rankings of the same students never appear.
 *
 * # Arguments
 * @param project_id: i32 - The project id
 * @param mentor_id: i32 - The calling mentor's user id
 *
 * # Returns
 * @return Result<Vec<MentorRankingRow>, sea_orm::DbErr> - The result of the operation
 */
pub async fn get_mentor_rankings(
    project_id: i32,
    mentor_id: i32,
) -> Result<Vec<MentorRankingRow>, DbErr> {
    let conn = get_database_connection().await?;
    let rows = Ranking::find()
        .filter(Column::ProjectId.eq(project_id))
        .filter(Column::MentorId.eq(mentor_id))
        .order_by_with_nulls(Column::Rank, Order::Asc, NullOrdering::Last)
        .order_by(Column::UpdatedAt, Order::Asc)
        .all(&conn)
        .await?;

    let student_ids: Vec<i32> = rows.iter().map(|row| row.student_id).collect();
    let students: HashMap<i32, UserModel> = if student_ids.is_empty() {
        HashMap::new()
    } else {
        User::find()
            .filter(UserColumn::Id.is_in(student_ids.clone()))
            .all(&conn)
            .await?
            .into_iter()
            .map(|user| (user.id, user))
            .collect()
    };
    let mut sops = get_sops_by_user_ids(project_id, &student_ids).await?;

    let mut result = Vec::with_capacity(rows.len());
    for ranking in rows {
        let Some(student) = students.get(&ranking.student_id).cloned() else {
            log::warn!(
                "ranking {} references missing student {}",
                ranking.id,
                ranking.student_id
            );
            continue;
        };
        let sop = sops.remove(&ranking.student_id);
        result.push(MentorRankingRow {
            ranking,
            student,
            sop,
        });
    }
    Ok(result)
}
