pub mod access;
pub mod rankings;

use serde::{Deserialize, Serialize};

use crate::error::{MentorApiError, RankingPayloadError};
use access::{authorize, AccessPolicy};
use mportal_database::database::preferences as preferences_db;
use mportal_database::database::preferences::RankingBatchOutcome;
use mportal_database::database::projects as projects_db;
use mportal_database::database::rankings as rankings_db;
use mportal_database::models::projects::Model as ProjectModel;
use mportal_database::models::users::Model as UserModel;

/// One row of the mentor's project listing.
#[derive(Serialize, Deserialize, Debug)]
pub struct ProjectSummary {
    pub id: i32,
    pub project_title: String,
    pub project_domain_1: String,
    pub project_domain_2: Option<String>,
    pub difficulty: String,
    pub project_type: String,
    pub updated_at: String,
    pub wish_count: u64,
    pub preference_count: u64,
}

/// Full project detail as shown on the mentor's SOP review page.
#[derive(Serialize, Deserialize, Debug)]
pub struct ProjectDetail {
    pub id: i32,
    pub project_title: String,
    pub project_domain_1: String,
    pub project_domain_2: Option<String>,
    pub project_description: String,
    pub difficulty: String,
    pub project_type: String,
    pub duration_weeks: i32,
    pub weekly_hours: i32,
    pub number_of_mentees: i32,
    pub resources_link: String,
    pub previously_completed: bool,
    pub updated_at: String,
}

/// One submission in canonical order (rank ascending, nulls last, then
/// submitted_at ascending).
#[derive(Serialize, Deserialize, Debug)]
pub struct SopEntry {
    pub user_id: i32,
    pub user_name: Option<String>,
    pub user_email: Option<String>,
    pub sop: String,
    pub rank: Option<i16>,
    pub submitted_at: String,
    pub updated_at: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct UpdatedRank {
    pub user_id: i32,
    pub rank: Option<i16>,
    pub updated_at: String,
}

/// Result of a successful batch rank update: the per-row report plus the
/// fresh canonical submission list.
#[derive(Serialize, Deserialize, Debug)]
pub struct RankingUpdateOutcome {
    pub updated: Vec<UpdatedRank>,
    pub sops: Vec<SopEntry>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct MentorRankingEntry {
    pub student_id: i32,
    pub student_name: String,
    pub student_email: String,
    pub student_roll_no: Option<String>,
    pub rank: Option<i16>,
    pub sop: Option<String>,
}

impl ProjectDetail {
    fn from_model(project: &ProjectModel) -> Self {
        ProjectDetail {
            id: project.id,
            project_title: project.title.clone(),
            project_domain_1: project.domain1.clone(),
            project_domain_2: project.domain2.clone(),
            project_description: project.description.clone(),
            difficulty: project.difficulty.clone(),
            project_type: project.project_type.clone(),
            duration_weeks: project.duration_weeks,
            weekly_hours: project.weekly_hours,
            number_of_mentees: project.num_mentees,
            resources_link: project.resources_link.clone(),
            previously_completed: project.previously_completed,
            updated_at: project.updated_at.to_rfc3339(),
        }
    }
}

async fn load_active_project(project_id: i32) -> Result<ProjectModel, MentorApiError> {
    projects_db::get_active_project(project_id)
        .await?
        .ok_or(MentorApiError::NotFound)
}

async fn canonical_sops(project_id: i32) -> Result<Vec<SopEntry>, MentorApiError> {
    let rows = preferences_db::get_project_preferences(project_id).await?;
    Ok(rows
        .into_iter()
        .map(|(pref, user)| SopEntry {
            user_id: pref.user_id,
            user_name: user.as_ref().map(|u| u.name.clone()),
            user_email: user.as_ref().map(|u| u.email.clone()),
            sop: pref.sop,
            rank: pref.rank,
            submitted_at: pref.submitted_at.to_rfc3339(),
            updated_at: pref.updated_at.to_rfc3339(),
        })
        .collect())
}

/**
 * List the active projects the caller mentors, most recently updated first
 *
 * # Arguments
 * @param caller: &UserModel - The authenticated caller
 *
 * # Returns
 * @return Result<Vec<ProjectSummary>, MentorApiError> - The result of the operation
 */
pub async fn mentor_projects(caller: &UserModel) -> Result<Vec<ProjectSummary>, MentorApiError> {
    let projects = projects_db::get_mentor_projects(caller.id).await?;
    let mut items = Vec::with_capacity(projects.len());
    for project in projects {
        let preference_count = projects_db::count_project_preferences(project.id).await?;
        items.push(ProjectSummary {
            id: project.id,
            project_title: project.title,
            project_domain_1: project.domain1,
            project_domain_2: project.domain2,
            difficulty: project.difficulty,
            project_type: project.project_type,
            updated_at: project.updated_at.to_rfc3339(),
            // wish_count mirrors preference_count until a separate wishlist
            // entity exists; the frontend contract carries both names.
            wish_count: preference_count,
            preference_count,
        });
    }
    Ok(items)
}

/**
 * Project detail plus the canonical ordered submission list.
 * Owner/co-mentor only; staff is not exempt here.
 *
 * # Arguments
 * @param caller: &UserModel - The authenticated caller
 * @param project_id: i32 - The project id
 *
 * # Returns
 * @return Result<(ProjectDetail, Vec<SopEntry>), MentorApiError> - The result of the operation
 */
pub async fn project_with_sops(
    caller: &UserModel,
    project_id: i32,
) -> Result<(ProjectDetail, Vec<SopEntry>), MentorApiError> {
    let project = load_active_project(project_id).await?;
    authorize(caller, &project, AccessPolicy::OwnerOrCoMentor)?;
    let sops = canonical_sops(project_id).await?;
    Ok((ProjectDetail::from_model(&project), sops))
}

/**
 * Apply a batch ranking update: authorize, validate the payload in full,
 * then mutate transactionally and re-read the canonical ordering.
 *
 * # Arguments
 * @param caller: &UserModel - The authenticated caller
 * @param project_id: i32 - The project id
 * @param body: &[u8] - The raw request body
 *
 * # Returns
 * @return Result<RankingUpdateOutcome, MentorApiError> - The result of the operation
 */
pub async fn update_rankings(
    caller: &UserModel,
    project_id: i32,
    body: &[u8],
) -> Result<RankingUpdateOutcome, MentorApiError> {
    let project = load_active_project(project_id).await?;
    authorize(caller, &project, AccessPolicy::OwnerOrCoMentor)?;
    let write_set = rankings::parse_rankings_payload(body)?;

    let outcome = preferences_db::update_rankings(project_id, &write_set).await?;
    let updated = match outcome {
        RankingBatchOutcome::Applied(rows) => rows
            .into_iter()
            .map(|row| UpdatedRank {
                user_id: row.user_id,
                rank: row.rank,
                updated_at: row.updated_at.to_rfc3339(),
            })
            .collect(),
        RankingBatchOutcome::MissingPreferences(missing) => {
            return Err(RankingPayloadError::PreferencesNotFound(missing).into());
        }
        RankingBatchOutcome::ConstraintViolation { message } => {
            log::error!("ranking batch for project {project_id} rolled back: {message}");
            return Err(RankingPayloadError::ValidationFailed(message).into());
        }
    };

    let sops = canonical_sops(project_id).await?;
    Ok(RankingUpdateOutcome { updated, sops })
}

/**
 * The calling mentor's own rankings for a project, with SOPs joined in.
 * Owner/co-mentor or staff.
 *
 * # Arguments
 * @param caller: &UserModel - The authenticated caller
 * @param project_id: i32 - The project id
 *
 * # Returns
 * @return Result<Vec<MentorRankingEntry>, MentorApiError> - The result of the operation
 */
pub async fn my_rankings(
    caller: &UserModel,
    project_id: i32,
) -> Result<Vec<MentorRankingEntry>, MentorApiError> {
    let project = load_active_project(project_id).await?;
    authorize(caller, &project, AccessPolicy::OwnerOrCoMentorOrStaff)?;
    let rows = rankings_db::get_mentor_rankings(project_id, caller.id).await?;
    Ok(rows
        .into_iter()
        .map(|row| MentorRankingEntry {
            student_id: row.student.id,
            student_name: row.student.name,
            student_email: row.student.email,
            student_roll_no: row.student.roll_no,
            rank: row.ranking.rank,
            sop: row.sop,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use mportal_database::models;
    use mportal_database::sea_orm::{ActiveModelTrait, Set};
    use mportal_database::{get_database_connection, setup_test_environment};
    use serial_test::serial;

    async fn seed_user(name: &str, is_staff: bool) -> UserModel {
        let conn = get_database_connection().await.unwrap();
        models::users::ActiveModel {
            name: Set(name.to_string()),
            email: Set(format!("{}@example.edu", name.to_lowercase())),
            roll_no: Set(None),
            is_staff: Set(is_staff),
            is_mentor: Set(true),
            auth_token: Set(None),
            ..Default::default()
        }
        .insert(&conn)
        .await
        .unwrap()
    }

    async fn seed_project(owner_id: i32) -> ProjectModel {
        let conn = get_database_connection().await.unwrap();
        models::projects::ActiveModel {
            title: Set("NLP for lecture notes".to_string()),
            domain1: Set("NLP".to_string()),
            domain2: Set(Some("Education".to_string())),
            description: Set("Summarize lecture transcripts".to_string()),
            difficulty: Set("Hard".to_string()),
            project_type: Set("Development".to_string()),
            duration_weeks: Set(10),
            weekly_hours: Set(8),
            num_mentees: Set(2),
            resources_link: Set(String::new()),
            previously_completed: Set(true),
            owner_id: Set(owner_id),
            co_mentor_id: Set(None),
            is_active: Set(true),
            updated_at: Set(Utc.with_ymd_and_hms(2026, 2, 1, 12, 0, 0).unwrap()),
            ..Default::default()
        }
        .insert(&conn)
        .await
        .unwrap()
    }

    async fn seed_preference(project_id: i32, user_id: i32, rank: Option<i16>) {
        let conn = get_database_connection().await.unwrap();
        let at = Utc.with_ymd_and_hms(2026, 2, 2, 9, user_id as u32 % 60, 0).unwrap();
        models::preferences::ActiveModel {
            project_id: Set(project_id),
            user_id: Set(user_id),
            sop: Set("I want to work on this".to_string()),
            rank: Set(rank),
            submitted_at: Set(at),
            updated_at: Set(at),
            ..Default::default()
        }
        .insert(&conn)
        .await
        .unwrap();
    }

    #[tokio::test]
    #[serial]
    async fn staff_asymmetry_across_endpoints() {
        setup_test_environment().await;
        let owner = seed_user("Owner", false).await;
        let staff = seed_user("Staff", true).await;
        let project = seed_project(owner.id).await;

        // Staff cannot read SOPs or write rankings...
        assert!(matches!(
            project_with_sops(&staff, project.id).await,
            Err(MentorApiError::Forbidden)
        ));
        assert!(matches!(
            update_rankings(&staff, project.id, br#"{"rankings":[]}"#).await,
            Err(MentorApiError::Forbidden)
        ));
        // ...but may read their own rankings view.
        assert!(my_rankings(&staff, project.id).await.is_ok());
    }

    #[tokio::test]
    #[serial]
    async fn missing_project_is_not_found_before_authorization() {
        setup_test_environment().await;
        let caller = seed_user("Anyone", false).await;
        assert!(matches!(
            project_with_sops(&caller, 4242).await,
            Err(MentorApiError::NotFound)
        ));
        assert!(matches!(
            my_rankings(&caller, 4242).await,
            Err(MentorApiError::NotFound)
        ));
    }

    #[tokio::test]
    #[serial]
    async fn duplicate_ranks_reject_the_batch_without_writes() {
        setup_test_environment().await;
        let owner = seed_user("Owner", false).await;
        let project = seed_project(owner.id).await;
        let s1 = seed_user("S1", false).await;
        let s2 = seed_user("S2", false).await;
        seed_preference(project.id, s1.id, Some(1)).await;
        seed_preference(project.id, s2.id, Some(2)).await;

        let body = format!(
            r#"{{"rankings":[{{"user_id":{},"rank":9}},{{"user_id":{},"rank":9}}]}}"#,
            s1.id, s2.id
        );
        let err = update_rankings(&owner, project.id, body.as_bytes())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            MentorApiError::Payload(RankingPayloadError::DuplicateRanks)
        ));

        let (_, sops) = project_with_sops(&owner, project.id).await.unwrap();
        let ranks: Vec<Option<i16>> = sops.iter().map(|s| s.rank).collect();
        assert_eq!(ranks, vec![Some(1), Some(2)]);
    }

    #[tokio::test]
    #[serial]
    async fn update_reports_missing_user_ids() {
        setup_test_environment().await;
        let owner = seed_user("Owner", false).await;
        let project = seed_project(owner.id).await;
        let s1 = seed_user("S1", false).await;
        seed_preference(project.id, s1.id, None).await;

        let body = format!(
            r#"{{"rankings":[{{"user_id":{},"rank":1}},{{"user_id":777,"rank":2}}]}}"#,
            s1.id
        );
        let err = update_rankings(&owner, project.id, body.as_bytes())
            .await
            .unwrap_err();
        match err {
            MentorApiError::Payload(RankingPayloadError::PreferencesNotFound(ids)) => {
                assert_eq!(ids, vec![777]);
            }
            other => panic!("expected PreferencesNotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    #[serial]
    async fn update_returns_fresh_canonical_ordering() {
        setup_test_environment().await;
        let owner = seed_user("Owner", false).await;
        let project = seed_project(owner.id).await;
        let a = seed_user("A", false).await;
        let b = seed_user("B", false).await;
        let c = seed_user("C", false).await;
        seed_preference(project.id, a.id, None).await;
        seed_preference(project.id, b.id, Some(2)).await;
        seed_preference(project.id, c.id, Some(1)).await;

        let body = format!(r#"{{"rankings":[{{"user_id":{},"rank":3}}]}}"#, a.id);
        let outcome = update_rankings(&owner, project.id, body.as_bytes())
            .await
            .unwrap();
        assert_eq!(outcome.updated.len(), 1);
        assert_eq!(outcome.updated[0].rank, Some(3));
        let order: Vec<i32> = outcome.sops.iter().map(|s| s.user_id).collect();
        assert_eq!(order, vec![c.id, b.id, a.id]);
    }

    #[tokio::test]
    #[serial]
    async fn project_summaries_carry_both_count_names() {
        setup_test_environment().await;
        let owner = seed_user("Owner", false).await;
        let project = seed_project(owner.id).await;
        let s1 = seed_user("S1", false).await;
        seed_preference(project.id, s1.id, None).await;

        let summaries = mentor_projects(&owner).await.unwrap();
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].id, project.id);
        assert_eq!(summaries[0].preference_count, 1);
        assert_eq!(summaries[0].wish_count, 1);
    }
}
