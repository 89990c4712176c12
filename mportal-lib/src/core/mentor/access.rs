use crate::error::MentorApiError;
use mportal_database::models::projects::Model as ProjectModel;
use mportal_database::models::users::Model as UserModel;

/// Who may act on a project. Staff access is deliberately asymmetric
/// across endpoints, so every caller names its policy explicitly instead
/// of going through one generic check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessPolicy {
    OwnerOrCoMentor,
    OwnerOrCoMentorOrStaff,
}

/**
 * Check whether a user mentors a project (as owner or co-mentor)
 *
 * # Arguments
 * @param user: &UserModel - The caller
 * @param project: &ProjectModel - The project
 *
 * # Returns
 * @return bool - true iff the user is the owner or the co-mentor
 */
pub fn is_project_mentor(user: &UserModel, project: &ProjectModel) -> bool {
    project.owner_id == user.id || project.co_mentor_id == Some(user.id)
}

/**
 * Gate a caller against a project under the given policy
 *
 * # Arguments
 * @param user: &UserModel - The caller
 * @param project: &ProjectModel - The project
 * @param policy: AccessPolicy - The endpoint's access policy
 *
 * # Returns
 * @return Result<(), MentorApiError> - Ok, or Forbidden
 */
pub fn authorize(
    user: &UserModel,
    project: &ProjectModel,
    policy: AccessPolicy,
) -> Result<(), MentorApiError> {
    let allowed = match policy {
        AccessPolicy::OwnerOrCoMentor => is_project_mentor(user, project),
        AccessPolicy::OwnerOrCoMentorOrStaff => user.is_staff || is_project_mentor(user, project),
    };
    if allowed {
        Ok(())
    } else {
        Err(MentorApiError::Forbidden)
    }
}
