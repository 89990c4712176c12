use std::fmt::Display;

use actix_web::http::StatusCode;
use mportal_database::sea_orm::DbErr;
use serde_json::{json, Value};

/// Errors surfaced by the mentor operations. Each maps to one HTTP status
/// and one `{ok:false, error:<code>, ...}` body; nothing is swallowed.
#[derive(Debug)]
pub enum MentorApiError {
    Unauthenticated,
    Forbidden,
    NotFound,
    Payload(RankingPayloadError),
    Database(String),
}

/// Payload and domain validation failures of the batch ranking update,
/// in the order they are checked. Any failure rejects the whole batch
/// before a single row is written.
#[derive(Debug, PartialEq, Eq)]
pub enum RankingPayloadError {
    BadJson,
    RankingsArrayRequired,
    EntryMissingUserId,
    InvalidUserId,
    InvalidRankValue,
    RankOutOfRange,
    DuplicateRanks,
    /// These user ids have no preference row for the project.
    PreferencesNotFound(Vec<i32>),
    /// The storage layer rejected the batch at commit time; rolled back.
    ValidationFailed(String),
}

impl RankingPayloadError {
    pub fn code(&self) -> &'static str {
        match self {
            RankingPayloadError::BadJson => "bad_json",
            RankingPayloadError::RankingsArrayRequired => "rankings_array_required",
            RankingPayloadError::EntryMissingUserId => "each_entry_must_have_user_id",
            RankingPayloadError::InvalidUserId => "invalid_user_id",
            RankingPayloadError::InvalidRankValue => "invalid_rank_value",
            RankingPayloadError::RankOutOfRange => "rank_out_of_range",
            RankingPayloadError::DuplicateRanks => "duplicate_ranks",
            RankingPayloadError::PreferencesNotFound(_) => "preferences_not_found",
            RankingPayloadError::ValidationFailed(_) => "validation_failed",
        }
    }

    pub fn body(&self) -> Value {
        match self {
            RankingPayloadError::PreferencesNotFound(missing) => json!({
                "ok": false,
                "error": self.code(),
                "missing_user_ids": missing,
            }),
            RankingPayloadError::ValidationFailed(message) => json!({
                "ok": false,
                "error": self.code(),
                "details": [message],
            }),
            _ => json!({ "ok": false, "error": self.code() }),
        }
    }
}

impl Display for RankingPayloadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl MentorApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            MentorApiError::Unauthenticated => StatusCode::UNAUTHORIZED,
            MentorApiError::Forbidden => StatusCode::FORBIDDEN,
            MentorApiError::NotFound => StatusCode::NOT_FOUND,
            MentorApiError::Payload(_) => StatusCode::BAD_REQUEST,
            MentorApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn body(&self) -> Value {
        match self {
            MentorApiError::Unauthenticated => json!({"ok": false, "error": "unauthenticated"}),
            MentorApiError::Forbidden => json!({"ok": false, "error": "forbidden"}),
            MentorApiError::NotFound => json!({"ok": false, "error": "not_found"}),
            MentorApiError::Payload(e) => e.body(),
            MentorApiError::Database(_) => json!({"ok": false, "error": "internal"}),
        }
    }
}

impl Display for MentorApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MentorApiError::Unauthenticated => write!(f, "unauthenticated"),
            MentorApiError::Forbidden => write!(f, "forbidden"),
            MentorApiError::NotFound => write!(f, "not_found"),
            MentorApiError::Payload(e) => write!(f, "{e}"),
            MentorApiError::Database(e) => write!(f, "database error: {e}"),
        }
    }
}

impl From<DbErr> for MentorApiError {
    fn from(e: DbErr) -> Self {
        MentorApiError::Database(e.to_string())
    }
}

impl From<RankingPayloadError> for MentorApiError {
    fn from(e: RankingPayloadError) -> Self {
        MentorApiError::Payload(e)
    }
}
