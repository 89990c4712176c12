use actix_web::{get, post, web, HttpResponse, Responder};
use serde_json::json;

use crate::auth::Authorized;
use mportal_lib::core::mentor;
use mportal_lib::error::MentorApiError;

fn error_response(e: &MentorApiError) -> HttpResponse {
    if let MentorApiError::Database(message) = e {
        log::error!("mentor endpoint database error: {message}");
    }
    HttpResponse::build(e.status_code()).json(e.body())
}

/**
 * List the projects the caller mentors
 *
 * # Returns
 * @return HttpResponse - The result of the operation
 */
#[get("/mentor/projects")]
pub async fn projects(auth: Authorized) -> impl Responder {
    match mentor::mentor_projects(&auth.0).await {
        Ok(projects) => HttpResponse::Ok().json(json!({"ok": true, "projects": projects})),
        Err(e) => error_response(&e),
    }
}

/**
 * Project detail plus submitted SOPs in canonical order
 *
 * # Arguments
 * @param id: web::Path<i32> - The project id
 *
 * # Returns
 * @return HttpResponse - The result of the operation
 */
#[get("/mentor/project/{id}/sops")]
pub async fn project_sops(auth: Authorized, id: web::Path<i32>) -> impl Responder {
    match mentor::project_with_sops(&auth.0, id.into_inner()).await {
        Ok((project, sops)) => {
            HttpResponse::Ok().json(json!({"ok": true, "project": project, "sops": sops}))
        }
        Err(e) => error_response(&e),
    }
}

/**
 * Apply a batch ranking update and return the fresh canonical ordering
 *
 * # Arguments
 * @param id: web::Path<i32> - The project id
 * @param body: web::Bytes - Raw JSON body, `{"rankings": [{"user_id", "rank"}]}`
 *
 * # Returns
 * @return HttpResponse - The result of the operation
 */
#[post("/mentor/project/{id}/rankings")]
pub async fn update_rankings(
    auth: Authorized,
    id: web::Path<i32>,
    body: web::Bytes,
) -> impl Responder {
    match mentor::update_rankings(&auth.0, id.into_inner(), &body).await {
        Ok(outcome) => HttpResponse::Ok().json(json!({
            "ok": true,
            "updated": outcome.updated,
            "sops": outcome.sops,
        })),
        Err(e) => error_response(&e),
    }
}

/**
 * The calling mentor's own rankings for a project
 *
 * # Arguments
 * @param id: web::Path<i32> - The project id
 *
 * # Returns
 * @return HttpResponse - The result of the operation
 */
#[get("/mentor/project/{id}/my_rankings")]
pub async fn my_rankings(auth: Authorized, id: web::Path<i32>) -> impl Responder {
    let project_id = id.into_inner();
    match mentor::my_rankings(&auth.0, project_id).await {
        Ok(rankings) => HttpResponse::Ok().json(json!({
            "ok": true,
            "project_id": project_id,
            "rankings": rankings,
        })),
        Err(e) => error_response(&e),
    }
}
