use actix_web::{get, HttpResponse, Responder};

pub mod mentor;

/// Return server health status
#[get("/health")]
pub async fn health() -> actix_web::Result<impl Responder> {
    Ok(HttpResponse::Ok().body("OK"))
}
