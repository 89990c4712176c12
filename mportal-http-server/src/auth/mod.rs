use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest, HttpResponse};
use futures_util::future::LocalBoxFuture;

use mportal_database::database::users as users_db;
use mportal_database::models::users::Model as UserModel;
use mportal_lib::error::MentorApiError;

/// The authenticated caller, resolved from the `Authorization: Bearer`
/// token. Token issuance and session lifecycle belong to the auth
/// service; this extractor only resolves tokens to users.
pub struct Authorized(pub UserModel);

fn unauthenticated() -> actix_web::Error {
    let err = MentorApiError::Unauthenticated;
    actix_web::error::InternalError::from_response(
        "unauthenticated",
        HttpResponse::build(err.status_code()).json(err.body()),
    )
    .into()
}

impl FromRequest for Authorized {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let token = req
            .headers()
            .get("Authorization")
            .and_then(|hv| hv.to_str().ok())
            .filter(|hv| hv.starts_with("Bearer "))
            .map(|hv| hv["Bearer ".len()..].to_string());

        Box::pin(async move {
            let Some(token) = token else {
                return Err(unauthenticated());
            };
            match users_db::get_user_by_auth_token(&token).await {
                Ok(Some(user)) => Ok(Authorized(user)),
                Ok(None) => Err(unauthenticated()),
                Err(e) => {
                    log::error!("auth token lookup failed: {e}");
                    Err(actix_web::error::ErrorInternalServerError(
                        "auth token lookup failed",
                    ))
                }
            }
        })
    }
}
