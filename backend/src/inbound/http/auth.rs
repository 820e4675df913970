//! Sign-in, sign-out and session introspection handlers.
//!
//! ```text
//! POST /login            email=user@nextmail.com&password=123456
//! POST /logout
//! GET  /api/v1/session
//! ```

use actix_web::http::header;
use actix_web::{HttpResponse, get, post, web};
use serde::Deserialize;
use tracing::info;
use utoipa::ToSchema;
use zeroize::Zeroizing;

use crate::domain::{Error, Session};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Landing page after a successful sign-in.
pub const DASHBOARD_PATH: &str = "/dashboard";

/// Form body for `POST /login`. Missing fields are treated as empty.
#[derive(Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct LoginForm {
    #[schema(example = "user@nextmail.com")]
    pub email: String,
    #[schema(example = "123456")]
    pub password: String,
}

fn see_other(location: &'static str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// Verify credentials and establish a session.
#[utoipa::path(
    post,
    path = "/login",
    request_body(content = LoginForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Signed in; redirect to the dashboard",
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 401, description = "Invalid credentials", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 500, description = "Internal server error")
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Form<LoginForm>,
) -> ApiResult<HttpResponse> {
    let LoginForm { email, password } = form.into_inner();
    let password = Zeroizing::new(password);
    let user = state
        .login
        .verify(&email, &password)
        .await
        .map_err(|err| Error::unauthorized(err.to_string()))?;
    session.establish(&state.sessions, &user)?;
    info!(user_id = %user.id(), "user signed in");
    Ok(see_other(DASHBOARD_PATH))
}

/// Drop the session and return to the landing page.
#[utoipa::path(
    post,
    path = "/logout",
    responses((status = 303, description = "Signed out; redirect to the landing page")),
    tags = ["auth"],
    operation_id = "logout"
)]
#[post("/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.terminate();
    see_other("/")
}

/// Claims of the active session.
#[utoipa::path(
    get,
    path = "/api/v1/session",
    responses(
        (status = 200, description = "Active session", body = Session),
        (status = 303, description = "No active session; redirect to login")
    ),
    tags = ["auth"],
    operation_id = "currentSession"
)]
#[get("/session")]
pub async fn current_session(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> actix_web::Result<web::Json<Session>> {
    Ok(web::Json(session.require(&state.sessions)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::MockLoginService;
    use crate::domain::{AuthError, User, UserId};
    use crate::inbound::http::test_utils::{fixture_ports, session_cookie, test_app};
    use actix_web::http::StatusCode;
    use actix_web::test;
    use std::sync::Arc;

    fn verified_user() -> User {
        User::new(
            UserId::new("410544b2-4001-4271-9855-fec4b6a6442a").expect("fixture id"),
            "User",
            "user@nextmail.com",
        )
    }

    fn login_request(email: &str, password: &str) -> test::TestRequest {
        test::TestRequest::post()
            .uri("/login")
            .set_form([("email", email), ("password", password)])
    }

    #[actix_web::test]
    async fn login_sets_cookie_and_redirects() {
        let mut login_service = MockLoginService::new();
        login_service
            .expect_verify()
            .withf(|email, password| email == "user@nextmail.com" && password == "123456")
            .times(1)
            .return_once(|_, _| Ok(verified_user()));
        let mut ports = fixture_ports();
        ports.login = Arc::new(login_service);
        let app = test_app(ports).await;

        let res =
            test::call_service(&app, login_request("user@nextmail.com", "123456").to_request())
                .await;
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            res.headers().get(header::LOCATION).and_then(|v| v.to_str().ok()),
            Some(DASHBOARD_PATH)
        );
        let cookie = session_cookie(&res).expect("session cookie");

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/api/v1/session")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: serde_json::Value = test::read_body_json(res).await;
        assert_eq!(body["email"], "user@nextmail.com");
        assert_eq!(body["userId"], "410544b2-4001-4271-9855-fec4b6a6442a");
    }

    #[actix_web::test]
    async fn rejected_login_is_unauthorised_without_cookie() {
        let mut login_service = MockLoginService::new();
        login_service
            .expect_verify()
            .times(1)
            .return_once(|_, _| Err(AuthError::InvalidCredentials));
        let mut ports = fixture_ports();
        ports.login = Arc::new(login_service);
        let app = test_app(ports).await;

        let res =
            test::call_service(&app, login_request("user@nextmail.com", "wrong1").to_request())
                .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        assert!(session_cookie(&res).is_none());
        let body: serde_json::Value = test::read_body_json(res).await;
        assert_eq!(body["message"], "Invalid credentials.");
        assert_eq!(body["code"], "unauthorized");
    }

    #[actix_web::test]
    async fn missing_form_fields_are_rejected_as_credentials() {
        let app = test_app(fixture_ports()).await;
        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/login")
                .set_form([("email", "user@nextmail.com")])
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn session_endpoint_requires_login() {
        let app = test_app(fixture_ports()).await;
        let res = test::call_service(
            &app,
            test::TestRequest::get().uri("/api/v1/session").to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            res.headers().get(header::LOCATION).and_then(|v| v.to_str().ok()),
            Some("/login")
        );
    }

    #[actix_web::test]
    async fn logout_redirects_home() {
        let app = test_app(fixture_ports()).await;
        let res =
            test::call_service(&app, test::TestRequest::post().uri("/logout").to_request()).await;
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            res.headers().get(header::LOCATION).and_then(|v| v.to_str().ok()),
            Some("/")
        );
    }
}
