//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! [`SessionContext`] wraps the Actix cookie session and speaks in domain
//! [`Session`] claims. Reads never fail: anything other than a decodable,
//! unexpired claim set is treated as "no session" and purged.

use std::fmt;

use actix_session::Session as CookieSession;
use actix_web::http::{StatusCode, header};
use actix_web::{FromRequest, HttpRequest, HttpResponse, ResponseError, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::{debug, warn};

use crate::domain::{Error, Session, SessionAuthority, User};

pub(crate) const SESSION_KEY: &str = "session";

/// Where unauthenticated visitors are sent.
pub const LOGIN_PATH: &str = "/login";

/// Raised when a protected route is requested without a valid session.
///
/// Renders as `303 See Other` pointing at the login page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoginRequired;

impl fmt::Display for LoginRequired {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("login required")
    }
}

impl ResponseError for LoginRequired {
    fn status_code(&self) -> StatusCode {
        StatusCode::SEE_OTHER
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::SeeOther()
            .insert_header((header::LOCATION, LOGIN_PATH))
            .finish()
    }
}

/// Newtype wrapper that exposes session operations in domain terms.
#[derive(Clone)]
pub struct SessionContext(CookieSession);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: CookieSession) -> Self {
        Self(session)
    }

    /// Issue a session for `user`, rotate the cookie and persist the claims.
    pub fn establish(&self, authority: &SessionAuthority, user: &User) -> Result<Session, Error> {
        let session = authority.issue(user);
        self.0.renew();
        self.0
            .insert(SESSION_KEY, &session)
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))?;
        Ok(session)
    }

    /// The active session, if any. Expired or unreadable claims are purged.
    pub fn current_session(&self, authority: &SessionAuthority) -> Option<Session> {
        let stored = match self.0.get::<Session>(SESSION_KEY) {
            Ok(stored) => stored?,
            Err(error) => {
                warn!(%error, "discarding unreadable session claims");
                self.0.purge();
                return None;
            }
        };
        let user_id = stored.user_id;
        let active = authority.validate(stored);
        if active.is_none() {
            debug!(%user_id, "session expired");
            self.0.purge();
        }
        active
    }

    /// The active session or [`LoginRequired`].
    pub fn require(&self, authority: &SessionAuthority) -> Result<Session, LoginRequired> {
        self.current_session(authority).ok_or(LoginRequired)
    }

    /// Drop the session and clear the cookie.
    pub fn terminate(&self) {
        self.0.purge();
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = CookieSession::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserId;
    use crate::inbound::http::test_utils::{self, test_session_middleware};
    use crate::test_support::MutableClock;
    use actix_web::cookie::Cookie;
    use actix_web::{App, test, web};
    use chrono::{TimeDelta, TimeZone, Utc};
    use std::sync::Arc;

    fn clock() -> Arc<MutableClock> {
        let start = Utc
            .with_ymd_and_hms(2024, 5, 1, 9, 0, 0)
            .single()
            .expect("valid timestamp");
        Arc::new(MutableClock::new(start))
    }

    fn user() -> User {
        User::new(
            UserId::new("410544b2-4001-4271-9855-fec4b6a6442a").expect("fixture id"),
            "User",
            "user@nextmail.com",
        )
    }

    async fn login_and_check_app(
        authority: SessionAuthority,
    ) -> impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    > {
        test::init_service(
            App::new()
                .app_data(web::Data::new(authority))
                .wrap(test_session_middleware())
                .route(
                    "/establish",
                    web::get().to(
                        |session: SessionContext, authority: web::Data<SessionAuthority>| async move {
                            session.establish(&authority, &user())?;
                            Ok::<_, Error>(HttpResponse::Ok().finish())
                        },
                    ),
                )
                .route(
                    "/me",
                    web::get().to(
                        |session: SessionContext, authority: web::Data<SessionAuthority>| async move {
                            let current = session.require(&authority)?;
                            Ok::<_, actix_web::Error>(HttpResponse::Ok().body(current.email))
                        },
                    ),
                )
                .route(
                    "/logout",
                    web::get().to(|session: SessionContext| async move {
                        session.terminate();
                        HttpResponse::Ok().finish()
                    }),
                ),
        )
        .await
    }

    fn session_cookie(res: &actix_web::dev::ServiceResponse) -> Cookie<'static> {
        test_utils::session_cookie(res).expect("session cookie set")
    }

    #[actix_web::test]
    async fn established_session_round_trips() {
        let app = login_and_check_app(SessionAuthority::new(clock(), TimeDelta::minutes(120))).await;
        let res =
            test::call_service(&app, test::TestRequest::get().uri("/establish").to_request()).await;
        assert_eq!(res.status(), StatusCode::OK);
        let cookie = session_cookie(&res);

        let res = test::call_service(
            &app,
            test::TestRequest::get().uri("/me").cookie(cookie).to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(test::read_body(res).await, "user@nextmail.com");
    }

    #[actix_web::test]
    async fn missing_session_redirects_to_login() {
        let app = login_and_check_app(SessionAuthority::default()).await;
        let res = test::call_service(&app, test::TestRequest::get().uri("/me").to_request()).await;
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            res.headers().get(header::LOCATION).and_then(|v| v.to_str().ok()),
            Some(LOGIN_PATH)
        );
    }

    #[actix_web::test]
    async fn expired_session_is_treated_as_absent() {
        let clock = clock();
        let app =
            login_and_check_app(SessionAuthority::new(clock.clone(), TimeDelta::minutes(5))).await;
        let res =
            test::call_service(&app, test::TestRequest::get().uri("/establish").to_request()).await;
        let cookie = session_cookie(&res);

        clock.advance_seconds(5 * 60);
        let res = test::call_service(
            &app,
            test::TestRequest::get().uri("/me").cookie(cookie).to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
    }

    #[actix_web::test]
    async fn tampered_cookie_is_treated_as_absent() {
        let app = login_and_check_app(SessionAuthority::default()).await;
        let res =
            test::call_service(&app, test::TestRequest::get().uri("/establish").to_request()).await;
        let mut cookie = session_cookie(&res);
        let mut value = cookie.value().to_owned();
        value.replace_range(0..1, if value.starts_with('A') { "B" } else { "A" });
        cookie.set_value(value);

        let res = test::call_service(
            &app,
            test::TestRequest::get().uri("/me").cookie(cookie).to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
    }

    #[actix_web::test]
    async fn terminate_clears_the_cookie() {
        let app = login_and_check_app(SessionAuthority::default()).await;
        let res =
            test::call_service(&app, test::TestRequest::get().uri("/establish").to_request()).await;
        let cookie = session_cookie(&res);

        let res = test::call_service(
            &app,
            test::TestRequest::get().uri("/logout").cookie(cookie).to_request(),
        )
        .await;
        let cleared = session_cookie(&res);
        assert_eq!(cleared.value(), "");
    }
}
