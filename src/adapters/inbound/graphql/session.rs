use super::context::RequestContext;
use super::types::{CurrentUser, LoginPayload, LogoutPayload, RenewSessionPayload};
use crate::application::use_cases::ManageSessionUseCase;
use async_graphql::{Context, Object, Result};
use axum::http::header::SET_COOKIE;

#[derive(Default)]
pub struct SessionQuery;

#[Object]
impl SessionQuery {
    async fn current_user(&self, ctx: &Context<'_>) -> Result<CurrentUser> {
        let session = ctx.data::<RequestContext>()?.session()?;
        Ok(CurrentUser {
            username: session.credentials.username.clone(),
            timezone: session.timezone.clone(),
            session_timeout: session.expires_at,
        })
    }

    /// GMP version reported by gvmd
    async fn gmp_version(&self, ctx: &Context<'_>) -> Result<String> {
        let gmp = ctx.data::<RequestContext>()?.gmp().await?;
        Ok(gmp.get_version().await?)
    }
}

#[derive(Default)]
pub struct SessionMutation;

#[Object]
impl SessionMutation {
    /// Checks the credentials against gvmd and starts a session.
    async fn login(&self, ctx: &Context<'_>, username: String, password: String) -> Result<LoginPayload> {
        let request = ctx.data::<RequestContext>()?;
        let session = ManageSessionUseCase::new(request.sessions(), request.connector())
            .login(&username, &password)
            .await?;

        ctx.append_http_header(SET_COOKIE, request.cookies().session_cookie(&session.id));
        Ok(LoginPayload {
            ok: true,
            timezone: session.timezone,
            session_timeout: session.expires_at,
        })
    }

    async fn logout(&self, ctx: &Context<'_>) -> Result<LogoutPayload> {
        let request = ctx.data::<RequestContext>()?;
        ManageSessionUseCase::new(request.sessions(), request.connector())
            .logout(request.cookie_session_id())
            .await?;

        ctx.append_http_header(SET_COOKIE, request.cookies().expired_cookie());
        Ok(LogoutPayload { ok: true })
    }

    async fn renew_session(&self, ctx: &Context<'_>) -> Result<RenewSessionPayload> {
        let request = ctx.data::<RequestContext>()?;
        let session = ManageSessionUseCase::new(request.sessions(), request.connector())
            .renew(request.cookie_session_id())
            .await?;

        ctx.append_http_header(SET_COOKIE, request.cookies().session_cookie(&session.id));
        Ok(RenewSessionPayload {
            timeout_time: session.expires_at,
        })
    }
}
