use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpResponse,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::header::{AUTHORIZATION, CONTENT_TYPE, WWW_AUTHENTICATE},
};
use base64::Engine;
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use std::sync::Arc;
use subtle::ConstantTimeEq;
use tracing::{info, trace, warn};

use crate::api::services::admin::{ApiResponse, ErrorCode};
use crate::config::AdminConfig;

/// 管理端凭据（单一共享账号）
#[derive(Clone, Debug)]
struct Credentials {
    username: String,
    password: String,
    realm: String,
}

impl Credentials {
    fn is_configured(&self) -> bool {
        !self.username.is_empty() && !self.password.is_empty()
    }

    /// 用户名和密码都以常量时间比较
    fn matches(&self, username: &str, password: &str) -> bool {
        let user_ok = username.as_bytes().ct_eq(self.username.as_bytes());
        let pass_ok = password.as_bytes().ct_eq(self.password.as_bytes());
        (user_ok & pass_ok).into()
    }
}

/// Admin authentication middleware (HTTP Basic)
#[derive(Clone)]
pub struct AdminAuth {
    credentials: Arc<Credentials>,
}

impl AdminAuth {
    pub fn new(admin: &AdminConfig) -> Self {
        if admin.username.is_empty() || admin.password.is_empty() {
            warn!("Admin credentials are not configured - all admin routes will return 401");
        }
        Self {
            credentials: Arc::new(Credentials {
                username: admin.username.clone(),
                password: admin.password.clone(),
                realm: admin.realm.clone(),
            }),
        }
    }

    pub fn from_config() -> Self {
        Self::new(&crate::config::get_config().admin)
    }
}

impl<S, B> Transform<S, ServiceRequest> for AdminAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = AdminAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AdminAuthMiddleware {
            service: Rc::new(service),
            credentials: self.credentials.clone(),
        }))
    }
}

pub struct AdminAuthMiddleware<S> {
    service: Rc<S>,
    credentials: Arc<Credentials>,
}

impl<S, B> AdminAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    /// 401 + Basic 质询头
    fn handle_unauthorized(req: ServiceRequest, realm: &str) -> ServiceResponse<EitherBody<B>> {
        info!(
            "Admin authentication failed for {} {}",
            req.method(),
            req.path()
        );
        req.into_response(
            HttpResponse::Unauthorized()
                .insert_header((WWW_AUTHENTICATE, format!("Basic realm=\"{}\"", realm)))
                .insert_header((CONTENT_TYPE, "application/json; charset=utf-8"))
                .json(ApiResponse::<()> {
                    code: ErrorCode::Unauthorized as i32,
                    message: "Authentication required.".to_string(),
                    data: None,
                })
                .map_into_right_body(),
        )
    }
}

/// 从 Authorization header 解析 Basic 凭据
fn extract_basic_credentials(req: &ServiceRequest) -> Option<(String, String)> {
    let header = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, encoded) = header.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }
    let decoded = base64::engine::general_purpose::STANDARD
        .decode(encoded.trim())
        .ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (user, pass) = decoded.split_once(':')?;
    Some((user.to_string(), pass.to_string()))
}

impl<S, B> Service<ServiceRequest> for AdminAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        let credentials = self.credentials.clone();

        Box::pin(async move {
            // 未配置凭据时一律拒绝
            if !credentials.is_configured() {
                return Ok(Self::handle_unauthorized(req, &credentials.realm));
            }

            match extract_basic_credentials(&req) {
                Some((user, pass)) if credentials.matches(&user, &pass) => {
                    trace!("Admin authentication successful");
                    let response = srv.call(req).await?.map_into_left_body();
                    Ok(response)
                }
                _ => Ok(Self::handle_unauthorized(req, &credentials.realm)),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    fn basic(user: &str, pass: &str) -> String {
        format!(
            "Basic {}",
            base64::engine::general_purpose::STANDARD.encode(format!("{}:{}", user, pass))
        )
    }

    #[test]
    fn test_extract_basic_credentials() {
        let req = TestRequest::default()
            .insert_header((AUTHORIZATION, basic("admin", "s3cr:et")))
            .to_srv_request();
        assert_eq!(
            extract_basic_credentials(&req),
            Some(("admin".to_string(), "s3cr:et".to_string()))
        );
    }

    #[test]
    fn test_extract_rejects_other_schemes() {
        let req = TestRequest::default()
            .insert_header((AUTHORIZATION, "Bearer abc"))
            .to_srv_request();
        assert!(extract_basic_credentials(&req).is_none());

        let req = TestRequest::default()
            .insert_header((AUTHORIZATION, "Basic !!!not-base64"))
            .to_srv_request();
        assert!(extract_basic_credentials(&req).is_none());
    }

    #[test]
    fn test_credentials_match() {
        let creds = Credentials {
            username: "admin".to_string(),
            password: "hunter2".to_string(),
            realm: "Admin Area".to_string(),
        };
        assert!(creds.matches("admin", "hunter2"));
        assert!(!creds.matches("admin", "hunter3"));
        assert!(!creds.matches("root", "hunter2"));
        assert!(!creds.matches("", ""));
    }
}
