//! Access decisions for the HTTP surface.
//!
//! Token verification happens upstream in the OAuth2 resource server layer,
//! which stores the decoded [`IdentityClaims`] in the request extensions.
//! [`attach_caller`] turns them into a [`Caller`], and each route declares
//! the [`Access`] level it needs via [`guarded`].

use crate::error::AppError;
use axum::{
    extract::Request,
    middleware::{self, Next},
    response::Response,
    routing::MethodRouter,
};
use serde::Deserialize;

/// Claims this service reads from a verified access token
#[derive(Debug, Clone, Deserialize)]
pub struct IdentityClaims {
    pub sub: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, rename = "isAdmin")]
    pub is_admin: bool,
}

/// The authenticated principal of a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    pub identity: String,
    pub is_admin: bool,
}

impl Caller {
    pub fn new(identity: impl Into<String>, is_admin: bool) -> Self {
        Self {
            identity: identity.into(),
            is_admin,
        }
    }

    /// Admins may act on any user record, everyone else only on their own
    pub fn may_view_user(&self, username: &str) -> bool {
        self.is_admin || self.identity == username
    }
}

impl From<&IdentityClaims> for Caller {
    fn from(claims: &IdentityClaims) -> Self {
        Self::new(claims.sub.clone(), claims.is_admin)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    Authenticated,
    Admin,
}

pub async fn attach_caller(mut request: Request, next: Next) -> Response {
    let caller = request.extensions().get::<IdentityClaims>().map(Caller::from);
    if let Some(caller) = caller {
        request.extensions_mut().insert(caller);
    }

    next.run(request).await
}

async fn require_identity(request: Request, next: Next) -> Result<Response, AppError> {
    if request.extensions().get::<Caller>().is_none() {
        return Err(AppError::Unauthorized);
    }

    Ok(next.run(request).await)
}

async fn require_admin(request: Request, next: Next) -> Result<Response, AppError> {
    match request.extensions().get::<Caller>() {
        None => Err(AppError::Unauthorized),
        Some(caller) if !caller.is_admin => Err(AppError::Forbidden),
        Some(_) => Ok(next.run(request).await),
    }
}

/// Wraps a method router so it only runs for callers meeting `access`
pub fn guarded<S>(access: Access, route: MethodRouter<S>) -> MethodRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    match access {
        Access::Public => route,
        Access::Authenticated => route.route_layer(middleware::from_fn(require_identity)),
        Access::Admin => route.route_layer(middleware::from_fn(require_admin)),
    }
}
