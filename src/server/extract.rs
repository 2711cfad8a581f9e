use crate::db::DbHandle;
use crate::error::RazasError;
use crate::server::router::RazasState;
use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, HeaderName, request::Parts},
};
use razas_dbpool::{ConnectionError, Profile};

pub const X_DB_PROFILE: HeaderName = HeaderName::from_static("x-db-profile");

fn extract_header_profile(headers: &HeaderMap) -> Option<String> {
    headers
        .get(X_DB_PROFILE)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn extract_query_profile(query: Option<&str>) -> Option<String> {
    query.and_then(|q| {
        url::form_urlencoded::parse(q.as_bytes())
            .find(|(k, v)| k == "db" && !v.is_empty())
            .map(|(_, v)| v.into_owned())
    })
}

/// Live handle for the profile a request selected.
///
/// `x-db-profile` wins over `?db=`; with neither the configured default is used.
#[derive(Debug, Clone)]
pub struct DbConn {
    pub profile: Profile,
    pub handle: DbHandle,
}

impl FromRequestParts<RazasState> for DbConn {
    type Rejection = RazasError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &RazasState,
    ) -> Result<Self, Self::Rejection> {
        let requested = extract_header_profile(&parts.headers)
            .or_else(|| extract_query_profile(parts.uri.query()));

        let profile = match requested {
            Some(name) => name.parse::<Profile>().map_err(ConnectionError::from)?,
            None => state.default_profile,
        };
        let handle = state.pool.acquire_profile(profile).await?;
        Ok(DbConn { profile, handle })
    }
}
