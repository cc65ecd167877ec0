//! `Authorization: ApiKey <key>` 検証 → AuthCtx を extensions に入れる
//!
//! 1. ヘッダから credential を取り出す (`services::auth::extract_api_key`)
//! 2. `ApiKeyStore` で principal を引く
//! 3. 成功なら `AuthCtx` を request extensions に格納、失敗なら 401

use axum::{
    Router,
    body::Body,
    extract::State,
    http::Request,
    middleware::{self, Next},
    response::Response,
};

use crate::api::v1::extractors::AuthCtx;
use crate::error::AppError;
use crate::services::auth::extract_api_key;
use crate::state::AppState;

/// 保護したい Router に API key 認証を掛ける。
///
/// 例：
/// ```ignore
/// let protected = middleware::auth::api_key::apply(protected, state.clone());
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    router.layer(middleware::from_fn_with_state(state, api_key_middleware))
}

async fn api_key_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let key = match extract_api_key(req.headers()) {
        Ok(key) => key,
        Err(err) => {
            tracing::warn!(error = %err, "api key extraction failed");
            return Err(err.into());
        }
    };

    let principal = match state.api_keys.lookup(&key).await {
        Ok(Some(principal)) => principal,
        Ok(None) => {
            tracing::warn!("unknown api key");
            return Err(AppError::invalid_api_key());
        }
        Err(err) => {
            tracing::warn!(error = ?err, "api key store failure");
            return Err(err.into());
        }
    };

    tracing::debug!(%principal, "api key accepted");

    // middleware → extractor への受け渡し
    req.extensions_mut().insert(AuthCtx::new(principal));

    Ok(next.run(req).await)
}
