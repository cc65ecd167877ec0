/*
 * Responsibility
 * - GET /me (API key で認証された principal を返す)
 */
use axum::Json;
use serde::Serialize;

use crate::api::v1::extractors::AuthCtxExtractor;

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub principal: String,
}

pub async fn me(AuthCtxExtractor(ctx): AuthCtxExtractor) -> Json<MeResponse> {
    Json(MeResponse {
        principal: ctx.principal,
    })
}
