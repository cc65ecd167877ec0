/// API key 認証を通過したリクエストに付与されるコンテキスト
///
/// - `principal` は `API_KEYS` で key に紐づけた名前
#[derive(Debug, Clone)]
pub struct AuthCtx {
    pub principal: String,
}

impl AuthCtx {
    pub fn new(principal: impl Into<String>) -> Self {
        Self {
            principal: principal.into(),
        }
    }
}
