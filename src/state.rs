/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - ex: api_keys: Arc<dyn ApiKeyStore>
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 */
use std::sync::Arc;

use crate::services::auth::ApiKeyStore;

#[derive(Clone)]
pub struct AppState {
    pub api_keys: Arc<dyn ApiKeyStore>,
}

impl AppState {
    pub fn new(api_keys: Arc<dyn ApiKeyStore>) -> Self {
        Self { api_keys }
    }
}
