/*!
 * Authentication context extractor
 *
 * Responsibility:
 * - API key 認証済みリクエストのコンテキスト（AuthCtx）を handler に提供する
 *
 * Public API:
 * - AuthCtx
 * - AuthCtxExtractor
 */

mod core;
mod types;

pub use self::core::AuthCtxExtractor;
pub use types::AuthCtx;
