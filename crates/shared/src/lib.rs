//! # LendLab 共有ユーティリティ
//!
//! 管理 API 全体で使用するレスポンス型とロギング基盤を提供する。
//!
//! ## 設計方針
//!
//! - ビジネスロジックを含まない純粋なユーティリティのみを配置
//! - axum には依存しない（`IntoResponse` 変換は各サービスの責務）
//! - トレーシング初期化は `observability` feature でのみ有効にする

pub mod error_response;
pub mod event_log;
pub mod health;
pub mod observability;
pub mod paginated_response;

pub use error_response::{ErrorResponse, ProblemType};
pub use health::{CheckStatus, HealthResponse, ReadinessResponse, ReadinessStatus};
pub use paginated_response::PaginatedResponse;
