//! # HTTP リクエストハンドラ
//!
//! axum のルートに対応するハンドラ関数を定義する。
//!
//! ## 設計方針
//!
//! - 各ハンドラはサブモジュールに配置
//! - 親モジュール（この `handler.rs`）で re-export し、フラットな API を提供
//! - カーソルの解決とレスポンスへの変換は [`pagination`] に集約

pub mod bank;
pub mod health;
pub mod pagination;
pub mod team;

pub use bank::{BankState, list_banks};
pub use health::{ReadinessState, health_check, readiness_check};
pub use team::{TeamState, list_teams};
