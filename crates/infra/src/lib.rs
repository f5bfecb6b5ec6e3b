//! # LendLab インフラ層
//!
//! PostgreSQL への接続と、一覧 API 用のリポジトリ実装を提供する。
//!
//! ## 責務
//!
//! - **データベース接続**: PostgreSQL への接続プール管理とマイグレーション
//! - **リポジトリ実装**: カーソルに従って `limit + 1` 行のウィンドウを取得する
//!
//! ## 依存関係
//!
//! ```text
//! admin-service → infra → domain → pagination
//!                   ↘                  ↑
//!                     ─────────────────
//! ```
//!
//! ## モジュール構成
//!
//! - [`db`] - PostgreSQL データベース接続管理
//! - [`error`] - インフラ層エラー定義
//! - [`repository`] - リポジトリ実装
//! - `mock` - インメモリリポジトリ（`test-utils` feature）
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use lendlab_infra::{db, repository::PostgresTeamRepository};
//!
//! async fn setup() -> Result<(), Box<dyn std::error::Error>> {
//!    let pool = db::create_pool("postgres://localhost/lendlab").await?;
//!    db::run_migrations(&pool).await?;
//!    let teams = PostgresTeamRepository::new(pool);
//!    Ok(())
//! }
//! ```

pub mod db;
pub mod error;
#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
pub mod repository;

pub use error::{InfraError, InfraErrorKind};
