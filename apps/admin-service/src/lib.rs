//! # Admin Service ライブラリ
//!
//! 管理画面向けの一覧 API を提供する。
//! ルーターの構築を公開し、`main` と結合テストから共有する。

pub mod config;
pub mod error;
pub mod handler;
pub mod usecase;

use std::sync::Arc;

use axum::{Router, routing::get};
use handler::{
   BankState,
   ReadinessState,
   TeamState,
   health_check,
   list_banks,
   list_teams,
   readiness_check,
};

/// `/api/v1` 配下の一覧 API のルーターを構築する
pub fn api_router(team_state: Arc<TeamState>, bank_state: Arc<BankState>) -> Router {
   Router::new()
      .route("/api/v1/teams", get(list_teams))
      .with_state(team_state)
      .merge(
         Router::new()
            .route("/api/v1/banks", get(list_banks))
            .with_state(bank_state),
      )
}

/// ヘルスチェックのルーターを構築する
pub fn health_router(readiness_state: Arc<ReadinessState>) -> Router {
   Router::new()
      .route("/health", get(health_check))
      .merge(
         Router::new()
            .route("/health/ready", get(readiness_check))
            .with_state(readiness_state),
      )
}
