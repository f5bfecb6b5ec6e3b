//! # ヘルスチェックハンドラ
//!
//! Admin Service の稼働状態を確認するためのエンドポイント。
//!
//! - `/health` — Liveness Check（常に `"healthy"` を返す）
//! - `/health/ready` — Readiness Check（DB の接続状態を確認）
//!
//! レスポンス型は [`lendlab_shared::HealthResponse`] / [`lendlab_shared::ReadinessResponse`] を参照。

use std::{collections::HashMap, sync::Arc, time::Duration};

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use lendlab_shared::{CheckStatus, HealthResponse, ReadinessResponse, ReadinessStatus};
use sqlx::PgPool;

const CHECK_TIMEOUT: Duration = Duration::from_secs(5);

/// Admin Service のヘルスチェックエンドポイント
pub async fn health_check() -> Json<HealthResponse> {
   Json(HealthResponse {
      status:  "healthy".to_string(),
      version: env!("CARGO_PKG_VERSION").to_string(),
   })
}

/// Readiness Check 用の State
pub struct ReadinessState {
   pub pool: PgPool,
}

/// Admin Service の Readiness Check エンドポイント
///
/// DB に `SELECT 1` を発行する。成功 → 200、失敗またはタイムアウト → 503。
#[tracing::instrument(skip_all)]
pub async fn readiness_check(State(state): State<Arc<ReadinessState>>) -> impl IntoResponse {
   let checks = HashMap::from([("database".to_string(), check_database(&state.pool).await)]);
   let response = ReadinessResponse::from_checks(checks);

   let http_status = match response.status {
      ReadinessStatus::Ready => StatusCode::OK,
      ReadinessStatus::NotReady => StatusCode::SERVICE_UNAVAILABLE,
   };

   (http_status, Json(response))
}

async fn check_database(pool: &PgPool) -> CheckStatus {
   match tokio::time::timeout(CHECK_TIMEOUT, sqlx::query("SELECT 1").execute(pool)).await {
      Ok(Ok(_)) => CheckStatus::Ok,
      Ok(Err(e)) => {
         tracing::warn!(error = %e, "readiness check: database query failed");
         CheckStatus::Error
      }
      Err(_) => {
         tracing::warn!("readiness check: database check timed out");
         CheckStatus::Error
      }
   }
}

#[cfg(test)]
mod tests {
   use axum::{Router, body::Body, http::Request, routing::get};
   use pretty_assertions::assert_eq;
   use serde_json::Value as JsonValue;
   use sqlx::postgres::PgPoolOptions;
   use tower::ServiceExt;

   use super::*;

   async fn body_json(response: axum::response::Response) -> JsonValue {
      let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
         .await
         .unwrap();
      serde_json::from_slice(&bytes).unwrap()
   }

   #[tokio::test]
   async fn test_health_checkはバージョン付きでhealthyを返す() {
      // Given
      let sut = Router::new().route("/health", get(health_check));
      let request = Request::builder().uri("/health").body(Body::empty()).unwrap();

      // When
      let response = sut.oneshot(request).await.unwrap();

      // Then
      assert_eq!(response.status(), StatusCode::OK);
      let body = body_json(response).await;
      assert_eq!(body["status"], "healthy");
      assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
   }

   #[tokio::test]
   async fn test_dbに接続できなければ503とnot_readyを返す() {
      // Given
      let pool = PgPoolOptions::new()
         .acquire_timeout(Duration::from_millis(200))
         .connect_lazy("postgres://lendlab@127.0.0.1:1/lendlab")
         .unwrap();
      let sut = Router::new()
         .route("/health/ready", get(readiness_check))
         .with_state(Arc::new(ReadinessState { pool }));
      let request = Request::builder()
         .uri("/health/ready")
         .body(Body::empty())
         .unwrap();

      // When
      let response = sut.oneshot(request).await.unwrap();

      // Then
      assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
      let body = body_json(response).await;
      assert_eq!(body["status"], "not_ready");
      assert_eq!(body["checks"]["database"], "error");
   }
}
