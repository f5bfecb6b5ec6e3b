//! # 銀行ハンドラ
//!
//! - `GET /api/v1/banks?cursor=&limit=&name=` - 銀行コード順の銀行一覧
//!
//! `name` は大文字小文字を区別しない部分一致（最大 255 文字）。

use std::sync::Arc;

use axum::{
   Json,
   extract::{Query, State},
   response::IntoResponse,
};
use lendlab_domain::bank::{Bank, BankQuery};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::pagination::{into_paginated_response, resolve_cursor, resolve_limit};
use crate::{config::PaginationConfig, error::AdminError, usecase::BankUseCaseImpl};

/// 銀行 API の共有状態
pub struct BankState {
   pub usecase:    BankUseCaseImpl,
   pub pagination: PaginationConfig,
}

/// 銀行一覧のクエリパラメータ
#[derive(Debug, Default, Deserialize)]
pub struct ListBanksParams {
   pub cursor: Option<String>,
   pub limit:  Option<u32>,
   pub name:   Option<String>,
}

/// 銀行一覧の要素 DTO
#[derive(Debug, Serialize)]
pub struct BankDto {
   pub id:         Uuid,
   pub code:       String,
   pub name:       String,
   pub created_at: String,
}

impl From<Bank> for BankDto {
   fn from(bank: Bank) -> Self {
      Self {
         id:         Uuid::from(*bank.id()),
         code:       bank.code().to_string(),
         name:       bank.name().to_string(),
         created_at: bank.created_at().to_rfc3339(),
      }
   }
}

/// GET /api/v1/banks
pub async fn list_banks(
   State(state): State<Arc<BankState>>,
   Query(params): Query<ListBanksParams>,
) -> Result<impl IntoResponse, AdminError> {
   let explicit = params.limit.is_some() || params.name.is_some();
   let limit = resolve_limit(params.limit, &state.pagination)?;
   let query = BankQuery::try_new(params.name, limit)?;

   let cursor = resolve_cursor(params.cursor.as_deref(), query, explicit, &state.pagination)?;
   let page = state.usecase.list_banks(&cursor).await?;

   Ok(Json(into_paginated_response(page, BankDto::from)?))
}

#[cfg(test)]
mod tests {
   use axum::{
      Router,
      body::Body,
      http::{Request, StatusCode},
      routing::get,
   };
   use chrono::DateTime;
   use lendlab_domain::{bank::BankId, value_objects::BankCode};
   use lendlab_infra::mock::MockBankRepository;
   use lendlab_pagination::{PageLimit, StaleCursorPolicy};
   use pretty_assertions::assert_eq;
   use serde_json::Value as JsonValue;
   use tower::ServiceExt;

   use super::*;

   fn create_test_app() -> Router {
      let repo = MockBankRepository::new();
      let now = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
      for (code, name) in [
         ("AOZORA", "あおぞら銀行"),
         ("MIZUHO", "みずほ銀行"),
         ("MUFG", "三菱UFJ銀行"),
         ("SMBC", "三井住友銀行"),
      ] {
         repo.add_bank(Bank::new(BankId::generate(), BankCode::new(code).unwrap(), name, now));
      }
      let state = Arc::new(BankState {
         usecase:    BankUseCaseImpl::new(Arc::new(repo)),
         pagination: PaginationConfig {
            default_limit:       PageLimit::new(3).unwrap(),
            max_limit:           PageLimit::new(10).unwrap(),
            stale_cursor_policy: StaleCursorPolicy::Reject,
         },
      });
      Router::new()
         .route("/api/v1/banks", get(list_banks))
         .with_state(state)
   }

   async fn get_json(app: &Router, uri: &str) -> (StatusCode, JsonValue) {
      let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
      let response = app.clone().oneshot(request).await.unwrap();
      let status = response.status();
      let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
         .await
         .unwrap();
      (status, serde_json::from_slice(&bytes).unwrap())
   }

   fn codes(body: &JsonValue) -> Vec<&str> {
      body["data"]
         .as_array()
         .unwrap()
         .iter()
         .map(|bank| bank["code"].as_str().unwrap())
         .collect()
   }

   #[tokio::test]
   async fn test_銀行コード順に一覧が返る() {
      // Given
      let sut = create_test_app();

      // When
      let (status, body) = get_json(&sut, "/api/v1/banks").await;

      // Then
      assert_eq!(status, StatusCode::OK);
      assert_eq!(codes(&body), vec!["AOZORA", "MIZUHO", "MUFG"]);
      assert_eq!(body["data"][0]["name"], "あおぞら銀行");
   }

   #[tokio::test]
   async fn test_長すぎる銀行名条件で400が返る() {
      // Given
      let sut = create_test_app();
      let name = "a".repeat(BankQuery::MAX_NAME_CONTAINS + 1);

      // When
      let (status, body) = get_json(&sut, &format!("/api/v1/banks?name={name}")).await;

      // Then
      assert_eq!(status, StatusCode::BAD_REQUEST);
      assert_eq!(
         body["type"],
         "https://lendlab.example.com/errors/validation-error"
      );
   }

   #[tokio::test]
   async fn test_名前で絞り込んだ末尾ページに移動できる() {
      // Given
      let sut = create_test_app();
      let (_, first_page) = get_json(&sut, "/api/v1/banks?name=%E4%B8%89&limit=1").await;

      // When
      let (status, last_page) = get_json(
         &sut,
         &format!("/api/v1/banks?cursor={}", first_page["last"].as_str().unwrap()),
      )
      .await;

      // Then
      assert_eq!(status, StatusCode::OK);
      assert_eq!(codes(&first_page), vec!["MUFG"]);
      assert_eq!(codes(&last_page), vec!["SMBC"]);
      assert!(last_page["next"].is_null());
   }
}
