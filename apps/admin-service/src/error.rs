//! # Admin Service エラー定義
//!
//! Admin Service 固有のエラーと、HTTP レスポンスへの変換を定義する。
//!
//! レスポンスボディは [`lendlab_shared::ErrorResponse`]（RFC 9457 Problem Details）。
//! クライアント起因のエラーは 400、インフラ起因のエラーはログに記録した上で
//! 詳細を伏せた 500 を返す。

use axum::{
   Json,
   http::StatusCode,
   response::{IntoResponse, Response},
};
use lendlab_domain::DomainError;
use lendlab_infra::InfraError;
use lendlab_pagination::{CursorEncodeError, PageLimitError, StaleCursor};
use lendlab_shared::{
   ErrorResponse,
   ProblemType,
   event_log::error::{category, kind},
};
use thiserror::Error;

/// デコードできないカーソルに対する応答の詳細メッセージ
pub const INVALID_CURSOR_DETAIL: &str = "request must have valid cursor";

/// 古くなったカーソルに対する応答の詳細メッセージ
pub const STALE_CURSOR_DETAIL: &str =
   "カーソル発行後に絞り込み条件が変更されました。先頭ページから取得し直してください";

/// Admin Service で発生するエラー
#[derive(Debug, Error)]
pub enum AdminError {
   /// カーソルトークンをデコードできない
   #[error("カーソルが不正です")]
   InvalidCursor,

   /// カーソル発行後にクエリが変わった
   #[error(transparent)]
   StaleCursor(#[from] StaleCursor),

   /// ページサイズが不正
   #[error(transparent)]
   InvalidLimit(#[from] PageLimitError),

   /// リクエストパラメータの検証エラー
   #[error("入力値が不正です: {0}")]
   Validation(#[from] DomainError),

   /// カーソルのエンコードに失敗した
   #[error("カーソルのエンコードに失敗: {0}")]
   CursorEncode(#[from] CursorEncodeError),

   /// データベースエラー
   #[error("データベースエラー: {0}")]
   Database(#[from] InfraError),
}

impl AdminError {
   fn to_error_response(&self) -> ErrorResponse {
      match self {
         AdminError::InvalidCursor => ErrorResponse::new(ProblemType::InvalidCursor, INVALID_CURSOR_DETAIL),
         AdminError::StaleCursor(_) => ErrorResponse::new(ProblemType::StaleCursor, STALE_CURSOR_DETAIL),
         AdminError::InvalidLimit(e) => ErrorResponse::new(ProblemType::InvalidLimit, e.to_string()),
         AdminError::Validation(e) => ErrorResponse::new(ProblemType::ValidationError, e.to_string()),
         AdminError::CursorEncode(e) => {
            tracing::error!(
               error.category = category::PAGINATION,
               error.kind = kind::INTERNAL,
               error = %e,
               "カーソルのエンコードに失敗しました"
            );
            ErrorResponse::internal_error()
         }
         AdminError::Database(e) => {
            tracing::error!(
               error.category = category::INFRASTRUCTURE,
               error.kind = kind::DATABASE,
               error = %e,
               span_trace = %e.span_trace(),
               "データベースエラー"
            );
            ErrorResponse::internal_error()
         }
      }
   }
}

impl IntoResponse for AdminError {
   fn into_response(self) -> Response {
      let body = self.to_error_response();
      let status =
         StatusCode::from_u16(body.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

      (status, Json(body)).into_response()
   }
}
