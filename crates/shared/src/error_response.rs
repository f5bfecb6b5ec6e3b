//! # エラーレスポンス（RFC 9457 Problem Details）
//!
//! 管理 API が返すエラーの種類を [`ProblemType`] として列挙し、
//! そこから [`ErrorResponse`] を組み立てる。
//!
//! `type` URI・`title`・`status` は種類ごとに固定で、呼び出し元が決めるのは
//! `detail` だけ。axum の `IntoResponse` 変換は各サービスで行う。

use serde::{Deserialize, Serialize};

const ERROR_TYPE_BASE: &str = "https://lendlab.example.com/errors";

/// 管理 API のエラー種別
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProblemType {
   ValidationError,
   /// デコードできない、または受け付けられないカーソル
   InvalidCursor,
   /// 発行後に絞り込み条件が変わったカーソル
   StaleCursor,
   InvalidLimit,
   InternalError,
}

impl ProblemType {
   /// `type` URI の末尾
   pub fn slug(self) -> &'static str {
      match self {
         Self::ValidationError => "validation-error",
         Self::InvalidCursor => "invalid-cursor",
         Self::StaleCursor => "stale-cursor",
         Self::InvalidLimit => "invalid-limit",
         Self::InternalError => "internal-error",
      }
   }

   pub fn title(self) -> &'static str {
      match self {
         Self::InvalidCursor | Self::InvalidLimit => "Bad Request",
         Self::ValidationError => "Validation Error",
         Self::StaleCursor => "Stale Cursor",
         Self::InternalError => "Internal Server Error",
      }
   }

   /// HTTP ステータスコード
   pub fn status(self) -> u16 {
      match self {
         Self::ValidationError | Self::InvalidCursor | Self::StaleCursor | Self::InvalidLimit => 400,
         Self::InternalError => 500,
      }
   }
}

/// エラーレスポンス本体
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
   #[serde(rename = "type")]
   pub error_type: String,
   pub title:      String,
   pub status:     u16,
   pub detail:     String,
}

impl ErrorResponse {
   pub fn new(problem: ProblemType, detail: impl Into<String>) -> Self {
      Self {
         error_type: format!("{ERROR_TYPE_BASE}/{}", problem.slug()),
         title:      problem.title().to_string(),
         status:     problem.status(),
         detail:     detail.into(),
      }
   }

   /// 500 の本体。内部の詳細はクライアントに返さない
   pub fn internal_error() -> Self {
      Self::new(ProblemType::InternalError, "内部エラーが発生しました")
   }
}
