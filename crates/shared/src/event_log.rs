//! # エラーコンテキストの構造化フィールド
//!
//! `tracing::warn!` / `tracing::error!` に `error.category` + `error.kind` を
//! 直接追加し、`jq 'select(.["error.kind"] == "stale_cursor")'` のように
//! 絞り込めるようにする。
//!
//! ## フィールド命名規約
//!
//! ドット記法（`error.category`、`error.kind`）を使用する。JSON 出力で
//! フラットなキーになる。

/// エラーコンテキストフィールドの定数
pub mod error {
   /// エラーカテゴリ
   pub mod category {
      /// カーソルトークン・ページクエリ
      pub const PAGINATION: &str = "pagination";
      /// インフラストラクチャ（DB）
      pub const INFRASTRUCTURE: &str = "infrastructure";
   }

   /// エラー種別
   pub mod kind {
      /// デコードできないカーソル
      pub const INVALID_CURSOR: &str = "invalid_cursor";
      /// 発行後にクエリが変わったカーソル
      pub const STALE_CURSOR: &str = "stale_cursor";
      /// 不正なページサイズ
      pub const INVALID_LIMIT: &str = "invalid_limit";
      pub const DATABASE: &str = "database";
      pub const INTERNAL: &str = "internal";
   }
}
