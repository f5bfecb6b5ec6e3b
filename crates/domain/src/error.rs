//! # ドメイン層エラー定義
//!
//! 値オブジェクトや一覧の絞り込み条件の検証失敗を表現するエラー型。
//! Admin Service では 400 Bad Request（`validation-error`）に対応する。

use thiserror::Error;

/// ドメイン層で発生するエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
   /// バリデーションエラー
   ///
   /// クエリパラメータや DB の値が値オブジェクトの制約に違反している。
   #[error("バリデーションエラー: {0}")]
   Validation(String),
}
