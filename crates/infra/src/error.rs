//! # インフラ層エラー定義
//!
//! ウィンドウ取得時のクエリ失敗と、取得した行をドメイン型に戻せなかった場合を表す。
//!
//! [`InfraError`] は種別（[`InfraErrorKind`]）に加えて、生成時点の [`SpanTrace`] を
//! 持つ。`tracing_error::ErrorLayer` が登録されていれば、どのリポジトリ呼び出しの
//! 中で失敗したかがログに残る。

use std::fmt;

use derive_more::Display;
use lendlab_domain::DomainError;
use thiserror::Error;
use tracing_error::SpanTrace;

/// インフラ層で発生するエラー
#[derive(Display)]
#[display("{kind}")]
pub struct InfraError {
   kind:       InfraErrorKind,
   span_trace: SpanTrace,
}

/// インフラ層エラーの種別
#[derive(Debug, Error)]
pub enum InfraErrorKind {
   /// クエリの実行・接続の失敗
   #[error("データベースエラー: {0}")]
   Database(#[source] sqlx::Error),

   /// 保存済みの値が値オブジェクトの制約を満たさない
   #[error("{table} の行を復元できません: {source}")]
   InvalidRow {
      table:  &'static str,
      #[source]
      source: DomainError,
   },

   #[error("予期しないエラー: {0}")]
   Unexpected(String),
}

impl InfraError {
   fn capture(kind: InfraErrorKind) -> Self {
      Self {
         kind,
         span_trace: SpanTrace::capture(),
      }
   }

   pub fn kind(&self) -> &InfraErrorKind {
      &self.kind
   }

   /// エラー生成時点のスパン
   pub fn span_trace(&self) -> &SpanTrace {
      &self.span_trace
   }

   /// 行変換の `map_err` に渡すコンストラクタ
   ///
   /// ```rust,ignore
   /// let username = Username::new(row.username).map_err(InfraError::invalid_row("teams"))?;
   /// ```
   pub fn invalid_row(table: &'static str) -> impl FnOnce(DomainError) -> Self {
      move |source| Self::capture(InfraErrorKind::InvalidRow { table, source })
   }

   pub fn unexpected(msg: impl Into<String>) -> Self {
      Self::capture(InfraErrorKind::Unexpected(msg.into()))
   }
}

impl fmt::Debug for InfraError {
   fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
      f.debug_struct("InfraError")
         .field("kind", &self.kind)
         .field("span_trace", &self.span_trace)
         .finish()
   }
}

impl std::error::Error for InfraError {
   fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
      self.kind.source()
   }
}

impl From<sqlx::Error> for InfraError {
   fn from(source: sqlx::Error) -> Self {
      Self::capture(InfraErrorKind::Database(source))
   }
}

#[cfg(test)]
mod tests {
   use std::error::Error as _;

   use pretty_assertions::assert_eq;
   use tracing_subscriber::layer::SubscriberExt as _;

   use super::*;

   #[test]
   fn test_sqlxエラーの変換時に現在のスパンが記録される() {
      let subscriber = tracing_subscriber::registry().with(tracing_error::ErrorLayer::default());
      let _guard = tracing::subscriber::set_default(subscriber);
      let span = tracing::info_span!("fetch_team_window");
      let _enter = span.enter();

      let err: InfraError = sqlx::Error::RowNotFound.into();

      assert!(matches!(err.kind(), InfraErrorKind::Database(_)));
      let trace = err.span_trace().to_string();
      assert!(trace.contains("fetch_team_window"), "{trace}");
   }

   #[test]
   fn test_invalid_rowはテーブル名とドメインエラーを持つ() {
      let err = InfraError::invalid_row("teams")(DomainError::Validation(
         "ユーザー名は必須です".to_string(),
      ));

      assert!(matches!(
         err.kind(),
         InfraErrorKind::InvalidRow { table: "teams", .. }
      ));
      assert!(err.source().is_some());
      assert!(err.to_string().starts_with("teams の行を復元できません"));
   }

   #[test]
   fn test_unexpectedはメッセージをそのまま表示する() {
      let err = InfraError::unexpected("boom");

      assert_eq!(err.to_string(), "予期しないエラー: boom");
   }
}
