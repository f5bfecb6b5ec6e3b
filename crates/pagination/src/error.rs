//! # ページネーションエラー定義
//!
//! エンジン自体は整形式の入力に対して失敗しない。ここで定義するエラーは
//! いずれも呼び出し元が回復可能な局所的な状態であり、扱い（フォールバック
//! するか、リクエストを拒否するか）は呼び出し元が決める。
//!
//! | エラー | 発生箇所 | 典型的な扱い |
//! |-------|---------|-------------|
//! | [`PageLimitError`] | [`PageLimit::new`](crate::PageLimit::new) | 400 Bad Request |
//! | [`CursorEncodeError`] | [`codec::encode`](crate::codec::encode) | 500（クエリ型の不備、トークン長の上限超過） |
//! | [`CursorDecodeError`] | [`codec::decode`](crate::codec::decode) | 400 または先頭カーソルへフォールバック |
//! | [`StaleCursor`] | [`guard::verify_fingerprint`](crate::guard::verify_fingerprint) | 400 または先頭カーソルへフォールバック |

use thiserror::Error;

use crate::fingerprint::QueryHash;

/// ページサイズが不正
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("ページサイズは 1 以上である必要があります: {0}")]
pub struct PageLimitError(pub u32);

/// カーソルのエンコードに失敗した
#[derive(Debug, Error)]
pub enum CursorEncodeError {
   /// クエリを JSON にシリアライズできない
   #[error("クエリのシリアライズに失敗: {0}")]
   Query(#[source] serde_json::Error),

   /// フィールドが長さプレフィックス（u32）に収まらない
   #[error("{field} が長すぎます: {len} バイト")]
   FieldTooLong { field: &'static str, len: usize },

   /// エンコード結果が [`MAX_TOKEN_LEN`](crate::codec::MAX_TOKEN_LEN) を超え、
   /// `decode` で受け付けられない
   #[error("カーソルトークンが長すぎます: {len} 文字（最大 {max}）")]
   TooLong { len: usize, max: usize },
}

/// カーソルトークンのデコードに失敗した
///
/// どのバリアントでも、部分的に復元されたカーソルが呼び出し元に渡ることはない。
#[derive(Debug, Error)]
pub enum CursorDecodeError {
   #[error("カーソルトークンが空です")]
   Empty,

   #[error("カーソルトークンが長すぎます: {len} 文字（最大 {max}）")]
   TooLong { len: usize, max: usize },

   #[error("base64 のデコードに失敗: {0}")]
   Base64(#[from] base64::DecodeError),

   #[error("未対応のトークンバージョン: {0}")]
   UnsupportedVersion(u8),

   #[error("不明な走査方向タグ: {0:#04x}")]
   UnknownDirection(u8),

   #[error("トークンが途中で終わっています: {field}")]
   Truncated { field: &'static str },

   #[error("position が UTF-8 ではありません: {0}")]
   InvalidPosition(#[source] std::string::FromUtf8Error),

   #[error("クエリのデシリアライズに失敗: {0}")]
   InvalidQuery(#[source] serde_json::Error),

   #[error("トークン末尾に余分なバイトがあります: {0} バイト")]
   TrailingBytes(usize),

   /// トークン内のハッシュが、同じトークン内のクエリと一致しない（改ざん）
   #[error("トークンのクエリハッシュが一致しません: stored={stored}, computed={computed}")]
   FingerprintMismatch {
      stored:   QueryHash,
      computed: QueryHash,
   },
}

/// カーソル発行後にフィルタ条件が変わった
///
/// カーソルの `position` は新しいフィルタ条件の並びに対して意味を持たない。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("カーソル発行後にクエリが変更されています: cursor={cursor}, current={current}")]
pub struct StaleCursor {
   /// カーソルに記録されたハッシュ
   pub cursor:  QueryHash,
   /// 現在のリクエストのクエリから計算したハッシュ
   pub current: QueryHash,
}
