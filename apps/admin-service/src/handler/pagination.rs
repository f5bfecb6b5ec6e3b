//! # 一覧 API 共通のページネーション処理
//!
//! クエリパラメータからカーソルを解決し、組み立てたページを
//! [`PaginatedResponse`] に変換する。
//!
//! ## カーソルの解決
//!
//! | `cursor` | 明示的な絞り込み / `limit` | 結果 |
//! |----------|---------------------------|------|
//! | なし | - | パラメータから作ったクエリの先頭カーソル |
//! | デコード不可 | - | `reject`: 400 / `restart`: 先頭カーソル |
//! | デコード可 | あり | フィンガープリントを照合（`reject`: 400 / `restart`: 新しいクエリの先頭カーソル） |
//! | デコード可 | なし | カーソル自身のクエリをそのまま使う |
//!
//! 空文字列の `cursor` は未指定として扱う。

use lendlab_pagination::{
   Cursor,
   PageLimit,
   PageQuery,
   Pagination,
   StaleCursorPolicy,
   codec,
};
use lendlab_shared::{
   PaginatedResponse,
   event_log::error::{category, kind},
};

use crate::{config::PaginationConfig, error::AdminError};

/// `limit` パラメータをページサイズに変換する
///
/// 未指定ならデフォルト値、上限を超える値は上限に切り詰める。0 はエラー。
pub fn resolve_limit(requested: Option<u32>, config: &PaginationConfig) -> Result<PageLimit, AdminError> {
   match requested {
      None => Ok(config.default_limit),
      Some(value) => {
         let limit = PageLimit::new(value).inspect_err(|e| {
            tracing::warn!(
               error.category = category::PAGINATION,
               error.kind = kind::INVALID_LIMIT,
               error = %e,
               "不正なページサイズが指定されました"
            );
         })?;
         Ok(limit.clamp_to(config.max_limit))
      }
   }
}

/// リクエストのカーソルを解決する
///
/// - `token`: `cursor` パラメータ
/// - `query`: 同じリクエストのパラメータから作ったクエリ
/// - `explicit`: 絞り込み条件か `limit` が明示されているか
pub fn resolve_cursor<Q: PageQuery>(
   token: Option<&str>,
   query: Q,
   explicit: bool,
   config: &PaginationConfig,
) -> Result<Cursor<Q>, AdminError> {
   let policy = config.stale_cursor_policy;
   let Some(token) = token.filter(|t| !t.trim().is_empty()) else {
      return Ok(codec::default_cursor(query));
   };

   let cursor = match codec::decode::<Q>(token) {
      Ok(cursor) if cursor.query().limit() <= config.max_limit => cursor,
      Ok(cursor) => {
         tracing::warn!(
            error.category = category::PAGINATION,
            error.kind = kind::INVALID_CURSOR,
            %policy,
            limit = %cursor.query().limit(),
            max_limit = %config.max_limit,
            "カーソルのページサイズが上限を超えています"
         );
         return restart_or_reject(policy, query);
      }
      Err(e) => {
         tracing::warn!(
            error.category = category::PAGINATION,
            error.kind = kind::INVALID_CURSOR,
            %policy,
            error = %e,
            "カーソルをデコードできません"
         );
         return restart_or_reject(policy, query);
      }
   };

   if explicit {
      Ok(policy.apply(cursor, query)?)
   } else {
      Ok(cursor)
   }
}

fn restart_or_reject<Q: PageQuery>(policy: StaleCursorPolicy, query: Q) -> Result<Cursor<Q>, AdminError> {
   match policy {
      StaleCursorPolicy::Reject => Err(AdminError::InvalidCursor),
      StaleCursorPolicy::Restart => Ok(codec::default_cursor(query)),
   }
}

/// ページをトークン付きのレスポンスに変換する
pub fn into_paginated_response<Q, T, U>(
   page: Pagination<Q, T>,
   to_dto: impl FnMut(T) -> U,
) -> Result<PaginatedResponse<U>, AdminError>
where
   Q: PageQuery,
{
   let tokens = codec::encode_links(&page)?;

   Ok(PaginatedResponse {
      data:  page.items.into_iter().map(to_dto).collect(),
      first: tokens.first,
      prev:  tokens.prev,
      next:  tokens.next,
      last:  tokens.last,
   })
}
