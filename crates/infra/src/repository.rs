//! # リポジトリ実装
//!
//! 一覧 API のウィンドウ取得を担当する。
//!
//! ## 取得規約
//!
//! すべての `fetch_window` は [`lendlab_pagination::window`] の契約に従う:
//!
//! 1. フィルタ条件を先に適用する
//! 2. カーソルの役割に応じてキーセット述語（`>` / `<`）を付ける
//! 3. 並び替えキーで `ASC` / `DESC` に並べ、`limit + 1` 行を取得する
//! 4. 走査順の結果を `into_window_order` でキー昇順に戻す

pub mod bank_repository;
pub mod team_repository;

pub use bank_repository::{BankRepository, PostgresBankRepository};
use lendlab_pagination::{
   Cursor,
   Direction,
   PageQuery,
   window::{self, KeysetBound},
};
use sqlx::{Postgres, QueryBuilder};
pub use team_repository::{PostgresTeamRepository, TeamRepository};

/// キーセット述語・ORDER BY・LIMIT を付加する
///
/// `builder` は `WHERE` 句の途中（条件を `AND` で続けられる状態）であること。
pub(crate) fn push_keyset<Q: PageQuery>(
   builder: &mut QueryBuilder<'_, Postgres>,
   column: &str,
   cursor: &Cursor<Q>,
) {
   match window::keyset_bound(cursor) {
      KeysetBound::Unbounded => {}
      KeysetBound::After(position) => {
         builder
            .push(format_args!(" AND {column} > "))
            .push_bind(position.to_string());
      }
      KeysetBound::Before(position) => {
         builder
            .push(format_args!(" AND {column} < "))
            .push_bind(position.to_string());
      }
   }

   let order = match cursor.direction() {
      Direction::Ascending => "ASC",
      Direction::Descending => "DESC",
   };
   builder
      .push(format_args!(" ORDER BY {column} {order} LIMIT "))
      .push_bind(i64::from(cursor.query().limit().get()) + 1);
}
