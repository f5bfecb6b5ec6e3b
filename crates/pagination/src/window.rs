//! # データ取得層との契約
//!
//! [`PaginationBuilder`](crate::PaginationBuilder) が受け取るウィンドウの形を定める。
//! リポジトリ実装はこの契約に従って行を返すこと。
//!
//! ## 取得条件
//!
//! | カーソルの役割 | 述語 | ORDER BY | LIMIT |
//! |--------------|------|----------|-------|
//! | START | なし | キー昇順 | `limit + 1` |
//! | FORWARD | `key > position` | キー昇順 | `limit + 1` |
//! | END | なし | キー降順 | `limit + 1` |
//! | BACKWARD | `key < position` | キー降順 | `limit + 1` |
//!
//! ## ウィンドウの並び順
//!
//! 走査順で得た行を [`into_window_order`] に通し、常に**キー昇順（表示順）**で
//! 渡す。降順走査では結果を反転するため、オーバーフロー行（`limit + 1` 行目）は
//! 昇順ウィンドウでは末尾、降順ウィンドウでは**先頭**に来る。ビルダーの切り詰めは
//! この前提に依存する。

use crate::{cursor::Cursor, direction::Direction, fingerprint::PageQuery};

/// キーセット述語の比較方向
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeysetBound<'a> {
   /// 境界なし（START / END）
   Unbounded,
   /// `key > position`
   After(&'a str),
   /// `key < position`
   Before(&'a str),
}

/// カーソルからキーセット述語を導出する
pub fn keyset_bound<Q>(cursor: &Cursor<Q>) -> KeysetBound<'_> {
   match (cursor.position().is_empty(), cursor.direction()) {
      (true, _) => KeysetBound::Unbounded,
      (false, Direction::Ascending) => KeysetBound::After(cursor.position()),
      (false, Direction::Descending) => KeysetBound::Before(cursor.position()),
   }
}

/// データ取得層が取得すべき行数（`limit + 1`）
pub fn fetch_size<Q: PageQuery>(cursor: &Cursor<Q>) -> usize {
   cursor.query().limit().fetch_size()
}

/// 走査順の行をウィンドウ順（キー昇順）に並べ替える
pub fn into_window_order<T>(mut rows: Vec<T>, direction: Direction) -> Vec<T> {
   if direction == Direction::Descending {
      rows.reverse();
   }
   rows
}
