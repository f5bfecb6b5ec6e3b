//! # ページネーションビルダー
//!
//! カーソルと、データ取得層が先読みした `limit + 1` 行のウィンドウから、
//! first / prev / next / last の 4 方向に移動できるページを組み立てる。
//!
//! ## アルゴリズム
//!
//! 1. **オーバーフロー検出**: `items.len() > limit` なら先に行が続く。件数クエリは使わない
//! 2. **切り詰め**: 入力カーソルの走査開始端から最も遠い側を落とす
//!    - `Ascending`: 末尾を落とし、先頭 `limit` 行を残す
//!    - `Descending`: 先頭を落とし、末尾 `limit` 行を残す
//! 3. **first / last**: 常に `position_fallback` に固定した昇順 / 降順カーソル
//! 4. **prev**（入力カーソルの役割ごと）
//!    - END / BACKWARD かつ続きがある: ページ先頭行の位置から降順
//!    - FORWARD かつページが空でない: ページ先頭行の位置から降順
//! 5. **next**（対称）
//!    - START / FORWARD かつ続きがある: ページ末尾行の位置から昇順
//!    - BACKWARD かつページが空でない: ページ末尾行の位置から昇順
//!
//! ウィンドウがちょうど `limit + 1` 行の場合、ページ先頭行は降順ウィンドウの
//! `items[1]`（昇順なら `items[0]`）、ページ末尾行は昇順ウィンドウの
//! `items[len - 2]`（降順なら `items[len - 1]`）と一致する。
//!
//! ウィンドウの並び順に関する前提は [`window`](crate::window) を参照。

use tracing::debug;

use crate::{
   cursor::{Cursor, POSITION_FALLBACK},
   direction::{CursorRole, Direction},
   fingerprint::PageQuery,
   limit::PageLimit,
};

/// 4 方向に移動可能なページ
///
/// `first` / `last` は常に存在する。`prev` / `next` は現在のウィンドウから
/// その方向に移動できる場合のみ `Some`。
#[derive(Debug, Clone, PartialEq)]
pub struct Pagination<Q, T> {
   pub first: Cursor<Q>,
   pub prev:  Option<Cursor<Q>>,
   pub next:  Option<Cursor<Q>>,
   pub last:  Cursor<Q>,
   pub items: Vec<T>,
   pub query: Q,
}

impl<Q, T> Pagination<Q, T> {
   /// 要素だけを変換する（カーソルはそのまま）
   pub fn map_items<U>(self, f: impl FnMut(T) -> U) -> Pagination<Q, U> {
      Pagination {
         first: self.first,
         prev:  self.prev,
         next:  self.next,
         last:  self.last,
         items: self.items.into_iter().map(f).collect(),
         query: self.query,
      }
   }
}

/// ページネーションビルダー
///
/// 純粋関数として振る舞う。同じ入力からは常に同じ出力を返し、ストレージに
/// 触れず、空の入力でも失敗しない。
///
/// # 使用例
///
/// ```rust
/// # use lendlab_pagination::{Cursor, FingerprintHasher, PageLimit, PageQuery, PaginationBuilder};
/// # use serde::{Deserialize, Serialize};
/// # #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// # struct AllQuery { limit: PageLimit }
/// # impl PageQuery for AllQuery {
/// #    fn limit(&self) -> PageLimit { self.limit }
/// #    fn write_fingerprint(&self, h: &mut FingerprintHasher) { h.write_limit(self.limit); }
/// # }
/// let limit = PageLimit::new(1).unwrap();
/// let cursor = Cursor::start(AllQuery { limit });
///
/// // START カーソルに対して limit + 1 行を先読みした
/// let window = vec!["A".to_string(), "B".to_string()];
/// let page = PaginationBuilder::new(&cursor, |s: &String| s.clone()).build(window, limit);
///
/// assert_eq!(page.items, vec!["A".to_string()]);
/// assert!(page.prev.is_none());
/// assert_eq!(page.next.unwrap().position(), "A");
/// ```
pub struct PaginationBuilder<'a, Q, F> {
   cursor:            &'a Cursor<Q>,
   position_of:       F,
   position_fallback: String,
}

impl<'a, Q, F> PaginationBuilder<'a, Q, F>
where
   Q: PageQuery,
{
   /// `position_of` は並び替えキーを返すこと（オフセットではなく境界値として使う）
   pub fn new(cursor: &'a Cursor<Q>, position_of: F) -> Self {
      Self {
         cursor,
         position_of,
         position_fallback: POSITION_FALLBACK.to_string(),
      }
   }

   /// first / last に使う position を差し替える（通常は空文字列のまま）
   pub fn with_position_fallback(mut self, fallback: impl Into<String>) -> Self {
      self.position_fallback = fallback.into();
      self
   }

   /// ウィンドウからページを組み立てる
   pub fn build<T>(self, items: Vec<T>, limit: PageLimit) -> Pagination<Q, T>
   where
      F: Fn(&T) -> String,
   {
      let direction = self.cursor.direction();
      let role = self.cursor.role();
      let query = self.cursor.query().clone();

      let has_more = items.len() > limit.as_usize();
      let page = slice_items(items, direction, limit);

      let first = Cursor::new(
         self.position_fallback.clone(),
         Direction::Ascending,
         query.clone(),
      );
      let last = Cursor::new(
         self.position_fallback.clone(),
         Direction::Descending,
         query.clone(),
      );

      let prev = match role {
         CursorRole::End | CursorRole::Backward if has_more => page.first(),
         CursorRole::Forward => page.first(),
         _ => None,
      }
      .map(|item| Cursor::new((self.position_of)(item), Direction::Descending, query.clone()));

      let next = match role {
         CursorRole::Start | CursorRole::Forward if has_more => page.last(),
         CursorRole::Backward => page.last(),
         _ => None,
      }
      .map(|item| Cursor::new((self.position_of)(item), Direction::Ascending, query.clone()));

      debug!(
         %role,
         has_more,
         page_len = page.len(),
         has_prev = prev.is_some(),
         has_next = next.is_some(),
         "ページを組み立てました"
      );

      Pagination {
         first,
         prev,
         next,
         last,
         items: page,
         query,
      }
   }
}

/// オーバーフロー行を落として `limit` 行以下にする
///
/// 昇順ウィンドウは末尾、降順ウィンドウは先頭から落とす。
fn slice_items<T>(mut items: Vec<T>, direction: Direction, limit: PageLimit) -> Vec<T> {
   let limit = limit.as_usize();
   if items.len() <= limit {
      return items;
   }

   match direction {
      Direction::Ascending => {
         items.truncate(limit);
         items
      }
      Direction::Descending => {
         let overflow = items.len() - limit;
         items.drain(..overflow);
         items
      }
   }
}
