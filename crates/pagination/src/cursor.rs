//! # カーソル
//!
//! キーセットページネーションの境界を表す不変の値オブジェクト。
//!
//! カーソルは構築時にクエリハッシュを計算して保持する。フィールドは非公開で、
//! 任意のハッシュを持つカーソルは作れない。これにより「カーソルは自身の
//! 整合性フィンガープリントを持つ」という不変条件が型で保証される。

use crate::{
   direction::{CursorRole, Direction},
   fingerprint::{PageQuery, QueryHash},
};

/// 「境界なし」を表す position（列の端）
pub const POSITION_FALLBACK: &str = "";

/// キーセットページネーションのカーソル
///
/// # フィールド
///
/// - `position`: 境界となる行の並び替えキー。空文字列は列の端を表す
/// - `direction`: `position` からの走査方向
/// - `query_hash`: 構築時に計算した `query` のハッシュ
/// - `query`: このカーソルを発行した時点のフィルタ条件
#[derive(Debug, Clone, PartialEq)]
pub struct Cursor<Q> {
   position:   String,
   direction:  Direction,
   query_hash: QueryHash,
   query:      Q,
}

impl<Q: PageQuery> Cursor<Q> {
   /// カーソルを作成する（クエリハッシュは `query` から計算する）
   pub fn new(position: impl Into<String>, direction: Direction, query: Q) -> Self {
      let query_hash = query.query_hash();
      Self {
         position: position.into(),
         direction,
         query_hash,
         query,
      }
   }

   /// 列の先頭から前方へ走査するカーソル（START）
   pub fn start(query: Q) -> Self {
      Self::new(POSITION_FALLBACK, Direction::Ascending, query)
   }

   /// 列の末尾から後方へ走査するカーソル（END）
   pub fn end(query: Q) -> Self {
      Self::new(POSITION_FALLBACK, Direction::Descending, query)
   }
}

impl<Q> Cursor<Q> {
   /// デコード済みのフィールドから組み立てる
   ///
   /// 呼び出し元（codec）がハッシュとクエリの一致を検証済みであること。
   pub(crate) fn from_verified_parts(
      position: String,
      direction: Direction,
      query_hash: QueryHash,
      query: Q,
   ) -> Self {
      Self {
         position,
         direction,
         query_hash,
         query,
      }
   }

   pub fn position(&self) -> &str {
      &self.position
   }

   pub fn direction(&self) -> Direction {
      self.direction
   }

   pub fn query_hash(&self) -> QueryHash {
      self.query_hash
   }

   pub fn query(&self) -> &Q {
      &self.query
   }

   /// 役割（START / END / FORWARD / BACKWARD）を導出する
   pub fn role(&self) -> CursorRole {
      CursorRole::classify(&self.position, self.direction)
   }
}
