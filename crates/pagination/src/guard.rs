//! # クエリフィンガープリントガード
//!
//! デコードしたカーソルと、同じリクエストで明示されたフィルタ条件を照合する。
//! ハッシュが一致しなければ、カーソル発行後にフィルタが変わっており、
//! `position` は新しい並びに対して意味を持たない。
//!
//! 不一致時にリクエストを拒否するか先頭から再開するかは呼び出し元が
//! [`StaleCursorPolicy`] で選ぶ。エンジンは方針を決めない。

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use tracing::warn;

use crate::{cursor::Cursor, error::StaleCursor, fingerprint::PageQuery};

/// カーソルのクエリハッシュが現在のクエリと一致するか検証する
pub fn verify_fingerprint<Q: PageQuery>(cursor: &Cursor<Q>, current: &Q) -> Result<(), StaleCursor> {
   let current = current.query_hash();
   if cursor.query_hash() == current {
      Ok(())
   } else {
      Err(StaleCursor {
         cursor: cursor.query_hash(),
         current,
      })
   }
}

/// 古くなったカーソルの扱い
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum StaleCursorPolicy {
   /// エラーとして呼び出し元に返す
   #[default]
   Reject,
   /// 現在のクエリの先頭カーソルに置き換える
   Restart,
}

impl StaleCursorPolicy {
   /// ガードを適用する
   ///
   /// 一致すればカーソルをそのまま返す。不一致の場合、`Reject` はエラーを返し、
   /// `Restart` は `current` の先頭カーソルを返す。
   pub fn apply<Q: PageQuery>(self, cursor: Cursor<Q>, current: Q) -> Result<Cursor<Q>, StaleCursor> {
      match verify_fingerprint(&cursor, &current) {
         Ok(()) => Ok(cursor),
         Err(stale) => {
            warn!(
               error.category = "pagination",
               error.kind = "stale_cursor",
               policy = %self,
               cursor_hash = %stale.cursor,
               current_hash = %stale.current,
               "カーソル発行後にクエリが変更されています"
            );
            match self {
               Self::Reject => Err(stale),
               Self::Restart => Ok(Cursor::start(current)),
            }
         }
      }
   }
}
