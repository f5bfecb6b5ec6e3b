//! # 走査方向とカーソルの役割
//!
//! カーソルの役割は保存せず、`(position が空か, direction)` から導出する。
//!
//! | position | direction | 役割 | 意味 |
//! |----------|-----------|------|------|
//! | 空 | `Ascending` | [`CursorRole::Start`] | 先頭から前方へ走査 |
//! | 空 | `Descending` | [`CursorRole::End`] | 末尾から後方へ走査 |
//! | 非空 | `Ascending` | [`CursorRole::Forward`] | `position` の直後から前方へ |
//! | 非空 | `Descending` | [`CursorRole::Backward`] | `position` の直前から後方へ |

use strum::{Display, IntoStaticStr};

/// カーソルの走査方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IntoStaticStr)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Direction {
   /// `position` より大きい行を昇順に走査する
   Ascending,
   /// `position` より小さい行を降順に走査する
   Descending,
}

impl Direction {
   /// トークン上の 1 バイト表現を返す
   pub(crate) const fn as_tag(self) -> u8 {
      match self {
         Self::Ascending => 0x01,
         Self::Descending => 0x02,
      }
   }

   /// トークン上の 1 バイト表現から復元する
   pub(crate) const fn from_tag(tag: u8) -> Option<Self> {
      match tag {
         0x01 => Some(Self::Ascending),
         0x02 => Some(Self::Descending),
         _ => None,
      }
   }
}

/// カーソルの役割（[`Direction`] と境界の有無から導出）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum CursorRole {
   /// 列の先頭。前方へ走査する
   Start,
   /// 列の末尾。後方へ走査する
   End,
   /// 列の途中。`position` から前方へ続ける
   Forward,
   /// 列の途中。`position` から後方へ続ける
   Backward,
}

impl CursorRole {
   /// `position` と `direction` から役割を判定する
   ///
   /// 空文字列の `position` は「境界なし」（列の端）を表す。
   pub fn classify(position: &str, direction: Direction) -> Self {
      match (position.is_empty(), direction) {
         (true, Direction::Ascending) => Self::Start,
         (true, Direction::Descending) => Self::End,
         (false, Direction::Ascending) => Self::Forward,
         (false, Direction::Descending) => Self::Backward,
      }
   }
}
