//! # LendLab キーセットページネーション
//!
//! 一覧 API で共通に使うカーソルベース（キーセット）ページネーションのエンジン。
//!
//! ## 設計方針
//!
//! - **純粋関数**: クエリを実行せず、ストレージを知らない。共有状態もロックもない
//! - **オフセットではなく境界値**: カーソルは並び替えキーの値（position）を保持する
//! - **件数クエリ不要**: `limit + 1` 行を先読みし、余りの有無で次ページを判定する
//! - **不透明なトークン**: バージョン付きのバイナリ形式を base64url で包む
//! - **整合性フィンガープリント**: カーソルは発行時のクエリのハッシュを持つ
//!
//! ## データの流れ
//!
//! ```text
//! token ──codec::decode──▶ Cursor ──repository──▶ limit+1 行
//!                             │                        │
//!                             └──PaginationBuilder◀────┘
//!                                       │
//!                     Pagination { first, prev, next, last, items }
//!                                       │
//!                              codec::encode_links
//! ```
//!
//! ## モジュール構成
//!
//! - [`direction`] - 走査方向とカーソルの役割
//! - [`limit`] - ページサイズ
//! - [`fingerprint`] - クエリハッシュと [`PageQuery`] トレイト
//! - [`cursor`] - カーソル
//! - [`builder`] - ページの組み立て
//! - [`window`] - データ取得層との契約
//! - [`codec`] - トークンのエンコード / デコード
//! - [`guard`] - クエリフィンガープリントの照合
//! - [`error`] - エラー定義

pub mod builder;
pub mod codec;
pub mod cursor;
pub mod direction;
pub mod error;
pub mod fingerprint;
pub mod guard;
pub mod limit;
pub mod window;

pub use builder::{Pagination, PaginationBuilder};
pub use codec::PageTokens;
pub use cursor::{Cursor, POSITION_FALLBACK};
pub use direction::{CursorRole, Direction};
pub use error::{CursorDecodeError, CursorEncodeError, PageLimitError, StaleCursor};
pub use fingerprint::{FingerprintHasher, PageQuery, QueryHash};
pub use guard::StaleCursorPolicy;
pub use limit::PageLimit;
