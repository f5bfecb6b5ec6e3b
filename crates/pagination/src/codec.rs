//! # カーソルトークンのコーデック
//!
//! カーソルを URL クエリパラメータにそのまま載せられる不透明な文字列に変換する。
//!
//! ## トークン形式（v1）
//!
//! ```text
//! u8   version          = 0x01
//! u8   direction tag    (0x01 = ASCENDING, 0x02 = DESCENDING)
//! u32  position length  (big endian) + UTF-8 bytes
//! i64  query hash       (big endian)
//! u32  query length     (big endian) + JSON bytes
//! ```
//!
//! 全体を URL-safe base64（パディングなし）で包む。言語固有のシリアライズ形式に
//! 依存しないため、実装を置き換えても発行済みトークンを読める。形式を変える
//! 場合は `version` を上げ、旧バージョンのトークンは型付きエラーで拒否する。

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use bytes::{Buf, BufMut, BytesMut};
use tracing::warn;

use crate::{
   builder::Pagination,
   cursor::Cursor,
   direction::Direction,
   error::{CursorDecodeError, CursorEncodeError},
   fingerprint::{PageQuery, QueryHash},
};

/// 現在のトークン形式バージョン
pub const TOKEN_VERSION: u8 = 0x01;

/// 信頼できない入力に対するトークン長の上限（base64 文字数）
pub const MAX_TOKEN_LEN: usize = 8 * 1024;

/// ページの 4 方向カーソルをエンコードしたもの
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageTokens {
   pub first: String,
   pub prev:  Option<String>,
   pub next:  Option<String>,
   pub last:  String,
}

/// カーソルをトークンにエンコードする
///
/// # エラー
///
/// クエリを JSON にシリアライズできない場合と、トークンが [`MAX_TOKEN_LEN`] を
/// 超える場合に [`CursorEncodeError`] を返す。成功したトークンは必ず
/// [`decode`] で復元できる。
pub fn encode<Q: PageQuery>(cursor: &Cursor<Q>) -> Result<String, CursorEncodeError> {
   let query = serde_json::to_vec(cursor.query()).map_err(CursorEncodeError::Query)?;
   let position = cursor.position().as_bytes();

   let mut buf = BytesMut::with_capacity(2 + 4 + position.len() + 8 + 4 + query.len());
   buf.put_u8(TOKEN_VERSION);
   buf.put_u8(cursor.direction().as_tag());
   put_field(&mut buf, "position", position)?;
   buf.put_i64(cursor.query_hash().as_i64());
   put_field(&mut buf, "query", &query)?;

   let token = URL_SAFE_NO_PAD.encode(&buf);
   if token.len() > MAX_TOKEN_LEN {
      return Err(CursorEncodeError::TooLong {
         len: token.len(),
         max: MAX_TOKEN_LEN,
      });
   }
   Ok(token)
}

/// トークンをカーソルにデコードする
///
/// 前後の空白は無視する。トークン内のハッシュが同じトークン内のクエリから
/// 再計算した値と一致しない場合も失敗とする。
pub fn decode<Q: PageQuery>(token: &str) -> Result<Cursor<Q>, CursorDecodeError> {
   let token = token.trim();
   if token.is_empty() {
      return Err(CursorDecodeError::Empty);
   }
   if token.len() > MAX_TOKEN_LEN {
      return Err(CursorDecodeError::TooLong {
         len: token.len(),
         max: MAX_TOKEN_LEN,
      });
   }

   let raw = URL_SAFE_NO_PAD.decode(token)?;
   let mut buf: &[u8] = &raw;

   let version = take_u8(&mut buf, "version")?;
   if version != TOKEN_VERSION {
      return Err(CursorDecodeError::UnsupportedVersion(version));
   }

   let tag = take_u8(&mut buf, "direction")?;
   let direction = Direction::from_tag(tag).ok_or(CursorDecodeError::UnknownDirection(tag))?;

   let position = take_field(&mut buf, "position")?;
   let position = String::from_utf8(position.to_vec()).map_err(CursorDecodeError::InvalidPosition)?;

   if buf.remaining() < 8 {
      return Err(CursorDecodeError::Truncated {
         field: "query_hash",
      });
   }
   let stored = QueryHash::from_i64(buf.get_i64());

   let query = take_field(&mut buf, "query")?;
   let query: Q = serde_json::from_slice(query).map_err(CursorDecodeError::InvalidQuery)?;

   if buf.has_remaining() {
      return Err(CursorDecodeError::TrailingBytes(buf.remaining()));
   }

   let computed = query.query_hash();
   if stored != computed {
      return Err(CursorDecodeError::FingerprintMismatch { stored, computed });
   }

   Ok(Cursor::from_verified_parts(position, direction, stored, query))
}

/// トークンがない、またはデコードできない場合に使う先頭カーソル
pub fn default_cursor<Q: PageQuery>(query: Q) -> Cursor<Q> {
   Cursor::start(query)
}

/// トークンをデコードし、失敗時は黙って先頭カーソルにフォールバックする
///
/// リクエストを拒否したい呼び出し元は [`decode`] を直接使うこと。
pub fn decode_or_default<Q: PageQuery>(token: Option<&str>, query: Q) -> Cursor<Q> {
   let Some(token) = token else {
      return default_cursor(query);
   };

   match decode(token) {
      Ok(cursor) => cursor,
      Err(e) => {
         warn!(
            error.category = "pagination",
            error.kind = "invalid_cursor",
            error = %e,
            "カーソルをデコードできないため先頭ページから再開します"
         );
         default_cursor(query)
      }
   }
}

/// ページの first / prev / next / last をエンコードする
pub fn encode_links<Q: PageQuery, T>(
   pagination: &Pagination<Q, T>,
) -> Result<PageTokens, CursorEncodeError> {
   Ok(PageTokens {
      first: encode(&pagination.first)?,
      prev:  pagination.prev.as_ref().map(encode).transpose()?,
      next:  pagination.next.as_ref().map(encode).transpose()?,
      last:  encode(&pagination.last)?,
   })
}

fn put_field(buf: &mut BytesMut, field: &'static str, bytes: &[u8]) -> Result<(), CursorEncodeError> {
   let len = u32::try_from(bytes.len()).map_err(|_| CursorEncodeError::FieldTooLong {
      field,
      len: bytes.len(),
   })?;
   buf.put_u32(len);
   buf.put_slice(bytes);
   Ok(())
}

fn take_u8(buf: &mut &[u8], field: &'static str) -> Result<u8, CursorDecodeError> {
   if !buf.has_remaining() {
      return Err(CursorDecodeError::Truncated { field });
   }
   Ok(buf.get_u8())
}

fn take_field<'a>(buf: &mut &'a [u8], field: &'static str) -> Result<&'a [u8], CursorDecodeError> {
   if buf.remaining() < 4 {
      return Err(CursorDecodeError::Truncated { field });
   }
   let len = buf.get_u32() as usize;
   if buf.remaining() < len {
      return Err(CursorDecodeError::Truncated { field });
   }
   let (head, tail) = buf.split_at(len);
   *buf = tail;
   Ok(head)
}

#[cfg(test)]
mod tests {
   use pretty_assertions::assert_eq;
   use rstest::rstest;

   use super::*;
   use crate::{
      PageLimit,
      PaginationBuilder,
      test_support::{UsernameQuery, query},
   };

   /// 任意のフィールドから生のトークンを組み立てる
   fn raw_token(version: u8, tag: u8, position: &[u8], hash: i64, query: &[u8]) -> String {
      let mut buf = BytesMut::new();
      buf.put_u8(version);
      buf.put_u8(tag);
      buf.put_u32(position.len() as u32);
      buf.put_slice(position);
      buf.put_i64(hash);
      buf.put_u32(query.len() as u32);
      buf.put_slice(query);
      URL_SAFE_NO_PAD.encode(&buf)
   }

   fn valid_parts() -> (Vec<u8>, i64) {
      let q = query(Some("ali"), 10);
      (serde_json::to_vec(&q).unwrap(), q.query_hash().as_i64())
   }

   #[rstest]
   #[case(Cursor::start(query(None, 1)))]
   #[case(Cursor::end(query(Some("team"), 20)))]
   #[case(Cursor::new("alice", Direction::Ascending, query(None, 5)))]
   #[case(Cursor::new("bob-の-チーム", Direction::Descending, query(Some("b"), 100)))]
   fn test_エンコードしたカーソルを復元できる(#[case] cursor: Cursor<UsernameQuery>) {
      let token = encode(&cursor).unwrap();
      let decoded: Cursor<UsernameQuery> = decode(&token).unwrap();

      assert_eq!(decoded, cursor);
   }

   #[test]
   fn test_トークンはurlセーフな文字のみで構成される() {
      let cursor = Cursor::new("?&=/+ ", Direction::Descending, query(Some("&"), 7));
      let token = encode(&cursor).unwrap();

      assert!(
         token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'),
         "URL セーフでない文字を含む: {token}"
      );
   }

   #[test]
   fn test_先頭バイトはバージョンと方向タグ() {
      let token = encode(&Cursor::end(query(None, 1))).unwrap();
      let raw = URL_SAFE_NO_PAD.decode(token).unwrap();

      assert_eq!(raw[0], TOKEN_VERSION);
      assert_eq!(raw[1], Direction::Descending.as_tag());
   }

   #[test]
   fn test_前後の空白は無視される() {
      let cursor = Cursor::new("bob", Direction::Ascending, query(None, 3));
      let token = format!("  {}\n", encode(&cursor).unwrap());

      assert_eq!(decode::<UsernameQuery>(&token).unwrap(), cursor);
   }

   // ===== デコード失敗 =====

   #[rstest]
   #[case("")]
   #[case("   \t\n")]
   fn test_空のトークンは拒否される(#[case] token: &str) {
      let err = decode::<UsernameQuery>(token).unwrap_err();
      assert!(matches!(err, CursorDecodeError::Empty));
   }

   #[test]
   fn test_上限を超えるトークンはエンコード時に拒否される() {
      // Given: JSON にすると 8 KiB を超えるクエリ
      let cursor = Cursor::start(query(Some("a".repeat(7000).as_str()), 20));

      // When
      let err = encode(&cursor).unwrap_err();

      // Then
      assert!(matches!(
         err,
         CursorEncodeError::TooLong { len, max } if len > MAX_TOKEN_LEN && max == MAX_TOKEN_LEN
      ));
   }

   #[test]
   fn test_上限ちょうどまでのトークンは復元できる() {
      // base64 の 4/3 倍を見込んで上限近くまで埋める
      let mut contains = "a".repeat(5000);
      let cursor = loop {
         let cursor = Cursor::start(query(Some(contains.as_str()), 20));
         match encode(&cursor) {
            Ok(token) if token.len() + 4 > MAX_TOKEN_LEN => break cursor,
            Ok(_) => contains.push('a'),
            Err(e) => panic!("上限手前でエンコードに失敗: {e}"),
         }
      };

      let token = encode(&cursor).unwrap();
      assert!(token.len() <= MAX_TOKEN_LEN);
      assert_eq!(decode::<UsernameQuery>(&token).unwrap(), cursor);
   }

   #[test]
   fn test_長すぎるトークンは拒否される() {
      let token = "A".repeat(MAX_TOKEN_LEN + 1);
      let err = decode::<UsernameQuery>(&token).unwrap_err();

      assert!(matches!(
         err,
         CursorDecodeError::TooLong { len, max } if len == MAX_TOKEN_LEN + 1 && max == MAX_TOKEN_LEN
      ));
   }

   #[rstest]
   #[case("not base64!")]
   #[case("abc=")]
   fn test_base64でないトークンは拒否される(#[case] token: &str) {
      let err = decode::<UsernameQuery>(token).unwrap_err();
      assert!(matches!(err, CursorDecodeError::Base64(_)));
   }

   #[test]
   fn test_未対応のバージョンは拒否される() {
      let (q, hash) = valid_parts();
      let token = raw_token(0x02, 0x01, b"alice", hash, &q);

      let err = decode::<UsernameQuery>(&token).unwrap_err();
      assert!(matches!(err, CursorDecodeError::UnsupportedVersion(0x02)));
   }

   #[test]
   fn test_不明な方向タグは拒否される() {
      let (q, hash) = valid_parts();
      let token = raw_token(TOKEN_VERSION, 0x7f, b"alice", hash, &q);

      let err = decode::<UsernameQuery>(&token).unwrap_err();
      assert!(matches!(err, CursorDecodeError::UnknownDirection(0x7f)));
   }

   #[test]
   fn test_途中で切れたトークンは拒否される() {
      let token = encode(&Cursor::new("alice", Direction::Ascending, query(None, 3))).unwrap();
      let raw = URL_SAFE_NO_PAD.decode(token).unwrap();

      for cut in 1..raw.len() {
         let truncated = URL_SAFE_NO_PAD.encode(&raw[..cut]);
         let err = decode::<UsernameQuery>(&truncated).unwrap_err();
         assert!(
            matches!(
               err,
               CursorDecodeError::Truncated { .. } | CursorDecodeError::InvalidQuery(_)
            ),
            "{cut} バイトで切った場合: {err:?}"
         );
      }
   }

   #[test]
   fn test_末尾の余分なバイトは拒否される() {
      let token = encode(&Cursor::start(query(None, 3))).unwrap();
      let mut raw = URL_SAFE_NO_PAD.decode(token).unwrap();
      raw.extend_from_slice(&[0x00, 0x00]);

      let err = decode::<UsernameQuery>(&URL_SAFE_NO_PAD.encode(raw)).unwrap_err();
      assert!(matches!(err, CursorDecodeError::TrailingBytes(2)));
   }

   #[test]
   fn test_utf8でないpositionは拒否される() {
      let (q, hash) = valid_parts();
      let token = raw_token(TOKEN_VERSION, 0x01, &[0xff, 0xfe], hash, &q);

      let err = decode::<UsernameQuery>(&token).unwrap_err();
      assert!(matches!(err, CursorDecodeError::InvalidPosition(_)));
   }

   #[test]
   fn test_形の合わないクエリは拒否される() {
      let token = raw_token(TOKEN_VERSION, 0x01, b"alice", 0, br#"{"unexpected":true}"#);

      let err = decode::<UsernameQuery>(&token).unwrap_err();
      assert!(matches!(err, CursorDecodeError::InvalidQuery(_)));
   }

   #[test]
   fn test_改ざんされたハッシュは拒否される() {
      let (q, hash) = valid_parts();
      let token = raw_token(TOKEN_VERSION, 0x01, b"alice", hash ^ 1, &q);

      let err = decode::<UsernameQuery>(&token).unwrap_err();
      assert!(matches!(
         err,
         CursorDecodeError::FingerprintMismatch { stored, computed }
            if stored.as_i64() == hash ^ 1 && computed.as_i64() == hash
      ));
   }

   // ===== フォールバック =====

   #[test]
   fn test_default_cursorは先頭カーソルを返す() {
      let q = query(Some("a"), 4);
      assert_eq!(default_cursor(q.clone()), Cursor::start(q));
   }

   #[test]
   fn test_decode_or_defaultはトークンがなければ先頭カーソルを返す() {
      let q = query(None, 4);
      assert_eq!(decode_or_default(None, q.clone()), Cursor::start(q));
   }

   #[test]
   fn test_decode_or_defaultは不正なトークンで先頭カーソルを返す() {
      let q = query(None, 4);
      assert_eq!(decode_or_default(Some("%%%"), q.clone()), Cursor::start(q));
   }

   #[test]
   fn test_decode_or_defaultは正しいトークンをそのまま使う() {
      let cursor = Cursor::new("carol", Direction::Descending, query(None, 2));
      let token = encode(&cursor).unwrap();

      assert_eq!(decode_or_default(Some(&token), query(None, 9)), cursor);
   }

   // ===== encode_links =====

   #[test]
   fn test_encode_linksは存在するカーソルのみエンコードする() {
      let q = query(None, 1);
      let cursor = Cursor::start(q);
      let page = PaginationBuilder::new(&cursor, |s: &String| s.clone())
         .build(vec!["A".to_string(), "B".to_string()], PageLimit::new(1).unwrap());

      let tokens = encode_links(&page).unwrap();

      assert_eq!(decode::<UsernameQuery>(&tokens.first).unwrap(), page.first);
      assert_eq!(decode::<UsernameQuery>(&tokens.last).unwrap(), page.last);
      assert_eq!(tokens.prev, None);
      let next = decode::<UsernameQuery>(tokens.next.as_deref().unwrap()).unwrap();
      assert_eq!(Some(next), page.next);
   }
}
