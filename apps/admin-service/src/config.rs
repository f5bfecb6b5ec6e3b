//! # Admin Service 設定
//!
//! 環境変数から Admin Service サーバーの設定を読み込む。
//!
//! 読み込みは [`AdminConfig::from_lookup`] に集約し、テストでは環境変数を
//! 書き換えずに任意の値を渡せるようにしている。

use std::env;

use lendlab_pagination::{PageLimit, StaleCursorPolicy};
use thiserror::Error;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PAGE_LIMIT: u32 = 20;
const DEFAULT_MAX_PAGE_LIMIT: u32 = 100;

/// 設定の読み込みエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
   #[error("{0} が設定されていません")]
   Missing(&'static str),

   #[error("{key} の値が不正です: {value}")]
   Invalid { key: &'static str, value: String },

   #[error("PAGINATION_DEFAULT_LIMIT ({default}) が PAGINATION_MAX_LIMIT ({max}) を超えています")]
   DefaultExceedsMax { default: u32, max: u32 },
}

/// Admin Service サーバーの設定
#[derive(Debug, Clone)]
pub struct AdminConfig {
   /// バインドアドレス
   pub host:         String,
   /// ポート番号
   pub port:         u16,
   /// データベース接続 URL
   pub database_url: String,
   /// 一覧 API のページネーション設定
   pub pagination:   PaginationConfig,
}

/// 一覧 API のページネーション設定
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationConfig {
   /// `limit` 未指定時のページサイズ
   pub default_limit:       PageLimit,
   /// ページサイズの上限（超過分は切り詰める）
   pub max_limit:           PageLimit,
   /// 古くなったカーソルやデコードできないカーソルの扱い
   pub stale_cursor_policy: StaleCursorPolicy,
}

impl AdminConfig {
   /// 環境変数から設定を読み込む
   pub fn from_env() -> Result<Self, ConfigError> {
      Self::from_lookup(|key| env::var(key).ok())
   }

   /// 任意のキー検索関数から設定を読み込む
   pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
      let port = required(&lookup, "ADMIN_PORT")?;
      let port = port
         .parse()
         .map_err(|_| ConfigError::Invalid {
            key:   "ADMIN_PORT",
            value: port,
         })?;

      Ok(Self {
         host: lookup("ADMIN_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
         port,
         database_url: required(&lookup, "DATABASE_URL")?,
         pagination: PaginationConfig::from_lookup(&lookup)?,
      })
   }
}

impl PaginationConfig {
   fn from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
      let default_limit = page_limit(lookup, "PAGINATION_DEFAULT_LIMIT", DEFAULT_PAGE_LIMIT)?;
      let max_limit = page_limit(lookup, "PAGINATION_MAX_LIMIT", DEFAULT_MAX_PAGE_LIMIT)?;
      if default_limit > max_limit {
         return Err(ConfigError::DefaultExceedsMax {
            default: default_limit.get(),
            max:     max_limit.get(),
         });
      }

      let stale_cursor_policy = match lookup("PAGINATION_STALE_CURSOR_POLICY") {
         None => StaleCursorPolicy::default(),
         Some(value) => value
            .trim()
            .to_ascii_lowercase()
            .parse::<StaleCursorPolicy>()
            .map_err(|_| ConfigError::Invalid {
               key: "PAGINATION_STALE_CURSOR_POLICY",
               value,
            })?,
      };

      Ok(Self {
         default_limit,
         max_limit,
         stale_cursor_policy,
      })
   }
}

impl Default for PaginationConfig {
   fn default() -> Self {
      Self {
         default_limit:       PageLimit::try_from(DEFAULT_PAGE_LIMIT).unwrap_or(PageLimit::MIN),
         max_limit:           PageLimit::try_from(DEFAULT_MAX_PAGE_LIMIT).unwrap_or(PageLimit::MIN),
         stale_cursor_policy: StaleCursorPolicy::default(),
      }
   }
}

fn required(lookup: &impl Fn(&str) -> Option<String>, key: &'static str) -> Result<String, ConfigError> {
   lookup(key).ok_or(ConfigError::Missing(key))
}

fn page_limit(
   lookup: &impl Fn(&str) -> Option<String>,
   key: &'static str,
   default: u32,
) -> Result<PageLimit, ConfigError> {
   let Some(value) = lookup(key) else {
      return PageLimit::new(default).map_err(|_| ConfigError::Invalid {
         key,
         value: default.to_string(),
      });
   };
   value
      .trim()
      .parse::<u32>()
      .ok()
      .and_then(|n| PageLimit::new(n).ok())
      .ok_or(ConfigError::Invalid { key, value })
}
