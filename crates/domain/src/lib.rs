//! # LendLab ドメイン層
//!
//! 貸付シミュレーション管理画面が扱うエンティティと、一覧 API の
//! 絞り込み条件（ページクエリ）を定義する。
//!
//! ## 依存関係の方向
//!
//! ```text
//! admin-service → infra → domain → pagination
//! ```
//!
//! ドメイン層はページネーションエンジンのみに依存し、DB や HTTP には
//! 依存しない。
//!
//! ## モジュール構成
//!
//! - [`error`] - ドメイン層で発生するエラーの定義
//! - [`id`] - エンティティ ID
//! - [`value_objects`] - ユーザー名・銀行コード
//! - [`team`] - チーム（受講者）
//! - [`bank`] - 銀行
//!
//! ## 使用例
//!
//! ```rust
//! use lendlab_domain::{DomainError, value_objects::Username};
//!
//! let username = Username::new("team-alpha").unwrap();
//! assert_eq!(username.as_str(), "team-alpha");
//!
//! let error = Username::new("チーム").unwrap_err();
//! assert!(matches!(error, DomainError::Validation(_)));
//! ```

pub mod bank;
pub mod error;
pub mod id;
pub mod team;
pub mod value_objects;

pub use error::DomainError;
