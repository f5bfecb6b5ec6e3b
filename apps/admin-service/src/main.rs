//! # Admin Service サーバー
//!
//! 融資シミュレーション研修の管理画面向け API サーバー。
//!
//! ## 役割
//!
//! - **一覧 API**: チーム・銀行をキーセットページネーションで返す
//! - **ヘルスチェック**: liveness / readiness
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `ADMIN_HOST` | No | バインドアドレス（デフォルト: `0.0.0.0`） |
//! | `ADMIN_PORT` | **Yes** | ポート番号 |
//! | `DATABASE_URL` | **Yes** | PostgreSQL 接続 URL |
//! | `PAGINATION_DEFAULT_LIMIT` | No | `limit` 未指定時のページサイズ（デフォルト: `20`） |
//! | `PAGINATION_MAX_LIMIT` | No | ページサイズの上限（デフォルト: `100`） |
//! | `PAGINATION_STALE_CURSOR_POLICY` | No | `reject` または `restart`（デフォルト: `reject`） |
//! | `LOG_FORMAT` | No | `json` または `pretty`（デフォルト: `pretty`） |
//!
//! ## 起動方法
//!
//! ```bash
//! ADMIN_PORT=3100 DATABASE_URL=postgres://... cargo run -p lendlab-admin-service
//! ```

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use lendlab_admin_service::{
   api_router,
   config::AdminConfig,
   handler::{BankState, ReadinessState, TeamState},
   health_router,
   usecase::{BankUseCaseImpl, TeamUseCaseImpl},
};
use lendlab_infra::{
   db,
   repository::{PostgresBankRepository, PostgresTeamRepository},
};
use lendlab_shared::observability::{MakeRequestUuidV7, TracingConfig, make_request_span};
use tokio::net::TcpListener;
use tower_http::{
   request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
   trace::TraceLayer,
};

/// Admin Service サーバーのエントリーポイント
#[tokio::main]
async fn main() -> anyhow::Result<()> {
   // .env ファイルを読み込む（存在する場合）
   dotenvy::dotenv().ok();

   // トレーシング初期化
   let tracing_config = TracingConfig::from_env("admin-service");
   lendlab_shared::observability::init_tracing(&tracing_config);
   let _tracing_guard = tracing_config.root_span().entered();

   let config = AdminConfig::from_env().context("設定の読み込みに失敗しました")?;

   tracing::info!(
      "Admin Service サーバーを起動します: {}:{}",
      config.host,
      config.port
   );

   let pool = db::create_pool(&config.database_url)
      .await
      .context("データベース接続に失敗しました")?;
   tracing::info!("データベースに接続しました");

   db::run_migrations(&pool)
      .await
      .context("マイグレーションの実行に失敗しました")?;
   tracing::info!("マイグレーションを適用しました");

   let readiness_state = Arc::new(ReadinessState { pool: pool.clone() });
   let team_state = Arc::new(TeamState {
      usecase:    TeamUseCaseImpl::new(Arc::new(PostgresTeamRepository::new(pool.clone()))),
      pagination: config.pagination,
   });
   let bank_state = Arc::new(BankState {
      usecase:    BankUseCaseImpl::new(Arc::new(PostgresBankRepository::new(pool))),
      pagination: config.pagination,
   });

   let app = health_router(readiness_state)
      .merge(api_router(team_state, bank_state))
      .layer(PropagateRequestIdLayer::x_request_id())
      .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
      .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7));

   let addr: SocketAddr = format!("{}:{}", config.host, config.port)
      .parse()
      .context("アドレスのパースに失敗しました")?;

   let listener = TcpListener::bind(addr).await?;
   tracing::info!("Admin Service サーバーが起動しました: {}", addr);

   axum::serve(listener, app).await?;

   Ok(())
}
