//! # Observability 基盤
//!
//! トレーシングの初期化と、HTTP リクエスト単位のスパン・Request ID の生成。
//!
//! ## 設計方針
//!
//! - 出力形式は `LOG_FORMAT`、レベルは `RUST_LOG` で切り替える
//! - JSON 出力ではイベントをフラットにし、現在のスパンだけを添える
//! - `ErrorLayer` を常に登録し、インフラ層のエラーに `SpanTrace` を残す

/// Request ID を運ぶヘッダー名
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// `RUST_LOG` 未設定時のフィルタ
pub const DEFAULT_FILTER: &str = "info,lendlab=debug";

/// ログ出力形式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
   /// 本番向け
   Json,
   #[default]
   Pretty,
}

impl LogFormat {
   /// `LOG_FORMAT` の値を解釈する
   ///
   /// 未知の値は `None`。大文字小文字と前後の空白は無視する。
   pub fn from_value(value: &str) -> Option<Self> {
      match value.trim().to_ascii_lowercase().as_str() {
         "json" => Some(Self::Json),
         "pretty" => Some(Self::Pretty),
         _ => None,
      }
   }

   /// 環境変数 `LOG_FORMAT` から読み取る
   ///
   /// トレーシング初期化前に呼ばれるため、未知の値の警告は stderr に出して
   /// [`Pretty`](LogFormat::Pretty) を使う。
   pub fn from_env() -> Self {
      let Ok(raw) = std::env::var("LOG_FORMAT") else {
         return Self::default();
      };
      Self::from_value(&raw).unwrap_or_else(|| {
         eprintln!("WARNING: unknown LOG_FORMAT={raw:?}, falling back to pretty");
         Self::default()
      })
   }
}

/// トレーシング初期化設定
#[derive(Debug, Clone)]
pub struct TracingConfig {
   pub service_name: String,
   pub log_format:   LogFormat,
}

impl TracingConfig {
   pub fn new(service_name: impl Into<String>, log_format: LogFormat) -> Self {
      Self {
         service_name: service_name.into(),
         log_format,
      }
   }

   pub fn from_env(service_name: impl Into<String>) -> Self {
      Self::new(service_name, LogFormat::from_env())
   }

   /// プロセス全体を包むスパン
   ///
   /// JSON ログの `span.service` にサービス名が載る。
   #[cfg(feature = "observability")]
   pub fn root_span(&self) -> tracing::Span {
      tracing::info_span!("app", service = %self.service_name)
   }
}

/// グローバルサブスクライバを登録する
#[cfg(feature = "observability")]
pub fn init_tracing(config: &TracingConfig) {
   use tracing_subscriber::{EnvFilter, Layer as _, layer::SubscriberExt, util::SubscriberInitExt};

   let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

   let output = match config.log_format {
      LogFormat::Json => tracing_subscriber::fmt::layer()
         .json()
         .flatten_event(true)
         .with_current_span(true)
         .with_span_list(false)
         .boxed(),
      LogFormat::Pretty => tracing_subscriber::fmt::layer().with_target(false).boxed(),
   };

   tracing_subscriber::registry()
      .with(filter)
      .with(output)
      .with(tracing_error::ErrorLayer::default())
      .init();
}

/// `TraceLayer::make_span_with` 用のリクエストスパン
///
/// `SetRequestIdLayer` の内側に置く。Request ID が無ければ `-` を記録する。
#[cfg(feature = "observability")]
pub fn make_request_span<B>(request: &http::Request<B>) -> tracing::Span {
   let request_id = request
      .headers()
      .get(REQUEST_ID_HEADER)
      .and_then(|value| value.to_str().ok())
      .unwrap_or("-");

   tracing::info_span!(
      "request",
      method = %request.method(),
      path = %request.uri().path(),
      request_id = %request_id,
   )
}

/// UUID v7 の Request ID を振る
#[cfg(feature = "observability")]
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeRequestUuidV7;

#[cfg(feature = "observability")]
impl tower_http::request_id::MakeRequestId for MakeRequestUuidV7 {
   fn make_request_id<B>(
      &mut self,
      _request: &http::Request<B>,
   ) -> Option<tower_http::request_id::RequestId> {
      http::HeaderValue::try_from(uuid::Uuid::now_v7().to_string())
         .ok()
         .map(tower_http::request_id::RequestId::new)
   }
}

#[cfg(test)]
mod tests {
   use pretty_assertions::assert_eq;
   use rstest::rstest;

   use super::*;

   #[rstest]
   #[case("json", Some(LogFormat::Json))]
   #[case(" JSON ", Some(LogFormat::Json))]
   #[case("pretty", Some(LogFormat::Pretty))]
   #[case("", None)]
   #[case("yaml", None)]
   fn test_log_formatの解釈(#[case] input: &str, #[case] expected: Option<LogFormat>) {
      assert_eq!(LogFormat::from_value(input), expected);
   }

   #[test]
   fn test_既定の出力形式はpretty() {
      assert_eq!(LogFormat::default(), LogFormat::Pretty);
   }
}
