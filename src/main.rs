use std::sync::Arc;

use mask_finder_bot::{config, events, mask, pending, Data};
use teloxide::error_handlers::LoggingErrorHandler;
use teloxide::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match config::Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{e}");
            std::process::exit(config::EXIT_MISSING_TOKEN);
        }
    };

    let mask_api = match mask::MaskApi::new(&config.mask_api_url, config.request_timeout) {
        Ok(api) => api,
        Err(e) => {
            tracing::error!("HTTP 클라이언트 생성 실패: {e}");
            std::process::exit(1);
        }
    };

    // 이전 실행에서 저장된 반경 정보 복구
    let pending_radii = pending::persist::on_startup(&config.range_dump_path, config.pending_ttl);

    let data = Arc::new(Data {
        pending_radii: pending_radii.clone(),
        mask_api,
    });

    let bot = Bot::new(&config.bot_token);
    tracing::info!("봇이 준비되었습니다!");

    Dispatcher::builder(bot, events::schema())
        .dependencies(dptree::deps![data])
        .default_handler(|upd| async move {
            tracing::debug!("처리하지 않는 업데이트: {:?}", upd.kind);
        })
        .error_handler(LoggingErrorHandler::with_custom_text("핸들러 오류"))
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    match pending::persist::on_shutdown(&config.range_dump_path, &pending_radii) {
        Ok(count) => tracing::info!(
            "반경 정보 {count}개 저장: {}",
            config.range_dump_path.display()
        ),
        Err(e) => tracing::warn!("반경 정보 저장 실패: {e}"),
    }
}
