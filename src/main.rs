use std::process::ExitCode;

use laopu_intel::models::config::AppConfig;
use laopu_intel::services::dashboard;

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Failed to load configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    match dashboard::run(&config) {
        Ok(summary) => {
            log::info!(
                "Dashboard generated at {}: {} news, {} social posts, {} stores{}",
                summary.generated_at.format("%Y-%m-%d %H:%M:%S"),
                summary.news_count,
                summary.social_count,
                summary.store_count,
                if summary.market_available { "" } else { " (market data unavailable)" },
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Dashboard generation failed: {e}");
            ExitCode::FAILURE
        }
    }
}
