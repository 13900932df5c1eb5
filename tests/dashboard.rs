use std::time::Duration;

use laopu_intel::domain::content::{NewsChannel, SocialPlatform};
use laopu_intel::services::dashboard::{DATA_FILE, INDEX_FILE, generate};
use laopu_intel::sources::HttpClient;
use laopu_intel::sources::fixed::FixedMarket;
use serde_json::Value;

mod common;

fn http() -> HttpClient {
    HttpClient::new(Duration::from_secs(1)).expect("http client")
}

#[test]
fn writes_page_and_export() {
    let output = common::TestOutput::new();
    let config = output.config();
    let sources = common::offline_sources(
        FixedMarket::new(common::market()),
        vec![
            vec![common::news("老铺黄金今起再次涨价，最高幅度超25%", Some(2), NewsChannel::Sina)],
            vec![common::news("老铺黄金回购股份", Some(5), NewsChannel::Eastmoney)],
        ],
        vec![vec![common::post("海港城老铺黄金满减攻略", "1.2万", SocialPlatform::Xhs)]],
    );

    let summary = generate(&config, &sources, &http(), common::now()).expect("run should succeed");

    assert!(summary.market_available);
    assert_eq!(summary.news_count, 2);
    assert_eq!(summary.social_count, 1);
    assert_eq!(summary.store_count, 8);
    assert!(summary.index_path.ends_with(INDEX_FILE));

    let html = output.read(INDEX_FILE);
    assert!(html.contains("⚡ 老铺黄金今起再次涨价，最高幅度超25% · 点击「价格情报」查看详情"));
    assert!(html.contains("老铺黄金回购股份"));
    assert!(html.contains("📕 小红书"));
    assert!(html.contains("❤️ 1.2万"));
    assert!(html.contains("$2,750"));
    assert!(html.contains("+3.26"));
    assert!(html.contains("香港 海港城店 (Harbour City)"));

    let data: Value = serde_json::from_str(&output.read(DATA_FILE)).expect("valid json");
    assert_eq!(data["generated_at"], "2026-01-26 18:00");
    assert_eq!(data["sim_weight_g"], 50.0);
    let stores = data["stores"].as_array().expect("stores array");
    assert_eq!(stores.len(), 8);
    assert_eq!(stores[0]["id"], "hk_harbour_city");
    assert_eq!(stores[0]["promo_valid_until"], "2026-02-28");
    let price = stores[0]["simulated_final_price"].as_f64().unwrap();
    assert!((price - 62_676.25).abs() < 1e-6);
    assert_eq!(stores[1]["simulated_final_price"], 72_500.0);
}

#[test]
fn earlier_sources_win_duplicate_titles() {
    let output = common::TestOutput::new();
    let config = output.config();
    let sources = common::offline_sources(
        FixedMarket::new(common::market()),
        vec![
            vec![common::news("老铺黄金SKP门店排队盛况空前，客流创新高", None, NewsChannel::Yahoo)],
            vec![common::news("老铺黄金SKP门店排队盛况空前，客流创新高（组图）", Some(1), NewsChannel::Sina)],
        ],
        vec![],
    );

    let summary = generate(&config, &sources, &http(), common::now()).unwrap();

    assert_eq!(summary.news_count, 1);
    let html = output.read(INDEX_FILE);
    assert!(html.contains("Yahoo Finance"));
    assert!(!html.contains("（组图）"));
}

#[test]
fn failed_sources_degrade_to_fallbacks() {
    let output = common::TestOutput::new();
    let config = output.config();
    let sources = common::offline_sources(
        FixedMarket::failing("chart endpoint timed out"),
        vec![vec![]],
        vec![vec![], vec![]],
    );

    let summary = generate(&config, &sources, &http(), common::now()).unwrap();

    assert!(!summary.market_available);
    assert_eq!(summary.news_count, 0);
    let html = output.read(INDEX_FILE);
    assert!(html.contains("暂未获取到最新资讯，请稍后刷新"));
    assert!(html.contains("暂未抓取到社媒内容"));
    assert!(html.contains("金价数据已更新 · 2026-01-26 18:00 CST"));
    assert!(html.contains("获取中"));
    assert!(html.contains("请稍后刷新"));
    assert!(!html.contains("{{"));
}

#[test]
fn identical_inputs_give_identical_outputs() {
    let output = common::TestOutput::new();
    let config = output.config();
    let build = || {
        common::offline_sources(
            FixedMarket::new(common::market()),
            vec![vec![common::news("老铺黄金业绩预告", Some(3), NewsChannel::Eastmoney)]],
            vec![vec![common::post("老铺黄金开箱", "356", SocialPlatform::Weibo)]],
        )
    };

    generate(&config, &build(), &http(), common::now()).unwrap();
    let first = (output.read(INDEX_FILE), output.read(DATA_FILE));
    generate(&config, &build(), &http(), common::now()).unwrap();
    let second = (output.read(INDEX_FILE), output.read(DATA_FILE));

    assert_eq!(first, second);
    assert!(output.path().join("public").is_dir());
}
