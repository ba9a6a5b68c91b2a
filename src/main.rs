//! # LeetCode 진행도 트래커 진입점
//!
//! 두 가지 모드로 실행됩니다:
//! - `leetrack` : 차트 데이터 API + 대시보드 정적 파일 서버
//! - `leetrack collect` : 설정된 사용자 통계를 한 번 수집하여 로그에 추가하고 종료 (cron용)
//!
//! 이 파일이 수행하는 작업:
//! 1. 환경변수(.env) 로딩
//! 2. 로깅(tracing) 초기화
//! 3. 설정 로딩
//! 4. LeetCode 클라이언트 생성
//! 5. 수집 모드면 수집 후 종료, 아니면 라우터 설정 후 HTTP 서버 시작

// ── 모듈 선언 ──
// `mod config;`는 같은 디렉토리의 `config.rs` 또는 `config/mod.rs`를 가져옵니다.
mod config;
mod db;
mod error;
mod models;
mod routes;
mod services;

// ── 외부 크레이트 및 모듈에서 필요한 항목 가져오기 ──
use anyhow::Result; // anyhow::Result: 어떤 에러 타입이든 담을 수 있는 범용 Result 타입
use chrono::Local; // 로컬 시각 (수집 타임스탬프용)
use config::Config; // 환경변수 기반 설정
use routes::AppState; // 핸들러들이 공유하는 상태
use services::{collector, leetcode::LeetCodeClient};
use std::{path::Path, sync::Arc, time::Duration};
use tower_http::{
    // tower-http: HTTP 미들웨어 모음 크레이트
    cors::{Any, CorsLayer}, // CORS(Cross-Origin Resource Sharing) 설정
    trace::TraceLayer,      // HTTP 요청/응답 로깅 미들웨어
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt}; // 로깅 초기화 유틸리티

// #[tokio::main]: tokio 비동기 런타임을 만들고 그 안에서 main을 실행하는 매크로
#[tokio::main]
async fn main() -> Result<()> {
    // ── 1단계: 환경변수 로딩 ──
    // .ok()는 Result를 Option으로 바꿔서, .env 파일이 없어도 에러 없이 넘어갑니다.
    dotenvy::dotenv().ok();

    // ── 2단계: 로깅(tracing) 초기화 ──
    // registry()에 필터와 포맷터를 레이어처럼 쌓아올립니다.
    tracing_subscriber::registry()
        .with(
            // RUST_LOG가 없으면 leetrack, tower_http, axum을 debug 레벨로 출력합니다.
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "leetrack=debug,tower_http=debug,axum=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer()) // 로그를 터미널에 출력하는 포맷터 레이어
        .init(); // 전역 로거로 등록

    // ── 3단계: 설정 로딩 ──
    // 잘못된 값은 기본값으로 대체되므로 여기서는 실패하지 않습니다.
    let config = Config::from_env();
    tracing::info!(
        users = ?config.usernames,
        log = %config.log_path,
        "Loaded configuration"
    );

    // ── 4단계: 통계 소스 생성 ──
    // reqwest 클라이언트 생성(TLS 초기화 등)이 실패하면 `?`로 main에서 바로 종료합니다.
    let client = LeetCodeClient::new(
        config.graphql_url.clone(),
        Duration::from_secs(config.request_timeout_secs),
    )?;

    // ── 5단계: 수집 모드 ──
    // `leetrack collect`는 서버를 띄우지 않고 한 번 수집한 뒤 종료합니다.
    // args().nth(1): 프로그램 이름 다음의 첫 번째 인자 (Option<String>)
    if std::env::args().nth(1).as_deref() == Some("collect") {
        let report = collector::collect_all(
            &client,
            Path::new(&config.log_path),
            &config.usernames,
            Local::now().naive_local(),
        )
        .await;
        for failed in &report.failed {
            tracing::warn!(username = %failed.username, reason = %failed.reason, "not collected");
        }
        return Ok(());
    }

    // ── 6단계: 애플리케이션 상태(State) 생성 ──
    // Arc: 참조 카운트 스마트 포인터. clone해도 설정/클라이언트가 복제되지 않고 공유됩니다.
    let state = AppState {
        config: Arc::new(config.clone()),
        source: Arc::new(client),
    };

    // ── 7단계: CORS 미들웨어 설정 ──
    let cors = CorsLayer::new()
        .allow_origin(Any) // 모든 출처(origin) 허용
        .allow_methods(Any) // 모든 HTTP 메서드 허용
        .allow_headers(Any); // 모든 헤더 허용

    // ── 8단계: 라우터 구성 ──
    // /api/* 는 핸들러로, /static/* 와 / 는 대시보드 정적 파일로 보냅니다.
    let router = routes::with_dashboard(
        routes::api_router(state),
        Path::new(&config.static_dir),
    );
    // .layer(): 미들웨어를 추가합니다. 나중에 추가한 레이어가 바깥쪽에서 먼저 요청을 받습니다.
    let app = router.layer(cors).layer(TraceLayer::new_for_http());

    // ── 9단계: 서버 시작 ──
    let addr = format!("{}:{}", config.host, config.port);
    // TcpListener::bind: 지정된 주소에서 TCP 연결을 받을 준비를 합니다.
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    // axum::serve: 서버가 종료될 때까지 요청을 처리합니다.
    axum::serve(listener, app).await?;

    Ok(())
}
