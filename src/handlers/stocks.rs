//! 选股接口：筛选查询、条件变化、个股详情与链接

use actix_web::{http::header, web, HttpRequest, HttpResponse, Result};
use regex::Regex;
use std::sync::OnceLock;

use crate::handlers::{bad_request, service_error};
use crate::models::{ApiResponse, FilterChange, LinkQuery, ScreenRequest};
use crate::services::display::ClientKind;
use crate::state::AppState;

fn stock_code_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(?i:sh|sz|bj)?\d{6}$").unwrap())
}

/// 取出并校验路径中的股票代码
fn stock_code(path: web::Path<String>) -> std::result::Result<String, HttpResponse> {
    let code = path.into_inner().trim().to_string();
    if stock_code_pattern().is_match(&code) {
        Ok(code)
    } else {
        Err(bad_request(format!("无效的股票代码: {}", code)))
    }
}

pub async fn screen(state: web::Data<AppState>, body: web::Json<ScreenRequest>) -> Result<HttpResponse> {
    match state.screener.screen(&body).await {
        Ok(result) => Ok(HttpResponse::Ok().json(ApiResponse::success(result))),
        Err(e) => Ok(service_error(e)),
    }
}

pub async fn filter_change(state: web::Data<AppState>, body: web::Json<FilterChange>) -> Result<HttpResponse> {
    match state.screener.filter_change(&body).await {
        Ok(result) => Ok(HttpResponse::Ok().json(ApiResponse::success(result))),
        Err(e) => Ok(service_error(e)),
    }
}

pub async fn get_detail(state: web::Data<AppState>, path: web::Path<String>) -> Result<HttpResponse> {
    let code = match stock_code(path) {
        Ok(code) => code,
        Err(resp) => return Ok(resp),
    };

    match state.screener.stock_detail(&code).await {
        Ok(detail) => Ok(HttpResponse::Ok().json(ApiResponse::success(detail))),
        Err(e) => Ok(service_error(e)),
    }
}

pub async fn get_links(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
    query: web::Query<LinkQuery>,
) -> Result<HttpResponse> {
    let code = match stock_code(path) {
        Ok(code) => code,
        Err(resp) => return Ok(resp),
    };

    let user_agent = req
        .headers()
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    let client = ClientKind::detect(user_agent, query.tdx.as_deref());

    Ok(HttpResponse::Ok().json(ApiResponse::success(state.links.links(&code, client))))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/stocks")
            .route("/screen", web::post().to(screen))
            .route("/filter-change", web::post().to(filter_change))
            .route("/{code}/detail", web::get().to(get_detail))
            .route("/{code}/links", web::get().to(get_links))
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::services::upstream::testing::{FailingBackend, StubBackend};
    use crate::services::upstream::FilterBackend;
    use actix_web::{http::StatusCode, test, App};
    use serde_json::{json, Value};
    use std::sync::Arc;

    fn state(backend: Arc<dyn FilterBackend>) -> web::Data<AppState> {
        web::Data::new(AppState::new(&AppConfig::default(), backend))
    }

    fn sample_response() -> Value {
        json!({
            "code": 200,
            "data": {
                "600519": {"股票简称": "贵州茅台", "ROE": 30.1},
                "000001": {"股票简称": "平安银行", "ROE": 10.2}
            }
        })
    }

    #[actix_web::test]
    async fn test_screen() {
        println!("\n========== 测试选股接口 ==========");
        let app = test::init_service(
            App::new()
                .app_data(state(StubBackend::new(sample_response())))
                .configure(crate::handlers::config),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/v1/stocks/screen")
            .set_json(json!({
                "filters": {"fundamental": {"roe": "20以上"}},
                "sort": {"prop": "ROE", "order": "descending"},
                "pageSize": 1,
                "addCodePrefix": true
            }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        println!("{}", serde_json::to_string_pretty(&body["data"]).unwrap());

        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["route"], "factors");
        assert_eq!(body["data"]["mode"], "data");
        assert_eq!(body["data"]["total"], 2);
        assert_eq!(body["data"]["pageSize"], 1);
        assert_eq!(body["data"]["showTimeFilter"], false);
        assert!(body["data"].get("page_size").is_none());
        assert_eq!(body["data"]["rows"].as_array().unwrap().len(), 1);
        assert_eq!(body["data"]["rows"][0]["股票代码"], "SH600519");
        assert_eq!(body["data"]["collected"]["factors"], json!(["ROE_大于20"]));
        println!("✅ 选股接口测试通过！");
    }

    #[actix_web::test]
    async fn test_screen_upstream_failure_is_bad_gateway() {
        let app = test::init_service(
            App::new()
                .app_data(state(Arc::new(FailingBackend)))
                .configure(crate::handlers::config),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/v1/stocks/screen")
            .set_json(json!({"filters": {"hotConcept": {"themes": ["机器人"]}}}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], false);
        assert!(body["message"].as_str().unwrap().contains("上游不可用"));
    }

    #[actix_web::test]
    async fn test_filter_change() {
        let app = test::init_service(
            App::new()
                .app_data(state(StubBackend::new(sample_response())))
                .configure(crate::handlers::config),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/v1/stocks/filter-change")
            .set_json(json!({
                "category": "indicator",
                "condition": "special",
                "value": "龙头",
                "allFilters": {"indicator": {"special": "龙头"}}
            }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["outcome"]["action"], "staticIndicator");
        assert_eq!(body["data"]["result"]["route"], "zhibiao");

        let req = test::TestRequest::post()
            .uri("/api/v1/stocks/filter-change")
            .set_json(json!({"category": "indicator", "condition": "special", "value": ""}))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["outcome"]["action"], "clearIndicator");
        assert!(body["data"].get("result").is_none());
    }

    #[actix_web::test]
    async fn test_detail() {
        let app = test::init_service(
            App::new()
                .app_data(state(StubBackend::new(Value::Null)))
                .configure(crate::handlers::config),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/v1/stocks/600519/detail").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["code"], "600519");
        assert_eq!(body["data"]["tooltip"]["latestTheme"], "白酒");

        let req = test::TestRequest::get().uri("/api/v1/stocks/abc/detail").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_detail_upstream_error() {
        let app = test::init_service(
            App::new()
                .app_data(state(Arc::new(FailingBackend)))
                .configure(crate::handlers::config),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/v1/stocks/600519/detail").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
    }

    #[actix_web::test]
    async fn test_links() {
        let app = test::init_service(
            App::new()
                .app_data(state(StubBackend::new(Value::Null)))
                .configure(crate::handlers::config),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/v1/stocks/600519/links")
            .insert_header((header::USER_AGENT, "Mozilla/5.0 TdxW"))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["codeLink"], "http://192.168.1.25:3000/code_600519");
        assert_eq!(body["data"]["analysisUrl"], "http://192.168.1.188:8077/analysis?stock_code=600519");
        assert_eq!(body["data"]["openInTdx"], true);

        let req = test::TestRequest::get()
            .uri("/api/v1/stocks/600519/links?tdx=1")
            .insert_header((header::USER_AGENT, "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0)"))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["openInTdx"], false);
    }
}
