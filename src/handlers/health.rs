use actix_web::{web, HttpResponse, Result};
use serde::Serialize;

use crate::models::ApiResponse;

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

pub async fn health_check() -> Result<HttpResponse> {
    let status = HealthStatus {
        status: "ok",
        service: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
    };
    Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(status, "Service is healthy".to_string())))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check));
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};
    use serde_json::Value;

    #[actix_web::test]
    async fn test_health_check() {
        let app = test::init_service(App::new().configure(crate::handlers::config)).await;
        let req = test::TestRequest::get().uri("/api/v1/health").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["success"], true);
        assert_eq!(body["message"], "Service is healthy");
        assert_eq!(body["data"]["service"], "stock-screener-gateway");
        assert!(body["timestamp"].as_str().unwrap().ends_with("+08:00"));
    }
}
