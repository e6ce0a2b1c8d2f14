pub mod factors;
pub mod health;
pub mod stocks;
pub mod themes;

use actix_web::{error, web, HttpResponse};

use crate::models::ApiResponse;
use crate::services::upstream::UpstreamError;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .app_data(json_config())
            .configure(health::config)
            .configure(factors::config)
            .configure(stocks::config)
            .configure(themes::config)
    );
}

/// 请求体解析失败时同样返回统一响应格式
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let message = format!("请求体格式错误: {}", err);
        let response = HttpResponse::BadRequest().json(ApiResponse::<()>::error(message));
        error::InternalError::from_response(err, response).into()
    })
}

/// 参数错误
pub(crate) fn bad_request(message: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::<()>::error(message.into()))
}

/// 服务错误：上游失败返回 502，其余 500
pub(crate) fn service_error(e: anyhow::Error) -> HttpResponse {
    let response = ApiResponse::<()>::error(e.to_string());
    if e.downcast_ref::<UpstreamError>().is_some() {
        log::warn!("上游服务调用失败: {}", e);
        HttpResponse::BadGateway().json(response)
    } else {
        log::error!("请求处理失败: {:?}", e);
        HttpResponse::InternalServerError().json(response)
    }
}
