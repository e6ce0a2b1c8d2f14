use actix_web::{web, HttpResponse, Result};

use crate::handlers::service_error;
use crate::models::ApiResponse;
use crate::state::AppState;

/// 全部题材列表
pub async fn list_themes(state: web::Data<AppState>) -> Result<HttpResponse> {
    match state.screener.themes().await {
        Ok(themes) => {
            let message = format!("共 {} 个题材", themes.len());
            Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(themes, message)))
        }
        Err(e) => Ok(service_error(e)),
    }
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/themes", web::get().to(list_themes));
}
