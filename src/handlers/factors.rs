//! 因子接口：配置目录、配置校验、因子收集、数值分档

use actix_web::{web, HttpResponse, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::handlers::bad_request;
use crate::models::{ApiResponse, CollectedFactors, FilterSelection};
use crate::services::factor::{collect_factors, format_factor_value, validate_catalog, CatalogValidation, FactorCatalog};
use crate::services::screening::FilterRoute;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CatalogQuery {
    /// 只返回该因子的可选区间
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct BucketQuery {
    pub name: String,
    pub value: String,
}

/// 配置校验结果；校验不通过时 catalog 为空配置
#[derive(Debug, Serialize)]
pub struct ValidateResponse {
    #[serde(flatten)]
    pub validation: CatalogValidation,
    pub catalog: FactorCatalog,
}

/// 因子收集结果及将调用的上游接口
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectResponse {
    #[serde(flatten)]
    pub collected: CollectedFactors,
    pub route: &'static str,
    pub upstream_path: Option<&'static str>,
}

pub async fn get_catalog(state: web::Data<AppState>, query: web::Query<CatalogQuery>) -> Result<HttpResponse> {
    match query.name.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        Some(name) => {
            let options = state.catalog.options_for(name);
            if options.is_empty() {
                return Ok(bad_request(format!("未知因子: {}", name)));
            }
            Ok(HttpResponse::Ok().json(ApiResponse::success(options.to_vec())))
        }
        None => Ok(HttpResponse::Ok().json(ApiResponse::success(state.catalog.clone()))),
    }
}

pub async fn validate(body: web::Json<Value>) -> Result<HttpResponse> {
    let body = body.into_inner();
    let mut validation = validate_catalog(&body);

    let catalog = if validation.valid {
        match serde_json::from_value::<FactorCatalog>(body) {
            Ok(catalog) => catalog,
            Err(e) => {
                validation.valid = false;
                validation.errors.push(format!("因子配置解析失败: {}", e));
                FactorCatalog::empty()
            }
        }
    } else {
        FactorCatalog::empty()
    };

    let message = if validation.valid {
        "因子配置有效".to_string()
    } else {
        format!("因子配置无效，共 {} 个问题", validation.errors.len())
    };
    Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(
        ValidateResponse { validation, catalog },
        message,
    )))
}

pub async fn collect(body: web::Json<FilterSelection>) -> Result<HttpResponse> {
    let collected = collect_factors(&body);
    let route = FilterRoute::plan(&collected);
    let response = CollectResponse {
        route: route.kind(),
        upstream_path: route.path(),
        collected,
    };
    Ok(HttpResponse::Ok().json(ApiResponse::success(response)))
}

pub async fn bucket(query: web::Query<BucketQuery>) -> Result<HttpResponse> {
    let value = match query.value.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => return Ok(bad_request(format!("无效的数值: {}", query.value))),
    };
    Ok(HttpResponse::Ok().json(ApiResponse::success(format_factor_value(&query.name, value))))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/factors")
            .route("/catalog", web::get().to(get_catalog))
            .route("/validate", web::post().to(validate))
            .route("/collect", web::post().to(collect))
            .route("/bucket", web::get().to(bucket))
    );
}
