use actix_web::{web, HttpResponse, Responder, ResponseError};
use serde::Deserialize;

use super::clamp_limit;
use crate::error::AppError;
use crate::AppState;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/api/v1/verses").route(web::get().to(get_verse)));
    cfg.service(web::resource("/api/v1/verses/search").route(web::get().to(search_verses)));
    cfg.service(web::resource("/api/v1/verses/translations").route(web::get().to(list_translations)));
}

fn default_translation() -> String {
    "KJV".to_string()
}

fn default_search_limit() -> i64 {
    5
}

#[derive(Debug, Deserialize)]
struct VerseQuery {
    reference: String,
    #[serde(default = "default_translation")]
    translation: String,
}

#[derive(Debug, Deserialize)]
struct SearchQuery {
    q: String,
    #[serde(default = "default_search_limit")]
    limit: i64,
}

async fn get_verse(data: web::Data<AppState>, query: web::Query<VerseQuery>) -> impl Responder {
    if !data.provider.is_translation_licensed(&query.translation) {
        return AppError::Validation(format!(
            "translation '{}' is not available from the {} provider",
            query.translation,
            data.provider.as_str()
        ))
        .error_response();
    }

    match data
        .content
        .verses
        .find_reference(&query.reference, &query.translation)
    {
        Some(verse) => HttpResponse::Ok().json(verse),
        None => HttpResponse::NotFound().json(serde_json::json!({
            "error": format!("verse '{}' not found in {}", query.reference, query.translation)
        })),
    }
}

async fn search_verses(data: web::Data<AppState>, query: web::Query<SearchQuery>) -> impl Responder {
    let limit = clamp_limit(query.limit) as usize;
    HttpResponse::Ok().json(data.content.verses.search(&query.q, limit))
}

async fn list_translations(data: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "provider": data.provider.as_str(),
        "translations": data.provider.translations()
    }))
}
