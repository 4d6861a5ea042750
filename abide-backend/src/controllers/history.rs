//! Entry history and bookmarks

use actix_web::{web, HttpResponse, Responder, ResponseError};
use serde::Deserialize;

use super::clamp_limit;
use crate::error::AppError;
use crate::models::EntryType;
use crate::AppState;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/api/v1/history/entries").route(web::get().to(list_entries)));
    cfg.service(web::resource("/api/v1/history/bookmarks").route(web::get().to(list_bookmarks)));
    cfg.service(web::resource("/api/v1/history/bookmark").route(web::post().to(create_bookmark)));
    cfg.service(
        web::resource("/api/v1/history/bookmark/{bookmark_id}").route(web::delete().to(remove_bookmark)),
    );
}

fn default_limit() -> i64 {
    20
}

#[derive(Debug, Deserialize)]
struct EntriesQuery {
    user_id: i64,
    entry_type: Option<String>,
    #[serde(default = "default_limit")]
    limit: i64,
    #[serde(default)]
    offset: i64,
}

#[derive(Debug, Deserialize)]
struct BookmarksQuery {
    user_id: i64,
    #[serde(default = "default_limit")]
    limit: i64,
    #[serde(default)]
    offset: i64,
}

#[derive(Debug, Deserialize)]
struct BookmarkQuery {
    user_id: i64,
    entry_id: i64,
}

#[derive(Debug, Deserialize)]
struct OwnerQuery {
    user_id: i64,
}

async fn list_entries(data: web::Data<AppState>, query: web::Query<EntriesQuery>) -> impl Responder {
    let entry_type = match query.entry_type.as_deref() {
        None => None,
        Some(raw) => match EntryType::from_str(raw) {
            Some(t) => Some(t),
            None => {
                return AppError::Validation(format!("unknown entry type '{}'", raw)).error_response();
            }
        },
    };

    match data.db.list_entries(
        query.user_id,
        entry_type,
        clamp_limit(query.limit),
        query.offset.max(0),
    ) {
        Ok(entries) => HttpResponse::Ok().json(serde_json::json!({
            "total": entries.len(),
            "entries": entries,
        })),
        Err(e) => {
            log::error!("Failed to list entries: {}", e);
            AppError::from(e).error_response()
        }
    }
}

async fn list_bookmarks(data: web::Data<AppState>, query: web::Query<BookmarksQuery>) -> impl Responder {
    match data
        .db
        .list_bookmarks(query.user_id, clamp_limit(query.limit), query.offset.max(0))
    {
        Ok(bookmarks) => HttpResponse::Ok().json(serde_json::json!({
            "total": bookmarks.len(),
            "bookmarks": bookmarks,
        })),
        Err(e) => {
            log::error!("Failed to list bookmarks: {}", e);
            AppError::from(e).error_response()
        }
    }
}

async fn create_bookmark(data: web::Data<AppState>, query: web::Query<BookmarkQuery>) -> impl Responder {
    match data.db.create_bookmark(query.user_id, query.entry_id) {
        Ok(bookmark) => HttpResponse::Ok().json(serde_json::json!({
            "message": "Entry bookmarked successfully",
            "bookmark_id": bookmark.id
        })),
        Err(e) => {
            log::warn!("Bookmark of entry {} rejected: {}", query.entry_id, e);
            AppError::from(e).error_response()
        }
    }
}

async fn remove_bookmark(
    data: web::Data<AppState>,
    path: web::Path<i64>,
    query: web::Query<OwnerQuery>,
) -> impl Responder {
    let bookmark_id = path.into_inner();
    match data.db.remove_bookmark(bookmark_id, query.user_id) {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({
            "message": "Bookmark removed successfully"
        })),
        Err(e) => {
            log::warn!("Failed to remove bookmark {}: {}", bookmark_id, e);
            AppError::from(e).error_response()
        }
    }
}
