use actix_web::{web, HttpResponse, Responder, ResponseError};
use serde::Deserialize;

use crate::error::{AppError, DbError};
use crate::AppState;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/api/v1/users").route(web::post().to(create_user)));
    cfg.service(web::resource("/api/v1/users/{id}").route(web::delete().to(delete_user)));
}

#[derive(Debug, Default, Deserialize)]
struct CreateUserRequest {
    email: Option<String>,
}

async fn create_user(data: web::Data<AppState>, body: web::Json<CreateUserRequest>) -> impl Responder {
    let email = body
        .email
        .as_deref()
        .map(str::trim)
        .filter(|e| !e.is_empty());

    if let Some(email) = email {
        if !email.contains('@') {
            return AppError::Validation(format!("invalid email '{}'", email)).error_response();
        }
    }

    match data.db.create_user(email) {
        Ok(user) => HttpResponse::Created().json(user),
        Err(e @ DbError::EmailTaken) => AppError::from(e).error_response(),
        Err(e) => {
            log::error!("Failed to create user: {}", e);
            AppError::from(e).error_response()
        }
    }
}

/// Deletes the user with all of their entries and bookmarks
async fn delete_user(data: web::Data<AppState>, path: web::Path<i64>) -> impl Responder {
    let id = path.into_inner();
    match data.db.delete_user(id) {
        Ok(()) => {
            log::info!("Deleted user {} and their history", id);
            HttpResponse::Ok().json(serde_json::json!({
                "message": "User deleted successfully"
            }))
        }
        Err(e) => AppError::from(e).error_response(),
    }
}
