use actix_web::{web, HttpResponse, Responder, ResponseError};

use crate::models::FeelingRequest;
use crate::AppState;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/api/v1/feel").route(web::post().to(process_feeling)));
}

async fn process_feeling(
    data: web::Data<AppState>,
    body: web::Json<FeelingRequest>,
) -> impl Responder {
    match data.assembler.feel(&body, data.db.as_ref()) {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(e) => {
            log::error!("Failed to process feeling: {}", e);
            e.error_response()
        }
    }
}
