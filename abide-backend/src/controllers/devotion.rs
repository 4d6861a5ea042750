use actix_web::{web, HttpResponse, Responder, ResponseError};

use crate::models::DevotionRequest;
use crate::AppState;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/api/v1/devotion").route(web::post().to(generate_devotion)));
    cfg.service(web::resource("/api/v1/devotion/themes").route(web::get().to(list_themes)));
}

async fn generate_devotion(
    data: web::Data<AppState>,
    body: web::Json<DevotionRequest>,
) -> impl Responder {
    match data.assembler.devote(&body, data.db.as_ref()).await {
        Ok(reply) => HttpResponse::Ok().json(reply),
        Err(e) => {
            log::error!("Failed to generate devotion: {}", e);
            e.error_response()
        }
    }
}

/// Themes with dedicated scripture
async fn list_themes(data: web::Data<AppState>) -> impl Responder {
    let themes: Vec<&str> = data.content.verses.pool_keys().collect();
    HttpResponse::Ok().json(serde_json::json!({ "themes": themes }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controllers::test_support;
    use actix_web::{test, App};
    use serde_json::json;

    #[actix_web::test]
    async fn test_devotion_plan() {
        let state = test_support::state();
        let app = test::init_service(App::new().app_data(state).configure(config)).await;

        let req = test::TestRequest::post()
            .uri("/api/v1/devotion")
            .set_json(json!({"theme": "Hope"}))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["theme"], "hope");
        assert_eq!(body["plan"]["scriptures"].as_array().unwrap().len(), 3);
        assert_eq!(body["plan"]["action_steps"].as_array().unwrap().len(), 2);
        assert_eq!(body["video"]["title"], "Hope in Christ");
        assert!(body["video"]["videoId"].is_string());
    }

    #[actix_web::test]
    async fn test_devotion_with_crisis_text() {
        let state = test_support::state();
        let user = state.db.create_user(None).unwrap();
        let app = test::init_service(App::new().app_data(state.clone()).configure(config)).await;

        let req = test::TestRequest::post()
            .uri("/api/v1/devotion")
            .set_json(json!({"text": "I want to die", "user_id": user.id}))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["crisis_detected"], true);
        assert_eq!(body["crisis_type"], "suicide");
        assert!(body.get("plan").is_none());
        assert!(state.db.list_entries(user.id, None, 20, 0).unwrap().is_empty());
    }

    #[actix_web::test]
    async fn test_list_themes() {
        let state = test_support::state();
        let app = test::init_service(App::new().app_data(state).configure(config)).await;

        let req = test::TestRequest::get().uri("/api/v1/devotion/themes").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        let themes = body["themes"].as_array().unwrap();
        assert_eq!(themes.len(), 9);
        assert_eq!(themes[0], "peace");
        assert!(themes.contains(&json!("forgiveness")));
    }
}
