use actix_web::{get, HttpResponse, Responder};

#[get("/")]
pub async fn welcome() -> impl Responder {
    HttpResponse::Ok().body("Welcome to the Session Sync API!")
}

#[get("/health_check")]
pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().finish()
}
