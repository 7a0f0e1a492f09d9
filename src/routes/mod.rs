use actix_web::web::ServiceConfig;
use uuid::Uuid;

use crate::core::AppError;

mod announcements;
mod bookings;
mod health_check;
mod materials;
mod notes;
mod reviews;
mod sessions;
mod users;

use announcements::{create_announcement, public_announcements};
use bookings::{book_session, confirm_payment, create_payment_intent, get_booked_sessions};
use materials::{
    all_materials, delete_material, get_materials, session_materials, single_material,
    update_material, upload_material,
};
use notes::{create_note, delete_note, get_notes, update_note};
use reviews::{get_reviews, get_tutor_reviews, post_review, post_tutor_review, session_reviews};
use sessions::{
    approve_session, create_session, delete_session, get_all_sessions, get_session, get_sessions,
    get_tutor_sessions, manage_sessions, re_request_approval, reject_session, select_study_sessions,
    session_details, study_sessions, update_study_session,
};
use users::{all_users, get_tutors, tutor_details, update_user_role, upsert_user, verify_token};

use crate::routes::health_check::*;

/// Record ids are store-native UUIDs; a malformed id is rejected before any
/// query is issued.
pub(crate) fn parse_id(raw: &str, message: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::bad_request(message))
}

/// The client contract keeps every route flat at the root, so everything is
/// registered on the top-level service config, grouped by audience.
pub fn session_sync_routes(conf: &mut ServiceConfig) {
    // public surface
    conf.service(welcome)
        .service(health_check)
        .service(verify_token)
        .service(upsert_user)
        .service(get_sessions)
        .service(get_all_sessions)
        .service(session_details)
        .service(study_sessions)
        .service(get_tutors)
        .service(tutor_details)
        .service(public_announcements);

    // student surface
    conf.service(book_session)
        .service(create_payment_intent)
        .service(confirm_payment)
        .service(get_booked_sessions)
        .service(post_review)
        .service(get_reviews)
        .service(session_reviews)
        .service(post_tutor_review)
        .service(get_tutor_reviews)
        .service(create_note)
        .service(get_notes)
        .service(update_note)
        .service(delete_note);

    // tutor surface
    conf.service(create_session)
        .service(get_tutor_sessions)
        .service(select_study_sessions)
        .service(re_request_approval)
        .service(upload_material)
        .service(get_materials)
        .service(session_materials)
        .service(single_material)
        .service(update_material)
        .service(delete_material);

    // admin surface
    conf.service(all_users)
        .service(update_user_role)
        .service(manage_sessions)
        .service(get_session)
        .service(approve_session)
        .service(reject_session)
        .service(update_study_session)
        .service(delete_session)
        .service(all_materials)
        .service(create_announcement);
}
