use actix_web::{HttpResponse, Responder, web};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{auth::auth::Session, model::shift::Shift, utils::shift_label::shift_label};

#[derive(Serialize, ToSchema)]
pub struct ShiftLabelResponse {
    #[schema(example = "09:00–13:00 | 16:00–20:00")]
    pub label: String,
}

/// Format a shift for display
#[utoipa::path(
    post,
    path = "/api/shift/label",
    request_body = Shift,
    responses(
        (status = 200, description = "Display label", body = ShiftLabelResponse),
        (status = 400, description = "Malformed shift"),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Shift"
)]
pub async fn label_shift(_session: Session, payload: web::Json<Shift>) -> impl Responder {
    HttpResponse::Ok().json(ShiftLabelResponse {
        label: shift_label(&payload),
    })
}
