use axum::{
    Extension, Json,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use tracing::error;
use uuid::Uuid;

use jobdeck_db::Database;
use jobdeck_db::models::MessageRow;
use jobdeck_types::api::{Claims, SendMessageRequest};

use crate::actor::{Actor, resolve_actor};
use crate::auth::AppState;
use crate::error::ApiError;
use crate::matches::is_participant;
use crate::responses::message_response;

#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    pub match_id: Option<Uuid>,
}

/// Thread replay, ascending by creation time. A missing match id, an unknown
/// match, or a caller who is not a participant all resolve to an empty list;
/// the last case also avoids confirming that the match id exists.
pub fn thread_messages(
    db: &Database,
    actor: &Actor,
    match_id: Option<Uuid>,
) -> Result<Vec<MessageRow>, ApiError> {
    let Some(match_id) = match_id else {
        return Ok(Vec::new());
    };
    let Some(m) = db.get_match(&match_id.to_string())? else {
        return Ok(Vec::new());
    };
    if !is_participant(db, actor, &m)? {
        return Ok(Vec::new());
    }

    Ok(db.get_messages_for_match(&m.id)?)
}

/// Appends a message to an active match's thread. The sender is always the
/// acting caller; non-participants are rejected.
pub fn post_message(
    db: &Database,
    actor: &Actor,
    match_id: Uuid,
    content: &str,
) -> Result<MessageRow, ApiError> {
    let m = db
        .get_match(&match_id.to_string())?
        .ok_or(ApiError::NotFound("match not found"))?;

    if !m.is_active {
        return Err(ApiError::Forbidden("match is no longer active"));
    }
    if !is_participant(db, actor, &m)? {
        return Err(ApiError::Forbidden("not a participant in this match"));
    }

    let id = Uuid::new_v4().to_string();
    db.insert_message(&id, &m.id, &actor.profile_id, content)?;

    db.get_message(&id)?
        .ok_or_else(|| ApiError::Internal(anyhow::anyhow!("message row missing after insert")))
}

pub async fn get_messages(
    State(state): State<AppState>,
    Query(query): Query<MessageQuery>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, ApiError> {
    let rows = tokio::task::spawn_blocking(move || {
        let actor = match resolve_actor(&state.db, &claims) {
            Ok(actor) => actor,
            Err(ApiError::NotFound(_)) => return Ok(Vec::new()),
            Err(e) => return Err(e),
        };
        thread_messages(&state.db, &actor, query.match_id)
    })
    .await
    .map_err(|e| {
        error!("spawn_blocking join error: {}", e);
        ApiError::Internal(anyhow::anyhow!("blocking task failed"))
    })??;

    let messages: Vec<_> = rows.iter().map(message_response).collect();
    Ok(Json(messages))
}

pub async fn send_message(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<SendMessageRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let row = tokio::task::spawn_blocking(move || {
        let actor = resolve_actor(&state.db, &claims)?;
        post_message(&state.db, &actor, req.match_id, &req.content)
    })
    .await
    .map_err(|e| {
        error!("spawn_blocking join error: {}", e);
        ApiError::Internal(anyhow::anyhow!("blocking task failed"))
    })??;

    Ok((StatusCode::CREATED, Json(message_response(&row))))
}
