//! Story generation endpoint.

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::{Json, Router, middleware, routing::post};
use storybook_core::error::StoryError;
use storybook_pipeline::application::command_handlers::{self, PipelineStage};
use storybook_pipeline::domain::commands::GenerateStory;
use storybook_pipeline::domain::story::{MISSING_FIELDS_MESSAGE, StoryRequest, StoryResult};
use tracing::{info, warn};
use uuid::Uuid;

use crate::admission;
use crate::error::ApiError;
use crate::state::AppState;

/// POST /generate-story
///
/// An unreadable body is reported like a missing field.
async fn generate_story(
    State(state): State<AppState>,
    payload: Result<Json<StoryRequest>, JsonRejection>,
) -> Result<Json<StoryResult>, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        warn!(
            stage = %PipelineStage::RejectedValidation,
            error = %rejection,
            "unreadable story request body"
        );
        StoryError::Validation(MISSING_FIELDS_MESSAGE.to_owned())
    })?;

    let command = GenerateStory {
        correlation_id: Uuid::new_v4(),
        request,
    };

    info!(correlation_id = %command.correlation_id, "handling generate_story command");

    let result = command_handlers::handle_generate_story(
        &command,
        &state.composer,
        state.text_generator.as_ref(),
        state.image_generator.as_ref(),
    )
    .await?;

    Ok(Json(result))
}

/// Returns the story router. Admission control guards every route in it.
pub fn router(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/generate-story", post(generate_story))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            admission::enforce_rate_limit,
        ))
}
