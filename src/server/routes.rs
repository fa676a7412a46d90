use axum::Json;
use tracing::{debug, info};

use serde_json::Value;

use crate::data::{PrefillPayload, UploadReceipt, CLASSES, LYCEES};
use crate::random::pick_random;

use super::error::AppError;

/// A random lycée and class, drawn independently.
pub async fn prefill_handler() -> Result<Json<PrefillPayload>, AppError> {
    let lycee = pick_random(&LYCEES)?;
    let classe = pick_random(&CLASSES)?;
    debug!(lycee = %lycee, classe = classe.label(), "prefill");

    Ok(Json(PrefillPayload {
        lycee: lycee.to_string(),
        classe: *classe,
    }))
}

/// Mock upload: nothing is stored, any JSON body is echoed back as is.
pub async fn fiche_avenir_handler(Json(body): Json<Value>) -> Json<UploadReceipt<Value>> {
    info!(%body, "Fiche Avenir received");
    Json(UploadReceipt::accepted(body))
}
