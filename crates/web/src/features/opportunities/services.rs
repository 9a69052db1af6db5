use storage::dto::opportunity::ClassifyResponse;

use crate::state::AppState;

pub fn classify(state: &AppState, text: &str) -> ClassifyResponse {
    let domain = state.classifier.classify(text);
    tracing::debug!("Classified {} chars of text as {}", text.len(), domain);

    ClassifyResponse { domain }
}
