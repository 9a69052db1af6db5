use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::Domain;

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ClassifyRequest {
    #[validate(length(min = 1, max = 20000, message = "text must be between 1 and 20000 characters"))]
    pub text: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ClassifyResponse {
    pub domain: Domain,
}
