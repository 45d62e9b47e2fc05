//! Request extractors that reject with [`common::AppError`].

mod user_id;
mod validated_json;

pub use user_id::UserId;
pub use validated_json::ValidatedJson;
