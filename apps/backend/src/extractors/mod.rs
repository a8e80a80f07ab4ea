pub mod current_user;
pub mod path_ids;
pub mod validated_json;

pub use current_user::CurrentUser;
pub use path_ids::{SessionId, UserId};
pub use validated_json::ValidatedJson;
