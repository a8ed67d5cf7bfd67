pub mod auth_token;
pub mod current_user;
pub mod validated_json;
pub mod validated_path;

pub use auth_token::bearer_token;
pub use current_user::CurrentUser;
pub use validated_json::ValidJson;
pub use validated_path::ValidPath;
