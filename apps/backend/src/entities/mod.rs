pub mod game_sessions;
pub mod users;

pub use game_sessions::Entity as GameSessions;
pub use game_sessions::Model as GameSessionRow;
pub use users::Entity as Users;
pub use users::Model as User;
