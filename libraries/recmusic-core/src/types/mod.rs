mod activity;
mod display;
mod playlist;
mod track;
mod user;

pub use activity::{ActivityEntry, ActivityKind};
pub use display::DisplayMode;
pub use playlist::Playlist;
pub use track::Track;
pub use user::User;
