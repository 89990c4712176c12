pub mod preferences;
pub mod projects;
pub mod rankings;
pub mod users;
