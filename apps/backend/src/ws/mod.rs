pub mod admin;
pub mod events;
pub mod player;
pub mod protocol;
