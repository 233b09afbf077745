pub(crate) mod config;
pub(crate) mod direction;
pub(crate) mod error;
pub(crate) mod game;
pub(crate) mod grid;
pub(crate) mod input;
pub(crate) mod levels;
pub(crate) mod motion;
pub(crate) mod pathfinding;
pub(crate) mod position;
pub(crate) mod render;
pub(crate) mod session;

pub mod game_app;
