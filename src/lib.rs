pub mod clock;
pub mod config;
pub mod crossing;
pub mod door;
pub mod engine;
pub mod geometry;
pub mod menubar;
pub mod player;
pub mod renderer;
pub mod scene;
pub mod schedule;
pub mod simulate;
pub mod types;
