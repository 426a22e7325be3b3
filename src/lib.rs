pub mod app;
pub mod config;
pub mod controller;
pub mod directory;
pub mod normalize;
pub mod render;
pub mod text;
