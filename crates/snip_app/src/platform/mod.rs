pub mod app;
pub mod cli;
pub mod clipboard;
pub mod commands;
pub mod controller;
pub mod effects;
pub mod logging;
pub mod persistence;
pub mod ui;
