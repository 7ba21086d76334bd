pub mod audio;
pub mod config;
pub mod controller;
pub mod error;
pub mod logging;
pub mod model;
pub mod view;
