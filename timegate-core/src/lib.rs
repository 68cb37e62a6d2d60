#![warn(clippy::pedantic)]

pub mod cgi;
pub mod clock;
pub mod config;
pub mod render;
pub mod serve;
