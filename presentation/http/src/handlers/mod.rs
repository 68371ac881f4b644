//! HTTP request handlers

pub mod analysis;
pub mod info;
pub mod player;
