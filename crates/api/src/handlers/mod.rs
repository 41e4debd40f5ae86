//! HTTP handlers

pub mod health;
pub mod items;
pub mod object_members;
