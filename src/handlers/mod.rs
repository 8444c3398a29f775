// src/handlers/mod.rs
pub mod chat;
pub mod contact;
pub mod status;
