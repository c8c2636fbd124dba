// src/server/handlers/mod.rs
//! Request handlers for the pantry server

pub mod recipes;
