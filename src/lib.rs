// ABOUTME: Library crate for goose exposing the command layers for testing and reuse

#![allow(missing_docs)]

pub mod cli;
pub mod config;
pub mod exec;
pub mod git;
pub mod handoff;
pub mod radio;
pub mod tmux;
