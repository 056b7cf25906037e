//! Wrap-around grid Snake.
//!
//! The game core ([`game`], [`controller`]) is headless: it talks to the outside
//! world only through the [`renderer::Renderer`] and [`scheduler::TickSource`]
//! traits, so it runs the same in the terminal and in tests.

pub mod config;
pub mod controller;
pub mod error;
pub mod food;
pub mod game;
pub mod input;
pub mod logging;
pub mod renderer;
pub mod scheduler;
pub mod snake;
pub mod surface;
pub mod terminal_runtime;
pub mod ui;
