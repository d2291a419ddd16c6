pub mod bootstrap;
pub mod button;
pub mod cards;
pub mod catalog;
pub mod client;
pub mod config;
pub mod dom;
pub mod logging;
pub mod model;
pub mod page;
pub mod render;
