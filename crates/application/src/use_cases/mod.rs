pub mod commands;
mod observer;

pub use observer::Observer;
