pub mod config;
pub mod logging;

pub mod coordinator;
pub mod expand;
pub mod hasher;
pub mod identity;
pub mod resolve;
pub mod sumfile;
pub mod task;
