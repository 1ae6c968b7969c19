#![allow(clippy::module_inception)]

pub mod constants;
pub mod fetch;
pub mod runtime;
pub mod types;
