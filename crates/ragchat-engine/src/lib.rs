#![deny(warnings)]
#![deny(unused_imports)]

pub mod lifecycle;
pub mod retriever;
pub mod synthesize;

pub use lifecycle::RagEngine;
pub use synthesize::{Answer, NOT_FOUND_ANSWER};
