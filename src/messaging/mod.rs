//! Messaging boundary
//!
//! Tilt samples come in as `"<x>,<y>"` text on one topic; score events go out
//! as `"Scored, <n>"` retained messages on another.

pub mod gateway;
pub mod sample;

pub use gateway::{LoopbackGateway, MessagingGateway, PublishedMessage, Subscription};
pub use sample::{AccelSample, SampleCell};
