//! Mailroom — a mail pipeline whose stages tamper with the post before delivery.

pub mod config;
pub mod error;
pub mod pipeline;
