//! HTTP request handlers

pub mod advisory;
pub mod form;
pub mod health;
