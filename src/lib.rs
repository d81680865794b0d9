//! Featherlite: a featherweight HTTP server rendering a small set of HTML
//! pages from disk-backed `{{name}}` templates.
//!
//! The interesting machinery lives in [`template`]: a tokenizer, a renderer
//! with HTML-entity escaping, and a concurrent compile-on-miss cache. The
//! HTTP surface in [`infra::http`] is thin glue over it.

pub mod application;
pub mod config;
pub mod infra;
pub mod template;
