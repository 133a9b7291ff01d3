//! QRLinker - multi-tenant link-in-bio and QR redirect service
//!
//! Each business gets a public flyer page, stable per-platform QR codes that
//! redirect through the service (recording a scan event), and an optional
//! review-draft helper.
//!
//! # Architecture
//! - `storage`: SeaORM backend and domain models
//! - `services`: business configuration, redirects, QR rendering, drafts
//! - `api`: HTTP handlers and middleware
//! - `config`: Configuration management
//! - `runtime`: Application lifecycle and execution modes
//! - `system`: Logging

pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod system;
pub mod utils;
