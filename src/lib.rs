//! Feasibility study generator for photovoltaic projects.
//!
//! A submitted [`models::ProjectData`] drives linear financial projections,
//! while [`report::OutlineStore`] holds the report outline that the
//! [`export`] module turns into PDF and DOCX documents.

pub mod api;
pub mod commands;
pub mod config;
pub mod export;
pub mod models;
pub mod render;
pub mod report;
pub mod state;
