//! # disco-core
//!
//! Core types and error types for Disco, the product-discovery tracker.
//!
//! This crate provides the foundational types shared across all Disco crates:
//! - Entity structs for problems, research findings, and experiments
//! - The experiment status enum with its forward-only state machine
//! - Partial update structs (with builders) applied field-by-field
//! - Create payloads and small response envelopes used on the wire
//! - Cross-cutting error types
//!
//! The JSON shape of every type here is the contract shared by the REST
//! surface, the CLI client, and the agent-tool adapter.

pub mod entities;
pub mod enums;
pub mod errors;
pub mod payloads;
pub mod responses;
pub mod updates;

/// Entity identifier. Generated by the store (autoincrement integer).
pub type EntityId = i64;
