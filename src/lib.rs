//! greenlight - schema and validation layer for a content-approval
//! workflow
//!
//! Canonical entity shapes, derived create/update variants, and strict
//! validators that turn untyped JSON into typed values or a structured
//! error listing every violated field path. Pure and stateless; the
//! HTTP, persistence, and webhook-dispatch collaborators build on the
//! shapes defined here.
//!
//! The derived `Deserialize` impls check shape only and treat `Option`
//! fields as absent-ok; untrusted input goes through each entity's
//! `parse`, which enforces required-but-nullable fields, closed enums,
//! defaults, and undeclared-key rejection.

pub mod api;
pub mod lifecycle;
pub mod object;
pub mod template;
pub mod validate;
pub mod webhook;
