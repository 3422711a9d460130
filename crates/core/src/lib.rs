//! Bazaar Core - Shared types library.
//!
//! This crate provides common types used across all Bazaar components:
//! - `storefront` - Public-facing bilingual shop
//! - `admin` - Store management dashboard
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients. Both binaries talk to the same REST backend, so the DTOs that
//! mirror its JSON live here.
//!
//! # Modules
//!
//! - [`types`] - Newtype ids, prices, locales and order statuses
//! - [`catalog`] - Product, category, order and customer DTOs
//! - [`envelope`] - Decoding of list/object response envelopes and 422 bodies
//! - [`i18n`] - Arabic/English string dictionary

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod envelope;
pub mod i18n;
pub mod types;

pub use catalog::*;
pub use envelope::{EnvelopeError, Page, ValidationErrors, decode_list, decode_one};
pub use i18n::Translator;
pub use types::*;
