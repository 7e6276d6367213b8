//! Document model types for scraped chat transcripts.
//!
//! This module defines the tree handed over by a site scraper: a
//! [`Transcript`] of labelled [`Section`]s, each rooted at a
//! [`DocumentNode`]. The model is site-agnostic; all selector logic stays
//! with the scraper.

mod node;
mod transcript;
pub mod validate;

pub use node::{DocumentNode, NodeKind};
pub use transcript::{Metadata, Section, Transcript};
pub use validate::{validate_node, validate_sections, DEFAULT_MAX_DEPTH};
