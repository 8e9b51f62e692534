//! Trailmap Core Types and Definitions
//!
//! This crate provides the foundational types shared by the Trailmap roadmap
//! engine. It includes:
//!
//! - **Identifiers**: String-interned node identifiers ([`identifier::Id`])
//! - **Colors**: CSS color handling ([`color::Color`])
//! - **Geometry**: Points, sizes and bounds ([`geometry`] module)
//! - **Draw**: Stroke definitions and layered SVG output ([`draw`] module)
//! - **Model**: Roadmap nodes and learner progress ([`model`] module)
//! - **Theme**: Skin configurations and the theme catalog ([`theme`] module)

pub mod color;
pub mod draw;
pub mod geometry;
pub mod identifier;
pub mod model;
pub mod theme;
