//! Voltaic Core Types and Definitions
//!
//! This crate provides the foundational types shared by the Voltaic layout
//! and rendering pipeline. It includes:
//!
//! - **Netlist**: Components, nets and circuits as produced upstream ([`netlist`] module)
//! - **Colors**: Color handling with CSS color support ([`color::Color`])
//! - **Geometry**: Grid and pixel coordinate types ([`geometry`] module)
//! - **Draw**: Stroke definitions and the drawing surface ([`draw`] module)

pub mod color;
pub mod draw;
pub mod geometry;
pub mod netlist;
