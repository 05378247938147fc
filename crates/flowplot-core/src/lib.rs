//! flowplot Core Types and Definitions
//!
//! This crate provides the foundational types shared by the flowplot
//! workspace. It includes:
//!
//! - **Capacities**: The [`capacity::Capacity`] strategy deciding which matrix
//!   cells are edges and how they are labelled
//! - **Matrices**: Validated square adjacency matrices ([`matrix::AdjacencyMatrix`])
//! - **Colors**: Color handling with CSS color support ([`color::Color`])
//! - **Geometry**: Basic geometric types ([`geometry`] module)
//! - **Text**: Text style definitions and measurement ([`text`] module)

pub mod capacity;
pub mod color;
pub mod geometry;
pub mod matrix;
pub mod text;
