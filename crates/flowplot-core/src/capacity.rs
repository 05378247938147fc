//! Capacity values stored in adjacency matrix cells.
//!
//! A flow network matrix can be encoded either numerically (a positive value
//! is an edge, zero is the absence of one) or textually, where every string
//! except the literal `"0"` is a capacity label such as `"1/2"`. The
//! [`Capacity`] trait captures both encodings so the layout code is written
//! once and stays agnostic of the cell type.
//!
//! # Examples
//!
//! ```
//! # use flowplot_core::capacity::Capacity;
//! assert!(5_i64.is_edge());
//! assert!(!0_i64.is_edge());
//! assert!("1/2".is_edge());
//! assert!(!"0".is_edge());
//! assert_eq!(2.5_f64.label(), "2.5");
//! ```

use std::{borrow::Cow, fmt::Debug};

/// Strategy deciding whether a matrix cell denotes an edge and how the
/// capacity is shown next to it.
pub trait Capacity: Debug {
    /// Returns `true` when the cell describes an edge.
    fn is_edge(&self) -> bool;

    /// Returns the text drawn next to the edge.
    fn label(&self) -> String;
}

macro_rules! numeric_capacity {
    ($($ty:ty => $zero:expr),* $(,)?) => {
        $(
            impl Capacity for $ty {
                fn is_edge(&self) -> bool {
                    *self > $zero
                }

                fn label(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

numeric_capacity!(
    i32 => 0,
    i64 => 0,
    u32 => 0,
    u64 => 0,
    usize => 0,
    f32 => 0.0,
    f64 => 0.0,
);

impl Capacity for String {
    fn is_edge(&self) -> bool {
        self.as_str().is_edge()
    }

    fn label(&self) -> String {
        self.clone()
    }
}

impl Capacity for &str {
    fn is_edge(&self) -> bool {
        *self != "0"
    }

    fn label(&self) -> String {
        (*self).to_string()
    }
}

impl Capacity for Cow<'_, str> {
    fn is_edge(&self) -> bool {
        self.as_ref().is_edge()
    }

    fn label(&self) -> String {
        self.to_string()
    }
}
