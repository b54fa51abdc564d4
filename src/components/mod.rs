//! Reusable view components.

pub mod circle_plot;
