//! The two façades over the engine: [`Plot`] and [`Table`].

pub mod plot;
pub mod table;

pub use plot::Plot;
pub use table::{Table, TableOptions};
