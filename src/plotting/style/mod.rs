//! Styling: colors, line styles, markers, text styles, themes and the
//! per-axes property cycles.

pub mod color;
pub mod cycler;
pub mod fill_style;
pub mod line_style;
pub mod marker;
pub mod text_style;
pub mod theme;

pub use color::{Color, TAB10};
pub use cycler::{Cycler, MultiCycler};
pub use fill_style::FillStyle;
pub use line_style::{DashPattern, LineCap, LineJoin, LineStyle};
pub use marker::{Marker, MarkerStyle};
pub use text_style::{DominantBaseline, FontWeight, TextAnchor, TextStyle};
pub use theme::{Theme, ThemeConfig};
