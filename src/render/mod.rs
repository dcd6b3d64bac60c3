//! Text, SVG and HTML views of projections and outlines.

pub mod chart;
pub mod page;
pub mod table;
pub mod tree;

pub use chart::render_chart;
pub use page::{render_page, PageView};
pub use table::{render_indicators, render_table};
pub use tree::render_tree;
