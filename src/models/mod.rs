//! Domain models for the feasibility study generator.
//!
//! # Core Concepts
//!
//! - [`ProjectData`]: the validated project parameters submitted through the form.
//!   Built from raw [`ProjectInput`] values, one error message per invalid field.
//! - [`ProjectionRow`]: one year of cumulative revenue, costs and net cash flow,
//!   derived from installed capacity over a fixed 25-year horizon.
//! - [`SectionLabel`]: one entry of the report outline. Top-level labels look like
//!   `"1. Executive Summary"`, generated children like `"1. Executive Summary.1 Subsection"`.

mod outline;
mod project_data;
mod projection;

pub use outline::*;
pub use project_data::*;
pub use projection::*;
