// src/dataset/systems/analysis/mod.rs
// Pure table computations behind the dashboard views.

pub mod counts;
pub mod describe;
pub mod frame;
pub mod grouping;
pub mod histogram;

pub use counts::{counts_frame, value_counts};
pub use describe::{describe_column, describe_table, NumericSummary};
pub use frame::TextFrame;
pub use grouping::{bivariate, multivariate, GroupedRow, GroupedView, Measure};
pub use histogram::{BoxSummary, Histogram, DEFAULT_BINS};
