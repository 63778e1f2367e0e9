// src/ui/elements/mod.rs
pub mod bivariate_tab;
pub mod column_picker;
pub mod dashboard;
pub mod insight_panel;
pub mod multivariate_tab;
pub mod notices;
pub mod overview_tab;
pub mod popups;
pub mod table_view;
pub mod univariate_tab;
