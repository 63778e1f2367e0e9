// src/ui/state.rs
use bevy::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DashboardTab {
    #[default]
    Overview,
    Univariate,
    Bivariate,
    Multivariate,
}

impl DashboardTab {
    pub const ALL: [DashboardTab; 4] = [
        DashboardTab::Overview,
        DashboardTab::Univariate,
        DashboardTab::Bivariate,
        DashboardTab::Multivariate,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            DashboardTab::Overview => "📊 Data Overview",
            DashboardTab::Univariate => "📈 Univariate Analysis",
            DashboardTab::Bivariate => "📉 Bivariate Analysis",
            DashboardTab::Multivariate => "🔗 Multivariate Analysis",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnivariateMode {
    #[default]
    Categorical,
    Numerical,
}

impl UnivariateMode {
    pub fn label(&self) -> &'static str {
        match self {
            UnivariateMode::Categorical => "Categorical (Bar)",
            UnivariateMode::Numerical => "Numerical (Histogram)",
        }
    }
}

/// Widget selections. `None` means "first option in the list".
#[derive(Resource, Debug, Clone, Default)]
pub struct DashboardState {
    pub active_tab: DashboardTab,
    pub uni_mode: UnivariateMode,
    pub uni_cat_col: Option<String>,
    pub uni_num_col: Option<String>,
    pub bi_x: Option<String>,
    pub bi_y: Option<String>,
    pub multi_x: Option<String>,
    pub multi_hue: Option<String>,

    pub show_settings_popup: bool,
    pub settings_new_api_key_input: String,
}

impl DashboardState {
    /// Forgets column picks; the tab, mode and popup state stay.
    pub fn reset_selections(&mut self) {
        self.uni_cat_col = None;
        self.uni_num_col = None;
        self.bi_x = None;
        self.bi_y = None;
        self.multi_x = None;
        self.multi_hue = None;
    }
}

/// The stored pick if it still names an option, else the first option.
pub fn effective_choice(stored: &Option<String>, options: &[String]) -> Option<String> {
    match stored {
        Some(choice) if options.iter().any(|o| o == choice) => Some(choice.clone()),
        _ => options.first().cloned(),
    }
}
