use std::sync::{LazyLock, RwLock};

pub static CONFIGURATION: LazyLock<RwLock<Configuration>> =
    LazyLock::new(|| RwLock::new(Configuration::default()));

pub struct Configuration {
    /// Default lower bound for newly minted decision variables
    pub lower_bound: f64,
    /// Default upper bound for newly minted decision variables
    pub upper_bound: f64,
    /// Number of decimal places kept when rounding an assignment for display
    pub display_decimals: i32,
    /// Maximum allowed formula depth, None means unlimited
    pub max_formula_depth: Option<usize>,
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration {
            lower_bound: 0.,
            upper_bound: 1000.,
            display_decimals: 1,
            max_formula_depth: None,
        }
    }
}
