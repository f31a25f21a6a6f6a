#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Missing required parameter in configuration: {0}")]
    MissingParameter(String),

    #[error("Invalid value for parameter {name}: {value}")]
    InvalidParameter { name: String, value: String },

    #[error("Unknown type of Riemann problem configured: {0}")]
    UnknownSystem(String),

    #[error("Conflicting parameters in configuration: {0}")]
    ConflictingParameters(String),
}

/// Everything that can go wrong while solving a Riemann problem.
///
/// Errors are reported from `solve` as is; no partial solution is ever returned.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum RiemannError {
    #[error("Non-physical {quantity}: {value:.4e}")]
    Domain { quantity: &'static str, value: f64 },

    #[error(
        "Vacuum generated: velocity difference {velocity_difference:.4e} exceeds the critical value {critical:.4e}"
    )]
    VacuumFormation {
        velocity_difference: f64,
        critical: f64,
    },

    #[error(
        "The root finder failed to converge after {iterations} iterations (last estimate: {estimate:.6e})"
    )]
    NoConvergence { iterations: usize, estimate: f64 },

    #[error(transparent)]
    Configuration(#[from] ConfigError),
}

impl RiemannError {
    pub(crate) fn domain(quantity: &'static str, value: f64) -> Self {
        RiemannError::Domain { quantity, value }
    }
}
