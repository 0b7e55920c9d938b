use log::warn;

// Defaults for parameters
const EPSILON_DEFAULT: f64 = 1e-6;
const CLAMP_NEGATIVE_PRIZES_DEFAULT: bool = true;

// Valid minimums/left bounds of parameters
const EPSILON_MINIMUM: f64 = 0.0;

/// The tunable parameters of a PCST computation.
/// Only use if you want to change them. Otherwise use `Pcst::default_params()` to
/// instantiate the computation with default parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct PcstParams {
    pub(crate) epsilon: f64,
    pub(crate) clamp_negative_prizes: bool,
}

/// Builder object to set custom parameters.
#[derive(Debug, Clone, Default)]
pub struct PcstParamsBuilder {
    epsilon: Option<f64>,
    clamp_negative_prizes: Option<bool>,
}

impl Default for PcstParams {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl PcstParams {
    /// Enters the builder pattern, allowing custom parameters to be set using
    /// various setter methods.
    ///
    /// # Returns
    /// * the parameter configuration builder
    pub fn builder() -> PcstParamsBuilder {
        PcstParamsBuilder {
            epsilon: None,
            clamp_negative_prizes: None,
        }
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    pub fn clamp_negative_prizes(&self) -> bool {
        self.clamp_negative_prizes
    }
}

impl PcstParamsBuilder {
    /// Sets the tolerance below which the remaining slack of an edge counts as zero, so the
    /// edge is treated as tight and its two clusters merge. Guards against floating point
    /// error piling up along deep merge trees.
    /// Defaults to 1e-6.
    ///
    /// # Parameters
    /// * epsilon - the tightness tolerance
    ///
    /// # Returns
    /// * the parameter configuration builder
    pub fn epsilon(mut self, epsilon: f64) -> PcstParamsBuilder {
        let valid_epsilon =
            PcstParamsBuilder::validate_input_left_bound(epsilon, EPSILON_MINIMUM, "epsilon");
        self.epsilon = Some(valid_epsilon);
        self
    }

    /// Sets whether negative prizes are clamped to zero (with a warning) instead of being
    /// rejected with an error.
    /// Defaults to true.
    ///
    /// # Parameters
    /// * clamp_negative_prizes - whether to clamp negative prizes
    ///
    /// # Returns
    /// * the parameter configuration builder
    pub fn clamp_negative_prizes(mut self, clamp_negative_prizes: bool) -> PcstParamsBuilder {
        self.clamp_negative_prizes = Some(clamp_negative_prizes);
        self
    }

    /// Finishes the building of the parameter configuration. A call to this method is
    /// required to exit the builder pattern and complete the construction of the parameters.
    ///
    /// # Returns
    /// * The completed PCST parameter configuration.
    pub fn build(self) -> PcstParams {
        PcstParams {
            epsilon: self.epsilon.unwrap_or(EPSILON_DEFAULT),
            clamp_negative_prizes: self
                .clamp_negative_prizes
                .unwrap_or(CLAMP_NEGATIVE_PRIZES_DEFAULT),
        }
    }

    fn validate_input_left_bound(input_param: f64, left_bound: f64, param: &str) -> f64 {
        if input_param.is_nan() || input_param < left_bound {
            warn!(
                "{param} ({input_param}) cannot be lower than {left_bound}. Set to {left_bound}."
            );
            left_bound
        } else {
            input_param
        }
    }
}
