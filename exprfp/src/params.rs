/// Default seed of the trial RNG, so that hardened checks are reproducible across runs.
const DEFAULT_SEED: u64 = 0x5EED_F1A6_E4B1_2025;

/// Configuration of an [`crate::equivalency::EquivalenceChecker`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EqvParams {
    trials: usize,
    seed: u64,
}

impl EqvParams {
    /// Number of independent random leaf assignments evaluated on top of the memoized
    /// fingerprint.
    pub fn trials(&self) -> usize {
        self.trials
    }

    /// Seed of the RNG that draws the random assignments.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    fn new() -> Self {
        Self {
            trials: 0,
            seed: DEFAULT_SEED,
        }
    }
}

impl Default for EqvParams {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug)]
pub struct EqvParamsBuilder(EqvParams);

impl EqvParamsBuilder {
    pub fn new() -> Self {
        Self(EqvParams::new())
    }

    pub fn trials(mut self, trials: usize) -> Self {
        self.0.trials = trials;
        self
    }

    pub fn no_trials(mut self) -> Self {
        self.0.trials = 0;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.0.seed = seed;
        self
    }

    pub fn build(self) -> EqvParams {
        self.0
    }
}

impl Default for EqvParamsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl From<EqvParamsBuilder> for EqvParams {
    fn from(builder: EqvParamsBuilder) -> EqvParams {
        builder.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_use_single_assignment() {
        let params = EqvParams::default();
        assert_eq!(params.trials(), 0);
        assert_eq!(params.seed(), DEFAULT_SEED);
    }

    #[test]
    fn builder_sets_fields() {
        let params = EqvParamsBuilder::new().trials(4).seed(11).build();
        assert_eq!(params.trials(), 4);
        assert_eq!(params.seed(), 11);

        let params: EqvParams = EqvParamsBuilder::new().trials(4).no_trials().into();
        assert_eq!(params.trials(), 0);
    }
}
