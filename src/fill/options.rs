// gridfill/src/fill/options.rs

use derive_builder::Builder;

/// Tuning knobs for the relaxation scheme.
///
/// Build with [`FillOptionsBuilder`]; every field is optional and falls back to
/// the value of [`FillOptions::default`].
#[derive(Builder, Clone, Debug, PartialEq)]
#[builder(default, build_fn(validate = "Self::validate"))]
pub struct FillOptions {
    /// Relaxation constant, usually 0.45 <= relax <= 0.6.
    relax: f64,
    /// Maximum number of sweeps per slice.
    itermax: usize,
    /// Seed missing cells with the zonal mean instead of zero.
    initzonal: bool,
    /// Treat the x axis as periodic.
    cyclic: bool,
    /// Print one line per slice describing convergence.
    verbose: bool,
}

impl Default for FillOptions {
    fn default() -> Self {
        Self {
            relax: 0.6,
            itermax: 100,
            initzonal: false,
            cyclic: false,
            verbose: false,
        }
    }
}

impl FillOptions {
    pub fn relax(&self) -> f64 {
        self.relax
    }

    pub fn itermax(&self) -> usize {
        self.itermax
    }

    pub fn initzonal(&self) -> bool {
        self.initzonal
    }

    pub fn cyclic(&self) -> bool {
        self.cyclic
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }

    pub(crate) fn with_cyclic(&self, cyclic: bool) -> Self {
        Self {
            cyclic,
            ..self.clone()
        }
    }
}

impl FillOptionsBuilder {
    fn validate(&self) -> Result<(), String> {
        if let Some(relax) = self.relax {
            Self::validate_relax(relax)?;
        }
        if let Some(itermax) = self.itermax {
            Self::validate_itermax(itermax)?;
        }
        Ok(())
    }

    fn validate_relax(relax: f64) -> Result<(), String> {
        if !(relax > 0. && relax < 2.) {
            return Err(format!(
                "relax must be in (0, 2), outside of which the relaxation diverges, but got {}",
                relax
            ));
        }
        Ok(())
    }

    fn validate_itermax(itermax: usize) -> Result<(), String> {
        if itermax < 1 {
            return Err("itermax must be >= 1".to_string());
        }
        Ok(())
    }
}
