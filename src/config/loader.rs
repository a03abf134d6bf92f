//! Entry points for YAML-based loss configuration

use super::schema::LossSpec;
use crate::error::{Error, Result};
use crate::rlhf::loss::{
    DPOConfig, DPOLoss, DPOPLoss, IPOConfig, IPOLoss, PreferenceLoss, RPOConfig, RPOLoss,
    RSOConfig, RSOLoss, SimPOConfig, SimPOLoss,
};
use std::fs;
use std::path::Path;

impl LossSpec {
    /// Parse a loss config from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml)
            .map_err(|e| Error::ConfigError(format!("Failed to parse YAML loss config: {e}")))
    }

    /// Render the config as YAML
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self)
            .map_err(|e| Error::ConfigError(format!("Failed to serialize loss config: {e}")))
    }

    /// Validate the hyperparameters and construct the selected loss
    ///
    /// Validation happens in the config constructors, which run the same
    /// checks in the same order as [`validate_spec`](super::validate_spec).
    pub fn build(&self) -> Result<Box<dyn PreferenceLoss>> {
        let loss: Box<dyn PreferenceLoss> = match *self {
            Self::Dpo(s) => Box::new(DPOLoss::new(DPOConfig::new(
                s.beta,
                s.label_smoothing,
                s.lambda_dpop,
            )?)),
            Self::Dpop(s) => Box::new(DPOPLoss::new(DPOConfig::new(s.beta, 0.0, s.lambda_dpop)?)),
            Self::Rpo(s) => Box::new(RPOLoss::new(RPOConfig::new(
                s.beta,
                s.label_smoothing,
                s.rpo_alpha,
            )?)),
            Self::Rso(s) => Box::new(RSOLoss::new(RSOConfig::new(s.gamma)?)),
            Self::Simpo(s) => Box::new(SimPOLoss::new(SimPOConfig::new(
                s.beta,
                s.gamma,
                s.label_smoothing,
            )?)),
            Self::Ipo(s) => Box::new(IPOLoss::new(IPOConfig::new(s.tau)?)),
        };

        tracing::debug!(kind = self.kind(), loss = loss.name(), "built preference loss");
        Ok(loss)
    }
}

/// Load a loss config from a YAML file
///
/// # Example
///
/// ```no_run
/// use alinear::config::load_loss_spec;
///
/// let spec = load_loss_spec("loss.yaml")?;
/// let loss = spec.build()?;
/// # Ok::<(), alinear::Error>(())
/// ```
pub fn load_loss_spec<P: AsRef<Path>>(path: P) -> Result<LossSpec> {
    let yaml_content = fs::read_to_string(path.as_ref()).map_err(|e| {
        Error::ConfigError(format!(
            "Failed to read config file {}: {}",
            path.as_ref().display(),
            e
        ))
    })?;

    let spec = LossSpec::from_yaml_str(&yaml_content)?;
    tracing::debug!(path = %path.as_ref().display(), kind = spec.kind(), "loaded loss config");
    Ok(spec)
}

/// Load, validate and build a loss from a YAML file
pub fn build_loss_from_yaml<P: AsRef<Path>>(path: P) -> Result<Box<dyn PreferenceLoss>> {
    load_loss_spec(path)?.build()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::config::schema::{DpoSpec, RsoSpec, SimpoSpec};
    use crate::config::ValidationError;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tracing_subscriber::layer::{Context, SubscriberExt};
    use tracing_subscriber::Layer;

    #[test]
    fn test_parse_dpo_with_defaults() {
        let spec = LossSpec::from_yaml_str("type: dpo\nbeta: 0.2\n").unwrap();
        assert_eq!(
            spec,
            LossSpec::Dpo(DpoSpec {
                beta: 0.2,
                label_smoothing: 0.0,
                lambda_dpop: 0.0,
            })
        );
    }

    #[test]
    fn test_parse_every_kind() {
        for kind in ["dpo", "dpop", "rpo", "rso", "simpo", "ipo"] {
            let spec = LossSpec::from_yaml_str(&format!("type: {kind}\n")).unwrap();
            assert_eq!(spec.kind(), kind);
            assert!(spec.build().is_ok(), "default {kind} config should build");
        }
    }

    #[test]
    fn test_simpo_defaults() {
        let spec = LossSpec::from_yaml_str("type: simpo").unwrap();
        assert_eq!(spec, LossSpec::Simpo(SimpoSpec::default()));
        assert_eq!(spec.build().unwrap().name(), "SimPO");
    }

    #[test]
    fn test_unknown_type_rejected() {
        let err = LossSpec::from_yaml_str("type: kto\nbeta: 0.1\n").unwrap_err();
        assert!(matches!(err, Error::ConfigError(_)));
    }

    #[test]
    fn test_unknown_field_rejected() {
        // DPOP has no label smoothing
        let err = LossSpec::from_yaml_str("type: dpop\nlabel_smoothing: 0.1\n").unwrap_err();
        assert!(matches!(err, Error::ConfigError(_)));
    }

    #[test]
    fn test_build_rejects_invalid_values() {
        let spec = LossSpec::Rso(RsoSpec { gamma: -0.5 });
        let err = spec.build().err().unwrap();
        assert!(matches!(
            err,
            Error::InvalidConfig(ValidationError::InvalidGamma(g)) if g == -0.5
        ));
    }

    /// Counts `warn` records seen while it is the active subscriber
    struct WarnCounter(Arc<AtomicUsize>);

    impl<S: tracing::Subscriber> Layer<S> for WarnCounter {
        fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
            if *event.metadata().level() == tracing::Level::WARN {
                self.0.fetch_add(1, Ordering::SeqCst);
            }
        }
    }

    #[test]
    fn test_build_warns_once_on_high_label_smoothing() {
        let warnings = Arc::new(AtomicUsize::new(0));
        let subscriber = tracing_subscriber::registry().with(WarnCounter(Arc::clone(&warnings)));
        let spec = LossSpec::Dpo(DpoSpec {
            beta: 0.1,
            label_smoothing: 0.75,
            lambda_dpop: 0.0,
        });

        let loss = tracing::subscriber::with_default(subscriber, || spec.build()).unwrap();

        assert_eq!(loss.name(), "DPO");
        assert_eq!(warnings.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_yaml_roundtrip_keeps_tag() {
        let spec = LossSpec::Dpo(DpoSpec {
            beta: 0.25,
            label_smoothing: 0.1,
            lambda_dpop: 50.0,
        });
        let yaml = spec.to_yaml().unwrap();
        assert!(yaml.contains("type: dpo"));
        assert_eq!(LossSpec::from_yaml_str(&yaml).unwrap(), spec);
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_loss_spec("/nonexistent/loss.yaml").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("Failed to read config file"));
    }
}
