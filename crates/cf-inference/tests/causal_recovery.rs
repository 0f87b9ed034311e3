//! Recovery of the structural effects at the default run (N = 10 000, seed 42).
//!
//! Tolerances are several standard errors wide:
//! - treatment only: residual sd ≈ 4.2, se(treatment) ≈ 0.085
//! - treatment + mediator: residual sd ≈ 1.34, se(treatment) ≈ 0.03
//! - full model: residual sd = 1, se ≤ 0.05

use cf_core::Error;
use cf_inference::{
    AdjustmentSet, SimulationConfig, StructuralCoefficients, Variable, run_experiment, simulate,
};

fn default_report() -> cf_inference::ExperimentReport {
    run_experiment(&SimulationConfig::default()).unwrap()
}

#[test]
fn default_run_uses_documented_parameters() {
    let cfg = SimulationConfig::default();
    assert_eq!(cfg.n_rows, 10_000);
    assert_eq!(cfg.seed, 42);
    assert_eq!(cfg.coefficients, StructuralCoefficients::default());
}

#[test]
fn simulated_inputs_have_expected_moments() {
    let table = simulate(&SimulationConfig::default()).unwrap();
    assert_eq!(table.len(), 10_000);
    assert!(table.treatment().iter().all(|&t| t == 0.0 || t == 1.0));

    let t = table.summary(Variable::Treatment);
    assert!((t.mean - 0.5).abs() < 0.03, "treatment mean {}", t.mean);

    let l = table.summary(Variable::LatentTrait);
    assert!(l.mean.abs() < 0.05, "latent mean {}", l.mean);
    assert!((l.variance - 1.0).abs() < 0.06, "latent variance {}", l.variance);
}

#[test]
fn naive_fit_recovers_total_effect() {
    let report = default_report();
    let b = report.treatment_estimate(AdjustmentSet::TreatmentOnly).unwrap();
    assert_eq!(report.total_treatment_effect, -3.0);
    assert!((b - -3.0).abs() < 0.4, "treatment-only coefficient {b}");
}

#[test]
fn adjusting_for_mediator_alone_reverses_sign() {
    let report = default_report();
    let naive = report.treatment_estimate(AdjustmentSet::TreatmentOnly).unwrap();
    let biased = report.treatment_estimate(AdjustmentSet::WithMediator).unwrap();
    assert!(naive < 0.0 && biased > 0.0, "naive={naive} with_mediator={biased}");
    assert!((biased - 0.6).abs() < 0.2, "with-mediator coefficient {biased}");
}

#[test]
fn full_fit_recovers_structural_constants() {
    let report = default_report();
    let fit = &report.model(AdjustmentSet::Full).unwrap().fit;
    let expect = [("intercept", 1.0), ("treatment", -1.0), ("mediator", 1.0), ("latent_trait", 2.0)];
    for (name, truth) in expect {
        let est = fit.estimate(name).unwrap();
        assert!((est - truth).abs() < 0.15, "{name}: {est} vs {truth}");
        let se = fit.coefficient(name).unwrap().std_error;
        assert!(se > 0.0 && se < 0.1, "{name}: se {se}");
    }
}

#[test]
fn sample_fits_track_population_targets() {
    let report = default_report();
    for m in &report.models {
        for (c, &pop) in m.fit.coefficients.iter().zip(&m.population) {
            assert!(
                (c.estimate - pop).abs() < 5.0 * c.std_error + 0.05,
                "{}: {} {} vs population {}",
                m.formula,
                c.name,
                c.estimate,
                pop
            );
        }
    }
}

#[test]
fn pipeline_is_idempotent() {
    let a = default_report();
    let b = default_report();
    assert_eq!(a, b);
    let bits = |r: &cf_inference::ExperimentReport| {
        r.models
            .iter()
            .flat_map(|m| m.fit.coefficients.iter().map(|c| c.estimate.to_bits()))
            .collect::<Vec<_>>()
    };
    assert_eq!(bits(&a), bits(&b));
}

#[test]
fn without_confounding_mediator_adjustment_is_unbiased() {
    // With no latent path into the outcome the mediator is no longer a
    // collider, so adjusting for it isolates the direct effect.
    let cfg = SimulationConfig {
        coefficients: StructuralCoefficients {
            outcome_on_latent: 0.0,
            mediator_on_latent: 0.0,
            ..StructuralCoefficients::default()
        },
        ..SimulationConfig::default()
    };
    let report = run_experiment(&cfg).unwrap();
    let direct = report.treatment_estimate(AdjustmentSet::WithMediator).unwrap();
    assert!((direct - -1.0).abs() < 0.15, "direct effect {direct}");
    let pop = &report.model(AdjustmentSet::WithMediator).unwrap().population;
    assert!((pop[1] - -1.0).abs() < 1e-12);
}

#[test]
fn zero_rows_is_invalid() {
    let cfg = SimulationConfig { n_rows: 0, ..SimulationConfig::default() };
    assert!(matches!(run_experiment(&cfg), Err(Error::InvalidParameter(_))));
}
