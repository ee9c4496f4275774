#![deny(missing_docs)]
#![doc = "Polarimeter vector of a spin-1/2 initial state as symbolic expressions."]

use pol_core::{ErrorInfo, PolError, Rational};
use pol_decay::{create_spin_range, AmplitudeBuilder, Subsystem};
use pol_sym::{msigma, Condition, Expr, PoolSum, Symbol};

/// Formulates the polarimeter vector `(x, y, z)` of the decay described by `builder`.
///
/// Each component is
/// `Σ conj(A(λ, λ_i)) σ_k[idx(λ), idx(λ')] A(λ', λ_i) / I`, summed over
/// `λ, λ' ∈ {-1/2, 1/2}` and every final-state helicity, where `I` is the
/// intensity of [`AmplitudeBuilder::formulate`]. The sums are left
/// unevaluated; call `doit` on the result to expand them.
pub fn formulate_polarimetry<B: AmplitudeBuilder + ?Sized>(
    builder: &B,
    reference_subsystem: Subsystem,
) -> Result<(Expr, Expr, Expr), PolError> {
    let decay = builder.decay();
    let initial_spin = decay.initial_state.spin;
    if initial_spin != Rational::half() {
        return Err(PolError::Precondition(
            ErrorInfo::new(
                "polarimetry-spin",
                format!(
                    "Can only formulate polarimetry for an initial state with spin 1/2, but got {initial_spin}"
                ),
            )
            .with_context("initial_state", decay.initial_state.name.clone()),
        ));
    }
    let model = builder.formulate(reference_subsystem)?;
    let lambda = Symbol::real("lambda").with_latex(r"\lambda");
    let lambda_prime = Symbol::real("lambda'").with_latex(r"\lambda^{\prime}");
    let final_state: Vec<(Symbol, Vec<Expr>)> = decay
        .final_state
        .iter()
        .map(|(index, particle)| {
            let values = create_spin_range(particle.spin)
                .into_iter()
                .map(Expr::from)
                .collect();
            (Symbol::real(format!("lambda{index}")), values)
        })
        .collect();
    let helicities: Vec<Expr> = final_state
        .iter()
        .map(|(symbol, _)| symbol.clone().into())
        .collect();
    let amplitude = builder
        .formulate_aligned_amplitude(&lambda.clone().into(), &helicities, reference_subsystem)?
        .expression;
    let amplitude_prime = builder
        .formulate_aligned_amplitude(&lambda_prime.clone().into(), &helicities, reference_subsystem)?
        .expression;
    let half_range: Vec<Expr> = create_spin_range(initial_spin)
        .into_iter()
        .map(Expr::from)
        .collect();
    let mut indices = vec![
        (lambda.clone(), half_range.clone()),
        (lambda_prime.clone(), half_range),
    ];
    indices.extend(final_state);

    let lambda_index = to_index(&lambda.into());
    let lambda_prime_index = to_index(&lambda_prime.into());
    let component = |pauli_index: u8| -> Result<Expr, PolError> {
        let sigma = msigma(pauli_index)?;
        let element = sigma.element(lambda_index.clone(), lambda_prime_index.clone());
        let summand = amplitude.conjugate() * element * amplitude_prime.clone();
        let numerator = PoolSum::new(summand, indices.clone()).cleanup();
        Ok(numerator / model.intensity.clone())
    };
    let polarimetry = (component(1)?, component(2)?, component(3)?);
    log::debug!(
        "formulated polarimetry of {} in subsystem {}",
        decay.initial_state.name,
        reference_subsystem
    );
    Ok(polarimetry)
}

/// Maps a helicity to a Pauli matrix index: `1` for negative values, `0` otherwise.
pub fn to_index(helicity: &Expr) -> Expr {
    Expr::piecewise(vec![
        (Expr::one(), Condition::less(helicity.clone(), Expr::zero())),
        (Expr::zero(), Condition::True),
    ])
}
