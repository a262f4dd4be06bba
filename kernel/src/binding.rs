//! # Imitation and projection bindings
//!
//! At a flex–rigid pair — an equation whose one side is headed by a free
//! variable `x` and whose other side is headed by a constant or bound
//! variable `y` — Huet's procedure branches over a finite family of
//! schematic substitutions for `x`:
//!
//! - the **imitation** binding copies the rigid head:
//!   `x ↦ λX₁ … Xₙ. y (H₁ X₁ … Xₙ) … (Hₘ X₁ … Xₙ)`, available only for
//!   constant heads whose goal type agrees with `x`'s;
//! - a **projection** binding picks one of `x`'s own arguments:
//!   `x ↦ λX₁ … Xₙ. Xᵢ (H₁ X₁ … Xₙ) … (Hₖ X₁ … Xₙ)`, one for each
//!   argument position whose goal type agrees with the rigid side's.
//!
//! The `Xᵢ` and `Hⱼ` are fresh helper variables; each `Hⱼ` abstracts over
//! all of `x`'s argument types, so the generated right-hand sides are
//! maximally general.  Everything is built through the term builder, so the
//! produced replacements are βη-long like every other term in the kernel.
//!
//! # Authors
//!
//! [Dominic Mulligan], Systems Research Group, [Arm Research] Cambridge.
//! [Nick Spinale], Systems Research Group, [Arm Research] Cambridge.
//!
//! # Copyright
//!
//! Copyright (c) Arm Limited, 2021.  All rights reserved (r).  Please see the
//! `LICENSE.markdown` file in the *Refutary* root directory for licensing
//! information.
//!
//! [Dominic Mulligan]: https://dominic-mulligan.co.uk
//! [Nick Spinale]: https://nickspinale.com
//! [Arm Research]: http://www.arm.com/research

use crate::{
    _type::Type,
    declaration::{Declaration, FreeVariable},
    kernel_panic::SUBSTITUTION_FAILED_ERROR,
    substitution::Substitution,
    term::Term,
};
use log::debug;

////////////////////////////////////////////////////////////////////////////////
// Binding kinds.
////////////////////////////////////////////////////////////////////////////////

/// The two schematic binding families of Huet's procedure.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum BindingKind {
    /// Copy the rigid head.
    Imitation,
    /// Project onto one of the flex head's own arguments.
    Projection,
}

////////////////////////////////////////////////////////////////////////////////
// Binding generation.
////////////////////////////////////////////////////////////////////////////////

/// Generates the candidate substitutions for the flex head `x` against the
/// rigid atom `rigid`, in the order given by `kinds`.  Imitation is skipped
/// for bound-variable atoms — there is nothing to copy that would remain
/// rigid under the binder — and for mismatched goal types.
pub fn bindings_for(
    x: &FreeVariable,
    rigid: &Declaration,
    kinds: &[BindingKind],
) -> Vec<Substitution> {
    let mut candidates = Vec::new();

    for kind in kinds {
        match kind {
            BindingKind::Imitation => {
                if let Some(binding) = imitation_binding(x, rigid) {
                    candidates.push(binding);
                }
            }
            BindingKind::Projection => {
                candidates.extend(projection_bindings(x, rigid));
            }
        }
    }

    debug!(
        "Generated {} binding candidate(s) for {} against {}.",
        candidates.len(),
        x.name(),
        rigid
    );

    candidates
}

/// Builds the imitation binding for `x` against `rigid`, if one exists:
/// `rigid` must be a constant and its goal type must agree with `x`'s.
pub fn imitation_binding(
    x: &FreeVariable,
    rigid: &Declaration,
) -> Option<Substitution> {
    let constant = rigid.split_constant()?;

    if constant.tau().goal() != x.tau().goal() {
        return None;
    }

    let parameters = fresh_parameters(x);
    let head = Term::from_declaration(rigid.clone());

    Some(schematic_binding(x, &parameters, head, constant.tau().arguments()))
}

/// Builds the projection bindings for `x` against `rigid`: one binding per
/// argument position of `x` whose goal type agrees with the rigid side's.
pub fn projection_bindings(
    x: &FreeVariable,
    rigid: &Declaration,
) -> Vec<Substitution> {
    let parameters = fresh_parameters(x);

    let mut bindings = Vec::new();

    for parameter in &parameters {
        if parameter.tau().goal() != rigid.tau().goal() {
            continue;
        }

        let head =
            Term::from_declaration(Declaration::Free(parameter.clone()));

        bindings.push(schematic_binding(
            x,
            &parameters,
            head,
            parameter.tau().arguments(),
        ));
    }

    bindings
}

/// Allocates one fresh helper parameter per argument type of `x`.
fn fresh_parameters(x: &FreeVariable) -> Vec<FreeVariable> {
    x.tau()
        .arguments()
        .iter()
        .map(|tau| FreeVariable::fresh_helper(tau.clone()))
        .collect()
}

/// Assembles a schematic binding `x ↦ λX̄. head (H₁ X̄) … (Hₘ X̄)`, where the
/// `Hⱼ` are fresh helpers abstracting the parameter types in front of the
/// head's argument types.
fn schematic_binding(
    x: &FreeVariable,
    parameters: &[FreeVariable],
    head: Term,
    head_argument_types: &[Type],
) -> Substitution {
    let parameter_terms: Vec<Term> = parameters
        .iter()
        .map(|parameter| {
            Term::from_declaration(Declaration::Free(parameter.clone()))
        })
        .collect();

    let parameter_types: Vec<Type> = parameters
        .iter()
        .map(|parameter| parameter.tau().clone())
        .collect();

    let mut body = head;

    for argument_type in head_argument_types {
        let helper = FreeVariable::fresh_helper(
            argument_type.extend(parameter_types.clone()),
        );

        let helper_term =
            Term::from_declaration(Declaration::Free(helper));

        let argument = Term::apply_all(&helper_term, &parameter_terms)
            .expect(SUBSTITUTION_FAILED_ERROR);

        body = Term::apply(&body, &argument).expect(SUBSTITUTION_FAILED_ERROR);
    }

    let mut replacement = body;

    for parameter in parameters.iter().rev() {
        replacement = Term::abstract_variable(&replacement, parameter);
    }

    Substitution::new(x.clone(), replacement)
        .expect(SUBSTITUTION_FAILED_ERROR)
}

////////////////////////////////////////////////////////////////////////////////
// Tests.
////////////////////////////////////////////////////////////////////////////////

/// Tests for binding-generation functionality.
#[cfg(test)]
mod test {
    use crate::{
        _type::Type,
        binding::{bindings_for, BindingKind},
        declaration::{Declaration, FreeVariable},
    };

    /// The type `ι → ι → ι`.
    fn binary() -> Type {
        Type::function(
            "i",
            vec![Type::individual(), Type::individual()],
        )
    }

    /// Tests the candidate count at a first-order flex–rigid pair:
    /// `x : ι → ι → ι` against `f : ι → ι → ι` admits one imitation and two
    /// projections, imitation first.
    #[test]
    pub fn binding_test0() {
        let x = FreeVariable::new("x", binary());
        let f = Declaration::constant("f", binary());

        let candidates = bindings_for(
            &x,
            &f,
            &[BindingKind::Imitation, BindingKind::Projection],
        );

        assert_eq!(candidates.len(), 3);

        for candidate in &candidates {
            assert_eq!(candidate.variable(), &x);
            assert_eq!(candidate.replacement().tau(), x.tau());
        }

        // The imitation copies the rigid head under the binders.
        assert_eq!(
            candidates[0].replacement().head(),
            &Declaration::constant("f", binary())
        );

        // The projections are headed by the schematic parameters.
        assert!(candidates[1].replacement().head().is_bound_variable());
        assert!(candidates[2].replacement().head().is_bound_variable());
    }

    /// Tests that imitation is suppressed against bound-variable atoms:
    /// only projections remain.
    #[test]
    pub fn binding_test1() {
        let x = FreeVariable::new("x", binary());
        let bound = Declaration::bound_variable(7, Type::individual());

        let candidates = bindings_for(
            &x,
            &bound,
            &[BindingKind::Imitation, BindingKind::Projection],
        );

        assert_eq!(candidates.len(), 2);
    }

    /// Tests the goal-type filter on projections: a propositional argument
    /// position cannot project onto an individual-goal rigid side.
    #[test]
    pub fn binding_test2() {
        let x = FreeVariable::new(
            "x",
            Type::function(
                "i",
                vec![Type::proposition(), Type::individual()],
            ),
        );
        let a = Declaration::constant("a", Type::individual());

        let candidates =
            bindings_for(&x, &a, &[BindingKind::Projection]);

        assert_eq!(candidates.len(), 1);
    }

    /// Tests that an arity-zero flex variable against a mismatched-goal
    /// constant generates no candidates at all.
    #[test]
    pub fn binding_test3() {
        let x = FreeVariable::new("x", Type::proposition());
        let a = Declaration::constant("a", Type::individual());

        let candidates = bindings_for(
            &x,
            &a,
            &[BindingKind::Imitation, BindingKind::Projection],
        );

        assert!(candidates.is_empty());
    }
}
