//! # Substitution
//!
//! A substitution maps one free variable to a replacement term of the same
//! type.  Applying a substitution goes through the term builder: the target
//! variable is abstracted out of the term and the abstraction is applied to
//! the replacement, `(λv. T) t`, so β-reduction and the η-long invariant
//! come for free rather than being re-implemented here.
//!
//! Substitution *lists* are kept idempotent: applying the full list to any
//! of its own right-hand sides is a no-op.  Adding a new pair rewrites the
//! right-hand sides of the existing pairs first and then prepends the new
//! pair — unless the new pair's variable is an opaque helper, in which case
//! only the rewriting survives.  Helpers are internal scaffolding of
//! η-expansion and binding generation and must never leak into a
//! user-visible solution.
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
    declaration::FreeVariable,
    error_code::ErrorCode,
    kernel_panic::SUBSTITUTION_FAILED_ERROR,
    term::Term,
};
use log::debug;
use std::{
    fmt,
    fmt::{Display, Formatter},
};

////////////////////////////////////////////////////////////////////////////////
// Substitutions, proper.
////////////////////////////////////////////////////////////////////////////////

/// A single substitution pair: a free variable and the term it is mapped to.
/// The variable and the replacement always have the same type.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Substitution {
    /// The free variable being replaced.
    variable: FreeVariable,
    /// The replacement term.
    replacement: Term,
}

impl Substitution {
    /// Creates a new substitution pair.
    ///
    /// # Errors
    ///
    /// Returns `Err(ErrorCode::SubstitutionTypeMismatch)` if the variable and
    /// the replacement term have different types.
    pub fn new(
        variable: FreeVariable,
        replacement: Term,
    ) -> Result<Self, ErrorCode> {
        if variable.tau() != replacement.tau() {
            return Err(ErrorCode::SubstitutionTypeMismatch);
        }

        Ok(Substitution {
            variable,
            replacement,
        })
    }

    /// Returns the variable being replaced.
    #[inline]
    pub fn variable(&self) -> &FreeVariable {
        &self.variable
    }

    /// Returns the replacement term.
    #[inline]
    pub fn replacement(&self) -> &Term {
        &self.replacement
    }

    /// Returns a copy of the pair with the substitution `inner` applied to
    /// the replacement term.
    fn rewritten(&self, inner: &Substitution) -> Self {
        Substitution {
            variable: self.variable.clone(),
            replacement: apply(inner, &self.replacement),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////
// Application.
////////////////////////////////////////////////////////////////////////////////

/// Applies a substitution to a term.  If the substitution's variable does not
/// occur free in the term, the term is returned unchanged; otherwise the
/// canonical definition `(λv. T) t` is evaluated through the term builder.
pub fn apply(substitution: &Substitution, term: &Term) -> Term {
    if !term.occurs_free(substitution.variable()) {
        return term.clone();
    }

    debug!(
        "Substituting for {} in {}.",
        substitution.variable().name(),
        term
    );

    let abstracted = Term::abstract_variable(term, substitution.variable());

    Term::apply(&abstracted, substitution.replacement())
        .expect(SUBSTITUTION_FAILED_ERROR)
}

/// Applies a substitution list to a term, left to right.
pub fn apply_list(substitutions: &[Substitution], term: &Term) -> Term {
    substitutions
        .iter()
        .fold(term.clone(), |term, substitution| apply(substitution, &term))
}

/// Adds a new pair to an idempotent substitution list: the new pair is first
/// applied to the right-hand side of every existing pair, and is then
/// prepended — unless its variable is an opaque helper, in which case only
/// the rewriting remains and the pair itself is dropped.
pub fn add_substitution(
    substitutions: &[Substitution],
    new: &Substitution,
) -> Vec<Substitution> {
    let mut rewritten: Vec<Substitution> = substitutions
        .iter()
        .map(|substitution| substitution.rewritten(new))
        .collect();

    if !new.variable().is_helper() {
        rewritten.insert(0, new.clone());
    }

    rewritten
}

////////////////////////////////////////////////////////////////////////////////
// Trait implementations.
////////////////////////////////////////////////////////////////////////////////

/// Pretty-printing for substitution pairs.
impl Display for Substitution {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{} ↦ {}", self.variable.name(), self.replacement)
    }
}

////////////////////////////////////////////////////////////////////////////////
// Tests.
////////////////////////////////////////////////////////////////////////////////

/// Tests for substitution-related functionality.
#[cfg(test)]
mod test {
    use crate::{
        _type::Type,
        declaration::{Declaration, FreeVariable},
        error_code::ErrorCode,
        substitution::{add_substitution, apply, apply_list, Substitution},
        term::Term,
    };

    /// The type `ι → ι`.
    fn unary() -> Type {
        Type::function("i", vec![Type::individual()])
    }

    /// Tests that mistyped substitution pairs are rejected.
    #[test]
    pub fn substitution_test0() {
        let x = FreeVariable::new("x", Type::individual());
        let p = Term::constant("p", Type::proposition());

        assert_eq!(
            Substitution::new(x, p).unwrap_err(),
            ErrorCode::SubstitutionTypeMismatch
        );
    }

    /// Tests that substitution replaces every occurrence of the variable:
    /// `f x` under `x ↦ a` becomes `f a`.
    #[test]
    pub fn substitution_test1() {
        let x = FreeVariable::new("x", Type::individual());
        let x_term = Term::from_declaration(Declaration::Free(x.clone()));
        let f = Term::constant("f", unary());
        let a = Term::constant("a", Type::individual());

        let fx = Term::apply(&f, &x_term).unwrap();
        let fa = Term::apply(&f, &a).unwrap();

        let substitution = Substitution::new(x, a).unwrap();

        assert_eq!(apply(&substitution, &fx), fa);
    }

    /// Tests that substitution is the identity on terms the variable does
    /// not occur in.
    #[test]
    pub fn substitution_test2() {
        let x = FreeVariable::new("x", Type::individual());
        let a = Term::constant("a", Type::individual());
        let b = Term::constant("b", Type::individual());

        let substitution = Substitution::new(x, a).unwrap();

        assert_eq!(apply(&substitution, &b), b);
    }

    /// Tests idempotence of application: applying a substitution twice is
    /// the same as applying it once.
    #[test]
    pub fn substitution_test3() {
        let x = FreeVariable::new("x", Type::individual());
        let x_term = Term::from_declaration(Declaration::Free(x.clone()));
        let f = Term::constant("f", unary());
        let a = Term::constant("a", Type::individual());

        let fx = Term::apply(&f, &x_term).unwrap();

        let substitution = Substitution::new(x, a).unwrap();

        let once = apply(&substitution, &fx);
        let twice = apply(&substitution, &once);

        assert_eq!(once, twice);
    }

    /// Tests that substitution of a functional variable β-reduces at the
    /// occurrence site: `g a` under `g ↦ λw. f w` becomes `f a`.
    #[test]
    pub fn substitution_test4() {
        let g = FreeVariable::new("g", unary());
        let g_term = Term::from_declaration(Declaration::Free(g.clone()));
        let f = Term::constant("f", unary());
        let a = Term::constant("a", Type::individual());

        let ga = Term::apply(&g_term, &a).unwrap();
        let fa = Term::apply(&f, &a).unwrap();

        let substitution = Substitution::new(g, f).unwrap();

        assert_eq!(apply(&substitution, &ga), fa);
    }

    /// Tests that adding a pair rewrites the right-hand sides of the
    /// existing pairs, keeping the list idempotent.
    #[test]
    pub fn substitution_test5() {
        let x = FreeVariable::new("x", Type::individual());
        let y = FreeVariable::new("y", Type::individual());
        let y_term = Term::from_declaration(Declaration::Free(y.clone()));
        let a = Term::constant("a", Type::individual());

        let first = Substitution::new(x.clone(), y_term).unwrap();
        let second = Substitution::new(y, a.clone()).unwrap();

        let list = add_substitution(&[first], &second);

        assert_eq!(list.len(), 2);
        assert_eq!(list[0], second);
        assert_eq!(list[1].variable(), &x);
        assert_eq!(list[1].replacement(), &a);

        let x_term = Term::from_declaration(Declaration::Free(x));

        assert_eq!(apply_list(&list, &x_term), a);
        assert_eq!(
            apply_list(&list, &apply_list(&list, &x_term)),
            apply_list(&list, &x_term)
        );
    }

    /// Tests that helper-domain pairs rewrite the list but are themselves
    /// dropped.
    #[test]
    pub fn substitution_test6() {
        let helper = FreeVariable::fresh_helper(Type::individual());
        let helper_term =
            Term::from_declaration(Declaration::Free(helper.clone()));

        let x = FreeVariable::new("x", Type::individual());
        let a = Term::constant("a", Type::individual());

        let visible = Substitution::new(x.clone(), helper_term).unwrap();
        let hidden = Substitution::new(helper, a.clone()).unwrap();

        let list = add_substitution(&[visible], &hidden);

        assert_eq!(list.len(), 1);
        assert_eq!(list[0].variable(), &x);
        assert_eq!(list[0].replacement(), &a);
    }
}
