//! # Church numerals
//!
//! Church encodings of the natural numbers over the type of individuals:
//! `n` is realized as the iterator `λf. λx. fⁿ x` at the numeral type
//! `(ι → ι) → ι → ι`, together with the standard successor, addition, and
//! multiplication combinators.  These serve both as algebraic problem
//! generators for the unification engine's test problems and as worked
//! examples of genuinely higher-order terms.
//!
//! Because the combinators go through the term builder, every value produced
//! here is already β-normal and η-long: `addition(numeral(2), numeral(3))`
//! *is* `numeral(5)`, structurally.
//!
//! # Authors
//!
//! [Dominic Mulligan], Systems Research Group, [Arm Research] Cambridge.
//!
//! # Copyright
//!
//! Copyright (c) Arm Limited, 2021.  All rights reserved (r).  Please see the
//! `LICENSE.markdown` file in the *Refutary* root directory for licensing
//! information.
//!
//! [Dominic Mulligan]: https://dominic-mulligan.co.uk
//! [Arm Research]: http://www.arm.com/research

use crate::{
    _type::Type,
    declaration::{Declaration, FreeVariable},
    error_code::ErrorCode,
    term::Term,
};

////////////////////////////////////////////////////////////////////////////////
// The numeral type.
////////////////////////////////////////////////////////////////////////////////

/// The type of one-place functions over individuals, `ι → ι`.
#[inline]
pub fn iterator_type() -> Type {
    Type::function("i", vec![Type::individual()])
}

/// The Church numeral type, `(ι → ι) → ι → ι`.
#[inline]
pub fn numeral_type() -> Type {
    Type::function("i", vec![iterator_type(), Type::individual()])
}

////////////////////////////////////////////////////////////////////////////////
// Numerals and combinators.
////////////////////////////////////////////////////////////////////////////////

/// Builds the Church numeral `λf. λx. fⁿ x`.
pub fn numeral(n: u64) -> Term {
    let f = FreeVariable::new("f", iterator_type());
    let x = FreeVariable::new("x", Type::individual());

    let f_term = Term::from_declaration(Declaration::Free(f.clone()));

    let mut body = Term::from_declaration(Declaration::Free(x.clone()));

    for _ in 0..n {
        body = Term::apply(&f_term, &body)
            .expect("Numeral construction is well-typed.");
    }

    let inner = Term::abstract_variable(&body, &x);

    Term::abstract_variable(&inner, &f)
}

/// Builds the successor combinator, `λn. λf. λx. f (n f x)`.
pub fn successor_term() -> Term {
    let n = FreeVariable::new("n", numeral_type());
    let f = FreeVariable::new("f", iterator_type());
    let x = FreeVariable::new("x", Type::individual());

    let n_term = Term::from_declaration(Declaration::Free(n.clone()));
    let f_term = Term::from_declaration(Declaration::Free(f.clone()));
    let x_term = Term::from_declaration(Declaration::Free(x.clone()));

    let n_f_x = Term::apply_all(&n_term, &[f_term.clone(), x_term])
        .expect("Successor construction is well-typed.");
    let body = Term::apply(&f_term, &n_f_x)
        .expect("Successor construction is well-typed.");

    let inner = Term::abstract_variable(&body, &x);
    let middle = Term::abstract_variable(&inner, &f);

    Term::abstract_variable(&middle, &n)
}

/// Builds the addition combinator, `λm. λn. λf. λx. m f (n f x)`.
pub fn addition_term() -> Term {
    let m = FreeVariable::new("m", numeral_type());
    let n = FreeVariable::new("n", numeral_type());
    let f = FreeVariable::new("f", iterator_type());
    let x = FreeVariable::new("x", Type::individual());

    let m_term = Term::from_declaration(Declaration::Free(m.clone()));
    let n_term = Term::from_declaration(Declaration::Free(n.clone()));
    let f_term = Term::from_declaration(Declaration::Free(f.clone()));
    let x_term = Term::from_declaration(Declaration::Free(x.clone()));

    let n_f_x = Term::apply_all(&n_term, &[f_term.clone(), x_term])
        .expect("Addition construction is well-typed.");
    let body = Term::apply_all(&m_term, &[f_term, n_f_x])
        .expect("Addition construction is well-typed.");

    let inner = Term::abstract_variable(&body, &x);
    let middle = Term::abstract_variable(&inner, &f);
    let outer = Term::abstract_variable(&middle, &n);

    Term::abstract_variable(&outer, &m)
}

/// Builds the multiplication combinator, `λm. λn. λf. λx. m (n f) x`.
pub fn multiplication_term() -> Term {
    let m = FreeVariable::new("m", numeral_type());
    let n = FreeVariable::new("n", numeral_type());
    let f = FreeVariable::new("f", iterator_type());
    let x = FreeVariable::new("x", Type::individual());

    let m_term = Term::from_declaration(Declaration::Free(m.clone()));
    let n_term = Term::from_declaration(Declaration::Free(n.clone()));
    let f_term = Term::from_declaration(Declaration::Free(f.clone()));
    let x_term = Term::from_declaration(Declaration::Free(x.clone()));

    let n_f = Term::apply(&n_term, &f_term)
        .expect("Multiplication construction is well-typed.");
    let body = Term::apply_all(&m_term, &[n_f, x_term])
        .expect("Multiplication construction is well-typed.");

    let inner = Term::abstract_variable(&body, &x);
    let middle = Term::abstract_variable(&inner, &f);
    let outer = Term::abstract_variable(&middle, &n);

    Term::abstract_variable(&outer, &m)
}

/// Applies the successor combinator to a term of the numeral type.
pub fn successor(term: &Term) -> Result<Term, ErrorCode> {
    Term::apply(&successor_term(), term)
}

/// Applies the addition combinator to two terms of the numeral type.
pub fn addition(left: &Term, right: &Term) -> Result<Term, ErrorCode> {
    Term::apply_all(&addition_term(), &[left.clone(), right.clone()])
}

/// Applies the multiplication combinator to two terms of the numeral type.
pub fn multiplication(left: &Term, right: &Term) -> Result<Term, ErrorCode> {
    Term::apply_all(&multiplication_term(), &[left.clone(), right.clone()])
}

////////////////////////////////////////////////////////////////////////////////
// Tests.
////////////////////////////////////////////////////////////////////////////////

/// Tests for Church-numeral functionality.
#[cfg(test)]
mod test {
    use crate::{
        _type::Type,
        declaration::Declaration,
        numeral::{
            addition, multiplication, numeral, numeral_type, successor,
        },
        term::Term,
    };

    /// Tests the shape of zero: two binders, body headed by the innermost.
    #[test]
    pub fn numeral_test0() {
        let zero = numeral(0);

        assert_eq!(zero.binders().len(), 2);
        assert_eq!(zero.tau(), &numeral_type());
        assert_eq!(
            zero.head(),
            &Declaration::bound_variable(1, Type::individual())
        );
        assert!(zero.free_variables().is_empty());
    }

    /// Tests that the successor combinator counts up from zero.
    #[test]
    pub fn numeral_test1() {
        assert_eq!(successor(&numeral(0)).unwrap(), numeral(1));
        assert_eq!(successor(&numeral(4)).unwrap(), numeral(5));
    }

    /// Tests that addition agrees with arithmetic on small numerals.
    #[test]
    pub fn numeral_test2() {
        for a in 0..4 {
            for b in 0..4 {
                assert_eq!(
                    addition(&numeral(a), &numeral(b)).unwrap(),
                    numeral(a + b)
                );
            }
        }
    }

    /// Tests that multiplication agrees with arithmetic on small numerals.
    #[test]
    pub fn numeral_test3() {
        for a in 0..4 {
            for b in 0..4 {
                assert_eq!(
                    multiplication(&numeral(a), &numeral(b)).unwrap(),
                    numeral(a * b)
                );
            }
        }
    }

    /// Tests the unit laws: `1 · t = t` and `0 + t = t` for an arbitrary
    /// term of the numeral type, here a free variable.
    #[test]
    pub fn numeral_test4() {
        let t = Term::free_variable("t", numeral_type());

        assert_eq!(multiplication(&numeral(1), &t).unwrap(), t);
        assert_eq!(addition(&numeral(0), &t).unwrap(), t);
    }

    /// Tests that `t · 0` does *not* collapse: the product iterates the
    /// unknown `t` over a constant function, which is irreducible, unlike
    /// `0 · t`.
    #[test]
    pub fn numeral_test5() {
        let t = Term::free_variable("t", numeral_type());

        assert_eq!(multiplication(&numeral(0), &t).unwrap(), numeral(0));
        assert_ne!(multiplication(&t, &numeral(0)).unwrap(), numeral(0));
    }
}
