//! # βη-long terms
//!
//! Terms of the simply-typed λ-calculus, stored in *spine* form: a term is a
//! block of binders wrapped around a head declaration applied to a list of
//! argument terms, `λ b₁ … bₖ. h a₁ … aₘ`.  Two representation disciplines
//! are enforced by every operation in this module:
//!
//! - **β-normal, η-long.**  The head of a term is always fully applied: `m`
//!   equals the arity of the head's type.  A construction that would produce
//!   a redex reduces it immediately, so a redex is never representable.
//!   Functional terms always carry binders.
//! - **Canonical absolute indices.**  Bound variables are numbered by
//!   indices that are absolute within the whole term, not relative to the
//!   enclosing binder.  At every node the indices bound there form a
//!   contiguous range whose smallest member is exactly one greater than the
//!   largest index bound inside the node's arguments.  Under this numbering,
//!   α-equivalent terms are structurally identical, so term equality is
//!   plain structural equality.
//!
//! Each term caches its type, its free-variable set, and `max_index`, the
//! largest index bound at or below the node (free references into enclosing
//! binders do not count).  `max_index + 1` is therefore always a safe fresh
//! index for a new enclosing binder.
//!
//! Substituting a term into another can duplicate the inserted term's
//! binders across sibling subtrees; `adjust_all_bound_vars` repairs this by
//! renaming every binder into a reserved high range and then compacting
//! bottom-up onto the canonical contiguous numbering.
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
    declaration::{BoundVariable, Declaration, FreeVariable},
    error_code::ErrorCode,
    kernel_panic::{
        BOUND_INDEX_EXHAUST_ERROR, CAPTURE_ERROR, DANGLING_BOUND_VARIABLE_ERROR,
        MALFORMED_TERM_ERROR,
    },
    name::Name,
};
use std::{
    fmt,
    fmt::{Display, Formatter},
};

////////////////////////////////////////////////////////////////////////////////
// Miscellaneous material.
////////////////////////////////////////////////////////////////////////////////

/// The number of bound-variable indices the kernel is prepared to issue for
/// any one term.  Canonical renumbering reserves the range above this bound
/// as scratch space, and refuses terms that would need more.
pub const BOUND_INDEX_BUDGET: u64 = 1_000_000_000;

////////////////////////////////////////////////////////////////////////////////
// Terms, proper.
////////////////////////////////////////////////////////////////////////////////

/// A βη-long term in spine form, denoting `λ binders. head arguments`.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Term {
    /// The binders of the term, outermost first.  Indices descend along the
    /// list, the front binder carrying the largest.
    binders: Vec<BoundVariable>,
    /// The head declaration of the term.
    head: Declaration,
    /// The argument terms the head is applied to.  Always exactly as many as
    /// the head's arity.
    arguments: Vec<Term>,
    /// The type of the term: the binder types wrapped around the head's goal.
    tau: Type,
    /// The set of free variables occurring anywhere in the term, without
    /// duplicates, in first-occurrence order.
    free_variables: Vec<FreeVariable>,
    /// The largest index bound at this node or inside its arguments.
    max_index: u64,
}

impl Term {
    ////////////////////////////////////////////////////////////////////////////
    // Construction.
    ////////////////////////////////////////////////////////////////////////////

    /// Constructs the η-long term realizing a declaration.  A base-typed
    /// declaration produces a leaf; a declaration of arity `n` is applied to
    /// the η-expansions of `n` fresh helper variables, which are then
    /// abstracted again, so the result's type is exactly the declaration's
    /// type and no helper remains free.
    pub fn from_declaration(declaration: Declaration) -> Self {
        let arity = declaration.tau().arity();

        if arity == 0 {
            return assemble(Vec::new(), declaration, Vec::new());
        }

        let helpers: Vec<FreeVariable> = declaration
            .tau()
            .arguments()
            .iter()
            .map(|tau| FreeVariable::fresh_helper(tau.clone()))
            .collect();

        let arguments = helpers
            .iter()
            .map(|helper| {
                Term::from_declaration(Declaration::Free(helper.clone()))
            })
            .collect();

        // Sibling η-expansions number their binders independently, so the
        // assembled spine needs a global renumbering before abstraction.
        let mut term =
            assemble(Vec::new(), declaration, arguments).adjust_all_bound_vars();

        for helper in helpers.iter().rev() {
            term = Term::abstract_variable(&term, helper);
        }

        term
    }

    /// Constructs the η-long term realizing a free variable.
    #[inline]
    pub fn free_variable<N>(name: N, tau: Type) -> Self
    where
        N: Into<Name>,
    {
        Term::from_declaration(Declaration::free_variable(name, tau))
    }

    /// Constructs the η-long term realizing a constant.
    #[inline]
    pub fn constant<N>(name: N, tau: Type) -> Self
    where
        N: Into<String>,
    {
        Term::from_declaration(Declaration::constant(name, tau))
    }

    /// Applies `left` to `right`, β-reducing the resulting redex and
    /// restoring the canonical index numbering.
    ///
    /// # Errors
    ///
    /// Returns `Err(ErrorCode::NotAFunctionType)` if `left` has base type.
    ///
    /// Returns `Err(ErrorCode::DomainTypeMismatch)` if `right`'s type is not
    /// the domain type of `left`.
    pub fn apply(left: &Term, right: &Term) -> Result<Self, ErrorCode> {
        let (domain, _range) =
            left.tau.split_function().ok_or(ErrorCode::NotAFunctionType)?;

        if domain != right.tau() {
            return Err(ErrorCode::DomainTypeMismatch);
        }

        if left.binders.is_empty() {
            panic!("{}", MALFORMED_TERM_ERROR);
        }

        // Shift the argument's binders above everything bound in `left` so
        // the two index ranges cannot collide during substitution.
        let raised = right.raise_indices(left.max_index);

        let binder = left.binders[0].clone();
        let body = assemble(
            left.binders[1..].to_vec(),
            left.head.clone(),
            left.arguments.clone(),
        );

        let substituted = body.substitute_bound(binder.index(), &raised);

        Ok(substituted.adjust_all_bound_vars())
    }

    /// Applies `function` to each argument in turn, left to right.
    pub fn apply_all(
        function: &Term,
        arguments: &[Term],
    ) -> Result<Self, ErrorCode> {
        let mut term = function.clone();

        for argument in arguments {
            term = Term::apply(&term, argument)?;
        }

        Ok(term)
    }

    /// Abstracts the free variable `variable` in `term`, producing
    /// `λ variable. term`.  The new binder receives the fresh index
    /// `max_index + 1` and is inserted at the front of the binder block; if
    /// the variable does not occur free the abstraction is vacuous but has
    /// the same type.
    ///
    /// Will **panic** if the fresh index is already bound inside the term,
    /// which would capture the new binder.  This is unreachable while the
    /// canonical-numbering invariant holds.
    pub fn abstract_variable(term: &Term, variable: &FreeVariable) -> Self {
        let index = term.max_index + 1;
        let binder = BoundVariable::new(index, variable.tau().clone());

        let replaced = if term.occurs_free(variable) {
            term.replace_free_with_bound(variable, &binder)
        } else {
            term.clone()
        };

        let mut binders = Vec::with_capacity(replaced.binders.len() + 1);
        binders.push(binder);
        binders.extend(replaced.binders.iter().cloned());

        assemble(binders, replaced.head.clone(), replaced.arguments.clone())
    }

    /// Wraps an argument term in a copy of an enclosing binder block,
    /// producing the standalone term `λ binders. argument` with canonical
    /// numbering.  Binders the argument does not mention become vacuous.
    /// Used when decomposing an equation between applied spines into
    /// equations between corresponding arguments.
    pub fn under_binders(binders: &[BoundVariable], argument: &Term) -> Self {
        if binders.is_empty() {
            return argument.clone();
        }

        let mut combined = binders.to_vec();
        combined.extend(argument.binders.iter().cloned());

        assemble(
            combined,
            argument.head.clone(),
            argument.arguments.clone(),
        )
        .adjust_all_bound_vars()
    }

    ////////////////////////////////////////////////////////////////////////////
    // Accessors.
    ////////////////////////////////////////////////////////////////////////////

    /// Returns the binders of the term, outermost first.
    #[inline]
    pub fn binders(&self) -> &[BoundVariable] {
        &self.binders
    }

    /// Returns the head declaration of the term.
    #[inline]
    pub fn head(&self) -> &Declaration {
        &self.head
    }

    /// Returns the argument terms of the term.
    #[inline]
    pub fn arguments(&self) -> &[Term] {
        &self.arguments
    }

    /// Returns the type of the term.
    #[inline]
    pub fn tau(&self) -> &Type {
        &self.tau
    }

    /// Returns the free variables of the term, without duplicates.
    #[inline]
    pub fn free_variables(&self) -> &[FreeVariable] {
        &self.free_variables
    }

    /// Returns the largest index bound at this node or inside its arguments.
    #[inline]
    pub fn max_index(&self) -> u64 {
        self.max_index
    }

    /// Returns `true` iff `variable` occurs free in the term.
    #[inline]
    pub fn occurs_free(&self, variable: &FreeVariable) -> bool {
        self.free_variables.contains(variable)
    }

    /// Returns `true` iff the term is a bare free variable: no binders, no
    /// arguments, and a free-variable head.
    #[inline]
    pub fn is_bare_free_variable(&self) -> bool {
        self.binders.is_empty()
            && self.arguments.is_empty()
            && self.head.is_free_variable()
    }

    ////////////////////////////////////////////////////////////////////////////
    // Index management.
    ////////////////////////////////////////////////////////////////////////////

    /// Shifts this node's binders so that the smallest index in the block is
    /// exactly one greater than the largest index bound inside the
    /// arguments, rewriting the occurrences in the subtree to match.  Used
    /// to restore the contiguity invariant after ad-hoc surgery on a single
    /// node; composition of `apply` and `abstract_variable` never needs it.
    pub fn adjust_outer_bound_vars(&self) -> Self {
        if self.binders.is_empty() {
            return self.clone();
        }

        let desired = self
            .arguments
            .iter()
            .map(|argument| argument.max_index)
            .max()
            .unwrap_or(0)
            + 1;

        // The back of the binder block carries the smallest index.
        let current = self.binders.last().map(BoundVariable::index).unwrap();

        if current == desired {
            return self.clone();
        }

        let mapping: Vec<(u64, u64)> = self
            .binders
            .iter()
            .map(|binder| (binder.index(), binder.index() - current + desired))
            .collect();

        let binders = self
            .binders
            .iter()
            .map(|binder| binder.renamed(binder.index() - current + desired))
            .collect();

        let head = rename_head(&self.head, &mapping);
        let arguments = self
            .arguments
            .iter()
            .map(|argument| argument.rename_occurrences(&mapping))
            .collect();

        assemble(binders, head, arguments)
    }

    /// Globally renumbers every binder in the term onto the canonical
    /// numbering: at each node the bound indices form a contiguous range
    /// starting one above the largest index bound inside the arguments, with
    /// the outermost binder of the block carrying the largest index.  Safe
    /// in the presence of duplicate binder indices across sibling subtrees,
    /// which β-substitution can introduce.
    ///
    /// Will **panic** if the term requires more than `BOUND_INDEX_BUDGET`
    /// indices.
    pub fn adjust_all_bound_vars(&self) -> Self {
        let mut environment = Vec::new();
        let mut counter = BOUND_INDEX_BUDGET;

        let unique = self.uniquify(&mut environment, &mut counter);

        let mut environment = Vec::new();

        unique.compact(&mut environment)
    }

    /// Shifts every bound-variable index in the term — binders and
    /// occurrences alike — upwards by `delta`.  The term must be
    /// self-contained: every bound occurrence refers to a binder within it.
    fn raise_indices(&self, delta: u64) -> Self {
        if delta == 0 {
            return self.clone();
        }

        let binders = self
            .binders
            .iter()
            .map(|binder| binder.shifted(delta))
            .collect();

        let head = match self.head.split_bound_variable() {
            Some(bound) => Declaration::Bound(bound.shifted(delta)),
            None => self.head.clone(),
        };

        let arguments = self
            .arguments
            .iter()
            .map(|argument| argument.raise_indices(delta))
            .collect();

        assemble(binders, head, arguments)
    }

    /// First canonicalization pass: renames every binder to a globally
    /// unique index above the scratch offset, resolving duplicate indices by
    /// nearest-enclosing-binder scoping.
    fn uniquify(
        &self,
        environment: &mut Vec<(u64, u64)>,
        counter: &mut u64,
    ) -> Self {
        let depth = environment.len();

        let mut binders = Vec::with_capacity(self.binders.len());

        for binder in &self.binders {
            *counter = counter
                .checked_add(1)
                .unwrap_or_else(|| panic!("{}", BOUND_INDEX_EXHAUST_ERROR));

            if *counter - BOUND_INDEX_BUDGET > BOUND_INDEX_BUDGET {
                panic!("{}", BOUND_INDEX_EXHAUST_ERROR);
            }

            environment.push((binder.index(), *counter));
            binders.push(binder.renamed(*counter));
        }

        let head = rename_head_scoped(&self.head, environment);

        let arguments = self
            .arguments
            .iter()
            .map(|argument| argument.uniquify(environment, counter))
            .collect();

        environment.truncate(depth);

        assemble(binders, head, arguments)
    }

    /// Second canonicalization pass: assigns the final contiguous indices.
    /// The final index block of a node starts one above the total binder
    /// weight of its arguments, which equals the arguments' final
    /// `max_index` by construction.
    fn compact(&self, environment: &mut Vec<(u64, u64)>) -> Self {
        let depth = environment.len();

        let base = self
            .arguments
            .iter()
            .map(Term::binder_weight)
            .max()
            .unwrap_or(0)
            + 1;

        let count = self.binders.len() as u64;

        let mut binders = Vec::with_capacity(self.binders.len());

        for (position, binder) in self.binders.iter().enumerate() {
            let index = base + (count - 1 - position as u64);
            environment.push((binder.index(), index));
            binders.push(binder.renamed(index));
        }

        let head = rename_head_scoped(&self.head, environment);

        let arguments = self
            .arguments
            .iter()
            .map(|argument| argument.compact(environment))
            .collect();

        environment.truncate(depth);

        assemble(binders, head, arguments)
    }

    /// The number of binders in the subtree along its deepest spine: exactly
    /// the `max_index` the subtree will have once compacted.
    fn binder_weight(&self) -> u64 {
        self.binders.len() as u64
            + self
                .arguments
                .iter()
                .map(Term::binder_weight)
                .max()
                .unwrap_or(0)
    }

    /// Rewrites occurrences of the mapped indices throughout the subtree.
    /// Binder declarations themselves are left alone: the mapped indices are
    /// bound at an enclosing node, and indices are globally unique, so no
    /// inner binder can shadow them.
    fn rename_occurrences(&self, mapping: &[(u64, u64)]) -> Self {
        let head = rename_head(&self.head, mapping);

        let arguments = self
            .arguments
            .iter()
            .map(|argument| argument.rename_occurrences(mapping))
            .collect();

        assemble(self.binders.clone(), head, arguments)
    }

    ////////////////////////////////////////////////////////////////////////////
    // Substitution plumbing.
    ////////////////////////////////////////////////////////////////////////////

    /// Substitutes `replacement` for every occurrence of the bound variable
    /// with index `index`, β-reducing at each occurrence site.  The
    /// replacement's binder indices must be disjoint from the host's (see
    /// `raise_indices`); the result generally needs `adjust_all_bound_vars`.
    pub(crate) fn substitute_bound(
        &self,
        index: u64,
        replacement: &Term,
    ) -> Self {
        let arguments: Vec<Term> = self
            .arguments
            .iter()
            .map(|argument| argument.substitute_bound(index, replacement))
            .collect();

        match self.head.split_bound_variable() {
            Some(bound) if bound.index() == index => {
                let core = beta_apply(replacement, arguments);

                assemble(
                    self.binders.clone(),
                    core.head.clone(),
                    core.arguments.clone(),
                )
            }
            _ => assemble(self.binders.clone(), self.head.clone(), arguments),
        }
    }

    /// Rewrites every occurrence of the free variable `variable` into the
    /// bound variable `binder`.
    ///
    /// Will **panic** if `binder`'s index is already bound inside the term,
    /// which would capture the occurrences being rewritten.
    fn replace_free_with_bound(
        &self,
        variable: &FreeVariable,
        binder: &BoundVariable,
    ) -> Self {
        if self
            .binders
            .iter()
            .any(|bound| bound.index() == binder.index())
        {
            panic!("{}", CAPTURE_ERROR);
        }

        let head = match self.head.split_free_variable() {
            Some(free) if free == variable => {
                Declaration::Bound(binder.clone())
            }
            _ => self.head.clone(),
        };

        let arguments = self
            .arguments
            .iter()
            .map(|argument| {
                if argument.occurs_free(variable) {
                    argument.replace_free_with_bound(variable, binder)
                } else {
                    argument.clone()
                }
            })
            .collect();

        assemble(self.binders.clone(), head, arguments)
    }
}

////////////////////////////////////////////////////////////////////////////////
// Internal construction helpers.
////////////////////////////////////////////////////////////////////////////////

/// Assembles a term from its parts, recomputing the cached type,
/// free-variable set, and maximum bound index.
///
/// Will **panic** if the head is not fully applied, which would violate the
/// η-long representation.
fn assemble(
    binders: Vec<BoundVariable>,
    head: Declaration,
    arguments: Vec<Term>,
) -> Term {
    if arguments.len() != head.tau().arity() {
        panic!("{}", MALFORMED_TERM_ERROR);
    }

    let mut free_variables = Vec::new();

    if let Some(variable) = head.split_free_variable() {
        free_variables.push(variable.clone());
    }

    for argument in &arguments {
        for variable in &argument.free_variables {
            if !free_variables.contains(variable) {
                free_variables.push(variable.clone());
            }
        }
    }

    let max_index = binders
        .iter()
        .map(BoundVariable::index)
        .chain(arguments.iter().map(|argument| argument.max_index))
        .max()
        .unwrap_or(0);

    let tau = Type::function(
        head.tau().goal(),
        binders.iter().map(|binder| binder.tau().clone()).collect(),
    );

    Term {
        binders,
        head,
        arguments,
        tau,
        free_variables,
        max_index,
    }
}

/// β-reduces the application of an η-long `function` term to exactly as many
/// arguments as it binds, substituting each argument for the corresponding
/// binder in turn.
fn beta_apply(function: &Term, arguments: Vec<Term>) -> Term {
    if function.binders.len() != arguments.len() {
        panic!("{}", MALFORMED_TERM_ERROR);
    }

    let mut body = assemble(
        Vec::new(),
        function.head.clone(),
        function.arguments.clone(),
    );

    for (binder, argument) in function.binders.iter().zip(arguments) {
        body = body.substitute_bound(binder.index(), &argument);
    }

    body
}

/// Renames a head through a flat index mapping, leaving it alone when it is
/// not a mapped bound variable.
fn rename_head(head: &Declaration, mapping: &[(u64, u64)]) -> Declaration {
    match head.split_bound_variable() {
        Some(bound) => {
            match mapping.iter().find(|(old, _new)| *old == bound.index()) {
                Some((_old, new)) => Declaration::Bound(bound.renamed(*new)),
                None => head.clone(),
            }
        }
        None => head.clone(),
    }
}

/// Renames a bound-variable head through a scoped environment, resolving to
/// the nearest enclosing mapping.
///
/// Will **panic** if the head references an index no enclosing node binds.
fn rename_head_scoped(
    head: &Declaration,
    environment: &[(u64, u64)],
) -> Declaration {
    match head.split_bound_variable() {
        Some(bound) => {
            let (_old, new) = environment
                .iter()
                .rev()
                .find(|(old, _new)| *old == bound.index())
                .unwrap_or_else(|| panic!("{}", DANGLING_BOUND_VARIABLE_ERROR));

            Declaration::Bound(bound.renamed(*new))
        }
        None => head.clone(),
    }
}

////////////////////////////////////////////////////////////////////////////////
// Trait implementations.
////////////////////////////////////////////////////////////////////////////////

/// Pretty-printing for terms.  Binders render as `λ#i …`, compound arguments
/// are parenthesized.
impl Display for Term {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        if !self.binders.is_empty() {
            write!(f, "λ")?;

            for binder in &self.binders {
                write!(f, "#{} ", binder.index())?;
            }

            write!(f, ". ")?;
        }

        write!(f, "{}", self.head)?;

        for argument in &self.arguments {
            if argument.binders.is_empty() && argument.arguments.is_empty() {
                write!(f, " {}", argument)?;
            } else {
                write!(f, " ({})", argument)?;
            }
        }

        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////
// Tests.
////////////////////////////////////////////////////////////////////////////////

/// Tests for term-builder functionality.
#[cfg(test)]
mod test {
    use crate::{
        _type::Type,
        declaration::{BoundVariable, Declaration, FreeVariable},
        error_code::ErrorCode,
        term::Term,
    };

    /// The type `ι → ι`.
    fn unary() -> Type {
        Type::function("i", vec![Type::individual()])
    }

    /// Checks the cached free-variable set and maximum index against a
    /// recomputation, and the contiguity of every binder block.
    fn assert_canonical(term: &Term) {
        fn walk(term: &Term) -> (Vec<FreeVariable>, u64) {
            let mut free = Vec::new();

            if let Some(v) = term.head().split_free_variable() {
                free.push(v.clone());
            }

            let argument_max = term
                .arguments()
                .iter()
                .map(|argument| {
                    let (mut inner_free, inner_max) = walk(argument);
                    inner_free.retain(|v| !free.contains(v));
                    free.append(&mut inner_free);
                    inner_max
                })
                .max()
                .unwrap_or(0);

            let max = term
                .binders()
                .iter()
                .map(BoundVariable::index)
                .max()
                .unwrap_or(0)
                .max(argument_max);

            if let Some(smallest) =
                term.binders().iter().map(BoundVariable::index).min()
            {
                assert_eq!(smallest, argument_max + 1);

                let largest = term
                    .binders()
                    .iter()
                    .map(BoundVariable::index)
                    .max()
                    .unwrap();

                assert_eq!(
                    largest - smallest + 1,
                    term.binders().len() as u64
                );
            }

            assert_eq!(
                term.arguments().len(),
                term.head().tau().arity()
            );

            (free, max)
        }

        let (free, max) = walk(term);

        assert_eq!(term.max_index(), max);
        assert_eq!(term.free_variables().len(), free.len());

        for variable in term.free_variables() {
            assert!(free.contains(variable));
        }
    }

    ////////////////////////////////////////////////////////////////////////////
    // η-expansion tests.
    ////////////////////////////////////////////////////////////////////////////

    /// Tests that a base-typed constant realizes as a leaf.
    #[test]
    pub fn term_test0() {
        let a = Term::constant("a", Type::individual());

        assert!(a.binders().is_empty());
        assert!(a.arguments().is_empty());
        assert_eq!(a.tau(), &Type::individual());
        assert_canonical(&a);
    }

    /// Tests that a functional constant η-expands: `f : ι → ι` realizes as
    /// `λ#1. f #1`.
    #[test]
    pub fn term_test1() {
        let f = Term::constant("f", unary());

        assert_eq!(f.binders().len(), 1);
        assert_eq!(f.binders()[0].index(), 1);
        assert_eq!(f.arguments().len(), 1);
        assert_eq!(f.tau(), &unary());

        let argument = &f.arguments()[0];

        assert_eq!(
            argument.head(),
            &Declaration::bound_variable(1, Type::individual())
        );
        assert_canonical(&f);
    }

    /// Tests η-expansion through a higher-order argument position:
    /// `h : (ι → ι) → ι` realizes as `λ#2. h (λ#1. #2 #1)`.
    #[test]
    pub fn term_test2() {
        let h = Term::constant("h", Type::function("i", vec![unary()]));

        assert_eq!(h.binders().len(), 1);
        assert_eq!(h.binders()[0].index(), 2);

        let argument = &h.arguments()[0];

        assert_eq!(argument.binders().len(), 1);
        assert_eq!(argument.binders()[0].index(), 1);
        assert_eq!(
            argument.head(),
            &Declaration::bound_variable(2, unary())
        );
        assert!(h.free_variables().is_empty());
        assert_canonical(&h);
    }

    ////////////////////////////////////////////////////////////////////////////
    // Application tests.
    ////////////////////////////////////////////////////////////////////////////

    /// Tests that applying an η-expanded constant β-reduces to the applied
    /// spine: `(λ#1. f #1) a` reduces to `f a`.
    #[test]
    pub fn term_test3() {
        let f = Term::constant("f", unary());
        let a = Term::constant("a", Type::individual());

        let fa = Term::apply(&f, &a).unwrap();

        assert!(fa.binders().is_empty());
        assert_eq!(fa.head(), &Declaration::constant("f", unary()));
        assert_eq!(fa.arguments().len(), 1);
        assert_eq!(fa.arguments()[0], a);
        assert_canonical(&fa);
    }

    /// Tests that ill-typed applications are rejected.
    #[test]
    pub fn term_test4() {
        let f = Term::constant("f", unary());
        let p = Term::constant("p", Type::proposition());
        let a = Term::constant("a", Type::individual());

        assert_eq!(
            Term::apply(&f, &p).unwrap_err(),
            ErrorCode::DomainTypeMismatch
        );
        assert_eq!(
            Term::apply(&a, &a).unwrap_err(),
            ErrorCode::NotAFunctionType
        );
    }

    ////////////////////////////////////////////////////////////////////////////
    // Abstraction tests.
    ////////////////////////////////////////////////////////////////////////////

    /// Tests that abstraction binds every occurrence and removes the
    /// variable from the free set: `λx. f x`.
    #[test]
    pub fn term_test5() {
        let x = FreeVariable::new("x", Type::individual());
        let f = Term::constant("f", unary());

        let fx = Term::apply(
            &f,
            &Term::from_declaration(Declaration::Free(x.clone())),
        )
        .unwrap();

        assert!(fx.occurs_free(&x));

        let lambda = Term::abstract_variable(&fx, &x);

        assert_eq!(lambda.binders().len(), 1);
        assert_eq!(lambda.tau(), &unary());
        assert!(!lambda.occurs_free(&x));
        assert_canonical(&lambda);
    }

    /// Tests that vacuous abstraction produces a correctly-typed constant
    /// function.
    #[test]
    pub fn term_test6() {
        let x = FreeVariable::new("x", Type::individual());
        let a = Term::constant("a", Type::individual());

        let lambda = Term::abstract_variable(&a, &x);

        assert_eq!(lambda.tau(), &unary());
        assert_eq!(lambda.binders().len(), 1);
        assert_eq!(
            lambda.head(),
            &Declaration::constant("a", Type::individual())
        );
        assert_canonical(&lambda);
    }

    /// Tests that abstracting twice produces the canonical descending binder
    /// block: `λf x. f x` binds `#2 #1`.
    #[test]
    pub fn term_test7() {
        let f = FreeVariable::new("f", unary());
        let x = FreeVariable::new("x", Type::individual());

        let fx = Term::apply(
            &Term::from_declaration(Declaration::Free(f.clone())),
            &Term::from_declaration(Declaration::Free(x.clone())),
        )
        .unwrap();

        let inner = Term::abstract_variable(&fx, &x);
        let outer = Term::abstract_variable(&inner, &f);

        assert_eq!(outer.binders().len(), 2);
        assert_eq!(outer.binders()[0].index(), 2);
        assert_eq!(outer.binders()[1].index(), 1);
        assert_eq!(
            outer.head(),
            &Declaration::bound_variable(2, unary())
        );
        assert_canonical(&outer);
    }

    /// Tests the β-η round trip: abstracting a variable out of a term and
    /// applying the result back to that variable restores the term.
    #[test]
    pub fn term_test8() {
        let x = FreeVariable::new("x", Type::individual());
        let x_term = Term::from_declaration(Declaration::Free(x.clone()));

        let f = Term::constant("f", unary());
        let fx = Term::apply(&f, &x_term).unwrap();

        let round_trip = Term::apply(
            &Term::abstract_variable(&fx, &x),
            &x_term,
        )
        .unwrap();

        assert_eq!(round_trip, fx);
        assert_canonical(&round_trip);
    }

    /// Tests the β-η round trip through a functional variable.
    #[test]
    pub fn term_test9() {
        let g = FreeVariable::new("g", unary());
        let g_term = Term::from_declaration(Declaration::Free(g.clone()));

        let a = Term::constant("a", Type::individual());
        let ga = Term::apply(&g_term, &a).unwrap();

        let round_trip = Term::apply(
            &Term::abstract_variable(&ga, &g),
            &g_term,
        )
        .unwrap();

        assert_eq!(round_trip, ga);
        assert_canonical(&round_trip);
    }

    /// Tests that structurally identical terms built along different
    /// construction paths compare equal under the canonical numbering.
    #[test]
    pub fn term_test10() {
        let first = Term::constant("f", unary());
        let second = Term::constant("f", unary());

        assert_eq!(first, second);
    }

    /// Tests that the outer adjustment is the identity on canonical terms
    /// and restores contiguity after wrapping an argument in a foreign
    /// binder block.
    #[test]
    pub fn term_test11() {
        let h = Term::constant("h", Type::function("i", vec![unary()]));

        assert_eq!(h.adjust_outer_bound_vars(), h);

        // Wrapping the inner argument of `h` in a copy of the outer binder
        // block renumbers everything back onto the canonical range.
        let wrapped = Term::under_binders(h.binders(), &h.arguments()[0]);

        assert_eq!(wrapped.binders().len(), 2);
        assert_eq!(wrapped.max_index(), 2);
        assert_canonical(&wrapped);
        assert_eq!(wrapped.adjust_outer_bound_vars(), wrapped);
    }
}
