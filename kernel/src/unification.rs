//! # Higher-order pre-unification
//!
//! A depth-bounded implementation of Huet's pre-unification procedure over
//! the kernel's βη-long terms.  The engine consumes a first-in-first-out
//! queue of equations and repeatedly dispatches on the head kinds of the
//! first equation:
//!
//! - structurally equal sides are dropped;
//! - mismatched types prune the branch;
//! - equal rigid heads *decompose* into equations between corresponding
//!   arguments, each re-wrapped in its parent's binder block;
//! - a pair of flex heads is parked on the *flex–flex residual*: such pairs
//!   have unmanageably many unifiers and are left unresolved by design;
//! - a bare free variable against a side it does not occur in *binds*,
//!   extending the accumulated idempotent substitution;
//! - a flex head against a rigid head *branches* over the imitation and
//!   projection bindings, consuming one unit of the depth budget per
//!   branch point.
//!
//! Exhausting the depth budget abandons the branch and is tallied in the
//! outcome; it is not an error.  An outcome with no solutions but a nonzero
//! tally means "there may be more solutions at greater depth", and an
//! outcome with zero solutions and a zero tally is a refutation.
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
    binding::{bindings_for, BindingKind},
    declaration::Declaration,
    substitution::{add_substitution, apply, Substitution},
    term::Term,
};
use log::debug;
use std::collections::VecDeque;

////////////////////////////////////////////////////////////////////////////////
// Miscellaneous material.
////////////////////////////////////////////////////////////////////////////////

/// The default depth budget for branch points.
pub const DEFAULT_MAX_DEPTH: usize = 10;

////////////////////////////////////////////////////////////////////////////////
// Solutions and outcomes.
////////////////////////////////////////////////////////////////////////////////

/// One unifier found by the search: an idempotent substitution plus the
/// unresolved flex–flex residual.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Solution {
    /// The accumulated substitution, free of helper-domain pairs.
    substitutions: Vec<Substitution>,
    /// The flex–flex pairs left unresolved.
    flex_pairs: Vec<(Term, Term)>,
}

impl Solution {
    /// Returns the substitution list of the solution.
    #[inline]
    pub fn substitutions(&self) -> &[Substitution] {
        &self.substitutions
    }

    /// Returns the flex–flex residual of the solution.
    #[inline]
    pub fn flex_pairs(&self) -> &[(Term, Term)] {
        &self.flex_pairs
    }

    /// Returns `true` iff the solution carries no flex–flex residual.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.flex_pairs.is_empty()
    }

    /// Returns `true` iff the two solutions have the same substitutions and
    /// the same flex residual up to unordered pair membership: `{a, b}`
    /// matches `{b, a}`, and the pairs themselves may be listed in any
    /// order.
    pub fn equivalent(&self, other: &Solution) -> bool {
        if self.substitutions != other.substitutions {
            return false;
        }

        if self.flex_pairs.len() != other.flex_pairs.len() {
            return false;
        }

        self.flex_pairs.iter().all(|(a, b)| {
            other.flex_pairs.iter().any(|(c, d)| {
                (a == c && b == d) || (a == d && b == c)
            })
        })
    }
}

/// The outcome of a unification run.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UnificationOutcome {
    /// The solutions found, in discovery order.
    solutions: Vec<Solution>,
    /// How many branches were abandoned because the depth budget ran out.
    depth_exhausted: usize,
}

impl UnificationOutcome {
    /// Returns the solutions found.
    #[inline]
    pub fn solutions(&self) -> &[Solution] {
        &self.solutions
    }

    /// Returns the number of branches abandoned on depth exhaustion.
    #[inline]
    pub fn depth_exhausted(&self) -> usize {
        self.depth_exhausted
    }

    /// Returns `true` iff the run found no solutions and never ran out of
    /// depth, i.e. the equations are refuted at every depth.
    #[inline]
    pub fn is_refuted(&self) -> bool {
        self.solutions.is_empty() && self.depth_exhausted == 0
    }
}

////////////////////////////////////////////////////////////////////////////////
// Search state.
////////////////////////////////////////////////////////////////////////////////

/// The state threaded through the search: the remaining equations, the
/// accumulated substitution, the flex–flex residual, and the remaining depth
/// budget.  Branch points clone the whole state; everything else mutates the
/// current branch's copy in place.
#[derive(Clone, Debug)]
struct SearchState {
    equations: VecDeque<(Term, Term)>,
    substitutions: Vec<Substitution>,
    flex_pairs: Vec<(Term, Term)>,
    depth: usize,
}

impl SearchState {
    /// Threads a binding through the whole state: the substitution list is
    /// extended idempotently, every pending equation is rewritten, and every
    /// flex pair is rewritten — a flex pair that stops being flex–flex under
    /// the binding is moved back into the equation queue.
    fn apply_binding(&mut self, binding: &Substitution) {
        self.substitutions = add_substitution(&self.substitutions, binding);

        let equations = self
            .equations
            .drain(..)
            .map(|(left, right)| {
                (apply(binding, &left), apply(binding, &right))
            })
            .collect();

        self.equations = equations;

        let mut residual = Vec::new();

        for (left, right) in self.flex_pairs.drain(..) {
            let left = apply(binding, &left);
            let right = apply(binding, &right);

            if left.head().is_free_variable()
                && right.head().is_free_variable()
            {
                residual.push((left, right));
            } else {
                debug!("Flex pair reactivated by binding.");
                self.equations.push_back((left, right));
            }
        }

        self.flex_pairs = residual;
    }
}

////////////////////////////////////////////////////////////////////////////////
// The engine.
////////////////////////////////////////////////////////////////////////////////

/// Searches for unifiers of a list of equations.  `find_all` controls
/// whether the search stops at the first solution; `max_depth` bounds the
/// number of imitation/projection branch points along any one search path.
pub fn unify(
    equations: Vec<(Term, Term)>,
    find_all: bool,
    max_depth: usize,
) -> UnificationOutcome {
    let mut outcome = UnificationOutcome {
        solutions: Vec::new(),
        depth_exhausted: 0,
    };

    let state = SearchState {
        equations: equations.into_iter().collect(),
        substitutions: Vec::new(),
        flex_pairs: Vec::new(),
        depth: max_depth,
    };

    solve(state, find_all, "root", &mut outcome);

    outcome
}

/// Searches for unifiers of a single equation.
#[inline]
pub fn unify_pair(
    left: Term,
    right: Term,
    find_all: bool,
    max_depth: usize,
) -> UnificationOutcome {
    unify(vec![(left, right)], find_all, max_depth)
}

/// Searches for all unifiers of a list of equations at the default depth.
#[inline]
pub fn unify_with_defaults(
    equations: Vec<(Term, Term)>,
) -> UnificationOutcome {
    unify(equations, true, DEFAULT_MAX_DEPTH)
}

/// The recursive core of the search.  Non-branching rules loop in place;
/// only the imitation/projection rules recurse, so the call depth is bounded
/// by the depth budget.
fn solve(
    mut state: SearchState,
    find_all: bool,
    branch: &str,
    outcome: &mut UnificationOutcome,
) {
    loop {
        let (left, right) = match state.equations.pop_front() {
            Some(pair) => pair,
            None => {
                debug!("[{}] equations exhausted; solution found.", branch);

                outcome.solutions.push(Solution {
                    substitutions: state.substitutions,
                    flex_pairs: state.flex_pairs,
                });

                return;
            }
        };

        // Trivial: structurally equal sides carry no information.
        if left == right {
            debug!("[{}] trivial equation dropped.", branch);
            continue;
        }

        // Mismatched types can never unify.
        if left.tau() != right.tau() {
            debug!("[{}] type clash; branch pruned.", branch);
            return;
        }

        let left_head = left.head().clone();
        let right_head = right.head().clone();

        match (&left_head, &right_head) {
            // Rigid–rigid on constants: decompose or clash.
            (Declaration::Constant(l), Declaration::Constant(r)) => {
                if l == r {
                    debug!("[{}] decomposing under constant {}.", branch, l.name());
                    decompose(&left, &right, &mut state.equations);
                    continue;
                }

                debug!("[{}] constant clash; branch pruned.", branch);
                return;
            }
            // Rigid–rigid on bound variables: the heads are the same binder
            // exactly when their depth offsets agree.
            (Declaration::Bound(l), Declaration::Bound(r)) => {
                if left.max_index() - l.index()
                    == right.max_index() - r.index()
                {
                    debug!("[{}] decomposing under bound head.", branch);
                    decompose(&left, &right, &mut state.equations);
                    continue;
                }

                debug!("[{}] bound-variable clash; branch pruned.", branch);
                return;
            }
            // Flex–flex: park the pair on the residual.
            (Declaration::Free(_), Declaration::Free(_)) => {
                debug!("[{}] flex-flex pair parked.", branch);
                state.flex_pairs.push((left, right));
                continue;
            }
            _ => (),
        }

        // Bind: a bare free variable against a rigid-headed side it does
        // not occur in.
        if left.is_bare_free_variable() || right.is_bare_free_variable() {
            let (variable_side, other) = if left.is_bare_free_variable() {
                (&left, &right)
            } else {
                (&right, &left)
            };

            let variable = variable_side
                .head()
                .split_free_variable()
                .expect("A bare free variable has a free-variable head.")
                .clone();

            if other.occurs_free(&variable) {
                debug!("[{}] occurs-check failure; branch pruned.", branch);
                return;
            }

            debug!("[{}] binding {}.", branch, variable.name());

            let binding = Substitution::new(variable, other.clone())
                .expect("Equation sides were checked to share a type.");

            state.apply_binding(&binding);

            continue;
        }

        // Flex–rigid and flex–bound: branch over schematic bindings.
        let (flex, rigid) = if left.head().is_free_variable() {
            (left, right)
        } else if right.head().is_free_variable() {
            (right, left)
        } else {
            // Remaining rigid-rigid combinations are head clashes.
            debug!("[{}] rigid head-kind clash; branch pruned.", branch);
            return;
        };

        let kinds: &[BindingKind] = if rigid.head().is_constant() {
            &[BindingKind::Imitation, BindingKind::Projection]
        } else {
            &[BindingKind::Projection]
        };

        if state.depth == 0 {
            debug!("[{}] depth budget exhausted.", branch);
            outcome.depth_exhausted += 1;
            return;
        }

        let x = flex
            .head()
            .split_free_variable()
            .expect("The flex side has a free-variable head.")
            .clone();

        for kind in kinds {
            let label = match kind {
                BindingKind::Imitation => "imitation",
                BindingKind::Projection => "projection",
            };

            for candidate in bindings_for(&x, rigid.head(), &[*kind]) {
                let mut next = state.clone();

                next.depth -= 1;
                next.equations.push_front((flex.clone(), rigid.clone()));
                next.apply_binding(&candidate);

                solve(next, find_all, label, outcome);

                if !find_all && !outcome.solutions.is_empty() {
                    return;
                }
            }
        }

        return;
    }
}

/// Decomposes an equation between two spines with equal rigid heads into one
/// equation per argument pair, each argument re-wrapped in its parent's
/// binder block.  The new equations join the back of the queue.
fn decompose(
    left: &Term,
    right: &Term,
    equations: &mut VecDeque<(Term, Term)>,
) {
    for (left_argument, right_argument) in
        left.arguments().iter().zip(right.arguments())
    {
        equations.push_back((
            Term::under_binders(left.binders(), left_argument),
            Term::under_binders(right.binders(), right_argument),
        ));
    }
}

////////////////////////////////////////////////////////////////////////////////
// Tests.
////////////////////////////////////////////////////////////////////////////////
