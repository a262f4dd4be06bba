//! # Variable names and fresh helper identities
//!
//! Refutary uses an explicit name-carrying syntax for the free variables of
//! its simply-typed λ-calculus, in a similar vein to HOL Light.  Some
//! operations, however — η-expansion of a functional head, and the generation
//! of imitation and projection bindings during unification — need variables
//! that are guaranteed distinct from anything the caller could have written
//! down.  These *helper* identities are opaque: they are never rendered back
//! to users, and the substitution module drops any substitution pair whose
//! domain is a helper before a solution becomes visible.
//!
//! Helper identities are issued from a process-wide counter, so two helpers
//! are equal exactly when they were issued by the same call.
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

use crate::kernel_panic::FRESH_NAME_GENERATION_FAILED;
use lazy_static::lazy_static;
use log::debug;
use std::{
    fmt,
    fmt::{Display, Formatter},
    sync::Mutex,
};

////////////////////////////////////////////////////////////////////////////////
// Miscellaneous material.
////////////////////////////////////////////////////////////////////////////////

/// The error message used when panicking if the lock on the helper counter
/// cannot be obtained.
const COUNTER_LOCK_ERROR: &str =
    "Failed to obtain lock on the helper-identity counter.";

lazy_static! {
    /// The process-wide counter backing fresh helper-identity generation.
    static ref HELPER_COUNTER: Mutex<u64> = Mutex::new(0);
}

////////////////////////////////////////////////////////////////////////////////
// Names, proper.
////////////////////////////////////////////////////////////////////////////////

/// Names of free variables.  A name is either *named*, carrying a string
/// supplied by the caller, or a *helper*, carrying an opaque identity issued
/// by the kernel.  Helpers never appear in user-visible substitutions.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Name {
    /// A caller-supplied name.
    Named(String),
    /// An opaque helper identity issued by `fresh_helper_name()`.
    Helper(u64),
}

impl Name {
    /// Returns `true` iff the name is an opaque helper identity.
    #[inline]
    pub fn is_helper(&self) -> bool {
        matches!(self, Name::Helper(_))
    }

    /// Returns `Some(name)` iff the name is caller-supplied.
    pub fn split_named(&self) -> Option<&String> {
        if let Name::Named(name) = self {
            Some(name)
        } else {
            None
        }
    }
}

/// Issues a fresh helper identity, distinct from every identity issued so far
/// in this process.
///
/// Will **panic** if the identity space is exhausted or if the lock on the
/// counter cannot be obtained.
pub fn fresh_helper_name() -> Name {
    let mut counter = HELPER_COUNTER.lock().expect(COUNTER_LOCK_ERROR);

    let issued = *counter;

    match counter.checked_add(1) {
        Some(next) => *counter = next,
        None => panic!("{}", FRESH_NAME_GENERATION_FAILED),
    }

    debug!("Fresh helper identity generated: {}.", issued);

    Name::Helper(issued)
}

////////////////////////////////////////////////////////////////////////////////
// Trait implementations.
////////////////////////////////////////////////////////////////////////////////

/// Injection from strings into caller-supplied names.
impl From<&str> for Name {
    #[inline]
    fn from(name: &str) -> Self {
        Name::Named(String::from(name))
    }
}

/// Injection from owned strings into caller-supplied names.
impl From<String> for Name {
    #[inline]
    fn from(name: String) -> Self {
        Name::Named(name)
    }
}

/// Pretty-printing for names.  Helpers render with a leading `?`, a form the
/// surface grammar cannot produce, so they can never collide with a
/// caller-supplied name.
impl Display for Name {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Name::Named(name) => write!(f, "{}", name),
            Name::Helper(identity) => write!(f, "?{}", identity),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////
// Tests.
////////////////////////////////////////////////////////////////////////////////
