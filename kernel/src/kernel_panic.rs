//! # Kernel panic messages
//!
//! The Refutary kernel has two failure modes.  Recoverable failures — a
//! mistyped application, for example — produce a defined error code which is
//! passed back to the caller, diagnosing the issue.
//!
//! Unfortunately, however, there may be situations where some internal
//! invariant within the kernel fails: for example if a term stops being
//! η-long, or if the canonical numbering of bound variables is exhausted.  In
//! these cases, we have hit an internal kernel error, which is unrecoverable,
//! and must abort at runtime with a *kernel panic*.
//!
//! The messages in this module contain user-facing error messages that are
//! raised by the kernel when a kernel panic is encountered.
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

////////////////////////////////////////////////////////////////////////////////
// Kernel panic messages.
////////////////////////////////////////////////////////////////////////////////

/// Error message produced during a kernel panic due to the kernel running out
/// of bound-variable indices during canonical renumbering.
pub const BOUND_INDEX_EXHAUST_ERROR: &str =
    "Kernel invariant failed: bound-variable indices have been exhausted.";

/// Error message produced when the kernel failed to generate a fresh helper
/// identity, for e.g. η-expansion or binding generation.
pub const FRESH_NAME_GENERATION_FAILED: &str =
    "Kernel invariant failed: exhausted fresh helper-identity generation.";

/// Error message produced during a kernel panic due to the kernel encountering
/// a term whose head is not fully applied, violating the η-long
/// representation.
pub const MALFORMED_TERM_ERROR: &str =
    "Kernel invariant failed: term head is not fully applied.";

/// Error message produced during a kernel panic due to a bound variable being
/// captured during substitution.
pub const CAPTURE_ERROR: &str =
    "Kernel invariant failed: variable captured during substitution.";

/// Error message produced during a kernel panic due to a bound-variable
/// occurrence that no enclosing binder accounts for.
pub const DANGLING_BOUND_VARIABLE_ERROR: &str =
    "Kernel invariant failed: dangling bound variable.";

/// Error message produced during a kernel panic due to a substitution whose
/// replacement failed to re-apply through the term builder.  Substitution
/// pairs are type-checked on construction, so this is unreachable unless an
/// upstream invariant has already failed.
pub const SUBSTITUTION_FAILED_ERROR: &str =
    "Kernel invariant failed: well-typed substitution failed to apply.";
