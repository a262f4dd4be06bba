//! # The Refutary surface logic
//!
//! The surface half of Refutary: a Unicode formula parser, the lowering
//! onto a typed higher-order term model, a semantic-tableau prover that
//! classifies formulas as tautology, contradiction, or contingent, and the
//! textual renderings of trees and proofs.  The `analyze` module chains the
//! stages into the end-to-end pipeline the driver exposes.
//!
//! This crate shares exactly one piece of the `kernel` crate: its type
//! model, used for the annotations of the lowered terms.  The tableau
//! prover operates on the surface syntax tree directly and never touches
//! kernel terms.
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

pub mod analyze;
pub mod ast;
pub mod hol;
pub mod lexer;
pub mod parser;
pub mod tableau;
pub mod token;
pub mod visualize;
