//! Forward-mode derivative types for CortenForge geometry.
//!
//! This crate provides the two building blocks for computing exact first
//! derivatives of small geometric kernels:
//!
//! - [`GradScalar`] - A value carrying `N` partial derivatives, with
//!   arithmetic, `sqrt` and `sincos` that apply the chain rule
//! - [`GradVector`] - `M` such scalars sharing one derivative space, with
//!   seeding from raw arrays and extraction of values and Jacobian blocks
//!
//! The derivative width `N` is a const generic, so a kernel written once
//! generically over `N` can be instantiated with `N = 0` for plain values
//! and with wider spaces when Jacobians are wanted. Everything lives on the
//! stack; no operation allocates.
//!
//! This is deliberately not a general AD library: there is no tape, no
//! reverse mode and no runtime-sized gradient.
//!
//! # Layer 0 Crate
//!
//! This is a Layer 0 crate with **zero Bevy dependencies**.
//!
//! # Example
//!
//! ```
//! use grad_types::GradVector;
//!
//! // d|p|^2/dp = 2p
//! let p = GradVector::<3, 3>::seeded(&[1.0, -2.0, 0.5], 0);
//! let n2 = p.dot(&p);
//!
//! let mut value = [0.0];
//! let mut jac = [[0.0; 3]; 1];
//! GradVector::<3, 1>::from([n2]).extract_value(&mut value);
//! GradVector::<3, 1>::from([n2]).extract_grad(0, &mut jac);
//!
//! assert!((value[0] - 5.25).abs() < 1e-12);
//! assert_eq!(jac[0], [2.0, -4.0, 1.0]);
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod scalar;
mod vector;

pub use scalar::GradScalar;
pub use vector::GradVector;
