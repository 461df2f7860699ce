//! Dual numbers for forward-mode automatic differentiation.
//!
//! A [`Dual<T>`] carries a value together with its derivative (the
//! `epsilon` part). Arithmetic and the elementary functions propagate the
//! derivative by the chain rule, so evaluating an expression on
//! [`Dual::variable(x)`](Dual::variable) yields `f(x)` and `f'(x)` in one
//! pass:
//!
//! ```
//! use tessera_dual::Dual;
//!
//! // f(x) = x^2 * sin(x), f'(x) = 2x sin(x) + x^2 cos(x)
//! let x = Dual::variable(1.5_f64);
//! let f = x * x * x.sin();
//! let expected = 2.0 * 1.5 * 1.5_f64.sin() + 1.5 * 1.5 * 1.5_f64.cos();
//! assert!((f.epsilon() - expected).abs() < 1e-12);
//! ```
//!
//! # Modules
//!
//! - [`real`]: the [`Real`] scalar abstraction over `f32` and `f64`.
//! - [`dual`]: the [`Dual`] type and its operators.
//! - [`functions`]: elementary functions on duals.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod dual;
pub mod functions;
pub mod real;

pub use dual::Dual;
pub use real::Real;
