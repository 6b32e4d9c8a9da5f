//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by concern (`session`, `toast`, `welcome`) so components can
//! depend on small focused models. Everything here is plain data plus pure
//! transitions; browser effects live in `components` and `util`.

pub mod session;
pub mod toast;
pub mod welcome;
