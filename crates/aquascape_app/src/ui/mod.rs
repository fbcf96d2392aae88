//! Presentation components: they render store state and dispatch mutations,
//! holding only transient buffers of their own.

pub mod form;
pub mod list;
