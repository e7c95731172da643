//! Instantiations of the twisted Edwards model for concrete curves.

pub mod ed25519;
