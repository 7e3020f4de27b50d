//! Show compilation: sampling, delta encoding and artifact emission.

pub(crate) mod artifact;
pub(crate) mod show;
