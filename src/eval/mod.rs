pub(crate) mod active;
pub(crate) mod compositor;
