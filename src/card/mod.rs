pub(crate) mod escape;
pub(crate) mod model;
pub(crate) mod payload;
pub(crate) mod share;
