pub(crate) mod audio;
pub(crate) mod decor;
pub(crate) mod director;
pub(crate) mod session;
