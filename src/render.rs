pub(crate) mod cpu;
pub(crate) mod plan;
pub(crate) mod renderer;
pub(crate) mod session;
pub(crate) mod surface;
