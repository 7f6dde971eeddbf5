pub(crate) mod mapping;
pub(crate) mod resample;
pub(crate) mod spline;
