pub(crate) mod callback;
pub(crate) mod period;
pub(crate) mod ramp;
