/// Mathematical constant pi
pub const PI: f64 = std::f64::consts::PI;

/// Relative tolerance at which the `cel` iteration is considered converged.
pub const CEL_ERRTOL: f64 = 1e-8;

/// Relative tolerance used to decide a point lies on a cylinder rim.
pub const RIM_RTOL: f64 = 1e-15;

/// Below this normalised radius the diametric field uses a Taylor expansion.
pub const DIAMETRIC_TAYLOR_RADIUS: f64 = 5e-2;
