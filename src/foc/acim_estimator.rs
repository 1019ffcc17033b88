// Rotor flux and phase estimator for sensorless AC induction motor control
//
// Derives rotor flux magnitude, slip velocity and the stator electrical phase
// from the measured d-q currents and the mechanical rotor phase/velocity.
// Runs once per control cycle; never blocks, allocates or loops.

use libm::fabsf;

use crate::config::{EstimatorConfig, CLAMP_WARN_INTERVAL};
use crate::foc::transforms::wrap_pm_pi;
use crate::port::{Component, InputPort, OutputPort};
use crate::tick::{TickClock, TickSource};

/// d-q axis current sample in the rotating reference frame
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DqCurrent {
    /// d-axis current (flux producing)
    pub d: f32,
    /// q-axis current (torque producing)
    pub q: f32,
}

impl DqCurrent {
    pub const fn new(d: f32, q: f32) -> Self {
        Self { d, q }
    }
}

/// Activation state of the estimator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EstimatorMode {
    /// Internal state is not valid (missing inputs or never started)
    Inactive,
    /// Internal state has been initialized and is being integrated
    Active,
}

/// Output ports the estimator publishes to
///
/// The ports are owned outside the estimator so downstream blocks can stay
/// connected to them while the estimator is being updated.
#[derive(Clone, Copy)]
pub struct AcimOutputs<'a> {
    /// Stator electrical phase [rad], (-π, π]
    pub stator_phase: &'a OutputPort<f32>,
    /// Stator electrical angular velocity [rad/s]
    pub stator_phase_vel: &'a OutputPort<f32>,
    /// Slip velocity [rad/s] after the stability guard
    pub slip_vel: &'a OutputPort<f32>,
}

/// Rotor flux observer for AC induction motors
///
/// # Lifecycle
/// * Starts `Inactive`.
/// * The first update with all three inputs present resets `rotor_flux` and
///   `phase_offset` to zero, records the tick and switches to `Active`
///   without writing any output (bootstrap tick).
/// * Any update with a missing input switches back to `Inactive` and leaves
///   the outputs untouched. The next activation is always a fresh start.
pub struct AcimEstimator<'a> {
    /// Mechanical rotor phase [rad], (-π, π]
    pub rotor_phase_src: InputPort<'a, f32>,
    /// Mechanical rotor angular velocity [rad/s]
    pub rotor_phase_vel_src: InputPort<'a, f32>,
    /// Measured d-q currents
    pub idq_src: InputPort<'a, DqCurrent>,

    outputs: AcimOutputs<'a>,
    config: EstimatorConfig,
    clock: TickClock,

    mode: EstimatorMode,
    /// Tick of the last update with complete inputs
    last_tick: u32,
    /// Rotor flux estimate, in current-equivalent units [A]
    rotor_flux: f32,
    /// Accumulated slip phase relative to the mechanical phase [rad]
    phase_offset: f32,
    /// Number of cycles the slip guard fired (saturating)
    clamp_count: u32,
    /// Consecutive guarded cycles, for log throttling
    clamp_streak: u32,
}

impl<'a> AcimEstimator<'a> {
    /// Create a new estimator with disconnected inputs
    ///
    /// # Arguments
    /// * `config` - Validated estimator configuration
    /// * `clock` - Converter for the timestamps passed to `update`
    /// * `outputs` - Ports receiving the estimates
    pub fn new(config: EstimatorConfig, clock: TickClock, outputs: AcimOutputs<'a>) -> Self {
        Self {
            rotor_phase_src: InputPort::new(),
            rotor_phase_vel_src: InputPort::new(),
            idq_src: InputPort::new(),
            outputs,
            config,
            clock,
            mode: EstimatorMode::Inactive,
            last_tick: 0,
            rotor_flux: 0.0,
            phase_offset: 0.0,
            clamp_count: 0,
            clamp_streak: 0,
        }
    }

    /// Advance the estimator by one control cycle
    ///
    /// # Arguments
    /// * `timestamp` - Free-running tick count (wrapping) of this cycle
    pub fn update(&mut self, timestamp: u32) {
        let (Some(rotor_phase), Some(rotor_phase_vel), Some(idq)) = (
            self.rotor_phase_src.present(),
            self.rotor_phase_vel_src.present(),
            self.idq_src.present(),
        ) else {
            if self.mode == EstimatorMode::Active {
                debug!("ACIM estimator: input missing, deactivating");
            }
            self.mode = EstimatorMode::Inactive;
            return;
        };

        let dt = self.clock.elapsed_secs(self.last_tick, timestamp);
        self.last_tick = timestamp;

        if self.mode == EstimatorMode::Inactive {
            // dt is meaningless here, so nothing is integrated
            self.rotor_flux = 0.0;
            self.phase_offset = 0.0;
            self.mode = EstimatorMode::Active;
            debug!("ACIM estimator: activated at tick {}", timestamp);
            return;
        }

        let slip_gain = self.config.slip_gain();

        // First-order lag: dψ/dt = slip_gain * (id - ψ)
        // Current response delay (~1.5 PWM cycles) is negligible against the
        // rotor time constant (0.1-1s)
        self.rotor_flux += slip_gain * (idq.d - self.rotor_flux) * dt;

        let slip_velocity = self.limit_slip(slip_gain * (idq.q / self.rotor_flux), dt);
        self.outputs.slip_vel.write(slip_velocity);

        self.outputs
            .stator_phase_vel
            .write(rotor_phase_vel + slip_velocity);

        self.phase_offset = wrap_pm_pi(self.phase_offset + slip_velocity * dt);
        self.outputs
            .stator_phase
            .write(wrap_pm_pi(rotor_phase + self.phase_offset));
    }

    /// Sample `source` and advance by one cycle
    pub fn update_from<S: TickSource>(&mut self, source: &mut S) {
        let timestamp = source.now();
        self.update(timestamp);
    }

    /// Suppress non-finite or implausibly large slip velocities for one cycle
    ///
    /// The ceiling is `max_slip_step / dt`, i.e. the slip phase may advance by
    /// at most `max_slip_step` radians per step.
    fn limit_slip(&mut self, slip_velocity: f32, dt: f32) -> f32 {
        let limit = self.config.max_slip_step() / dt;
        if slip_velocity.is_finite() && fabsf(slip_velocity) <= limit {
            self.clamp_streak = 0;
            return slip_velocity;
        }

        self.clamp_count = self.clamp_count.saturating_add(1);
        self.clamp_streak += 1;
        if self.clamp_streak >= CLAMP_WARN_INTERVAL {
            self.clamp_streak = 0;
            warn!(
                "ACIM estimator: slip velocity suppressed for {} cycles (flux={}, total={})",
                CLAMP_WARN_INTERVAL,
                self.rotor_flux,
                self.clamp_count
            );
        }
        0.0
    }

    #[inline]
    pub fn mode(&self) -> EstimatorMode {
        self.mode
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.mode == EstimatorMode::Active
    }

    /// Rotor flux estimate [A]
    #[inline]
    pub fn rotor_flux(&self) -> f32 {
        self.rotor_flux
    }

    /// Accumulated slip phase [rad], (-π, π]
    #[inline]
    pub fn phase_offset(&self) -> f32 {
        self.phase_offset
    }

    #[inline]
    pub fn last_tick(&self) -> u32 {
        self.last_tick
    }

    pub fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    /// Cycles in which the slip velocity was forced to zero
    pub fn clamp_count(&self) -> u32 {
        self.clamp_count
    }
}

impl Component for AcimEstimator<'_> {
    fn update(&mut self, timestamp: u32) {
        AcimEstimator::update(self, timestamp);
    }
}
