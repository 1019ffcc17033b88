// Property tests: angle wrapping, tick wraparound, slip guard and the
// activation state machine.

use core::f32::consts::{PI, TAU};

use acim_estimator::foc::wrap_pm_pi;
use acim_estimator::{
    AcimEstimator, AcimOutputs, DqCurrent, EstimatorConfig, EstimatorMode, OutputPort, TickClock,
};
use proptest::prelude::*;

const TICK_HZ: u32 = 1_000_000;
const STEP: u32 = 100;

struct Bench {
    rotor_phase: OutputPort<f32>,
    rotor_phase_vel: OutputPort<f32>,
    idq: OutputPort<DqCurrent>,
    stator_phase: OutputPort<f32>,
    stator_phase_vel: OutputPort<f32>,
    slip_vel: OutputPort<f32>,
}

impl Bench {
    fn new() -> Self {
        Self {
            rotor_phase: OutputPort::new(),
            rotor_phase_vel: OutputPort::new(),
            idq: OutputPort::new(),
            stator_phase: OutputPort::new(),
            stator_phase_vel: OutputPort::new(),
            slip_vel: OutputPort::new(),
        }
    }

    fn estimator(&self, slip_gain: f32) -> AcimEstimator<'_> {
        let mut estimator = AcimEstimator::new(
            EstimatorConfig::new(slip_gain).unwrap(),
            TickClock::new(TICK_HZ).unwrap(),
            AcimOutputs {
                stator_phase: &self.stator_phase,
                stator_phase_vel: &self.stator_phase_vel,
                slip_vel: &self.slip_vel,
            },
        );
        estimator.rotor_phase_src.connect_to(&self.rotor_phase);
        estimator.rotor_phase_vel_src.connect_to(&self.rotor_phase_vel);
        estimator.idq_src.connect_to(&self.idq);
        estimator
    }

    fn outputs(&self) -> (Option<f32>, Option<f32>, Option<f32>) {
        (
            self.stator_phase.present(),
            self.stator_phase_vel.present(),
            self.slip_vel.present(),
        )
    }
}

fn q_current() -> impl Strategy<Value = f32> {
    prop_oneof![Just(0.0f32), 0.01f32..100.0, -100.0f32..-0.01]
}

proptest! {
    #[test]
    fn wrap_is_in_range_and_idempotent(x in -1.0e6f32..1.0e6) {
        let wrapped = wrap_pm_pi(x);
        prop_assert!(wrapped > -PI && wrapped <= PI, "wrap({}) = {}", x, wrapped);
        prop_assert_eq!(wrap_pm_pi(wrapped), wrapped);
    }

    #[test]
    fn wrap_preserves_angle(x in -100.0f32..100.0) {
        let wrapped = wrap_pm_pi(x);
        let turns = ((x - wrapped) / TAU).round();
        prop_assert!((x - wrapped - turns * TAU).abs() < 1e-4);
    }

    #[test]
    fn elapsed_ticks_survive_rollover(start in any::<u32>(), delta in any::<u32>()) {
        let end = start.wrapping_add(delta);
        prop_assert_eq!(TickClock::elapsed_ticks(start, end), delta);

        let clock = TickClock::new(TICK_HZ).unwrap();
        let dt = clock.elapsed_secs(start, end);
        prop_assert!(dt >= 0.0);
        let expected = delta as f64 / TICK_HZ as f64;
        prop_assert!(((dt as f64) - expected).abs() <= expected * 1e-6);
    }

    #[test]
    fn tiny_flux_always_clamps_slip(
        slip_gain in 1.0f32..500.0,
        id in -1.0e-3f32..1.0e-3,
        iq in q_current(),
        phase in -3.0f32..3.0,
        vel in -500.0f32..500.0,
        start in any::<u32>(),
    ) {
        let bench = Bench::new();
        let mut estimator = bench.estimator(slip_gain);
        bench.rotor_phase.write(phase);
        bench.rotor_phase_vel.write(vel);
        bench.idq.write(DqCurrent::new(id, iq));

        estimator.update(start);
        estimator.update(start.wrapping_add(STEP));

        prop_assert!(estimator.rotor_flux().abs() < 1.0e-4);
        prop_assert_eq!(bench.slip_vel.present(), Some(0.0));
        prop_assert_eq!(bench.stator_phase_vel.present(), Some(vel));
        prop_assert_eq!(estimator.phase_offset(), 0.0);
    }

    #[test]
    fn activation_follows_input_presence(
        pattern in proptest::collection::vec(
            (any::<bool>(), any::<bool>(), any::<bool>()),
            1..64,
        ),
    ) {
        let bench = Bench::new();
        let mut estimator = bench.estimator(50.0);
        let mut tick = 0u32;

        for (has_phase, has_vel, has_idq) in pattern {
            if has_phase { bench.rotor_phase.write(0.25) } else { bench.rotor_phase.reset() }
            if has_vel { bench.rotor_phase_vel.write(30.0) } else { bench.rotor_phase_vel.reset() }
            if has_idq {
                bench.idq.write(DqCurrent::new(1.0, 0.05))
            } else {
                bench.idq.reset()
            }

            let was_active = estimator.is_active();
            let before = bench.outputs();
            estimator.update(tick);
            tick = tick.wrapping_add(STEP);

            if !(has_phase && has_vel && has_idq) {
                prop_assert_eq!(estimator.mode(), EstimatorMode::Inactive);
                prop_assert_eq!(bench.outputs(), before);
            } else if !was_active {
                prop_assert_eq!(estimator.mode(), EstimatorMode::Active);
                prop_assert_eq!(estimator.rotor_flux(), 0.0);
                prop_assert_eq!(estimator.phase_offset(), 0.0);
                prop_assert_eq!(bench.outputs(), before);
            } else {
                prop_assert!(estimator.is_active());
                prop_assert!(estimator.rotor_flux() > 0.0);
                let (phase, vel, slip) = bench.outputs();
                prop_assert!(phase.is_some() && vel.is_some() && slip.is_some());
            }
        }
    }
}
