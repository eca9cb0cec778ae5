// demos/spool_up.rs

//! Simulates a helicopter spool-up, governed hover and shutdown on the host.
//!
//! The rotor is modeled as a first-order lag from ESC command to RPM, which
//! is enough to watch the ramp, runup estimate and governor interact.

use rotor_speed_control::{
    ControlMode, ExternalRpm, MockServo, MockTime, PidGovernor, PidGovernorConfig,
    RotorControlState, RotorSpeedController, RscConfig, TimeSource,
};

const TICK_US: u64 = 10_000;
const HEADSPEED_RPM: f32 = 1500.0;
const MAX_RPM: f32 = 2000.0;
const ROTOR_TIME_CONSTANT_S: f32 = 1.5;

fn main() {
    let time = MockTime::new();

    let mut config = RscConfig::new();
    config.control_mode = ControlMode::Governor;
    config.ramp_time_s = 3.0;
    config.runup_time_s = 6.0;
    config.idle_output = 0.1;
    config.power.slew_rate_pct_per_s = 40;

    let pid = PidGovernor::with_config(PidGovernorConfig {
        kp: 0.15,
        ki: 0.3,
        kd: 0.0,
        imax: 1.0,
        filt_hz: 10.0,
    });
    let mut rsc = RotorSpeedController::with_pid(&time, MockServo::new(), config, Some(pid));
    if let Err(error) = rsc.init_servo() {
        println!("servo init failed: {}", error);
        return;
    }

    let mut sensor = ExternalRpm::new();
    let mut rotor_rpm = 0.0f32;
    let dt = TICK_US as f32 / 1.0e6;

    let phases = [
        (RotorControlState::Idle, 200),
        (RotorControlState::Active, 1200),
        (RotorControlState::Stop, 600),
    ];

    let mut step = 0u32;
    for (state, ticks) in phases {
        for _ in 0..ticks {
            time.advance(TICK_US);
            sensor.set_rpm(time.now_us(), rotor_rpm);

            let feedback = sensor.healthy_rpm(time.now_us(), 100_000).unwrap_or(0.0);
            rsc.set_gov_enable(true, HEADSPEED_RPM, 20.0, feedback);
            let pwm = rsc.output(state);

            let command_rpm = rsc.control_output() * MAX_RPM;
            rotor_rpm += (command_rpm - rotor_rpm) * dt / ROTOR_TIME_CONSTANT_S;

            if step % 50 == 0 {
                println!(
                    "t={:5.2}s {:?} ramp={:.2} runup={:.2} out={:.3} pwm={:?} rpm={:6.0} complete={}",
                    step as f32 * dt,
                    state,
                    rsc.rotor_ramp_output(),
                    rsc.rotor_runup_output(),
                    rsc.control_output(),
                    pwm,
                    rotor_rpm,
                    rsc.is_runup_complete(),
                );
            }
            step += 1;
        }
    }
}
