//! Fuzz target: controller under arbitrary operator input
//!
//! Each input byte selects one operation (tick, fault, manual mode, manual
//! relay) and verifies after every step:
//! - No panics
//! - Readings stay within `0 <= level`, `0 <= gas <= 1023`
//! - The event log never exceeds `LOG_CAPACITY` entries
//! - Manual mode never sounds the buzzer or reports an alert
//!
//! cargo fuzz run fuzz_controller_ops

#![no_main]

use libfuzzer_sys::fuzz_target;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use sewage_monitor::app::commands::Command;
use sewage_monitor::app::ports::TimePort;
use sewage_monitor::app::service::Controller;
use sewage_monitor::config::{GAS_ADC_MAX, LOG_CAPACITY, SystemConfig};
use sewage_monitor::fault::FaultMode;

struct ZeroClock;

impl TimePort for ZeroClock {
    fn uptime_ms(&self) -> u64 {
        0
    }
}

fuzz_target!(|data: &[u8]| {
    let Some((&seed, ops)) = data.split_first() else {
        return;
    };

    let Ok(mut c) = Controller::new(
        SystemConfig::default(),
        SmallRng::seed_from_u64(u64::from(seed)),
        ZeroClock,
    ) else {
        return;
    };

    for &op in ops {
        match op % 8 {
            0..=3 => c.tick(),
            4 => c.handle_command(Command::SetFault(match op / 8 % 3 {
                0 => FaultMode::None,
                1 => FaultMode::Overflow,
                _ => FaultMode::GasLeak,
            })),
            5 => c.handle_command(Command::SetManualMode(op & 0x80 != 0)),
            _ => c.handle_command(Command::SetManualRelay(op & 0x80 != 0)),
        }

        let s = c.snapshot();
        assert!(s.level_cm >= 0.0);
        assert!((0..=GAS_ADC_MAX).contains(&s.gas));
        assert!(s.log.len() <= LOG_CAPACITY);
        if s.manual_mode {
            assert!(!s.buzzer_on && !s.alert_active);
        }
    }
});
