//! Inbound commands to the controller.
//!
//! These represent actions requested by the outside world (an operator
//! console, a dashboard, a test) that the
//! [`Controller`](super::service::Controller) applies immediately.
//!
//! Commands also have a short text form, used by the host binary's console:
//!
//! ```text
//! fault none | overflow | gas    -> SetFault(..)
//! manual on | off                -> SetManualMode(..)
//! relay on | off                 -> SetManualRelay(..)
//! ```

use core::str::FromStr;

use crate::error::CommandError;
use crate::fault::FaultMode;

/// Commands that external adapters can send into the application core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Inject or clear a simulated fault.
    SetFault(FaultMode),

    /// Enable or disable the manual override.
    SetManualMode(bool),

    /// Choose the relay state used while the manual override is on.
    SetManualRelay(bool),
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut words = s.split_whitespace();
        let verb = words.next().ok_or(CommandError::Empty)?.to_ascii_lowercase();
        let arg = words
            .next()
            .map(str::to_ascii_lowercase)
            .ok_or(CommandError::InvalidArgument)?;
        if words.next().is_some() {
            return Err(CommandError::InvalidArgument);
        }

        match verb.as_str() {
            "fault" => {
                let mode = match arg.as_str() {
                    "none" | "clear" => FaultMode::None,
                    "overflow" => FaultMode::Overflow,
                    "gas" | "leak" => FaultMode::GasLeak,
                    _ => return Err(CommandError::InvalidArgument),
                };
                Ok(Self::SetFault(mode))
            }
            "manual" => parse_on_off(&arg).map(Self::SetManualMode),
            "relay" => parse_on_off(&arg).map(Self::SetManualRelay),
            _ => Err(CommandError::UnknownCommand),
        }
    }
}

fn parse_on_off(arg: &str) -> Result<bool, CommandError> {
    match arg {
        "on" | "1" | "true" => Ok(true),
        "off" | "0" | "false" => Ok(false),
        _ => Err(CommandError::InvalidArgument),
    }
}
