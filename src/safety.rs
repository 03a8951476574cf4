//! Safety reaction engine.
//!
//! Pure decision logic: given one alarm transition and the status table
//! (already updated with that transition), decide which commands go to the
//! heater, motor and water-supply collaborators.  Nothing here performs
//! I/O; [`AlarmService`](crate::app::service::AlarmService) applies the
//! returned [`SafetyActions`] through its ports.
//!
//! ## Startup interlock
//!
//! Heater/motor re-enable is only issued when
//! [`can_start_normal_operation`] holds, i.e. no disqualifying alarm is
//! Active:
//!
//! ```text
//!  E001 E004 E007 E010 E011 E012 E015 E023 E024 E034   E100 ..= E107
//! ```
//!
//! The reaction table is an explicit per-kind mapping.  Every row lists
//! its full action set; rows never share control flow.

use heapless::Vec;
use log::warn;

use crate::alarm::payload::{high_temperature, low_temperature, operating_conditions};
use crate::alarm::{AlarmKind, AlarmPayload, AlarmStatus, AlarmStatusTable};

/// One command for a collaborator task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SafetyAction {
    DisableMotor,
    EnableMotor,
    HeaterStart,
    HeaterStop,
    MotorStart,
    MotorStop,
    MotorPrepareStop,
    /// Turn off and disable the water supply pump.
    WaterPumpOff,
}

impl SafetyAction {
    /// True for anything that starts or re-enables an actuator.
    pub const fn is_start(self) -> bool {
        matches!(self, Self::EnableMotor | Self::HeaterStart | Self::MotorStart)
    }
}

/// Ordered action set produced by one reaction.  No row exceeds four.
pub type SafetyActions = Vec<SafetyAction, 8>;

// ── Action sets ──────────────────────────────────────────────

use SafetyAction::{
    DisableMotor, EnableMotor, HeaterStart, HeaterStop, MotorPrepareStop, MotorStart, MotorStop,
    WaterPumpOff,
};

const NONE: &[SafetyAction] = &[];
const PUMP_OFF: &[SafetyAction] = &[WaterPumpOff];
const THERMAL_STOP: &[SafetyAction] = &[HeaterStop, MotorStop, WaterPumpOff];
const CIRCUIT_MISSING: &[SafetyAction] = &[DisableMotor, HeaterStop, MotorPrepareStop, WaterPumpOff];
const CIRCUIT_REJECTED: &[SafetyAction] = &[WaterPumpOff, DisableMotor, HeaterStop, MotorStop];
const CIRCUIT_REJECTED_CLEARED: &[SafetyAction] = &[WaterPumpOff, DisableMotor];
const POWER_SHORTFALL: &[SafetyAction] = &[DisableMotor, WaterPumpOff, HeaterStop, MotorStop];
const STOP_FUNCTION: &[SafetyAction] = &[WaterPumpOff, HeaterStop, MotorStop];
const SENSOR_FAILURE: &[SafetyAction] = &[DisableMotor, HeaterStop, MotorStop];
const OPERATING_LIMIT: &[SafetyAction] = &[HeaterStop, WaterPumpOff];
const OPERATING_LIMIT_HOT: &[SafetyAction] = &[HeaterStop, MotorStop, WaterPumpOff];
const RESTART_ALL: &[SafetyAction] = &[EnableMotor, HeaterStart, MotorStart];
const RESTART_MOTOR: &[SafetyAction] = &[EnableMotor];
const BLOCK_MOTOR: &[SafetyAction] = &[DisableMotor];

// ═══════════════════════════════════════════════════════════════════════════
//  Engine
// ═══════════════════════════════════════════════════════════════════════════

/// Compute the reaction to `kind` entering `status`.
///
/// `table` must already hold the new status: the restart rows consult the
/// interlock against it.
pub fn react(
    kind: AlarmKind,
    status: AlarmStatus,
    payload: &AlarmPayload,
    table: &AlarmStatusTable,
) -> SafetyActions {
    let row = match status {
        AlarmStatus::Active => on_active(kind, payload),
        AlarmStatus::Inactive => on_inactive(kind, table),
    };

    if !row.is_empty() {
        warn!("SAFETY REACTION: {kind} {:?} -> {:?}", status, row);
    }

    // Rows are at most four long; collecting cannot overflow.
    row.iter().copied().collect()
}

/// Whether heater and motor may (re)start: false while any disqualifying
/// alarm is Active.
pub fn can_start_normal_operation(table: &AlarmStatusTable) -> bool {
    !table.active_kinds().any(is_disqualifying)
}

/// Member of the startup-interlock set.
pub const fn is_disqualifying(kind: AlarmKind) -> bool {
    use AlarmKind as K;

    kind.is_sensor_failure()
        || matches!(
            kind,
            K::BreathingCircuitNotConnected
                | K::NonGenuineCircuit
                | K::CheckConnectionChamber
                | K::LowTemperature
                | K::HighTemperature
                | K::HighTemperatureAbnormality
                | K::DeviceErrorToAchieveTargetTemperature
                | K::StopFunction
                | K::PowerNotEnough
                | K::CradleBatteryDisconnected
        )
}

fn on_active(kind: AlarmKind, payload: &AlarmPayload) -> &'static [SafetyAction] {
    use AlarmKind as K;

    match kind {
        K::BreathingCircuitNotConnected => CIRCUIT_MISSING,
        K::BreathingCircuitChanged => BLOCK_MOTOR,
        K::NonGenuineCircuit | K::CheckConnectionChamber => CIRCUIT_REJECTED,

        K::LowTemperature if payload.selector() == low_temperature::AMBIENT_AT_OR_ABOVE_18C => {
            THERMAL_STOP
        }
        K::HighTemperature if payload.selector() == high_temperature::AMBIENT_BELOW_SETTING => {
            THERMAL_STOP
        }
        K::HighTemperatureAbnormality | K::DeviceErrorToAchieveTargetTemperature => THERMAL_STOP,
        K::CheckOperatingConditions => {
            if payload.selector() == operating_conditions::AMBIENT_AT_OR_ABOVE_42C {
                OPERATING_LIMIT_HOT
            } else {
                OPERATING_LIMIT
            }
        }

        K::PowerNotEnough => POWER_SHORTFALL,
        K::StopFunction => STOP_FUNCTION,

        K::FailureOxygenFlowSensor
        | K::FailureAirFlowSensor
        | K::FailureChamberTemperatureSensor
        | K::FailureCoilTemperatureSensor
        | K::FailureCircuitOutTemperatureSensor
        | K::FailureEnvironmentSensor
        | K::FailureCurrentSensor
        | K::FailureBlower
        | K::FailureWaterLevelSensor
        | K::FailureExternalFlash => SENSOR_FAILURE,

        K::DevicePostureAbnormal
        | K::DevicePostureBad
        | K::BatteryGetsRunOut
        | K::WaterSupplyCheck
        | K::WaterTankConnectionCheck
        | K::MainUnitBatteryDisconnected
        | K::FailureAccelerationSensor
        | K::MainUnitBatteryCommError
        | K::CradleBatteryCommError
        | K::CradleCommError
        | K::MainMcuFailed
        | K::Esp32Failed
        | K::CircuitHeaterWireBroken => PUMP_OFF,

        _ => NONE,
    }
}

fn on_inactive(kind: AlarmKind, table: &AlarmStatusTable) -> &'static [SafetyAction] {
    match kind {
        // Pump and motor stay down until the circuit is accepted elsewhere.
        AlarmKind::NonGenuineCircuit | AlarmKind::CheckConnectionChamber => {
            CIRCUIT_REJECTED_CLEARED
        }
        AlarmKind::BreathingCircuitNotConnected if can_start_normal_operation(table) => RESTART_ALL,
        AlarmKind::BreathingCircuitChanged if can_start_normal_operation(table) => RESTART_MOTOR,
        _ => NONE,
    }
}
