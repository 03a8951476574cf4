//! Static per-kind alarm configuration.
//!
//! The registry is built at compile time and shared read-only by the
//! presentation layer.  Text references are localisation keys resolved by
//! the display adapter; a detail-message *range* is a slice, and the
//! payload's message offset selects one entry from it.
//!
//! Mutable presentation toggles (mute icon, reset requested) live in
//! [`RegistryFlags`], owned by the presentation context rather than the
//! table itself.

use super::kind::AlarmKind;

/// Localisation key for a string in the external string table.
pub type TextKey = &'static str;

/// Key that resolves to the empty string.
pub const NULL_TEXT: TextKey = "";

/// Message shown after the detail message when the payload asks for it.
pub const ADDITIONAL_MESSAGE_REMOVE_CANNULA: TextKey = "alarm.msg.additional.remove_cannula";

/// Instructional animation played inside the popup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Animation {
    CheckTubeConnection,
    CheckForLeaks,
    CheckForBlockage,
}

/// What the popup's reset/OK button does for this kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetBehavior {
    /// Pause (acknowledge) the current alarm.
    Default,
    /// Switch the operating mode per the payload's circuit-change selector.
    ModeSwitch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlarmConfig {
    pub kind: AlarmKind,
    pub title: TextKey,
    pub detail_title: Option<TextKey>,
    pub detail_messages: &'static [TextKey],
    pub popup: bool,
    pub close_button: bool,
    pub reset_button: bool,
    pub ok_button: bool,
    pub animation: Option<Animation>,
    pub reset_behavior: ResetBehavior,
}

impl AlarmConfig {
    /// Title bar only: no popup, no buttons.
    const fn title_only(kind: AlarmKind, title: TextKey) -> Self {
        Self {
            kind,
            title,
            detail_title: None,
            detail_messages: &[],
            popup: false,
            close_button: false,
            reset_button: false,
            ok_button: false,
            animation: None,
            reset_behavior: ResetBehavior::Default,
        }
    }

    /// Popup with a close button, optional reset button and messages.
    const fn popup(
        kind: AlarmKind,
        title: TextKey,
        reset_button: bool,
        detail_messages: &'static [TextKey],
    ) -> Self {
        Self {
            popup: true,
            close_button: true,
            reset_button,
            detail_messages,
            ..Self::title_only(kind, title)
        }
    }

    pub const fn has_animation(&self) -> bool {
        self.animation.is_some()
    }

    /// Reset or OK button configured for this kind.
    pub const fn has_action_button(&self) -> bool {
        self.reset_button || self.ok_button
    }

    /// Detail message at `offset`, or `None` past the end of the range.
    pub fn detail_message(&self, offset: u8) -> Option<TextKey> {
        self.detail_messages.get(offset as usize).copied()
    }
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

pub struct AlarmRegistry {
    entries: [AlarmConfig; AlarmKind::COUNT],
}

static REGISTRY: AlarmRegistry = AlarmRegistry::build();

/// The process-wide alarm registry.
pub fn registry() -> &'static AlarmRegistry {
    &REGISTRY
}

impl AlarmRegistry {
    const fn build() -> Self {
        let mut entries = [AlarmConfig::title_only(AlarmKind::I2c1Error, NULL_TEXT); AlarmKind::COUNT];
        let mut i = 0;
        while i < AlarmKind::COUNT {
            entries[i] = entry(AlarmKind::ALL[i]);
            i += 1;
        }
        Self { entries }
    }

    pub fn get(&self, kind: AlarmKind) -> &AlarmConfig {
        &self.entries[kind.index()]
    }

    /// Lookup by raw id; `None` for ids outside the declared range.
    pub fn get_raw(&self, raw: u8) -> Option<&AlarmConfig> {
        self.entries.get(raw as usize)
    }

    pub fn title(&self, kind: AlarmKind) -> TextKey {
        self.get(kind).title
    }

    pub fn title_raw(&self, raw: u8) -> TextKey {
        self.get_raw(raw).map_or(NULL_TEXT, |c| c.title)
    }

    pub fn detail_title(&self, kind: AlarmKind) -> TextKey {
        self.get(kind).detail_title.unwrap_or(NULL_TEXT)
    }

    pub fn iter(&self) -> impl Iterator<Item = &AlarmConfig> {
        self.entries.iter()
    }
}

/// Process-wide presentation toggles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegistryFlags {
    pub mute_icon_visible: bool,
    pub reset_requested: bool,
}

// ---------------------------------------------------------------------------
// Table
// ---------------------------------------------------------------------------

const fn entry(kind: AlarmKind) -> AlarmConfig {
    use AlarmKind as K;

    match kind {
        // System errors: title bar only.
        K::I2c1Error => AlarmConfig::title_only(kind, "alarm.title.sys.i2c1"),
        K::I2c2Error => AlarmConfig::title_only(kind, "alarm.title.sys.i2c2"),
        K::I2c3Error => AlarmConfig::title_only(kind, "alarm.title.sys.i2c3"),
        K::I2c4Error => AlarmConfig::title_only(kind, "alarm.title.sys.i2c4"),
        K::Spi3Error => AlarmConfig::title_only(kind, "alarm.title.sys.spi3"),
        K::Uart1Error => AlarmConfig::title_only(kind, "alarm.title.sys.uart1"),
        K::Uart2Error => AlarmConfig::title_only(kind, "alarm.title.sys.uart2"),
        K::Uart4Error => AlarmConfig::title_only(kind, "alarm.title.sys.uart4"),
        K::Uart6Error => AlarmConfig::title_only(kind, "alarm.title.sys.uart6"),
        K::AirFlowSensorError => AlarmConfig::title_only(kind, "alarm.title.sys.air_flow_sensor"),
        K::O2FlowSensorError => AlarmConfig::title_only(kind, "alarm.title.sys.o2_flow_sensor"),
        K::Bme280Error => AlarmConfig::title_only(kind, "alarm.title.sys.bme280"),
        K::Adxl345Error => AlarmConfig::title_only(kind, "alarm.title.sys.adxl345"),
        K::Drv8308Error => AlarmConfig::title_only(kind, "alarm.title.sys.drv8308"),
        K::AudioError => AlarmConfig::title_only(kind, "alarm.title.sys.audio"),
        K::MotorTaskError => AlarmConfig::title_only(kind, "alarm.title.sys.motor_task"),
        K::HeaterTaskError => AlarmConfig::title_only(kind, "alarm.title.sys.heater_task"),
        K::HumidityTaskError => AlarmConfig::title_only(kind, "alarm.title.sys.humidity_task"),

        K::BreathingCircuitNotConnected => AlarmConfig {
            detail_title: Some("alarm.detail_title.e001"),
            animation: Some(Animation::CheckTubeConnection),
            ..AlarmConfig::popup(kind, "alarm.title.e001", false, &["alarm.msg.e110"])
        },
        K::CheckLeak => AlarmConfig {
            animation: Some(Animation::CheckForLeaks),
            ..AlarmConfig::popup(kind, "alarm.title.e002", true, &[])
        },
        K::CheckBlockage => AlarmConfig {
            animation: Some(Animation::CheckForBlockage),
            ..AlarmConfig::popup(kind, "alarm.title.e003", false, &[])
        },
        K::NonGenuineCircuit => AlarmConfig::popup(kind, "alarm.title.e004", false, &["alarm.msg.e004"]),
        K::BreathingCircuitChanged => AlarmConfig {
            ok_button: true,
            reset_behavior: ResetBehavior::ModeSwitch,
            ..AlarmConfig::popup(
                kind,
                "alarm.title.e005",
                false,
                &[
                    "alarm.msg.e005a",
                    "alarm.msg.e005b",
                    "alarm.msg.e005c",
                    "alarm.msg.e005d",
                    "alarm.msg.e005e",
                    "alarm.msg.e005f",
                ],
            )
        },
        K::ExpiredCircuit => AlarmConfig::popup(kind, "alarm.title.e006", true, &["alarm.msg.e006"]),
        K::CheckConnectionChamber => AlarmConfig {
            animation: Some(Animation::CheckTubeConnection),
            ..AlarmConfig::popup(kind, "alarm.title.e007", false, &[])
        },
        K::NoMoreWaterInChamber => AlarmConfig {
            animation: Some(Animation::CheckTubeConnection),
            ..AlarmConfig::popup(kind, "alarm.title.e008", true, &[])
        },
        K::RunOutOfWater => AlarmConfig {
            animation: Some(Animation::CheckTubeConnection),
            ..AlarmConfig::popup(kind, "alarm.title.e009", true, &[])
        },
        K::LowTemperature => {
            AlarmConfig::popup(kind, "alarm.title.e010", false, &["alarm.msg.e010a", "alarm.msg.e010b"])
        }
        K::HighTemperature => {
            AlarmConfig::popup(kind, "alarm.title.e011", true, &["alarm.msg.e011a", "alarm.msg.e011b"])
        }
        K::HighTemperatureAbnormality => AlarmConfig::popup(kind, "alarm.title.e012", false, &["alarm.msg.e012"]),
        K::RoomTemperatureTooLowForTarget => AlarmConfig::popup(kind, "alarm.title.e013", true, &["alarm.msg.e013"]),
        K::CheckOperatingConditions => {
            AlarmConfig::popup(kind, "alarm.title.e014", true, &["alarm.msg.e014a", "alarm.msg.e014b"])
        }
        K::DeviceErrorToAchieveTargetTemperature => {
            AlarmConfig::popup(kind, "alarm.title.e015", false, &["alarm.msg.e015"])
        }
        K::OxygenHigh => AlarmConfig::popup(kind, "alarm.title.e016", false, &["alarm.msg.e016"]),
        K::OxygenLow => AlarmConfig::popup(kind, "alarm.title.e017", false, &["alarm.msg.e017"]),
        K::DevicePostureAbnormal => AlarmConfig::popup(kind, "alarm.title.e018", true, &[]),
        K::DevicePostureBad => AlarmConfig::popup(kind, "alarm.title.e019", true, &[]),
        K::SwitchToBatteryMode => AlarmConfig::popup(kind, "alarm.title.e020", true, &[]),
        K::BatteryLow => AlarmConfig::popup(kind, "alarm.title.e021", true, &["alarm.msg.e021"]),
        K::BatteryGetsRunOut => AlarmConfig::popup(kind, "alarm.title.e022", false, &[]),
        K::StopFunction => AlarmConfig::popup(kind, "alarm.title.e023", false, &["alarm.msg.e023"]),
        K::PowerNotEnough => AlarmConfig::popup(kind, "alarm.title.e024", true, &["alarm.msg.e024"]),
        K::SpO2Failed => AlarmConfig::popup(kind, "alarm.title.e025", false, &["alarm.msg.e025"]),
        K::SpO2Low => AlarmConfig::popup(kind, "alarm.title.e026", false, &["alarm.msg.e026"]),
        K::SpO2SensorProbe => AlarmConfig::popup(kind, "alarm.title.e027", true, &["alarm.msg.e027"]),
        K::SpO2SignalLoss => AlarmConfig::popup(kind, "alarm.title.e028", true, &["alarm.msg.e028"]),
        K::SpO2SensorUnplugged => AlarmConfig::popup(kind, "alarm.title.e029", true, &["alarm.msg.e029"]),
        K::WaterSupplyCheck => AlarmConfig::popup(kind, "alarm.title.e030", true, &[]),
        K::WaterTankConnectionCheck => AlarmConfig::popup(kind, "alarm.title.e031", true, &[]),
        K::AirFlowAbnormal => AlarmConfig::popup(kind, "alarm.title.e032", false, &["alarm.msg.e032"]),
        K::MainUnitBatteryDisconnected => AlarmConfig::popup(kind, "alarm.title.e033", false, &["alarm.msg.e033"]),
        K::CradleBatteryDisconnected => AlarmConfig::popup(kind, "alarm.title.e034", true, &["alarm.msg.e034"]),

        K::FailureOxygenFlowSensor => AlarmConfig::popup(kind, "alarm.title.e100", false, &["alarm.msg.e100"]),
        K::FailureAirFlowSensor => AlarmConfig::popup(kind, "alarm.title.e101", false, &["alarm.msg.e101"]),
        K::FailureChamberTemperatureSensor => {
            AlarmConfig::popup(kind, "alarm.title.e102", false, &["alarm.msg.e102"])
        }
        K::FailureCoilTemperatureSensor => AlarmConfig::popup(kind, "alarm.title.e103", false, &["alarm.msg.e103"]),
        K::FailureCircuitOutTemperatureSensor => {
            AlarmConfig::popup(kind, "alarm.title.e104", false, &["alarm.msg.e104"])
        }
        K::FailureEnvironmentSensor => AlarmConfig::popup(kind, "alarm.title.e105", false, &["alarm.msg.e105"]),
        K::FailureCurrentSensor => AlarmConfig::popup(kind, "alarm.title.e106", false, &["alarm.msg.e106"]),
        K::FailureBlower => AlarmConfig::popup(kind, "alarm.title.e107", false, &["alarm.msg.e107"]),
        K::SpeakerDisconnected => AlarmConfig::popup(kind, "alarm.title.e108", false, &["alarm.msg.e108"]),
        K::FailureWaterLevelSensor => AlarmConfig::popup(kind, "alarm.title.e109", false, &["alarm.msg.e109"]),
        K::FailureExternalFlash => AlarmConfig::popup(kind, "alarm.title.e110", false, &["alarm.msg.e110"]),
        K::FailureAccelerationSensor => AlarmConfig::popup(kind, "alarm.title.e111", true, &["alarm.msg.e111"]),
        K::FailureLightSensor => AlarmConfig::popup(kind, "alarm.title.e112", true, &["alarm.msg.e112"]),
        K::MainUnitBatteryCommError => AlarmConfig::popup(kind, "alarm.title.e113", true, &[]),
        K::CradleBatteryCommError => AlarmConfig::popup(kind, "alarm.title.e114", true, &[]),
        K::CradleCommError => AlarmConfig::popup(kind, "alarm.title.e115", false, &[]),
        K::MainMcuFailed => AlarmConfig {
            popup: false,
            ..AlarmConfig::popup(kind, "alarm.title.e116", true, &[])
        },
        K::Esp32Failed => AlarmConfig::popup(kind, "alarm.title.e117", false, &[]),
        K::CircuitHeaterWireBroken => AlarmConfig::popup(kind, "alarm.title.e118", false, &["alarm.msg.e118"]),
        K::FailureSpO2Module => AlarmConfig::popup(kind, "alarm.title.e119", true, &["alarm.msg.e119"]),
        K::FailureRtcModule => AlarmConfig::popup(kind, "alarm.title.e120", true, &["alarm.msg.e120"]),
        K::FailureLcdTouchModule => AlarmConfig::popup(kind, "alarm.title.e121", true, &["alarm.msg.e121"]),
        K::ChamberTemperatureAbnormal => AlarmConfig::popup(kind, "alarm.title.e124", true, &["alarm.msg.e124"]),
        K::TooMuchWaterInChamber => AlarmConfig::popup(kind, "alarm.title.e125", true, &["alarm.msg.e125"]),
    }
}
