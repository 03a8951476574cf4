//! Alarm identity: kind, status and priority.
//!
//! Discriminants are the on-wire alarm ids carried by [`AlarmEvent`]s and
//! index every per-kind table in the crate.  The order is fixed:
//!
//! ```text
//!   0 ..= 17   system errors (bus / peripheral / task faults, title only)
//!  18 ..= 51   E001 .. E034   operating alarms
//!  52 ..= 73   E100 .. E121   device failures
//!  74 ..= 75   E124, E125
//! ```
//!
//! [`AlarmEvent`]: crate::events::AlarmEvent

use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::{Deserialize, Serialize};

macro_rules! alarm_kinds {
    ($( $name:ident = $id:literal => $code:literal, )+) => {
        /// Every alarm condition the device can raise.
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord,
            Serialize, Deserialize, TryFromPrimitive, IntoPrimitive,
        )]
        #[repr(u8)]
        pub enum AlarmKind {
            $( $name = $id, )+
        }

        impl AlarmKind {
            /// All kinds in discriminant order.
            pub const ALL: [AlarmKind; AlarmKind::COUNT] = [ $( AlarmKind::$name, )+ ];

            /// Service code shown to technicians (`E001`, `SYS-I2C1`, ...).
            pub const fn code(self) -> &'static str {
                match self {
                    $( AlarmKind::$name => $code, )+
                }
            }
        }
    };
}

alarm_kinds! {
    I2c1Error = 0 => "SYS-I2C1",
    I2c2Error = 1 => "SYS-I2C2",
    I2c3Error = 2 => "SYS-I2C3",
    I2c4Error = 3 => "SYS-I2C4",
    Spi3Error = 4 => "SYS-SPI3",
    Uart1Error = 5 => "SYS-UART1",
    Uart2Error = 6 => "SYS-UART2",
    Uart4Error = 7 => "SYS-UART4",
    Uart6Error = 8 => "SYS-UART6",
    AirFlowSensorError = 9 => "SYS-AIRFLOW",
    O2FlowSensorError = 10 => "SYS-O2FLOW",
    Bme280Error = 11 => "SYS-BME280",
    Adxl345Error = 12 => "SYS-ADXL345",
    Drv8308Error = 13 => "SYS-DRV8308",
    AudioError = 14 => "SYS-AUDIO",
    MotorTaskError = 15 => "SYS-MOTOR",
    HeaterTaskError = 16 => "SYS-HEATER",
    HumidityTaskError = 17 => "SYS-HUMIDITY",

    BreathingCircuitNotConnected = 18 => "E001",
    CheckLeak = 19 => "E002",
    CheckBlockage = 20 => "E003",
    NonGenuineCircuit = 21 => "E004",
    BreathingCircuitChanged = 22 => "E005",
    ExpiredCircuit = 23 => "E006",
    CheckConnectionChamber = 24 => "E007",
    NoMoreWaterInChamber = 25 => "E008",
    RunOutOfWater = 26 => "E009",
    LowTemperature = 27 => "E010",
    HighTemperature = 28 => "E011",
    HighTemperatureAbnormality = 29 => "E012",
    RoomTemperatureTooLowForTarget = 30 => "E013",
    CheckOperatingConditions = 31 => "E014",
    DeviceErrorToAchieveTargetTemperature = 32 => "E015",
    OxygenHigh = 33 => "E016",
    OxygenLow = 34 => "E017",
    DevicePostureAbnormal = 35 => "E018",
    DevicePostureBad = 36 => "E019",
    SwitchToBatteryMode = 37 => "E020",
    BatteryLow = 38 => "E021",
    BatteryGetsRunOut = 39 => "E022",
    StopFunction = 40 => "E023",
    PowerNotEnough = 41 => "E024",
    SpO2Failed = 42 => "E025",
    SpO2Low = 43 => "E026",
    SpO2SensorProbe = 44 => "E027",
    SpO2SignalLoss = 45 => "E028",
    SpO2SensorUnplugged = 46 => "E029",
    WaterSupplyCheck = 47 => "E030",
    WaterTankConnectionCheck = 48 => "E031",
    AirFlowAbnormal = 49 => "E032",
    MainUnitBatteryDisconnected = 50 => "E033",
    CradleBatteryDisconnected = 51 => "E034",

    FailureOxygenFlowSensor = 52 => "E100",
    FailureAirFlowSensor = 53 => "E101",
    FailureChamberTemperatureSensor = 54 => "E102",
    FailureCoilTemperatureSensor = 55 => "E103",
    FailureCircuitOutTemperatureSensor = 56 => "E104",
    FailureEnvironmentSensor = 57 => "E105",
    FailureCurrentSensor = 58 => "E106",
    FailureBlower = 59 => "E107",
    SpeakerDisconnected = 60 => "E108",
    FailureWaterLevelSensor = 61 => "E109",
    FailureExternalFlash = 62 => "E110",
    FailureAccelerationSensor = 63 => "E111",
    FailureLightSensor = 64 => "E112",
    MainUnitBatteryCommError = 65 => "E113",
    CradleBatteryCommError = 66 => "E114",
    CradleCommError = 67 => "E115",
    MainMcuFailed = 68 => "E116",
    Esp32Failed = 69 => "E117",
    CircuitHeaterWireBroken = 70 => "E118",
    FailureSpO2Module = 71 => "E119",
    FailureRtcModule = 72 => "E120",
    FailureLcdTouchModule = 73 => "E121",
    ChamberTemperatureAbnormal = 74 => "E124",
    TooMuchWaterInChamber = 75 => "E125",
}

impl AlarmKind {
    /// Number of alarm kinds; sizes every per-kind table.
    pub const COUNT: usize = 76;

    /// Table index for this kind.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Raw on-wire id.
    pub const fn id(self) -> u8 {
        self as u8
    }

    /// Bus, peripheral and task faults reported by the platform layer.
    pub const fn is_system_error(self) -> bool {
        (self as u8) <= AlarmKind::HumidityTaskError as u8
    }

    /// The contiguous E100..=E107 sensor/blower failure block.
    pub const fn is_sensor_failure(self) -> bool {
        let id = self as u8;
        id >= AlarmKind::FailureOxygenFlowSensor as u8 && id <= AlarmKind::FailureBlower as u8
    }
}

impl core::fmt::Display for AlarmKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} ({:?})", self.code(), self)
    }
}

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Whether an alarm condition currently holds.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TryFromPrimitive, IntoPrimitive,
)]
#[repr(u8)]
pub enum AlarmStatus {
    #[default]
    Inactive = 0,
    Active = 1,
}

impl AlarmStatus {
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }
}

// ---------------------------------------------------------------------------
// Priority
// ---------------------------------------------------------------------------

/// Operator-facing severity of one activation.  Chosen by whoever selects
/// the alarm for display, not derived from the kind.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TryFromPrimitive, IntoPrimitive,
)]
#[repr(u8)]
pub enum AlarmPriority {
    High = 0,
    Medium = 1,
    Low1 = 2,
    Low2 = 3,
}
