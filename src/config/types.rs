//! Configuration types for day resolution.
//!
//! The rules that changed over the tool's lifetime (evening threshold, what a
//! missing punch means, how half-day leave is shown) are explicit, named
//! strategies here rather than hard-coded branches.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::{ClockTime, NamedShift, PunchSchema};
use crate::render::Palette;

/// General shift is late strictly after 09:45.
pub const GENERAL_LATE_AFTER: ClockTime = ClockTime::at(9, 45);

/// Evening shift is late strictly after 16:30 under the dual-punch rules.
pub const EVENING_LATE_AFTER_DUAL: ClockTime = ClockTime::at(16, 30);

/// Evening shift is late strictly after 14:30 under the single-punch rules.
pub const EVENING_LATE_AFTER_SINGLE: ClockTime = ClockTime::at(14, 30);

/// What a `PT` day with no punch record resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingPunchPolicy {
    /// `AT`
    Absent,
    /// `Punch Miss`
    PunchMiss,
}

/// How `PL/PT` and `CL/PT` days resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HalfDayLeavePolicy {
    /// `AT` without a usable punch, `Half Day Leave` otherwise.
    PunchDependent,
    /// Always `Half Day`; punches are not consulted.
    FixedLiteral,
}

/// Named bundles of rules matching the two generations of the tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyPreset {
    /// Split punch-in/punch-out exports; the current rules.
    #[default]
    DualPunch,
    /// Single combined punch exports; the earlier rules.
    SinglePunch,
}

impl PolicyPreset {
    /// The preset written for exports of the given layout.
    ///
    /// # Example
    ///
    /// ```
    /// use attendance_engine::config::PolicyPreset;
    /// use attendance_engine::models::PunchSchema;
    ///
    /// assert_eq!(PolicyPreset::for_schema(PunchSchema::Combined), PolicyPreset::SinglePunch);
    /// assert_eq!(PolicyPreset::for_schema(PunchSchema::Split), PolicyPreset::DualPunch);
    /// ```
    pub fn for_schema(schema: PunchSchema) -> Self {
        match schema {
            PunchSchema::Combined => PolicyPreset::SinglePunch,
            PunchSchema::Split => PolicyPreset::DualPunch,
        }
    }
}

/// The full rule table injected into the day resolver.
///
/// # Example
///
/// ```
/// use attendance_engine::config::{MissingPunchPolicy, ResolutionPolicy};
///
/// let policy = ResolutionPolicy::single_punch();
/// assert_eq!(policy.missing_punch, MissingPunchPolicy::PunchMiss);
/// assert_eq!(policy.evening_late_after.to_string(), "14:30");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionPolicy {
    /// General shift is late strictly after this time.
    pub general_late_after: ClockTime,
    /// Evening shift is late strictly after this time.
    pub evening_late_after: ClockTime,
    /// Resolution of `PT` without a punch record.
    pub missing_punch: MissingPunchPolicy,
    /// Resolution of `PL/PT` and `CL/PT`.
    pub half_day_leave: HalfDayLeavePolicy,
}

impl ResolutionPolicy {
    /// Rules for split punch-in/punch-out exports.
    pub fn dual_punch() -> Self {
        Self {
            general_late_after: GENERAL_LATE_AFTER,
            evening_late_after: EVENING_LATE_AFTER_DUAL,
            missing_punch: MissingPunchPolicy::Absent,
            half_day_leave: HalfDayLeavePolicy::PunchDependent,
        }
    }

    /// Rules for single combined punch exports.
    pub fn single_punch() -> Self {
        Self {
            general_late_after: GENERAL_LATE_AFTER,
            evening_late_after: EVENING_LATE_AFTER_SINGLE,
            missing_punch: MissingPunchPolicy::PunchMiss,
            half_day_leave: HalfDayLeavePolicy::FixedLiteral,
        }
    }

    /// The rules of a named preset.
    pub fn from_preset(preset: PolicyPreset) -> Self {
        match preset {
            PolicyPreset::DualPunch => Self::dual_punch(),
            PolicyPreset::SinglePunch => Self::single_punch(),
        }
    }

    /// The preset these rules equal, or `None` once any rule is overridden.
    pub fn preset(&self) -> Option<PolicyPreset> {
        [PolicyPreset::DualPunch, PolicyPreset::SinglePunch]
            .into_iter()
            .find(|preset| Self::from_preset(*preset) == *self)
    }

    /// The lateness threshold of a named shift.
    pub fn late_after(&self, shift: NamedShift) -> ClockTime {
        match shift {
            NamedShift::General => self.general_late_after,
            NamedShift::Evening => self.evening_late_after,
        }
    }
}

impl Default for ResolutionPolicy {
    fn default() -> Self {
        Self::dual_punch()
    }
}

/// `policy.yaml`: a preset plus optional per-rule overrides.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PolicyFile {
    /// Base preset.
    #[serde(default)]
    pub preset: PolicyPreset,
    /// Override for the general shift threshold.
    #[serde(default)]
    pub general_late_after: Option<ClockTime>,
    /// Override for the evening shift threshold.
    #[serde(default)]
    pub evening_late_after: Option<ClockTime>,
    /// Override for the missing-punch rule.
    #[serde(default)]
    pub missing_punch: Option<MissingPunchPolicy>,
    /// Override for the half-day leave rule.
    #[serde(default)]
    pub half_day_leave: Option<HalfDayLeavePolicy>,
}

impl PolicyFile {
    /// Applies the overrides on top of the preset.
    pub fn into_policy(self) -> ResolutionPolicy {
        let base = ResolutionPolicy::from_preset(self.preset);
        ResolutionPolicy {
            general_late_after: self.general_late_after.unwrap_or(base.general_late_after),
            evening_late_after: self.evening_late_after.unwrap_or(base.evening_late_after),
            missing_punch: self.missing_punch.unwrap_or(base.missing_punch),
            half_day_leave: self.half_day_leave.unwrap_or(base.half_day_leave),
        }
    }
}

/// `palette.yaml`: status literal and prefix colors as `RRGGBB` hex strings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaletteFile {
    /// Colors keyed by exact status literal.
    #[serde(default)]
    pub exact: BTreeMap<String, String>,
    /// Colors keyed by status prefix, e.g. `"GSL "`.
    #[serde(default)]
    pub prefixes: BTreeMap<String, String>,
}

/// The complete engine configuration.
#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    /// Day resolution rules.
    policy: ResolutionPolicy,
    /// Report cell colors.
    palette: Palette,
}

impl EngineConfig {
    /// Creates a configuration from its component parts.
    pub fn new(policy: ResolutionPolicy, palette: Palette) -> Self {
        Self { policy, palette }
    }

    /// Returns the resolution rules.
    pub fn policy(&self) -> &ResolutionPolicy {
        &self.policy
    }

    /// Returns the report palette.
    pub fn palette(&self) -> &Palette {
        &self.palette
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_dual_punch() {
        let policy = ResolutionPolicy::default();
        assert_eq!(policy, ResolutionPolicy::dual_punch());
        assert_eq!(policy.general_late_after.to_string(), "09:45");
        assert_eq!(policy.evening_late_after.to_string(), "16:30");
        assert_eq!(policy.missing_punch, MissingPunchPolicy::Absent);
        assert_eq!(policy.half_day_leave, HalfDayLeavePolicy::PunchDependent);
    }

    #[test]
    fn test_single_punch_preset() {
        let policy = ResolutionPolicy::from_preset(PolicyPreset::SinglePunch);
        assert_eq!(policy.general_late_after.to_string(), "09:45");
        assert_eq!(policy.evening_late_after.to_string(), "14:30");
        assert_eq!(policy.missing_punch, MissingPunchPolicy::PunchMiss);
        assert_eq!(policy.half_day_leave, HalfDayLeavePolicy::FixedLiteral);
    }

    #[test]
    fn test_preset_of_rules() {
        assert_eq!(ResolutionPolicy::dual_punch().preset(), Some(PolicyPreset::DualPunch));
        assert_eq!(ResolutionPolicy::single_punch().preset(), Some(PolicyPreset::SinglePunch));

        let custom = ResolutionPolicy {
            evening_late_after: ClockTime::at(15, 0),
            ..ResolutionPolicy::single_punch()
        };
        assert_eq!(custom.preset(), None);
    }

    #[test]
    fn test_late_after_by_shift() {
        let policy = ResolutionPolicy::dual_punch();
        assert_eq!(policy.late_after(NamedShift::General), GENERAL_LATE_AFTER);
        assert_eq!(policy.late_after(NamedShift::Evening), EVENING_LATE_AFTER_DUAL);
    }

    #[test]
    fn test_policy_file_overrides_preset() {
        let yaml = "preset: single_punch\nevening_late_after: \"15:00\"\nmissing_punch: absent\n";
        let file: PolicyFile = serde_yaml::from_str(yaml).unwrap();
        let policy = file.into_policy();

        assert_eq!(policy.evening_late_after.to_string(), "15:00");
        assert_eq!(policy.missing_punch, MissingPunchPolicy::Absent);
        // untouched rules come from the preset
        assert_eq!(policy.half_day_leave, HalfDayLeavePolicy::FixedLiteral);
    }

    #[test]
    fn test_empty_policy_file_is_default() {
        let file: PolicyFile = serde_yaml::from_str("{}").unwrap();
        assert_eq!(file.into_policy(), ResolutionPolicy::default());
    }

    #[test]
    fn test_policy_file_rejects_bad_threshold() {
        let result = serde_yaml::from_str::<PolicyFile>("general_late_after: \"9.45\"\n");
        assert!(result.is_err());
    }
}
