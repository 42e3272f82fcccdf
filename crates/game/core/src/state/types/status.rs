/// Lifecycle of a single game.
///
/// Transitions only move forward: `Pending` → `InProcess` → `Finished`.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum GameStatus {
    /// Configured but not started; no entities exist yet.
    #[default]
    Pending,
    /// Players may move and the target jumps on its timer.
    InProcess,
    /// Terminal. State is frozen.
    Finished,
}

impl GameStatus {
    pub const fn is_pending(self) -> bool {
        matches!(self, GameStatus::Pending)
    }

    pub const fn is_active(self) -> bool {
        matches!(self, GameStatus::InProcess)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, GameStatus::Finished)
    }
}
