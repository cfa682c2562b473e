use crate::data::moves::{MoveCategory, MoveData, MoveTarget};

pub fn is_status_move(move_data: &MoveData) -> bool {
    move_data.category() == MoveCategory::Status
}

/// Moves that hit more than one opponent at once.
pub fn is_multi_target(move_data: &MoveData) -> bool {
    matches!(
        move_data.target,
        MoveTarget::AllNearEnemies | MoveTarget::AllNearOthers | MoveTarget::AllOthers | MoveTarget::AllEnemies
    )
}

/// Moves that target a whole side or the whole field (hazards, screens, ...).
pub fn is_field_target(move_data: &MoveData) -> bool {
    matches!(
        move_data.target,
        MoveTarget::EnemySide | MoveTarget::BothSides | MoveTarget::All
    )
}

/// Floors a fractional HP amount, never going below 1.
pub fn to_damage_value(value: f64) -> i32 {
    (value.floor() as i32).max(1)
}

pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}
