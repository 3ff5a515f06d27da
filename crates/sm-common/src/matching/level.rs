use crate::skill::ProficiencyLevel;

/// Level compatibility in (0, 1]. Meeting or exceeding the required level is a
/// full match; otherwise the score is the ratio of the two weights.
pub fn level_score(user_level: ProficiencyLevel, project_level: ProficiencyLevel) -> f64 {
    let user_weight = user_level.weight();
    let project_weight = project_level.weight();

    if user_weight >= project_weight {
        1.0
    } else {
        user_weight / project_weight
    }
}
