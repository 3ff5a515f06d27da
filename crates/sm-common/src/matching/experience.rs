/// Experience compatibility in [0.5, 1.0].
///
/// A requirement of zero years is always satisfied. Below the requirement the
/// score interpolates linearly from 0.5 (no experience) up to 1.0.
pub fn experience_score(user_years: f64, project_years: f64) -> f64 {
    if project_years <= 0.0 || user_years >= project_years {
        return 1.0;
    }

    0.5 + (user_years / project_years) * 0.5
}
