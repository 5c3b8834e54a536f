/// Shown wherever a duration (or any measure) is unusable.
pub const PLACEHOLDER: &str = "—";

/// Renders fractional hours as whole hours plus rounded minutes. Absent or
/// unusable values render as the placeholder rather than failing the view
/// that asked.
pub fn format_duration(hours: Option<f64>) -> String {
    let hours = match hours {
        Some(hours) if hours.is_finite() && hours >= 0.0 => hours,
        _ => return PLACEHOLDER.to_string(),
    };
    let mut whole = hours.trunc() as u64;
    let mut minutes = (hours.fract() * 60.0).round() as u64;
    if minutes == 60 {
        whole += 1;
        minutes = 0;
    }
    format!("{} h {} min", whole, minutes)
}
