use horse_race::config::{MAX_LANES, MIN_LANES, TICK_MS};
use once_cell::sync::Lazy;
use regex::Regex;

// Things an <img src> can plausibly load: absolute URLs, site paths, inline images
static IMAGE_REF_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(https?://\S+|/\S*|data:image/\S+)$").unwrap());

/// Generic numeric input validation
pub fn validate_numeric_input<T>(
    input: &str,
    min: Option<T>,
    max: Option<T>,
    field_name: &str,
) -> Result<T, String>
where
    T: std::str::FromStr + std::fmt::Display + PartialOrd,
{
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(format!("{} cannot be empty", field_name));
    }

    let val = trimmed
        .parse::<T>()
        .map_err(|_| format!("{} must be a whole number", field_name))?;
    if let Some(min_val) = min {
        if val < min_val {
            return Err(format!("{} must be at least {}", field_name, min_val));
        }
    }
    if let Some(max_val) = max {
        if val > max_val {
            return Err(format!("{} cannot exceed {}", field_name, max_val));
        }
    }
    Ok(val)
}

/// Validate the participant count chosen in the first dialog.
pub fn validate_participant_count(input: &str) -> Result<usize, String> {
    validate_numeric_input(input, Some(MIN_LANES), Some(MAX_LANES), "Participant count")
}

/// Elapsed race time for a tick count, e.g. `"12.3s"`.
pub fn format_race_clock(ticks: u32) -> String {
    let ms = u64::from(ticks) * u64::from(TICK_MS);
    format!("{}.{}s", ms / 1000, (ms % 1000) / 100)
}

/// English ordinal for a finishing place.
pub fn ordinal(rank: u32) -> String {
    let suffix = match (rank % 10, rank % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{}{}", rank, suffix)
}

/// Cell that shows the horse while it is still on the track.
pub fn marker_cell(position: f64, track_len: usize) -> Option<usize> {
    if position < track_len as f64 {
        Some((position.max(0.0).floor() as usize).min(track_len.saturating_sub(1)))
    } else {
        None
    }
}

/// Whether a custom image string is worth previewing as an image.
pub fn looks_like_image_ref(input: &str) -> bool {
    IMAGE_REF_REGEX.is_match(input.trim())
}
