use std::time::Duration;

/// Seconds with two decimals, the way stage times are displayed.
pub fn format_seconds(duration: Duration) -> String {
    format!("{:.2}", duration.as_secs_f32())
}

/// Best-time column text; unset bests render as a placeholder.
pub fn format_best_time(best: Option<Duration>) -> String {
    match best {
        Some(duration) => format_seconds(duration),
        None => "--".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_seconds() {
        assert_eq!(format_seconds(Duration::from_secs(45)), "45.00");
        assert_eq!(format_seconds(Duration::from_millis(1250)), "1.25");
    }

    #[test]
    fn test_format_best_time_placeholder() {
        assert_eq!(format_best_time(None), "--");
        assert_eq!(format_best_time(Some(Duration::from_secs(30))), "30.00");
    }
}
