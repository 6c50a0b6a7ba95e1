//! Search space size and time estimates

/// Number of candidate mnemonics: `wordlist_len ^ missing`, saturating at `u128::MAX`
pub fn search_space(wordlist_len: usize, missing: usize) -> u128 {
    let base = wordlist_len as u128;
    (0..missing).fold(1u128, |acc, _| acc.saturating_mul(base))
}

/// Format a candidate count as human-readable string
pub fn format_space(space: u128) -> String {
    let space = space as f64;
    if space >= 1e15 {
        format!("{:.2}P", space / 1e15)
    } else if space >= 1e12 {
        format!("{:.2}T", space / 1e12)
    } else if space >= 1e9 {
        format!("{:.2}G", space / 1e9)
    } else if space >= 1e6 {
        format!("{:.2}M", space / 1e6)
    } else if space >= 1e3 {
        format!("{:.2}K", space / 1e3)
    } else {
        format!("{:.0}", space)
    }
}

/// Seconds to exhaust `space` at `candidates_per_second`
pub fn estimate_seconds(space: u128, candidates_per_second: f64) -> f64 {
    if candidates_per_second <= 0.0 {
        return f64::INFINITY;
    }
    space as f64 / candidates_per_second
}

/// Format duration in human-readable format
pub fn format_duration(seconds: f64) -> String {
    if !seconds.is_finite() {
        "forever".to_string()
    } else if seconds < 1.0 {
        format!("{:.0}ms", seconds * 1000.0)
    } else if seconds < 60.0 {
        format!("{:.1}s", seconds)
    } else if seconds < 3600.0 {
        format!("{:.1}m", seconds / 60.0)
    } else if seconds < 86400.0 {
        format!("{:.1}h", seconds / 3600.0)
    } else if seconds < 86400.0 * 365.0 {
        format!("{:.1}d", seconds / 86400.0)
    } else {
        format!("{:.1}y", seconds / (86400.0 * 365.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_space() {
        assert_eq!(search_space(2048, 0), 1);
        assert_eq!(search_space(2048, 1), 2048);
        assert_eq!(search_space(2048, 2), 4_194_304);
        assert_eq!(search_space(3, 4), 81);
        assert_eq!(search_space(2048, 24), u128::MAX);
    }

    #[test]
    fn test_format_space() {
        assert_eq!(format_space(81), "81");
        assert_eq!(format_space(2048), "2.05K");
        assert_eq!(format_space(4_194_304), "4.19M");
        assert_eq!(format_space(8_589_934_592), "8.59G");
    }

    #[test]
    fn test_estimates() {
        assert_eq!(estimate_seconds(2048, 1024.0), 2.0);
        assert!(estimate_seconds(2048, 0.0).is_infinite());
        assert_eq!(format_duration(0.5), "500ms");
        assert_eq!(format_duration(30.0), "30.0s");
        assert_eq!(format_duration(120.0), "2.0m");
        assert_eq!(format_duration(7200.0), "2.0h");
        assert_eq!(format_duration(f64::INFINITY), "forever");
    }
}
