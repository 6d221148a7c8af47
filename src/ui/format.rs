// SPDX-License-Identifier: MPL-2.0
//! Human-readable labels for the metadata panel and the transport clock.

const SIZE_UNITS: [&str; 5] = ["Bytes", "KB", "MB", "GB", "TB"];

/// Formats a byte count with base-1024 units.
///
/// Two decimals at most, trailing zeros dropped: `5242880` → `"5 MB"`,
/// `1536` → `"1.5 KB"`.
#[must_use]
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    #[allow(clippy::cast_precision_loss)]
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let rounded = format!("{value:.2}");
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
    format!("{trimmed} {}", SIZE_UNITS[unit])
}

/// Formats seconds as zero-padded `HH:MM:SS`.
#[must_use]
pub fn format_duration(seconds: f64) -> String {
    let (hours, minutes, secs) = split_seconds(seconds);
    format!("{hours:02}:{minutes:02}:{secs:02}")
}

/// Formats seconds as the transport clock `M:SS`.
///
/// Minutes are not wrapped into hours, so 65 minutes reads `65:00`.
#[must_use]
pub fn format_time(seconds: f64) -> String {
    let (hours, minutes, secs) = split_seconds(seconds);
    format!("{}:{secs:02}", hours * 60 + minutes)
}

fn split_seconds(seconds: f64) -> (u64, u64, u64) {
    let total = if seconds.is_finite() && seconds > 0.0 {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let whole = seconds.floor() as u64;
        whole
    } else {
        0
    };
    (total / 3600, (total % 3600) / 60, total % 60)
}
