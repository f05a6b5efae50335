const SI_UNITS: [&str; 8] = ["kB", "MB", "GB", "TB", "PB", "EB", "ZB", "YB"];
const BINARY_UNITS: [&str; 8] = ["KiB", "MiB", "GiB", "TiB", "PiB", "EiB", "ZiB", "YiB"];

/// Render a byte count with the largest unit that keeps the rounded value under the threshold
/// (1000 for SI units, 1024 for binary units).
///
/// Values under the threshold are printed unscaled, e.g. `"999 B"`. Rounding is half away from
/// zero at `decimal_places` digits.
pub fn human_readable_size(bytes: f64, si: bool, decimal_places: u32) -> String {
    let threshold = if si { 1000.0 } else { 1024.0 };

    if bytes.abs() < threshold {
        return format!("{bytes} B");
    }

    let units = if si { &SI_UNITS } else { &BINARY_UNITS };
    let scale = 10f64.powi(decimal_places as i32);
    let mut value = bytes;
    let mut unit = 0;

    loop {
        value /= threshold;
        if round(value.abs(), scale) < threshold || unit == units.len() - 1 {
            break;
        }
        unit += 1;
    }

    format!(
        "{:.*} {}",
        decimal_places as usize,
        round(value, scale),
        units[unit]
    )
}

/// [`human_readable_size`] with SI units and one decimal place.
pub fn format_size(bytes: f64) -> String {
    human_readable_size(bytes, true, 1)
}

#[inline(always)]
fn round(value: f64, scale: f64) -> f64 {
    (value * scale).round() / scale
}
