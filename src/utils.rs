/// Utility helpers for the player UI

/// True when an HTTPS page would pull an HTTP stream, which browsers may block.
pub fn is_mixed_content(page_protocol: &str, url: &str) -> bool {
    page_protocol.trim_end_matches(':').eq_ignore_ascii_case("https")
        && url
            .get(..7)
            .map(|scheme| scheme.eq_ignore_ascii_case("http://"))
            .unwrap_or(false)
}

/// Parses a range input's value into a whole percentage in `0..=100`.
pub fn parse_slider_value(raw: &str) -> Option<u8> {
    let value = raw.trim().parse::<f64>().ok()?;
    if !value.is_finite() {
        return None;
    }
    Some(value.round().clamp(0.0, 100.0) as u8)
}

pub fn format_percent(percent: u8) -> String {
    format!("{percent}%")
}
