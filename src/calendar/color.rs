use rand::Rng;

/// Picks a fresh pastel color for a new event, formatted as `#rrggbb`.
pub fn generate_hex_color() -> String {
    let mut rng = rand::thread_rng();
    // Saturation 45%-85%, lightness 55%-75%: readable under dark text.
    pastel_hex(
        rng.gen_range(0..360),
        rng.gen_range(45..=85),
        rng.gen_range(55..=75),
    )
}

/// `saturation` and `lightness` are percentages.
pub(crate) fn pastel_hex(hue: u16, saturation: u8, lightness: u8) -> String {
    let (r, g, b) = hsl_to_rgb(
        f32::from(hue % 360),
        f32::from(saturation.min(100)) / 100.0,
        f32::from(lightness.min(100)) / 100.0,
    );
    format!("#{:02x}{:02x}{:02x}", to_channel(r), to_channel(g), to_channel(b))
}

/// Parses `#rrggbb` (or `rrggbb`) into its channels.
pub fn parse_hex_color(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.strip_prefix('#').unwrap_or(color);
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some((r, g, b))
}

fn to_channel(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

fn hsl_to_rgb(h: f32, s: f32, l: f32) -> (f32, f32, f32) {
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = l - c / 2.0;

    let (r, g, b) = if (0.0..60.0).contains(&h) {
        (c, x, 0.0)
    } else if (60.0..120.0).contains(&h) {
        (x, c, 0.0)
    } else if (120.0..180.0).contains(&h) {
        (0.0, c, x)
    } else if (180.0..240.0).contains(&h) {
        (0.0, x, c)
    } else if (240.0..300.0).contains(&h) {
        (x, 0.0, c)
    } else {
        (c, 0.0, x)
    };

    (r + m, g + m, b + m)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn generated_color_is_hex_triplet() {
        let color = generate_hex_color();

        assert_eq!(color.len(), 7);
        assert!(color.starts_with('#'));
        assert!(parse_hex_color(&color).is_some());
    }

    #[test]
    fn pure_hues_map_to_expected_channels() {
        assert_eq!(pastel_hex(0, 100, 50), "#ff0000");
        assert_eq!(pastel_hex(120, 100, 50), "#00ff00");
        assert_eq!(pastel_hex(240, 100, 50), "#0000ff");
    }

    #[test]
    fn parses_color_without_hash() {
        assert_eq!(parse_hex_color("ff8000"), Some((255, 128, 0)));
    }

    #[test]
    fn rejects_short_color() {
        assert_eq!(parse_hex_color("#fff"), None);
    }

    proptest! {
        #[test]
        fn any_hsl_produces_parseable_color(hue in 0u16..360, saturation in 45u8..=85, lightness in 55u8..=75) {
            let color = pastel_hex(hue, saturation, lightness);
            prop_assert!(parse_hex_color(&color).is_some());
        }
    }
}
