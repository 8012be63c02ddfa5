use iced_core::{
    Color,
    theme::{Custom, Palette},
};
use palette::{
    FromColor, Hsva,
    rgb::{Rgb, Rgba},
};

/// The one palette every widget draws with.
pub fn folio_dark() -> iced_core::Theme {
    iced_core::Theme::Custom(
        Custom::new(
            "Folio Dark".to_string(),
            Palette {
                background: Color::from_rgb8(17, 24, 39),
                text: Color::from_rgb8(226, 232, 240),
                primary: Color::from_rgb8(99, 102, 241),
                success: Color::from_rgb8(74, 222, 128),
                danger: Color::from_rgb8(239, 68, 68),
                warning: Color::from_rgb8(250, 204, 21),
            },
        )
        .into(),
    )
}

/// `#rrggbb` or `#rrggbbaa`.
pub fn hex_to_color(hex: &str) -> Option<Color> {
    let digits = hex.strip_prefix('#')?;
    if !matches!(digits.len(), 6 | 8) || !digits.is_ascii() {
        return None;
    }

    let channel = |at: usize| {
        digits
            .get(at..at + 2)
            .and_then(|s| u8::from_str_radix(s, 16).ok())
    };

    let alpha = match digits.len() {
        8 => channel(6)?,
        _ => u8::MAX,
    };

    Some(Color::from_rgba8(
        channel(0)?,
        channel(2)?,
        channel(4)?,
        f32::from(alpha) / 255.0,
    ))
}

pub fn is_dark(color: Color) -> bool {
    let brightness = (color.r * 299.0 + color.g * 587.0 + color.b * 114.0) / 1000.0;
    brightness < 0.5
}

/// Raises value and, a little, saturation in HSV space.
pub fn brighten(color: Color, amount: f32) -> Color {
    let mut hsva = Hsva::from_color(to_rgba(color));
    hsva.value = (hsva.value + amount).min(1.0);
    hsva.saturation = (hsva.saturation + amount * 0.2).min(1.0);

    let rgba = palette::Srgba::from_color(hsva);
    Color {
        r: rgba.color.red,
        g: rgba.color.green,
        b: rgba.color.blue,
        a: rgba.alpha,
    }
}

fn to_rgba(color: Color) -> Rgba {
    Rgba {
        alpha: color.a,
        color: Rgb {
            red: color.r,
            green: color.g,
            blue: color.b,
            ..Rgb::default()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_with_and_without_alpha() {
        assert_eq!(hex_to_color("#4ade80"), Some(Color::from_rgb8(0x4a, 0xde, 0x80)));

        let translucent = hex_to_color("#ef444480").unwrap();
        assert_eq!(translucent.a, 128.0 / 255.0);

        assert_eq!(hex_to_color("4ade80"), None);
        assert_eq!(hex_to_color("#zzzzzz"), None);
        assert_eq!(hex_to_color("#4ade8"), None);
    }

    #[test]
    fn brighten_never_darkens() {
        let base = Color::from_rgb8(40, 40, 60);
        let lighter = brighten(base, 0.2);

        assert!(lighter.r + lighter.g + lighter.b > base.r + base.g + base.b);
        assert!(is_dark(base));
    }

    #[test]
    fn default_palette_is_dark() {
        let theme = folio_dark();

        assert_eq!(theme.to_string(), "Folio Dark");
        assert!(is_dark(theme.palette().background));
        assert!(!is_dark(theme.palette().text));
    }
}
