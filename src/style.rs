use iced::widget::{canvas, container, text};
use iced::{Background, Border, Color, Font, Theme};

pub const MONO: Font = Font::MONOSPACE;

/// Axis lines, tick labels and the crosshair guide.
pub const AXIS_COLOR: Color = Color::from_rgb(
    0x71 as f32 / 255.0,
    0x80 as f32 / 255.0,
    0x96 as f32 / 255.0,
);

pub fn dashed_line(theme: &Theme) -> canvas::Stroke<'static> {
    let palette = theme.extended_palette();

    canvas::Stroke {
        line_dash: canvas::LineDash {
            segments: &[3.0, 3.0],
            offset: 0,
        },
        ..canvas::Stroke::default()
            .with_color(palette.background.strongest.color.scale_alpha(0.8))
            .with_width(1.0)
    }
}

pub fn dashboard(theme: &Theme) -> container::Style {
    let palette = theme.extended_palette();

    container::Style {
        background: Some(palette.background.weak.color.into()),
        text_color: Some(palette.background.weak.text),
        border: Border {
            radius: 8.0.into(),
            ..Border::default()
        },
        ..Default::default()
    }
}

pub fn sidebar(theme: &Theme) -> container::Style {
    let palette = theme.extended_palette();

    container::Style {
        background: Some(palette.background.base.color.into()),
        text_color: Some(palette.background.base.text),
        border: Border {
            width: 1.0,
            color: palette.background.strong.color,
            ..Border::default()
        },
        ..Default::default()
    }
}

pub fn card(theme: &Theme) -> container::Style {
    let palette = theme.extended_palette();

    container::Style {
        background: Some(palette.background.weakest.color.into()),
        text_color: Some(palette.background.weakest.text),
        border: Border {
            width: 1.0,
            color: palette.background.strong.color,
            radius: 6.0.into(),
        },
        ..Default::default()
    }
}

pub fn chart_modal(theme: &Theme) -> container::Style {
    let palette = theme.extended_palette();

    container::Style {
        background: Some(palette.background.weak.color.into()),
        text_color: Some(palette.background.weak.text),
        border: Border {
            width: 1.0,
            color: palette.secondary.weak.color,
            radius: 6.0.into(),
        },
        ..Default::default()
    }
}

pub fn modal_backdrop(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Color::BLACK.scale_alpha(0.5).into()),
        ..Default::default()
    }
}

pub fn tab_strip(theme: &Theme) -> container::Style {
    let palette = theme.extended_palette();

    container::Style {
        background: Some(palette.background.base.color.into()),
        border: Border {
            radius: 24.0.into(),
            ..Border::default()
        },
        ..Default::default()
    }
}

pub fn tab_indicator(theme: &Theme) -> Background {
    let base = theme.extended_palette().background.strong.color;

    if data::config::theme::is_dark(base) {
        data::config::theme::brighten(base, 0.08).into()
    } else {
        base.into()
    }
}

pub fn legend_dot(color: Color) -> impl Fn(&Theme) -> container::Style {
    move |_theme| container::Style {
        background: Some(color.into()),
        border: Border {
            radius: 8.0.into(),
            ..Border::default()
        },
        ..Default::default()
    }
}

pub fn error_text(theme: &Theme) -> text::Style {
    text::Style {
        color: Some(theme.extended_palette().danger.base.color),
    }
}

pub fn muted_text(theme: &Theme) -> text::Style {
    text::Style {
        color: Some(theme.extended_palette().background.strongest.color),
    }
}

pub mod button {
    use iced::widget::button::{Status, Style};
    use iced::{Border, Theme};

    pub fn transparent(theme: &Theme, status: Status, is_active: bool) -> Style {
        let palette = theme.extended_palette();

        Style {
            text_color: palette.background.base.text,
            border: Border {
                radius: 4.0.into(),
                ..Default::default()
            },
            background: match status {
                Status::Active if is_active => Some(palette.background.weak.color.into()),
                Status::Hovered | Status::Pressed => Some(palette.background.weak.color.into()),
                _ => None,
            },
            ..Default::default()
        }
    }

    /// Range tabs: no background of their own, the sliding indicator sits beneath.
    pub fn tab(theme: &Theme, status: Status, is_active: bool) -> Style {
        let palette = theme.extended_palette();

        let text_color = if is_active || matches!(status, Status::Hovered) {
            palette.background.base.text
        } else {
            palette.background.strongest.color
        };

        Style {
            text_color,
            background: None,
            ..Default::default()
        }
    }

    pub fn primary(theme: &Theme, status: Status) -> Style {
        let palette = theme.extended_palette();

        let pair = match status {
            Status::Hovered | Status::Pressed => palette.primary.strong,
            Status::Disabled => palette.primary.weak,
            Status::Active => palette.primary.base,
        };

        Style {
            text_color: pair.text,
            background: Some(pair.color.into()),
            border: Border {
                radius: 4.0.into(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    pub fn danger(theme: &Theme, status: Status) -> Style {
        let palette = theme.extended_palette();

        let pair = match status {
            Status::Hovered | Status::Pressed => palette.danger.strong,
            _ => palette.danger.base,
        };

        Style {
            text_color: pair.text,
            background: Some(pair.color.into()),
            border: Border {
                radius: 4.0.into(),
                ..Default::default()
            },
            ..Default::default()
        }
    }
}
