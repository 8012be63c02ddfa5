use super::{SeriesLike, format_value_tick, label_offset_y};
use crate::style;

use data::StockDataPoint;
use data::chart::crosshair::{self, Hover};
use data::chart::date_to_ms;
use data::chart::scale::{LinearScale, TimeScale, format_time_label};

use iced::advanced::widget::tree::{self, Tree};
use iced::advanced::renderer::{self, Quad};
use iced::advanced::{self, Clipboard, Layout, Shell, Widget, layout};
use iced::theme::palette::Extended;
use iced::widget::canvas;
use iced::{Element, Event, Length, Point, Rectangle, Renderer, Size, Theme, Vector, mouse, window};

pub const MARGIN_TOP: f32 = 20.0;
pub const MARGIN_RIGHT: f32 = 80.0;
pub const MARGIN_BOTTOM: f32 = 30.0;
pub const MARGIN_LEFT: f32 = 60.0;

const TEXT_SIZE: f32 = 11.0;
const CHAR_W: f32 = TEXT_SIZE * 0.64;

const MIN_X_TICK_PX: f32 = 80.0;
const MIN_Y_TICK_PX: f32 = 40.0;
const TICK_LEN: f32 = 6.0;

const MARKER_RADIUS: f32 = 5.0;
const LABEL_OFFSET_X: f32 = 15.0;

const AXIS_TITLE: &str = "Total Invested Amount ($)";

struct State {
    plot_cache: canvas::Cache,
    y_axis_cache: canvas::Cache,
    x_axis_cache: canvas::Cache,
    overlay_cache: canvas::Cache,
    /// Cursor in plot-local coordinates, only while it is over the plot
    hover: Option<Point>,
    last_cache_rev: u64,
}

impl Default for State {
    fn default() -> Self {
        Self {
            plot_cache: canvas::Cache::new(),
            y_axis_cache: canvas::Cache::new(),
            x_axis_cache: canvas::Cache::new(),
            overlay_cache: canvas::Cache::new(),
            hover: None,
            last_cache_rev: 0,
        }
    }
}

impl State {
    fn clear_all_caches(&mut self) {
        self.plot_cache.clear();
        self.y_axis_cache.clear();
        self.x_axis_cache.clear();
        self.overlay_cache.clear();
    }

    /// Returns whether anything changed; strokes fade with the guide, so the plot layer goes too.
    fn set_hover(&mut self, hover: Option<Point>) -> bool {
        if self.hover == hover {
            return false;
        }
        self.hover = hover;
        self.plot_cache.clear();
        self.overlay_cache.clear();
        true
    }
}

/// Multi-series value chart with a time axis, a currency axis and a nearest-point crosshair.
pub struct LineComparison<'a, S> {
    series: &'a [S],
    width: f32,
    height: f32,
    stroke_width: f32,
    version: u64,
}

impl<'a, S> LineComparison<'a, S>
where
    S: SeriesLike,
{
    pub fn new(series: &'a [S], width: f32, height: f32) -> Self {
        Self {
            series,
            width,
            height,
            stroke_width: 2.0,
            version: 0,
        }
    }

    pub fn version(mut self, rev: u64) -> Self {
        self.version = rev;
        self
    }

    fn compute_context(&self, layout: Layout<'_>) -> Option<PlotContext> {
        let ((min_date, max_date), (min_value, max_value)) =
            data::chart::extent(self.series.iter().map(|s| s.points()))?;

        let regions = Regions::from_layout(layout);

        Some(PlotContext {
            regions,
            x: TimeScale::new(
                date_to_ms(min_date),
                date_to_ms(max_date),
                regions.plot.width,
            ),
            y: LinearScale::new(min_value, max_value, regions.plot.height),
        })
    }

    fn resolve_hover(&self, ctx: &PlotContext, local: Point) -> Option<Hover<'a>> {
        let ts_ms = ctx.x.invert(local.x);
        crosshair::resolve(self.series.iter().map(|s| s.points()), ts_ms)
    }
}

impl<'a, S, M> Widget<M, Theme, Renderer> for LineComparison<'a, S>
where
    S: SeriesLike,
{
    fn tag(&self) -> tree::Tag {
        tree::Tag::of::<State>()
    }

    fn state(&self) -> tree::State {
        tree::State::new(State::default())
    }

    fn size(&self) -> Size<Length> {
        Size {
            width: Length::Fixed(self.width),
            height: Length::Fixed(self.height),
        }
    }

    fn layout(
        &mut self,
        _tree: &mut Tree,
        _renderer: &Renderer,
        limits: &layout::Limits,
    ) -> layout::Node {
        let size = limits.resolve(
            Length::Fixed(self.width),
            Length::Fixed(self.height),
            Size::new(self.width, self.height),
        );

        // children: [ plot, y_axis, x_axis ]
        let plot = plot_bounds(size);

        layout::Node::with_children(
            size,
            vec![
                layout::Node::new(plot.size()).move_to(plot.position()),
                layout::Node::new(Size::new(MARGIN_LEFT, plot.height))
                    .move_to(Point::new(0.0, plot.y)),
                layout::Node::new(Size::new(plot.width, MARGIN_BOTTOM))
                    .move_to(Point::new(plot.x, plot.y + plot.height)),
            ],
        )
    }

    fn update(
        &mut self,
        tree: &mut Tree,
        event: &Event,
        layout: Layout<'_>,
        cursor: mouse::Cursor,
        _renderer: &Renderer,
        _clipboard: &mut dyn Clipboard,
        shell: &mut Shell<'_, M>,
        _viewport: &Rectangle,
    ) {
        let state = tree.state.downcast_mut::<State>();

        match event {
            Event::Mouse(mouse::Event::CursorMoved { .. } | mouse::Event::CursorEntered) => {
                let plot = Regions::from_layout(layout).plot;

                let hover = cursor
                    .position_in(layout.bounds())
                    .filter(|p| plot.contains(*p))
                    .map(|p| Point::new(p.x - plot.x, p.y - plot.y));

                if state.set_hover(hover) {
                    shell.request_redraw();
                }
            }
            Event::Mouse(mouse::Event::CursorLeft) => {
                if state.set_hover(None) {
                    shell.request_redraw();
                }
            }
            Event::Window(window::Event::RedrawRequested(_)) => {
                if state.last_cache_rev != self.version {
                    state.clear_all_caches();
                    state.last_cache_rev = self.version;
                }
            }
            _ => {}
        }
    }

    fn draw(
        &self,
        tree: &Tree,
        renderer: &mut Renderer,
        theme: &Theme,
        _style: &renderer::Style,
        layout: Layout<'_>,
        _cursor: mouse::Cursor,
        _viewport: &Rectangle,
    ) {
        use advanced::Renderer as _;

        let state = tree.state.downcast_ref::<State>();
        let Some(ctx) = self.compute_context(layout) else {
            return;
        };

        let bounds = layout.bounds();
        let palette = theme.extended_palette();

        let hover = state
            .hover
            .and_then(|local| self.resolve_hover(&ctx, local));
        let guide_x = hover
            .as_ref()
            .map(|h| ctx.x.map(h.anchor.timestamp_ms()));

        renderer.with_translation(Vector::new(bounds.x, bounds.y), |r| {
            let plot_rect = ctx.plot_rect();

            let plot_geom = state.plot_cache.draw(r, plot_rect.size(), |frame| {
                self.fill_series(frame, &ctx, guide_x);
            });

            r.fill_quad(
                Quad {
                    bounds: Rectangle {
                        x: plot_rect.x,
                        y: plot_rect.y + plot_rect.height,
                        width: plot_rect.width,
                        height: 1.0,
                    },
                    snap: true,
                    ..Default::default()
                },
                style::AXIS_COLOR,
            );
            r.fill_quad(
                Quad {
                    bounds: Rectangle {
                        x: plot_rect.x - 1.0,
                        y: plot_rect.y,
                        width: 1.0,
                        height: plot_rect.height,
                    },
                    snap: true,
                    ..Default::default()
                },
                style::AXIS_COLOR,
            );

            let y_rect = ctx.regions.y_axis;
            let y_geom = state.y_axis_cache.draw(r, y_rect.size(), |frame| {
                fill_y_axis(frame, &ctx);
            });

            let x_rect = ctx.regions.x_axis;
            let x_geom = state.x_axis_cache.draw(r, x_rect.size(), |frame| {
                fill_x_axis(frame, &ctx);
            });

            let overlay_geom = state.overlay_cache.draw(r, bounds.size(), |frame| {
                if let Some(hover) = hover.as_ref() {
                    self.fill_crosshair(frame, &ctx, hover, theme, palette);
                }
            });

            r.with_translation(Vector::new(plot_rect.x, plot_rect.y), |r| {
                use iced::advanced::graphics::geometry::Renderer as _;
                r.draw_geometry(plot_geom);
            });
            r.with_translation(Vector::new(y_rect.x, y_rect.y), |r| {
                use iced::advanced::graphics::geometry::Renderer as _;
                r.draw_geometry(y_geom);
            });
            r.with_translation(Vector::new(x_rect.x, x_rect.y), |r| {
                use iced::advanced::graphics::geometry::Renderer as _;
                r.draw_geometry(x_geom);
            });

            r.with_layer(
                Rectangle {
                    x: 0.0,
                    y: 0.0,
                    width: bounds.width,
                    height: bounds.height,
                },
                |r| {
                    use iced::advanced::graphics::geometry::Renderer as _;
                    r.draw_geometry(overlay_geom);
                },
            );
        });
    }

    fn mouse_interaction(
        &self,
        tree: &Tree,
        _layout: Layout<'_>,
        _cursor: advanced::mouse::Cursor,
        _viewport: &Rectangle,
        _renderer: &Renderer,
    ) -> advanced::mouse::Interaction {
        let state = tree.state.downcast_ref::<State>();

        if state.hover.is_some() {
            advanced::mouse::Interaction::Crosshair
        } else {
            advanced::mouse::Interaction::default()
        }
    }
}

impl<'a, S> LineComparison<'a, S>
where
    S: SeriesLike,
{
    fn fill_series(&self, frame: &mut canvas::Frame, ctx: &PlotContext, guide_x: Option<f32>) {
        for s in self.series {
            let path_pts = ctx.project(s.points());
            let Some((&(x0, y0), rest)) = path_pts.split_first() else {
                continue;
            };

            let path = canvas::Path::new(|b| {
                b.move_to(Point::new(x0, y0));
                for &(x, y) in rest {
                    b.line_to(Point::new(x, y));
                }
            });

            let opacity = stroke_opacity(&path_pts, guide_x);

            frame.stroke(
                &path,
                canvas::Stroke::default()
                    .with_color(s.color().scale_alpha(opacity))
                    .with_width(self.stroke_width),
            );
        }
    }

    fn fill_crosshair(
        &self,
        frame: &mut canvas::Frame,
        ctx: &PlotContext,
        hover: &Hover<'_>,
        theme: &Theme,
        palette: &Extended,
    ) {
        let plot = ctx.plot_rect();
        let guide_x = plot.x + ctx.x.map(hover.anchor.timestamp_ms());

        let guide = canvas::Path::line(
            Point::new(guide_x, plot.y),
            Point::new(guide_x, plot.y + plot.height),
        );
        frame.stroke(&guide, style::dashed_line(theme));

        for (i, (s, marker)) in self.series.iter().zip(&hover.markers).enumerate() {
            let Some(point) = marker else {
                continue;
            };

            let center = Point::new(
                plot.x + ctx.x.map(point.timestamp_ms()),
                plot.y + ctx.y.map(point.value),
            );

            let dot = canvas::Path::circle(center, MARKER_RADIUS);
            frame.fill(&dot, s.color());
            frame.stroke(
                &dot,
                canvas::Stroke::default()
                    .with_color(palette.background.base.color)
                    .with_width(1.5),
            );

            frame.fill_text(canvas::Text {
                content: crosshair::tooltip_text(point),
                position: Point::new(
                    center.x + LABEL_OFFSET_X,
                    center.y + label_offset_y(i, TEXT_SIZE),
                ),
                color: s.color(),
                size: TEXT_SIZE.into(),
                font: style::MONO,
                align_x: iced::Alignment::Start.into(),
                align_y: iced::Alignment::Center.into(),
                ..Default::default()
            });
        }
    }
}

fn fill_y_axis(frame: &mut canvas::Frame, ctx: &PlotContext) {
    let gutter = ctx.regions.y_axis;
    let (ticks, step) = ctx.y.ticks(y_tick_target(gutter.height));

    for tick in ticks {
        let y = ctx.y.map(tick);

        frame.stroke(
            &canvas::Path::line(
                Point::new(gutter.width - TICK_LEN, y),
                Point::new(gutter.width, y),
            ),
            canvas::Stroke::default()
                .with_color(style::AXIS_COLOR)
                .with_width(1.0),
        );

        frame.fill_text(canvas::Text {
            content: format_value_tick(tick, step),
            position: Point::new(gutter.width - TICK_LEN - 2.0, y),
            color: style::AXIS_COLOR,
            size: TEXT_SIZE.into(),
            font: style::MONO,
            align_x: iced::Alignment::End.into(),
            align_y: iced::Alignment::Center.into(),
            ..Default::default()
        });
    }

    frame.with_save(|frame| {
        frame.translate(Vector::new(TEXT_SIZE * 0.5, gutter.height * 0.5));
        frame.rotate(-std::f32::consts::FRAC_PI_2);
        frame.fill_text(canvas::Text {
            content: AXIS_TITLE.to_string(),
            position: Point::ORIGIN,
            color: style::AXIS_COLOR,
            size: TEXT_SIZE.into(),
            align_x: iced::Alignment::Center.into(),
            align_y: iced::Alignment::Center.into(),
            ..Default::default()
        });
    });
}

fn fill_x_axis(frame: &mut canvas::Frame, ctx: &PlotContext) {
    let (ticks, step_ms) = ctx.x.ticks(MIN_X_TICK_PX);
    let width = ctx.regions.x_axis.width;

    let mut last_right = f32::NEG_INFINITY;
    for t in ticks {
        let x = ctx.x.map(t).clamp(0.0, width);

        frame.stroke(
            &canvas::Path::line(Point::new(x, 0.0), Point::new(x, TICK_LEN)),
            canvas::Stroke::default()
                .with_color(style::AXIS_COLOR)
                .with_width(1.0),
        );

        let label = format_time_label(t, step_ms);
        let est_w = (label.len() as f32) * CHAR_W + 8.0;
        if x - est_w * 0.5 <= last_right {
            continue;
        }

        frame.fill_text(canvas::Text {
            content: label,
            position: Point::new(x, TICK_LEN + 2.0 + TEXT_SIZE * 0.5),
            color: style::AXIS_COLOR,
            size: TEXT_SIZE.into(),
            font: style::MONO,
            align_x: iced::Alignment::Center.into(),
            align_y: iced::Alignment::Center.into(),
            ..Default::default()
        });

        last_right = x + est_w * 0.5;
    }
}

impl<'a, S, M> From<LineComparison<'a, S>> for Element<'a, M, Theme, Renderer>
where
    S: SeriesLike,
    M: 'a,
{
    fn from(chart: LineComparison<'a, S>) -> Self {
        Element::new(chart)
    }
}

/// Plot area inside the fixed margins, relative to the widget's origin.
fn plot_bounds(size: Size) -> Rectangle {
    Rectangle {
        x: MARGIN_LEFT,
        y: MARGIN_TOP,
        width: (size.width - MARGIN_LEFT - MARGIN_RIGHT).max(0.0),
        height: (size.height - MARGIN_TOP - MARGIN_BOTTOM).max(0.0),
    }
}

/// Full strength without a guide, otherwise faded along the path.
fn stroke_opacity(path: &[(f32, f32)], guide_x: Option<f32>) -> f32 {
    guide_x.map_or(1.0, |gx| crosshair::fade_opacity(path, gx))
}

fn y_tick_target(plot_height: f32) -> usize {
    ((plot_height / MIN_Y_TICK_PX).floor() as usize).max(2)
}

#[derive(Debug, Clone, Copy)]
struct Regions {
    plot: Rectangle,
    y_axis: Rectangle,
    x_axis: Rectangle,
}

impl Regions {
    fn from_layout(root: Layout<'_>) -> Self {
        let root_bounds = root.bounds();

        let to_local = |r: Rectangle| Rectangle {
            x: r.x - root_bounds.x,
            y: r.y - root_bounds.y,
            width: r.width,
            height: r.height,
        };

        Regions {
            plot: to_local(root.child(0).bounds()),
            y_axis: to_local(root.child(1).bounds()),
            x_axis: to_local(root.child(2).bounds()),
        }
    }
}

struct PlotContext {
    regions: Regions,
    x: TimeScale,
    y: LinearScale,
}

impl PlotContext {
    fn plot_rect(&self) -> Rectangle {
        self.regions.plot
    }

    /// Plot-local pixel path of a series.
    fn project(&self, points: &[StockDataPoint]) -> Vec<(f32, f32)> {
        points
            .iter()
            .map(|p| (self.x.map(p.timestamp_ms()), self.y.map(p.value)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn plot_sits_inside_margins() {
        let plot = plot_bounds(Size::new(1000.0, 500.0));

        assert_eq!(plot.position(), Point::new(60.0, 20.0));
        assert_eq!(plot.size(), Size::new(860.0, 450.0));

        let cramped = plot_bounds(Size::new(100.0, 40.0));
        assert_eq!(cramped.size(), Size::new(0.0, 0.0));
    }

    #[test]
    fn y_ticks_scale_with_plot_height() {
        assert_eq!(y_tick_target(450.0), 11);
        assert_eq!(y_tick_target(10.0), 2);
    }

    #[test]
    fn leaving_the_plot_drops_the_hover() {
        let mut state = State::default();

        assert!(state.set_hover(Some(Point::new(40.0, 12.0))));
        assert!(!state.set_hover(Some(Point::new(40.0, 12.0))));

        assert!(state.set_hover(None));
        assert_eq!(state.hover, None);
        assert!(!state.set_hover(None));
    }

    #[test]
    fn strokes_fade_only_under_a_guide() {
        let path = [(0.0, 0.0), (200.0, 0.0)];

        assert_eq!(stroke_opacity(&path, None), 1.0);
        assert!((stroke_opacity(&path, Some(100.0)) - 0.75).abs() < 1e-6);
        assert!((stroke_opacity(&path, Some(400.0)) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn projected_path_spans_the_plot() {
        let day = |d| NaiveDate::from_ymd_opt(2024, 1, d).unwrap();
        let points = vec![
            StockDataPoint::new(day(1), 9_900.0, "Stock A"),
            StockDataPoint::new(day(3), 10_100.0, "Stock A"),
        ];

        let ctx = PlotContext {
            regions: Regions {
                plot: Rectangle::new(Point::new(60.0, 20.0), Size::new(200.0, 100.0)),
                y_axis: Rectangle::new(Point::new(0.0, 20.0), Size::new(60.0, 100.0)),
                x_axis: Rectangle::new(Point::new(60.0, 120.0), Size::new(200.0, 30.0)),
            },
            x: TimeScale::new(date_to_ms(day(1)), date_to_ms(day(3)), 200.0),
            y: LinearScale::new(9_900.0, 10_100.0, 100.0),
        };

        let path = ctx.project(&points);
        assert_eq!(path, vec![(0.0, 100.0), (200.0, 0.0)]);
    }
}
