use iced::advanced::layout::{self, Layout};
use iced::advanced::renderer::{self, Quad};
use iced::advanced::widget::{self, Operation, Tree};
use iced::advanced::{Clipboard, Shell, Widget};
use iced::time::{Duration, Instant};
use iced::widget::{Row, button, text};
use iced::{
    Border, Element, Event, Length, Point, Rectangle, Renderer, Size, Theme, mouse, window,
};

use data::DateRange;

use crate::style;

pub const SLIDE_DURATION: Duration = Duration::from_millis(300);

/// How far the highlight extends past each side of its tab.
const SLIDER_OVERHANG: f32 = 10.0;
const TAB_SPACING: f32 = 24.0;

/// A row of range tabs with a highlight that slides under the active one.
pub struct RangeTabs<'a, Message> {
    content: Element<'a, Message>,
    active: usize,
}

impl<'a, Message> RangeTabs<'a, Message>
where
    Message: 'a + Clone,
{
    pub fn new(active: DateRange, on_select: impl Fn(DateRange) -> Message) -> Self {
        let tabs = DateRange::all().map(|range| {
            let is_active = range == active;

            button(text(range.to_string()).font(style::MONO).size(13))
                .padding([4, 10])
                .style(move |theme, status| style::button::tab(theme, status, is_active))
                .on_press(on_select(range))
                .into()
        });

        Self {
            content: Row::with_children(tabs).spacing(TAB_SPACING).padding([4, 16]).into(),
            active: active.index(),
        }
    }
}

#[derive(Debug)]
struct State {
    target: Option<Rectangle>,
    from: Rectangle,
    current: Option<Rectangle>,
    started: Option<Instant>,
}

impl Default for State {
    fn default() -> Self {
        Self {
            target: None,
            from: Rectangle::new(Point::ORIGIN, Size::ZERO),
            current: None,
            started: None,
        }
    }
}

impl State {
    /// Starts a slide towards `target`; the very first placement snaps.
    fn retarget(&mut self, target: Rectangle, now: Instant) {
        if self.target == Some(target) {
            return;
        }

        match self.current {
            Some(current) => {
                self.from = current;
                self.started = Some(now);
            }
            None => {
                self.current = Some(target);
                self.started = None;
            }
        }
        self.target = Some(target);
    }

    /// Moves the highlight for `now`, returning whether the slide is still running.
    fn advance(&mut self, now: Instant) -> bool {
        let (Some(started), Some(target)) = (self.started, self.target) else {
            return false;
        };

        let t = (now.saturating_duration_since(started).as_secs_f32()
            / SLIDE_DURATION.as_secs_f32())
        .clamp(0.0, 1.0);

        self.current = Some(lerp(self.from, target, ease_in_out(t)));

        if t >= 1.0 {
            self.started = None;
            false
        } else {
            true
        }
    }
}

/// Highlight bounds relative to the tab strip.
fn slider_bounds(tab: Rectangle, container: Rectangle) -> Rectangle {
    Rectangle {
        x: tab.x - container.x - SLIDER_OVERHANG,
        y: tab.y - container.y,
        width: tab.width + SLIDER_OVERHANG * 2.0,
        height: tab.height,
    }
}

/// Cubic ease-in-out.
fn ease_in_out(t: f32) -> f32 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

fn lerp(a: Rectangle, b: Rectangle, t: f32) -> Rectangle {
    let mix = |x: f32, y: f32| x + (y - x) * t;

    Rectangle {
        x: mix(a.x, b.x),
        y: mix(a.y, b.y),
        width: mix(a.width, b.width),
        height: mix(a.height, b.height),
    }
}

impl<Message> Widget<Message, Theme, Renderer> for RangeTabs<'_, Message> {
    fn size(&self) -> Size<Length> {
        self.content.as_widget().size()
    }

    fn layout(
        &mut self,
        tree: &mut Tree,
        renderer: &Renderer,
        limits: &layout::Limits,
    ) -> layout::Node {
        self.content
            .as_widget_mut()
            .layout(&mut tree.children[0], renderer, limits)
    }

    fn tag(&self) -> widget::tree::Tag {
        widget::tree::Tag::of::<State>()
    }

    fn state(&self) -> widget::tree::State {
        widget::tree::State::new(State::default())
    }

    fn children(&self) -> Vec<Tree> {
        vec![Tree::new(&self.content)]
    }

    fn diff(&self, tree: &mut Tree) {
        tree.diff_children(std::slice::from_ref(&self.content));
    }

    fn operate(
        &mut self,
        tree: &mut Tree,
        layout: Layout<'_>,
        renderer: &Renderer,
        operation: &mut dyn Operation,
    ) {
        operation.container(None, layout.bounds());

        self.content
            .as_widget_mut()
            .operate(&mut tree.children[0], layout, renderer, operation);
    }

    fn update(
        &mut self,
        tree: &mut Tree,
        event: &Event,
        layout: Layout<'_>,
        cursor: mouse::Cursor,
        renderer: &Renderer,
        clipboard: &mut dyn Clipboard,
        shell: &mut Shell<'_, Message>,
        viewport: &Rectangle,
    ) {
        if let Event::Window(window::Event::RedrawRequested(now)) = event {
            let state = tree.state.downcast_mut::<State>();

            if let Some(tab) = layout.children().nth(self.active) {
                state.retarget(slider_bounds(tab.bounds(), layout.bounds()), *now);
            }

            if state.advance(*now) {
                shell.request_redraw();
            }
        }

        self.content.as_widget_mut().update(
            &mut tree.children[0],
            event,
            layout,
            cursor,
            renderer,
            clipboard,
            shell,
            viewport,
        );
    }

    fn draw(
        &self,
        tree: &Tree,
        renderer: &mut Renderer,
        theme: &Theme,
        style: &renderer::Style,
        layout: Layout<'_>,
        cursor: mouse::Cursor,
        viewport: &Rectangle,
    ) {
        use iced::advanced::Renderer as _;

        let state = tree.state.downcast_ref::<State>();
        let container = layout.bounds();

        if let Some(slider) = state.current {
            renderer.fill_quad(
                Quad {
                    bounds: Rectangle {
                        x: container.x + slider.x,
                        y: container.y + slider.y,
                        ..slider
                    },
                    border: Border {
                        radius: (slider.height * 0.5).into(),
                        ..Border::default()
                    },
                    ..Default::default()
                },
                style::tab_indicator(theme),
            );
        }

        self.content.as_widget().draw(
            &tree.children[0],
            renderer,
            theme,
            style,
            layout,
            cursor,
            viewport,
        );
    }

    fn mouse_interaction(
        &self,
        tree: &Tree,
        layout: Layout<'_>,
        cursor: mouse::Cursor,
        viewport: &Rectangle,
        renderer: &Renderer,
    ) -> mouse::Interaction {
        self.content.as_widget().mouse_interaction(
            &tree.children[0],
            layout,
            cursor,
            viewport,
            renderer,
        )
    }
}

impl<'a, Message> From<RangeTabs<'a, Message>> for Element<'a, Message>
where
    Message: 'a,
{
    fn from(tabs: RangeTabs<'a, Message>) -> Self {
        Element::new(tabs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x: f32, y: f32, w: f32, h: f32) -> Rectangle {
        Rectangle::new(Point::new(x, y), Size::new(w, h))
    }

    #[test]
    fn slider_overhangs_tab_relative_to_container() {
        let container = rect(100.0, 50.0, 400.0, 32.0);
        let tab = rect(180.0, 54.0, 30.0, 24.0);

        assert_eq!(slider_bounds(tab, container), rect(70.0, 4.0, 50.0, 24.0));
    }

    #[test]
    fn easing_is_symmetric_and_pinned() {
        assert_eq!(ease_in_out(0.0), 0.0);
        assert_eq!(ease_in_out(1.0), 1.0);
        assert!((ease_in_out(0.5) - 0.5).abs() < 1e-6);
        assert!((ease_in_out(0.25) + ease_in_out(0.75) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn first_placement_snaps_then_slides() {
        let start = Instant::now();
        let first = rect(0.0, 0.0, 40.0, 24.0);
        let second = rect(100.0, 0.0, 60.0, 24.0);

        let mut state = State::default();
        state.retarget(first, start);
        assert!(!state.advance(start));
        assert_eq!(state.current, Some(first));

        state.retarget(second, start);
        assert!(state.advance(start + SLIDE_DURATION / 2));
        let midway = state.current.unwrap();
        assert!(midway.x > first.x && midway.x < second.x);

        assert!(!state.advance(start + SLIDE_DURATION));
        assert_eq!(state.current, Some(second));
    }

    #[test]
    fn same_target_does_not_restart() {
        let start = Instant::now();
        let target = rect(10.0, 0.0, 40.0, 24.0);

        let mut state = State::default();
        state.retarget(target, start);
        state.retarget(target, start + SLIDE_DURATION);

        assert_eq!(state.started, None);
        assert_eq!(state.current, Some(target));
    }
}
