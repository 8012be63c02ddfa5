use iced::{
    Alignment, Element, Length, padding,
    widget::{container, mouse_area, opaque},
};

pub mod purchase;

pub use purchase::AddPurchaseForm;

/// Layers `content` over a dimmed `base`; clicking outside the content emits `on_blur`.
pub fn stack_modal<'a, Message>(
    base: impl Into<Element<'a, Message>>,
    content: impl Into<Element<'a, Message>>,
    on_blur: Message,
    padding: padding::Padding,
    alignment: Alignment,
) -> Element<'a, Message>
where
    Message: Clone + 'a,
{
    iced::widget::stack![
        base.into(),
        mouse_area(
            container(opaque(content))
                .width(Length::Fill)
                .height(Length::Fill)
                .padding(padding)
                .align_x(alignment)
                .align_y(alignment)
                .style(crate::style::modal_backdrop)
        )
        .on_press(on_blur)
    ]
    .into()
}
