use gpui::*;

use crate::gui::theme::AppTheme;

/// Push button. A disabled button is dimmed and ignores clicks.
pub fn action_button(
    id: &'static str,
    label: &'static str,
    theme: AppTheme,
    enabled: bool,
    on_click: impl Fn(&mut Window, &mut App) + 'static,
) -> Stateful<Div> {
    let base = div()
        .id(id)
        .flex()
        .flex_1()
        .items_center()
        .justify_center()
        .h(px(36.0))
        .rounded(px(4.0))
        .child(label);

    if enabled {
        let hover = theme.accent_hover();
        base.bg(theme.accent())
            .text_color(theme.on_accent())
            .cursor_pointer()
            .hover(move |style| style.bg(hover))
            .on_click(move |_, window, cx| on_click(window, cx))
    } else {
        base.bg(theme.disabled()).text_color(theme.text_tertiary())
    }
}
