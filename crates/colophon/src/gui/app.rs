use std::mem;
use std::path::PathBuf;
use std::sync::Arc;

use colophon_app::shell::{
    self, Dialog, DialogLevel, Effect, RECOGNIZE_LABEL, RESULT_LABEL, ShellState, Transition,
    UPLOAD_LABEL, WINDOW_TITLE,
};
use colophon_ocr::OcrEngine;
use gpui::prelude::*;
use gpui::*;
use tracing::warn;

use crate::gui::components::action_button;
use crate::gui::theme::AppTheme;

const IMAGE_PANE_MIN: f32 = 600.0;
const PICKER_PROMPT: &str = "选择图片";
const DIALOG_CONFIRM: &str = "确定";

pub struct ColophonApp {
    engine: Arc<dyn OcrEngine>,
    initial_image: Option<PathBuf>,
}

impl ColophonApp {
    pub fn new(engine: Arc<dyn OcrEngine>, initial_image: Option<PathBuf>) -> Self {
        Self {
            engine,
            initial_image,
        }
    }

    pub fn open_window(&self, cx: &mut App) -> anyhow::Result<WindowHandle<MainWindow>> {
        let bounds = Bounds::centered(None, size(px(1200.0), px(800.0)), cx);
        let engine = Arc::clone(&self.engine);
        let initial_image = self.initial_image.clone();

        cx.open_window(
            WindowOptions {
                window_bounds: Some(WindowBounds::Windowed(bounds)),
                titlebar: Some(TitlebarOptions {
                    title: Some(WINDOW_TITLE.into()),
                    ..Default::default()
                }),
                window_min_size: Some(size(
                    px(IMAGE_PANE_MIN + 300.0),
                    px(IMAGE_PANE_MIN + 100.0),
                )),
                ..Default::default()
            },
            move |window, cx| {
                cx.new(|cx| {
                    let theme = AppTheme::from_appearance(window.appearance());
                    let mut view = MainWindow::new(engine, theme);
                    if initial_image.is_some() {
                        let transition = shell::load_image(ShellState::default(), initial_image);
                        view.apply(transition, window, cx);
                    }
                    view
                })
            },
        )
    }
}

pub struct MainWindow {
    state: ShellState,
    engine: Arc<dyn OcrEngine>,
    theme: AppTheme,
    appearance_subscription: Option<Subscription>,
}

impl MainWindow {
    pub fn new(engine: Arc<dyn OcrEngine>, theme: AppTheme) -> Self {
        Self {
            state: ShellState::default(),
            engine,
            theme,
            appearance_subscription: None,
        }
    }

    fn ensure_theme_listener(&mut self, window: &mut Window, cx: &mut Context<Self>) {
        if self.appearance_subscription.is_some() {
            return;
        }
        self.appearance_subscription = Some(cx.observe_window_appearance(
            window,
            |this, window, cx| {
                this.theme = AppTheme::from_appearance(window.appearance());
                cx.notify();
            },
        ));
    }

    fn upload(&mut self, window: &mut Window, cx: &mut Context<Self>) {
        let paths = cx.prompt_for_paths(PathPromptOptions {
            files: true,
            directories: false,
            multiple: false,
            prompt: Some(PICKER_PROMPT.into()),
        });
        cx.spawn_in(window, async move |this, cx| {
            let picked = match paths.await {
                Ok(Ok(paths)) => paths.and_then(|paths| paths.into_iter().next()),
                Ok(Err(err)) => {
                    warn!(error = %err, "file prompt failed");
                    None
                }
                Err(_) => None,
            };
            this.update_in(cx, |this, window, cx| {
                let transition = shell::load_image(mem::take(&mut this.state), picked);
                this.apply(transition, window, cx);
            })
            .ok();
        })
        .detach();
    }

    fn recognize(&mut self, window: &mut Window, cx: &mut Context<Self>) {
        if !shell::can_recognize(&self.state) {
            return;
        }
        let transition = shell::recognize(mem::take(&mut self.state), self.engine.as_ref());
        self.apply(transition, window, cx);
    }

    fn apply(&mut self, transition: Transition, window: &mut Window, cx: &mut Context<Self>) {
        let Transition { state, effects } = transition;
        self.state = state;
        for effect in effects {
            match effect {
                // Image and result panes render straight from the state.
                Effect::ShowImage(_) | Effect::ShowResult(_) => {}
                Effect::Dialog(dialog) => show_dialog(&dialog, window, cx),
            }
        }
        cx.notify();
    }

    fn render_image_pane(&self) -> impl IntoElement {
        let theme = self.theme;
        let content = match &self.state.image {
            Some(path) => img(path.clone())
                .size_full()
                .object_fit(ObjectFit::Contain)
                .into_any_element(),
            None => div().into_any_element(),
        };

        div()
            .flex()
            .flex_1()
            .items_center()
            .justify_center()
            .min_w(px(IMAGE_PANE_MIN))
            .min_h(px(IMAGE_PANE_MIN))
            .overflow_hidden()
            .border_1()
            .border_color(theme.border())
            .bg(theme.surface())
            .child(content)
    }

    fn render_buttons(&self, cx: &mut Context<Self>) -> impl IntoElement {
        let upload_target = cx.entity();
        let recognize_target = cx.entity();

        div()
            .flex()
            .gap(px(8.0))
            .child(action_button(
                "upload-image",
                UPLOAD_LABEL,
                self.theme,
                true,
                move |window, cx| upload_target.update(cx, |this, cx| this.upload(window, cx)),
            ))
            .child(action_button(
                "recognize-page",
                RECOGNIZE_LABEL,
                self.theme,
                shell::can_recognize(&self.state),
                move |window, cx| {
                    recognize_target.update(cx, |this, cx| this.recognize(window, cx))
                },
            ))
    }

    fn render_result_pane(&self) -> impl IntoElement {
        let theme = self.theme;
        let lines = self
            .state
            .result
            .as_deref()
            .unwrap_or("")
            .lines()
            .map(|line| div().min_h(px(20.0)).child(SharedString::from(line.to_string())));

        div()
            .flex()
            .flex_col()
            .flex_1()
            .gap(px(6.0))
            .child(div().child(RESULT_LABEL))
            .child(
                div()
                    .id("result-text")
                    .flex_1()
                    .p(px(8.0))
                    .overflow_y_scroll()
                    .border_1()
                    .border_color(theme.border())
                    .bg(theme.surface())
                    .children(lines),
            )
    }
}

impl Render for MainWindow {
    fn render(&mut self, window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        self.ensure_theme_listener(window, cx);
        let theme = self.theme;

        div()
            .flex()
            .size_full()
            .gap(px(12.0))
            .p(px(12.0))
            .bg(theme.background())
            .text_color(theme.text_primary())
            .child(
                div()
                    .flex()
                    .flex_col()
                    .flex_1()
                    .gap(px(8.0))
                    .child(self.render_image_pane())
                    .child(self.render_buttons(cx)),
            )
            .child(self.render_result_pane())
    }
}

fn show_dialog(dialog: &Dialog, window: &mut Window, cx: &mut App) {
    let level = match dialog.level {
        DialogLevel::Warning => PromptLevel::Warning,
        DialogLevel::Error => PromptLevel::Critical,
    };
    let _ = window.prompt(
        level,
        dialog.title,
        Some(dialog.message.as_str()),
        &[DIALOG_CONFIRM],
        cx,
    );
}
