use anyhow::Context;
use choroplethcore::geodata::{
    DatasetSource, GeoDataResolver, GeoDataState, GeometrySource, HttpBoundarySource, Resolution,
};
use choroplethcore::indicators::{
    IndicatorPanel, IndicatorScope, IndicatorSnapshot, IndicatorSource, IndicatorTicket,
    MockIndicatorSource,
};
use choroplethcore::render::{MapRenderer, ScreenPoint};
use choroplethcore::view::{
    page_style, region_style, AccessibilityFlags, InteractionState, PageStyle, StyleTier,
    ViewState,
};
use choroplethcore::IndicatorError;
use config::DashboardConfig;
use iced::{
    event,
    keyboard::{self, key::Named, Key, Modifiers},
    widget::{button, column, container, mouse_area, row, text, Canvas, Column, Container},
    window, Alignment, Background, Border, Color, Element, Event, Length, Point, Subscription,
    Task, Theme,
};
use log::{debug, info, warn};
use map_canvas::{to_color, MapCanvas};
use std::sync::Arc;

mod config;
mod map_canvas;

const CONFIG_PATH: &str = "dashboard.yaml";

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let config = DashboardConfig::load_or_default(CONFIG_PATH)?;

    iced::application(
        move || Dashboard::boot(config.clone()),
        Dashboard::update,
        Dashboard::view,
    )
    .title(application_title)
    .subscription(application_subscription)
    .theme(application_theme)
    .window_size((1440.0, 860.0))
    .run()
    .context("running dashboard window")
}

fn application_title(_: &Dashboard) -> String {
    "Indicadores econômicos do Brasil".into()
}

fn application_subscription(_: &Dashboard) -> Subscription<Message> {
    event::listen_with(keyboard_message)
}

fn keyboard_message(event: Event, status: event::Status, _: window::Id) -> Option<Message> {
    if matches!(status, event::Status::Captured) {
        return None;
    }
    match event {
        Event::Keyboard(keyboard::Event::KeyPressed { key, modifiers, .. }) => {
            key_message(&key, modifiers)
        }
        _ => None,
    }
}

/// Tab and Shift+Tab walk the regions, Enter or Space opens the focused one.
fn key_message(key: &Key, modifiers: Modifiers) -> Option<Message> {
    match key {
        Key::Named(Named::Tab) if modifiers.shift() => Some(Message::FocusPrevious),
        Key::Named(Named::Tab) => Some(Message::FocusNext),
        Key::Named(Named::Enter | Named::Space) => Some(Message::ActivateFocused),
        _ => None,
    }
}

fn application_theme(state: &Dashboard) -> Theme {
    if state.accessibility.high_contrast {
        Theme::Dark
    } else {
        Theme::Light
    }
}

type Resolver = GeoDataResolver<HttpBoundarySource>;

struct Dashboard {
    resolver: Option<Arc<Resolver>>,
    indicators: Arc<MockIndicatorSource>,
    renderer: MapRenderer,
    geo: GeoDataState,
    view: ViewState,
    interaction: InteractionState,
    accessibility: AccessibilityFlags,
    panel: IndicatorPanel,
    cursor: Option<Point>,
}

#[derive(Debug, Clone)]
enum Message {
    GeoResolved(Resolution),
    IndicatorsFetched(IndicatorTicket, Result<IndicatorSnapshot, IndicatorError>),
    ZoomIn,
    ZoomOut,
    RefreshIndicators,
    ShowCountry,
    ToggleLargeText,
    ToggleHighContrast,
    PointerMoved(Point),
    PointerPressed,
    PointerReleased,
    PointerExited,
    FocusNext,
    FocusPrevious,
    ActivateFocused,
}

impl Dashboard {
    fn boot(config: DashboardConfig) -> (Self, Task<Message>) {
        let resolver = match HttpBoundarySource::from_config(&config.map) {
            Ok(source) => {
                info!("resolving boundaries from {}", source.url());
                Some(Arc::new(GeoDataResolver::new(source)))
            }
            Err(err) => {
                warn!("boundary client unavailable, using fallback regions: {}", err);
                None
            }
        };

        let mut state = Dashboard {
            resolver,
            indicators: Arc::new(MockIndicatorSource::new(config.indicator_latency())),
            renderer: MapRenderer::from_config(&config.map),
            geo: GeoDataState::new(),
            view: ViewState::from_config(&config.map),
            interaction: InteractionState::new(),
            accessibility: config.accessibility(),
            panel: IndicatorPanel::new(IndicatorScope::Country),
            cursor: None,
        };

        let geometry = state.resolve_geometry();
        let request = state.panel.begin_refresh();
        let indicators = state.fetch_indicators(request);
        (state, Task::batch([geometry, indicators]))
    }

    fn update(state: &mut Self, message: Message) -> Task<Message> {
        match message {
            Message::GeoResolved(resolution) => {
                state.geo.commit(resolution);
                Task::none()
            }
            Message::IndicatorsFetched(ticket, result) => {
                state.panel.complete(ticket, result);
                Task::none()
            }
            Message::ZoomIn => {
                state.view.zoom_in();
                Task::none()
            }
            Message::ZoomOut => {
                state.view.zoom_out();
                Task::none()
            }
            Message::RefreshIndicators => {
                let request = state.panel.begin_refresh();
                state.fetch_indicators(request)
            }
            Message::ShowCountry => {
                let request = state.panel.select(IndicatorScope::Country);
                state.fetch_indicators(request)
            }
            Message::ToggleLargeText => {
                state.accessibility.toggle_large_text();
                Task::none()
            }
            Message::ToggleHighContrast => {
                state.accessibility.toggle_high_contrast();
                debug!(
                    "region fill now {}",
                    region_style(StyleTier::Default, state.accessibility).fill.to_hex()
                );
                Task::none()
            }
            Message::PointerMoved(point) => {
                state.cursor = Some(point);
                let hit = state.region_under(point);
                state.interaction.hover_to(hit.as_deref());
                Task::none()
            }
            Message::PointerPressed => {
                if let Some(id) = state.cursor.and_then(|point| state.region_under(point)) {
                    state.interaction.pointer_down(&id);
                }
                Task::none()
            }
            Message::PointerReleased => {
                let pressed = state.interaction.pressed().map(str::to_string);
                let released = state.cursor.and_then(|point| state.region_under(point));
                state.interaction.pointer_up();
                match (pressed, released) {
                    (Some(pressed), Some(released)) if pressed == released => {
                        state.select_region(&released)
                    }
                    _ => Task::none(),
                }
            }
            Message::PointerExited => {
                state.cursor = None;
                state.interaction.surface_exit();
                Task::none()
            }
            Message::FocusNext => {
                state.step_focus(true);
                Task::none()
            }
            Message::FocusPrevious => {
                state.step_focus(false);
                Task::none()
            }
            Message::ActivateFocused => match state.interaction.hovered().map(str::to_string) {
                Some(focused) => state.select_region(&focused),
                None => Task::none(),
            },
        }
    }

    fn view(state: &Self) -> Element<'_, Message> {
        let page = page_style(state.accessibility);

        let header = row![
            column![
                text("Indicadores econômicos do Brasil")
                    .size(page.heading_size * 1.4)
                    .color(to_color(page.text)),
                text("Mapa por estados (contornos internos) + painel de dados.")
                    .size(page.body_size)
                    .color(to_color(page.muted_text)),
            ]
            .spacing(6)
            .width(Length::Fill),
            toggle_button("Fonte grande", state.accessibility.large_text, Message::ToggleLargeText),
            toggle_button(
                "Alto contraste",
                state.accessibility.high_contrast,
                Message::ToggleHighContrast
            ),
        ]
        .spacing(12)
        .align_y(Alignment::Center);

        let layout = column![
            header,
            row![state.map_card(&page), state.panel_card(&page)]
                .spacing(32)
                .align_y(Alignment::Start),
            text("© Indicadores do Brasil — MVP. Dados demonstrativos.")
                .size(page.body_size * 0.85)
                .color(to_color(page.muted_text)),
        ]
        .spacing(24)
        .padding(32);

        let background = to_color(page.background);
        Container::new(layout)
            .width(Length::Fill)
            .height(Length::Fill)
            .style(move |_| container::Style {
                background: Some(Background::Color(background)),
                ..container::Style::default()
            })
            .into()
    }

    fn map_card(&self, page: &PageStyle) -> Element<'_, Message> {
        let scene = self.renderer.render(
            self.geo.dataset(),
            &self.view,
            &self.interaction,
            self.accessibility,
        );
        let (width, height) = (scene.width as f32, scene.height as f32);
        let hint = if scene.is_placeholder() {
            ""
        } else {
            "Clique em um estado ou use Tab e Enter para ver seus dados."
        };

        let caption = match self.geo.dataset().map(|dataset| dataset.source()) {
            Some(DatasetSource::Remote) => "Brasil · estados",
            Some(DatasetSource::Fallback) => "Brasil · regiões (modo offline)",
            None => "Brasil",
        };
        let hovered = self
            .interaction
            .hovered()
            .and_then(|id| self.geo.dataset().and_then(|dataset| dataset.region(id)))
            .map(|region| format!("Ver dados de {}", region.accessible_label()))
            .unwrap_or_default();

        let toolbar = row![
            text(caption)
                .size(page.body_size * 0.85)
                .color(to_color(page.muted_text))
                .width(Length::Fill),
            button(text("−"))
                .on_press_maybe(self.view.can_zoom_out().then_some(Message::ZoomOut))
                .padding(8),
            button(text("+"))
                .on_press_maybe(self.view.can_zoom_in().then_some(Message::ZoomIn))
                .padding(8),
        ]
        .spacing(8)
        .align_y(Alignment::Center);

        let canvas = Canvas::new(MapCanvas::new(scene, page.surface, page.text))
            .width(Length::Fixed(width))
            .height(Length::Fixed(height));
        let surface = mouse_area(canvas)
            .on_move(Message::PointerMoved)
            .on_press(Message::PointerPressed)
            .on_release(Message::PointerReleased)
            .on_exit(Message::PointerExited);

        card(
            column![
                toolbar,
                surface,
                text(hovered)
                    .size(page.body_size)
                    .color(to_color(page.text)),
                text(hint)
                    .size(page.body_size * 0.85)
                    .color(to_color(page.muted_text)),
            ]
            .spacing(10)
            .into(),
            page,
        )
    }

    fn panel_card(&self, page: &PageStyle) -> Element<'_, Message> {
        let refresh_label = if self.panel.is_loading() {
            "Carregando…"
        } else {
            "Atualizar"
        };
        let mut title_row = row![text(self.panel.title())
            .size(page.heading_size)
            .color(to_color(page.text))
            .width(Length::Fill)]
        .spacing(8)
        .align_y(Alignment::Center);
        if self.panel.scope() != &IndicatorScope::Country {
            title_row = title_row.push(button(text("Ver Brasil")).on_press(Message::ShowCountry));
        }
        title_row = title_row.push(button(text(refresh_label)).on_press(Message::RefreshIndicators));

        let body: Column<'_, Message> = match self.panel.rows() {
            Some(rows) => rows.into_iter().fold(Column::new().spacing(12), |col, stat| {
                let value_size = if stat.emphasized {
                    page.emphasized_value_size
                } else {
                    page.value_size
                };
                col.push(stat_tile(
                    row![
                        column![
                            text(stat.label)
                                .size(page.body_size * 1.1)
                                .color(to_color(page.text)),
                            text(stat.description)
                                .size(page.body_size * 0.85)
                                .color(to_color(page.muted_text)),
                        ]
                        .width(Length::Fill),
                        text(stat.value)
                            .size(value_size)
                            .color(to_color(page.text)),
                    ]
                    .align_y(Alignment::Center)
                    .into(),
                    page,
                ))
            }),
            None => (0..5).fold(Column::new().spacing(12), |col, _| {
                col.push(stat_tile(text("").height(Length::Fixed(40.0)).into(), page))
            }),
        };

        let mut content = column![title_row, body].spacing(16);
        if let Some(updated) = self.panel.updated_at_label() {
            content = content.push(
                text(updated)
                    .size(page.body_size * 0.75)
                    .color(to_color(page.muted_text)),
            );
        }

        card(content.width(Length::Fixed(480.0)).into(), page)
    }

    fn resolve_geometry(&mut self) -> Task<Message> {
        let ticket = self.geo.begin();
        match self.resolver.clone() {
            Some(resolver) => Task::perform(
                async move { resolver.resolve_for(ticket).await },
                Message::GeoResolved,
            ),
            None => {
                let dataset = Arc::new(GeometrySource::dataset());
                self.geo.commit(Resolution::completed(ticket, dataset));
                Task::none()
            }
        }
    }

    fn step_focus(&mut self, forward: bool) {
        let Some(dataset) = self.geo.dataset() else {
            return;
        };
        let order = dataset.region_ids();
        if forward {
            self.interaction.focus_next(&order);
        } else {
            self.interaction.focus_previous(&order);
        }
    }

    fn select_region(&mut self, region_id: &str) -> Task<Message> {
        let Some(source) = self.geo.dataset().map(|dataset| dataset.source()) else {
            return Task::none();
        };
        let request = self
            .panel
            .select(IndicatorScope::for_region(source, region_id));
        self.fetch_indicators(request)
    }

    fn fetch_indicators(&self, request: (IndicatorTicket, IndicatorScope)) -> Task<Message> {
        let (ticket, scope) = request;
        let source = self.indicators.clone();
        Task::perform(async move { source.fetch(scope).await }, move |result| {
            Message::IndicatorsFetched(ticket, result)
        })
    }

    fn region_under(&self, point: Point) -> Option<String> {
        let dataset = self.geo.dataset()?;
        self.renderer
            .region_at(
                dataset,
                &self.view,
                ScreenPoint::new(point.x as f64, point.y as f64),
            )
            .map(str::to_string)
    }
}

impl Drop for Dashboard {
    fn drop(&mut self) {
        self.geo.teardown();
    }
}

fn toggle_button(label: &str, pressed: bool, message: Message) -> Element<'_, Message> {
    let style: fn(&Theme, button::Status) -> button::Style = if pressed {
        button::primary
    } else {
        button::secondary
    };
    button(text(label)).on_press(message).style(style).padding(10).into()
}

fn card<'a>(content: Element<'a, Message>, page: &PageStyle) -> Element<'a, Message> {
    let surface = to_color(page.surface);
    let edge = to_color(page.muted_text);
    container(content)
        .padding(20)
        .style(move |_| container::Style {
            background: Some(Background::Color(surface)),
            border: Border {
                color: Color { a: 0.3, ..edge },
                width: 1.0,
                radius: 24.0.into(),
            },
            ..container::Style::default()
        })
        .into()
}

fn stat_tile<'a>(content: Element<'a, Message>, page: &PageStyle) -> Element<'a, Message> {
    let edge = to_color(page.muted_text);
    container(content)
        .padding([12, 16])
        .width(Length::Fill)
        .style(move |_| container::Style {
            border: Border {
                color: Color { a: 0.3, ..edge },
                width: 1.0,
                radius: 16.0.into(),
            },
            ..container::Style::default()
        })
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tab_walks_regions_in_both_directions() {
        let tab = Key::Named(Named::Tab);
        assert!(matches!(
            key_message(&tab, Modifiers::default()),
            Some(Message::FocusNext)
        ));
        assert!(matches!(
            key_message(&tab, Modifiers::SHIFT),
            Some(Message::FocusPrevious)
        ));
    }

    #[test]
    fn enter_and_space_open_the_focused_region() {
        for named in [Named::Enter, Named::Space] {
            assert!(matches!(
                key_message(&Key::Named(named), Modifiers::default()),
                Some(Message::ActivateFocused)
            ));
        }
        assert!(key_message(&Key::Character("a".into()), Modifiers::default()).is_none());
    }
}
