use crate::catalog::{FeedSource, LoadError, spawn_load};
use crate::config::Config;
use crate::grouping;
use crate::route::Route;
use crate::view::{self, Card, HomeView, ListingKind, ListingView, Tile, ViewModel};
use crate::{AppState, Catalog, statics};
use eframe::egui;
use std::sync::mpsc::{self, TryRecvError};
use std::time::Duration;

const TILE_SIZE: [f32; 2] = [300.0, 90.0];
const TASKBAR_SIZE: [f32; 2] = [140.0, 120.0];
const CARD_WIDTH: f32 = 180.0;
const CARD_IMAGE: [f32; 2] = [160.0, 120.0];
const BANNER_IMAGE: [f32; 2] = [240.0, 180.0];

pub fn run_gui(config: Config) -> eframe::Result {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1280.0, 900.0]),
        ..Default::default()
    };
    let title = format!("{} {}", statics::EN_APP_TITLE, env!("CARGO_PKG_VERSION"));
    eframe::run_native(
        &title,
        options,
        Box::new(move |cc| {
            egui_extras::install_image_loaders(&cc.egui_ctx);
            cc.egui_ctx.set_visuals(if config.theme_dark {
                egui::Visuals::dark()
            } else {
                egui::Visuals::light()
            });
            Ok(Box::new(CatalogApp::new(config)))
        }),
    )
}

/// Events collected while painting and applied once the frame's borrows end.
#[derive(Debug, Clone, PartialEq)]
enum UiAction {
    Navigate(String),
    ToggleCondensed(String),
    ToggleSection(String),
    SubmitSearch,
    Back,
    Forward,
    OpenFeed,
}

/// The eframe shell around [`AppState`]: owns the pending feed load and the
/// window chrome (menus, status, errors).
struct CatalogApp {
    state: AppState,
    feed: FeedSource,
    loader: Option<mpsc::Receiver<Result<Catalog, LoadError>>>,
    nav_collections: Vec<Tile>,
    status: String,
    last_error: Option<String>,
    about_open: bool,
    theme_dark: bool,
}

impl CatalogApp {
    fn new(config: Config) -> Self {
        let state = AppState::new(&config.initial_location, config.related.build());
        let loader = Some(spawn_load(config.feed.clone()));
        Self {
            state,
            feed: config.feed,
            loader,
            nav_collections: Vec::new(),
            status: statics::EN_LOADING.to_string(),
            last_error: None,
            about_open: false,
            theme_dark: config.theme_dark,
        }
    }

    fn poll_loader(&mut self, ctx: &egui::Context) {
        let Some(rx) = self.loader.as_ref() else {
            return;
        };
        match rx.try_recv() {
            Ok(Ok(catalog)) => {
                self.loader = None;
                self.status = format!("Loaded {} items from {}", catalog.len(), self.feed);
                self.last_error = None;
                self.nav_collections = view::tiles(&grouping::navbar_collections(catalog.items()));
                self.state.set_catalog(catalog);
            }
            Ok(Err(e)) => {
                self.loader = None;
                self.fail_load(e);
            }
            Err(TryRecvError::Disconnected) => {
                self.loader = None;
                self.fail_load(LoadError::Disconnected);
            }
            Err(TryRecvError::Empty) => {
                ctx.request_repaint_after(Duration::from_millis(100));
            }
        }
    }

    fn fail_load(&mut self, e: LoadError) {
        let err = anyhow::Error::from(e).context(statics::EN_LOAD_FAILED);
        tracing::error!("{err:#}");
        self.status.clear();
        self.last_error = Some(format!("{err:#}"));
    }

    fn can_open_feed(&self) -> bool {
        self.loader.is_none() && self.state.catalog().is_none()
    }

    fn open_feed(&mut self) {
        if !self.can_open_feed() {
            return;
        }
        let Some(path) = rfd::FileDialog::new()
            .add_filter(statics::EN_FEED_FILTER_NAME, statics::EN_FEED_FILTER_EXTENSIONS)
            .pick_file()
        else {
            return;
        };
        self.feed = FeedSource::Path(path);
        self.loader = Some(spawn_load(self.feed.clone()));
        self.status = statics::EN_LOADING.to_string();
        self.last_error = None;
    }

    fn apply(&mut self, actions: Vec<UiAction>) {
        for action in actions {
            match action {
                UiAction::Navigate(location) => self.state.navigate_location(&location),
                UiAction::ToggleCondensed(name) => self.state.toggle_condensed(&name),
                UiAction::ToggleSection(name) => self.state.toggle_section(&name),
                UiAction::SubmitSearch => {
                    self.state.submit_search();
                }
                UiAction::Back => {
                    self.state.back();
                }
                UiAction::Forward => {
                    self.state.forward();
                }
                UiAction::OpenFeed => self.open_feed(),
            }
        }
    }

    /// Clickable image + text row. Same look as a selectable label.
    fn selectable_tile(
        ui: &mut egui::Ui,
        selected: bool,
        image: &str,
        text: &str,
        size: [f32; 2],
    ) -> egui::Response {
        let (rect, response) =
            ui.allocate_exact_size(egui::vec2(size[0], size[1]), egui::Sense::click());
        let response = response.on_hover_cursor(egui::CursorIcon::PointingHand);

        let visuals = ui.style().interact_selectable(&response, selected);
        if ui.is_rect_visible(rect) {
            ui.painter()
                .rect_filled(rect, visuals.corner_radius, visuals.bg_fill);
            ui.painter().rect_stroke(
                rect,
                visuals.corner_radius,
                visuals.bg_stroke,
                egui::StrokeKind::Inside,
            );

            let inner = rect.shrink(6.0);
            let vertical = size[1] > size[0] * 0.7;
            let (image_rect, text_pos, align) = if vertical {
                let image_rect = egui::Rect::from_min_size(
                    inner.min,
                    egui::vec2(inner.width(), inner.height() - 20.0),
                );
                (
                    image_rect,
                    egui::pos2(inner.center().x, inner.bottom() - 8.0),
                    egui::Align2::CENTER_CENTER,
                )
            } else {
                let image_rect = egui::Rect::from_min_size(
                    inner.min,
                    egui::vec2(inner.height() * 4.0 / 3.0, inner.height()),
                );
                (
                    image_rect,
                    egui::pos2(image_rect.right() + 12.0, inner.center().y),
                    egui::Align2::LEFT_CENTER,
                )
            };

            if !image.is_empty() {
                egui::Image::new(image)
                    .maintain_aspect_ratio(true)
                    .paint_at(ui, image_rect);
            }

            let font_id = egui::TextStyle::Button.resolve(ui.style());
            ui.painter()
                .text(text_pos, align, text, font_id, visuals.text_color());
        }

        response
    }

    fn paint_card(ui: &mut egui::Ui, card: &Card) {
        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.set_width(CARD_WIDTH);
            ui.vertical_centered(|ui| {
                if !card.image.is_empty() {
                    ui.add(
                        egui::Image::new(card.image.as_str())
                            .fit_to_exact_size(egui::vec2(CARD_IMAGE[0], CARD_IMAGE[1])),
                    );
                }
                ui.label(egui::RichText::new(&card.label).color(rgb(card.color)));
            });
        });
    }

    fn paint_cards<'a>(ui: &mut egui::Ui, cards: impl IntoIterator<Item = &'a Card>) {
        ui.horizontal_wrapped(|ui| {
            for card in cards {
                Self::paint_card(ui, card);
            }
        });
    }

    fn paint_tile_column(
        ui: &mut egui::Ui,
        heading: &str,
        tiles: &[Tile],
        actions: &mut Vec<UiAction>,
    ) {
        ui.heading(heading);
        ui.separator();
        for tile in tiles {
            let resp = Self::selectable_tile(ui, false, &tile.image, &tile.name, TILE_SIZE);
            if resp.clicked() {
                actions.push(UiAction::Navigate(tile.location.clone()));
            }
        }
    }

    fn paint_home(ui: &mut egui::Ui, home: &HomeView, actions: &mut Vec<UiAction>) {
        ui.columns(3, |columns| {
            Self::paint_tile_column(
                &mut columns[0],
                statics::EN_HEADING_CASES,
                &home.cases,
                actions,
            );
            Self::paint_tile_column(
                &mut columns[1],
                statics::EN_HEADING_OTHERS,
                &home.others,
                actions,
            );
            Self::paint_tile_column(
                &mut columns[2],
                statics::EN_HEADING_SOUVENIRS,
                &home.souvenirs,
                actions,
            );
        });
    }

    fn paint_listing(
        ui: &mut egui::Ui,
        listing: &ListingView,
        state: &AppState,
        actions: &mut Vec<UiAction>,
    ) {
        ui.vertical_centered(|ui| {
            if let Some(banner) = &listing.banner {
                ui.add(
                    egui::Image::new(banner.as_str())
                        .fit_to_exact_size(egui::vec2(BANNER_IMAGE[0], BANNER_IMAGE[1])),
                );
            }
            match listing.kind {
                ListingKind::Search => ui.heading(format!(
                    "{} {}",
                    statics::EN_LABEL_SEARCH_RESULTS,
                    listing.title
                )),
                ListingKind::Collection => ui.heading(&listing.title),
            };
        });

        if let Some(message) = &listing.empty_message {
            ui.separator();
            ui.label(message);
            return;
        }

        if let Some(panel) = &listing.related {
            egui::Frame::group(ui.style()).show(ui, |ui| {
                ui.horizontal_wrapped(|ui| {
                    ui.strong(panel.heading);
                    for link in &panel.links {
                        if link.current {
                            ui.label(egui::RichText::new(&link.name).strong());
                        } else if ui.link(&link.name).clicked() {
                            actions.push(UiAction::Navigate(link.location.clone()));
                        }
                    }
                });
            });
        }
        ui.separator();

        if !listing.taskbar.is_empty() {
            ui.horizontal_wrapped(|ui| {
                for entry in &listing.taskbar {
                    let selected = state.is_condensed_selected(&entry.name);
                    let text = format!("{} ({})", entry.name, entry.count);
                    let resp =
                        Self::selectable_tile(ui, selected, &entry.image, &text, TASKBAR_SIZE);
                    if resp.clicked() {
                        actions.push(UiAction::ToggleCondensed(entry.name.clone()));
                    }
                }
            });

            let cards = state.consolidated_cards();
            if !cards.is_empty() {
                egui::Frame::group(ui.style()).show(ui, |ui| {
                    Self::paint_cards(ui, cards);
                });
            }
            ui.separator();
        }

        let row_h = ui.text_style_height(&egui::TextStyle::Body) + 10.0;
        for section in &listing.sections {
            let open = state.is_section_open(&section.name);
            let header = format!("{} ({})", section.name, section.cards.len());
            let resp = ui.add_sized(
                [ui.available_width(), row_h],
                egui::Button::new(
                    egui::RichText::new(header)
                        .strong()
                        .color(rgb(section.color)),
                ),
            );
            if resp.clicked() {
                actions.push(UiAction::ToggleSection(section.name.clone()));
            }
            if open {
                Self::paint_cards(ui, &section.cards);
            }
            ui.add_space(8.0);
        }
    }
}

fn rgb(c: [u8; 3]) -> egui::Color32 {
    egui::Color32::from_rgb(c[0], c[1], c[2])
}

impl eframe::App for CatalogApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_loader(ctx);

        let mut actions = Vec::new();

        // Keyboard shortcuts for history navigation.
        if ctx.input(|i| i.modifiers.alt && i.key_pressed(egui::Key::ArrowLeft)) {
            actions.push(UiAction::Back);
        }
        if ctx.input(|i| i.modifiers.alt && i.key_pressed(egui::Key::ArrowRight)) {
            actions.push(UiAction::Forward);
        }

        // Mouse back/forward buttons (common on Windows/Linux).
        if ctx.input(|i| i.pointer.button_clicked(egui::PointerButton::Extra1)) {
            actions.push(UiAction::Back);
        }
        if ctx.input(|i| i.pointer.button_clicked(egui::PointerButton::Extra2)) {
            actions.push(UiAction::Forward);
        }

        let loaded = self.state.catalog().is_some();
        let can_open_feed = self.can_open_feed();

        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            egui::MenuBar::new().ui(ui, |ui| {
                if ui
                    .add_enabled(loaded, egui::Button::new(statics::EN_BTN_HOME))
                    .clicked()
                {
                    actions.push(UiAction::Navigate(Route::Home.to_location()));
                }

                ui.add_enabled_ui(loaded, |ui| {
                    ui.menu_button(statics::EN_BTN_COLLECTIONS, |ui| {
                        egui::ScrollArea::vertical()
                            .max_height(480.0)
                            .show(ui, |ui| {
                                for tile in &self.nav_collections {
                                    if ui.button(&tile.name).clicked() {
                                        actions.push(UiAction::Navigate(tile.location.clone()));
                                    }
                                }
                            });
                    });
                });

                ui.separator();
                let resp = ui.add_enabled(
                    loaded,
                    egui::TextEdit::singleline(self.state.search_input_mut())
                        .hint_text(statics::EN_HINT_SEARCH)
                        .desired_width(220.0),
                );
                let pressed_enter =
                    resp.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                if ui
                    .add_enabled(loaded, egui::Button::new(statics::EN_BTN_SEARCH))
                    .clicked()
                    || pressed_enter
                {
                    actions.push(UiAction::SubmitSearch);
                }

                // Always-visible nav buttons (easier to discover than a menu).
                ui.separator();
                let history = self.state.history();
                if ui
                    .add_enabled(history.back_len() > 0, egui::Button::new(statics::EN_NAV_BACK))
                    .clicked()
                {
                    actions.push(UiAction::Back);
                }
                if ui
                    .add_enabled(
                        history.forward_len() > 0,
                        egui::Button::new(statics::EN_NAV_FORWARD),
                    )
                    .clicked()
                {
                    actions.push(UiAction::Forward);
                }

                ui.separator();
                if ui
                    .add_enabled(can_open_feed, egui::Button::new(statics::EN_BTN_OPEN_FEED))
                    .clicked()
                {
                    actions.push(UiAction::OpenFeed);
                }
                if ui.button(statics::EN_BTN_ABOUT).clicked() {
                    self.about_open = true;
                }
                if ui.button(statics::EN_BTN_TOGGLE_THEME).clicked() {
                    self.theme_dark = !self.theme_dark;
                    if self.theme_dark {
                        ctx.set_visuals(egui::Visuals::dark());
                    } else {
                        ctx.set_visuals(egui::Visuals::light());
                    }
                }

                if !self.status.is_empty() {
                    ui.separator();
                    ui.label(&self.status);
                }
            });
        });

        if self.about_open {
            let mut open = self.about_open;
            egui::Window::new(statics::EN_WINDOW_ABOUT)
                .collapsible(false)
                .open(&mut open)
                .show(ctx, |ui| {
                    ui.heading(statics::EN_ABOUT_HEADING);
                    ui.label(format!(
                        "{} {}",
                        statics::EN_ABOUT_VERSION,
                        env!("CARGO_PKG_VERSION")
                    ));
                    ui.separator();
                    ui.label(statics::EN_ABOUT_SHORTCUTS);
                    ui.label(statics::EN_ABOUT_SHORTCUT_ALT);
                    ui.label(statics::EN_ABOUT_SHORTCUT_MOUSE);
                    ui.separator();
                    ui.hyperlink_to(statics::EN_ABOUT_DATA_SOURCE, statics::SKINS_URL);
                });
            self.about_open = open;
        }

        if let Some(err) = self.last_error.clone() {
            egui::TopBottomPanel::top("error_bar").show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.colored_label(egui::Color32::RED, err);
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.small_button(statics::EN_BTN_CLEAR).clicked() {
                            self.last_error = None;
                        }
                    });
                });
            });
        }

        egui::TopBottomPanel::bottom("bottom_status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(self.feed.to_string());
                ui.separator();
                let location = self.state.location();
                ui.monospace(if location.is_empty() { "/" } else { location });
                if let Some(catalog) = self.state.catalog() {
                    ui.separator();
                    ui.label(format!("{} {}", statics::EN_LABEL_ITEMS, catalog.len()));
                }
                ui.separator();
                let history = self.state.history();
                ui.label(format!(
                    "{} {} {} {}",
                    statics::EN_HISTORY_LABEL,
                    history.back_len(),
                    statics::EN_HISTORY_BACK,
                    history.forward_len()
                ));
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.push_id("view_scroll", |ui| {
                egui::ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .show(ui, |ui| match self.state.view() {
                        ViewModel::Loading => {
                            ui.heading(statics::EN_APP_TITLE);
                            if self.loader.is_some() {
                                ui.horizontal(|ui| {
                                    ui.spinner();
                                    ui.label(statics::EN_LOADING);
                                });
                            }
                        }
                        ViewModel::Home(home) => Self::paint_home(ui, home, &mut actions),
                        ViewModel::Listing(listing) => {
                            Self::paint_listing(ui, listing, &self.state, &mut actions)
                        }
                    });
            });
        });

        if !actions.is_empty() {
            self.apply(actions);
            ctx.request_repaint();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CatalogApp, UiAction, rgb};
    use crate::catalog::FeedSource;
    use crate::config::Config;
    use crate::{Catalog, Item};
    use eframe::egui;

    fn offline_app() -> CatalogApp {
        // Points at a missing file so the background load fails fast without network.
        let config = Config {
            feed: FeedSource::Path("does-not-exist.json".into()),
            ..Default::default()
        };
        CatalogApp::new(config)
    }

    #[test]
    fn rgb_maps_channels() {
        assert_eq!(rgb([1, 2, 3]), egui::Color32::from_rgb(1, 2, 3));
    }

    #[test]
    fn actions_drive_app_state() {
        let mut app = offline_app();
        app.state.set_catalog(Catalog::new(vec![Item {
            name: "AK-47 | Redline".to_string(),
            ..Default::default()
        }]));

        *app.state.search_input_mut() = "AK".to_string();
        app.apply(vec![UiAction::SubmitSearch]);
        assert_eq!(app.state.location(), "?search=ak");

        app.apply(vec![UiAction::Back]);
        assert_eq!(app.state.location(), "");
        app.apply(vec![UiAction::Forward]);
        assert_eq!(app.state.location(), "?search=ak");
    }
}
