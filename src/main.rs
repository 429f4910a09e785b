//! Snake Arcade entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        Document, Element, HtmlCanvasElement, HtmlInputElement, HtmlSelectElement, PointerEvent,
    };

    use snake_arcade::audio::{AudioManager, SoundEffect};
    use snake_arcade::platform::{Command, Swipe, key_to_command};
    use snake_arcade::renderer::CanvasRenderer;
    use snake_arcade::sim::{Direction, GameEvent, GamePhase, Mode};
    use snake_arcade::{HighScores, Session, Settings, SpeedPreset, format_time};

    /// Game instance holding all state
    struct App {
        session: Session,
        renderer: CanvasRenderer,
        audio: AudioManager,
        swipe: Swipe,
        /// Mode highlighted in the menu (None until picked)
        selected: Option<Mode>,
        /// Menu visible, game UI hidden
        in_menu: bool,
    }

    impl App {
        fn now() -> f64 {
            web_sys::window()
                .and_then(|w| w.performance())
                .map(|p| p.now())
                .unwrap_or_default()
        }

        /// Any player input: wakes audio, then goes to the session
        fn press(&mut self, cmd: Option<Command>) {
            self.audio.ensure();
            self.session.press(cmd, Self::now());
            if cmd == Some(Command::ToggleMute) {
                self.sound_settings_changed();
            }
        }

        /// Push volume/mute to the audio output, the mute button and storage
        fn sound_settings_changed(&mut self) {
            let settings = self.session.settings();
            self.audio.set_volume(settings.effective_volume());
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                set_text(&document, "muteBtn", mute_label(settings.muted));
            }
            settings.save();
        }

        /// React to simulation events
        fn handle_events(&mut self, document: &Document) {
            for event in self.session.drain_events() {
                match event {
                    GameEvent::FoodEaten { kind, .. } => self.audio.play(kind.into()),
                    GameEvent::Died { cause, .. } => {
                        self.audio.play(SoundEffect::Death);
                        set_text(
                            document,
                            "msg",
                            &format!(
                                "Game Over ({}) | {} | press any key / tap to restart",
                                mode_label(self.session.mode()),
                                cause_label(cause.as_str())
                            ),
                        );
                    }
                    GameEvent::NewBest { .. } => update_best_cards(document, self.session.high_scores()),
                    GameEvent::Started | GameEvent::Resumed => set_text(
                        document,
                        "msg",
                        &format!("{} | Arrows/WASD or swipe | Space to pause", mode_label(self.session.mode())),
                    ),
                    GameEvent::Paused => set_text(
                        document,
                        "msg",
                        &format!("Paused (press Space to resume) | {}", mode_label(self.session.mode())),
                    ),
                    GameEvent::Restarted
                    | GameEvent::ExplosionFrame { .. }
                    | GameEvent::GameOverReady => {}
                }
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self, document: &Document) {
            set_text(document, "score", &self.session.score().to_string());
            set_text(document, "best", &self.session.best().to_string());
            set_text(document, "time", &format_time(self.session.play_time_ms()));
        }
    }

    fn mode_label(mode: Mode) -> &'static str {
        match mode {
            Mode::Modern => "Modern",
            Mode::Classic => "Classic",
        }
    }

    fn mute_label(muted: bool) -> &'static str {
        if muted { "Unmute (M)" } else { "Mute (M)" }
    }

    fn cause_label(cause: &str) -> &'static str {
        match cause {
            "wall" => "hit the wall",
            _ => "hit yourself",
        }
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn set_hidden(document: &Document, id: &str, hidden: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = if hidden {
                el.class_list().add_1("hidden")
            } else {
                el.class_list().remove_1("hidden")
            };
        }
    }

    fn update_best_cards(document: &Document, best: &HighScores) {
        set_text(document, "bestModernCard", &best.modern.to_string());
        set_text(document, "bestClassicCard", &best.classic.to_string());
    }

    fn mode_buttons(document: &Document) -> Vec<Element> {
        let Ok(list) = document.query_selector_all(".mode-btn") else {
            return Vec::new();
        };
        (0..list.length())
            .filter_map(|i| list.get(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }

    fn seed() -> u64 {
        js_sys::Date::now() as u64
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Snake Arcade starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("game")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");
        let renderer = CanvasRenderer::new(&canvas).expect("no 2d context");

        let settings = Settings::load();
        let best = HighScores::load();
        update_best_cards(&document, &best);

        let mode = settings.last_mode.unwrap_or(Mode::Modern);
        let volume = settings.effective_volume();
        let session = Session::new(mode, seed(), settings, best);

        fill_speed_select(&document, session.settings());
        set_text(&document, "muteBtn", mute_label(session.settings().muted));
        if let Some(slider) = document
            .get_element_by_id("volume")
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        {
            slider.set_value(&session.settings().master_volume.to_string());
        }

        let app = Rc::new(RefCell::new(App {
            session,
            renderer,
            audio: AudioManager::new(volume),
            swipe: Swipe::default(),
            selected: None,
            in_menu: true,
        }));

        setup_menu(&document, app.clone());
        setup_buttons(&document, app.clone());
        setup_keyboard(app.clone());
        setup_touch(&canvas, app.clone());

        request_animation_frame(app);

        log::info!("Snake Arcade running!");
    }

    /// One option per speed preset, preselecting the saved one
    fn fill_speed_select(document: &Document, settings: &Settings) {
        let Some(select) = document.get_element_by_id("speed") else {
            return;
        };
        select.set_inner_html("");
        for preset in [SpeedPreset::Slow, SpeedPreset::Normal, SpeedPreset::Fast] {
            let Ok(option) = document.create_element("option") else {
                continue;
            };
            let _ = option.set_attribute("value", preset.as_str());
            option.set_text_content(Some(&format!("{} ({} ms)", preset.as_str(), preset.tick_ms())));
            let _ = select.append_child(&option);
        }
        if let (Some(preset), Ok(select)) = (
            settings.speed_preset(),
            select.dyn_into::<HtmlSelectElement>(),
        ) {
            select.set_value(preset.as_str());
        }
    }

    fn setup_menu(document: &Document, app: Rc<RefCell<App>>) {
        for btn in mode_buttons(document) {
            let app = app.clone();
            let mode = btn.get_attribute("data-mode").and_then(|m| Mode::from_str(&m));
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let Some(mode) = mode else { return };
                let document = web_sys::window().unwrap().document().unwrap();
                for other in mode_buttons(&document) {
                    let _ = other.class_list().remove_1("selected");
                    if other.get_attribute("data-mode").as_deref() == Some(mode.as_str()) {
                        let _ = other.class_list().add_1("selected");
                    }
                }
                if let Some(start) = document.get_element_by_id("startModeBtn") {
                    let _ = start.class_list().remove_1("disabled");
                }
                let mut a = app.borrow_mut();
                a.selected = Some(mode);
                set_text(&document, "best", &a.session.high_scores().best(mode).to_string());
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Enter the game with the picked mode
        if let Some(btn) = document.get_element_by_id("startModeBtn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let mut a = app.borrow_mut();
                let Some(mode) = a.selected else { return };
                a.session.change_mode(mode, seed());
                a.session.settings().save();
                a.in_menu = false;

                let document = web_sys::window().unwrap().document().unwrap();
                set_hidden(&document, "menu", true);
                set_hidden(&document, "gameUI", false);
                set_text(
                    &document,
                    "msg",
                    "Press Start or an arrow key | swipe on touch | Space pauses | after death any key restarts",
                );
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_buttons(document: &Document, app: Rc<RefCell<App>>) {
        // Start
        if let Some(btn) = document.get_element_by_id("startBtn") {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                // Start does nothing on a dead board; only restart leaves it
                let mut a = app.borrow_mut();
                a.audio.ensure();
                a.session.command(Command::Start, App::now());
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Restart goes back to the mode menu
        if let Some(btn) = document.get_element_by_id("restartBtn") {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let mut a = app.borrow_mut();
                a.session.restart();
                a.selected = None;
                a.in_menu = true;

                let document = web_sys::window().unwrap().document().unwrap();
                set_hidden(&document, "menu", false);
                set_hidden(&document, "gameUI", true);
                for btn in mode_buttons(&document) {
                    let _ = btn.class_list().remove_1("selected");
                }
                if let Some(start) = document.get_element_by_id("startModeBtn") {
                    let _ = start.class_list().add_1("disabled");
                }
                set_text(&document, "best", "0");
                set_text(&document, "time", &format_time(0.0));
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Speed selector
        if let Some(select) = document
            .get_element_by_id("speed")
            .and_then(|el| el.dyn_into::<HtmlSelectElement>().ok())
        {
            let app = app.clone();
            let select_clone = select.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let Some(preset) = SpeedPreset::from_str(&select_clone.value()) else {
                    return;
                };
                let mut a = app.borrow_mut();
                if a.session.set_tick_ms(preset.tick_ms(), App::now()) {
                    a.session.settings().save();
                }
            });
            let _ = select.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mute
        if let Some(btn) = document.get_element_by_id("muteBtn") {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                app.borrow_mut().press(Some(Command::ToggleMute));
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Volume slider (0.0 - 1.0)
        if let Some(slider) = document
            .get_element_by_id("volume")
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        {
            let app = app.clone();
            let slider_clone = slider.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let Ok(volume) = slider_clone.value().parse::<f32>() else {
                    return;
                };
                let mut a = app.borrow_mut();
                a.session.settings_mut().set_master_volume(volume);
                a.sound_settings_changed();
            });
            let _ = slider.add_event_listener_with_callback("input", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch D-pad
        for (id, dir) in [
            ("btnUp", Direction::Up),
            ("btnDown", Direction::Down),
            ("btnLeft", Direction::Left),
            ("btnRight", Direction::Right),
        ] {
            let Some(btn) = document.get_element_by_id(id) else {
                continue;
            };
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                let mut a = app.borrow_mut();
                if a.in_menu {
                    return;
                }
                a.press(Some(Command::Steer(dir)));
                event.prevent_default();
            });
            let _ = btn.add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_keyboard(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
            let mut a = app.borrow_mut();
            if a.in_menu {
                return;
            }

            let cmd = key_to_command(&event.key(), &event.code());
            if cmd == Some(Command::ToggleMute) {
                a.press(cmd);
                return;
            }
            match a.session.phase() {
                GamePhase::Dead => {}
                // Space only pauses a running game; nothing else reaches a paused one
                GamePhase::Idle if cmd == Some(Command::TogglePause) => return,
                GamePhase::Paused if cmd != Some(Command::TogglePause) => {
                    if cmd.is_some() {
                        event.prevent_default();
                    }
                    return;
                }
                _ if cmd.is_none() => return,
                _ => {}
            }
            a.press(cmd);
            event.prevent_default();
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_touch(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) {
        // Swipe start; a tap on an idle board starts without turning
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                let mut a = app.borrow_mut();
                if a.in_menu {
                    return;
                }
                match a.session.phase() {
                    GamePhase::Dead => a.press(None),
                    phase => {
                        a.swipe
                            .begin(event.client_x() as f32, event.client_y() as f32);
                        if phase == GamePhase::Idle {
                            a.press(Some(Command::Start));
                        }
                    }
                }
                event.prevent_default();
            });
            let _ = canvas
                .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Swipe end
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                let mut a = app.borrow_mut();
                if !a.swipe.is_tracking() {
                    return;
                }
                if let Some(dir) = a
                    .swipe
                    .end(event.client_x() as f32, event.client_y() as f32)
                {
                    a.press(Some(Command::Steer(dir)));
                    event.prevent_default();
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("pointerup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>, time: f64) {
        {
            let mut a = app.borrow_mut();
            let document = web_sys::window().unwrap().document().unwrap();

            a.session.pump(time);
            a.handle_events(&document);
            if !a.in_menu {
                a.renderer.render(&a.session);
                a.update_hud(&document);
            }
        }

        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Snake Arcade (native) starting...");
    log::info!("Native mode is headless - run with `trunk serve` for the web version");

    demo::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless autopilot game on a virtual clock
#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use snake_arcade::sim::{Cell, Direction, GameEvent, GamePhase, Mode};
    use snake_arcade::{HighScores, Session, Settings, format_time};

    /// Frame period of the virtual display (60 Hz)
    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Give up after this much virtual time
    const MAX_CLOCK_MS: f64 = 10.0 * 60.0 * 1000.0;

    /// Greedy turn toward the food that does not hit the body
    fn choose(session: &Session) -> Option<Direction> {
        let state = session.state();
        let head = state.head();
        let target = state.food?.cell;
        let safe = |dir: Direction| {
            let next = head.step(dir);
            let next = if state.mode.allows_wrap() {
                state.grid.wrap(next)
            } else {
                next
            };
            state.grid.contains(next) && !state.snake.iter().skip(1).any(|c| *c == next)
        };

        let mut prefs: Vec<Direction> = Vec::with_capacity(4);
        let delta = Cell::new(target.x - head.x, target.y - head.y);
        if delta.x > 0 {
            prefs.push(Direction::Right);
        } else if delta.x < 0 {
            prefs.push(Direction::Left);
        }
        if delta.y > 0 {
            prefs.push(Direction::Down);
        } else if delta.y < 0 {
            prefs.push(Direction::Up);
        }
        prefs.extend([state.dir, Direction::Up, Direction::Right, Direction::Down, Direction::Left]);

        prefs
            .into_iter()
            .filter(|d| !state.dir.is_opposite(*d))
            .find(|d| safe(*d))
    }

    pub fn run() {
        let seed = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(1);

        for mode in [Mode::Modern, Mode::Classic] {
            let mut session = Session::new(mode, seed, Settings::default(), HighScores::load());
            session.start(0.0);

            let mut now = 0.0;
            while now < MAX_CLOCK_MS {
                if session.phase() == GamePhase::Running {
                    if let Some(dir) = choose(&session) {
                        session.steer(dir, now);
                    }
                }
                session.pump(now);

                let mut finished = false;
                for event in session.drain_events() {
                    match event {
                        GameEvent::FoodEaten { kind, score } => {
                            log::debug!("Ate {:?} food, score {}", kind, score);
                        }
                        GameEvent::Died { cause, score } => {
                            log::info!("Died ({}) with score {}", cause.as_str(), score);
                        }
                        GameEvent::GameOverReady => finished = true,
                        _ => {}
                    }
                }
                if finished {
                    break;
                }
                now += FRAME_MS;
            }

            println!(
                "{:>7} mode: score {:>3}, length {:>3}, time {}",
                mode.as_str(),
                session.score(),
                session.state().snake.len(),
                format_time(session.play_time_ms())
            );
        }
    }
}
