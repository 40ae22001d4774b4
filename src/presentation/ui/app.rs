//! Main application orchestrator.

use std::io::stdout;
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{
    DisableMouseCapture, EnableMouseCapture, Event, EventStream, KeyCode, KeyEvent, KeyModifiers,
    MouseEvent, MouseEventKind,
};
use crossterm::execute;
use futures_util::StreamExt;
use ratatui::layout::{Constraint, Layout};
use ratatui::{DefaultTerminal, Frame};
use tokio::sync::mpsc;
use tokio::time::interval;
use tracing::{debug, info, warn};

use super::about_screen::AboutScreen;
use super::admin::{
    AdminCategoriesScreen, AdminDashboardScreen, AdminOrdersScreen, AdminProductsScreen,
};
use super::cart_screen::CartScreen;
use super::catalog_screen::{CatalogMode, CatalogScreen};
use super::category_screen::CategoryScreen;
use super::login_screen::LoginScreen;
use super::password_reset_screen::{ForgotEmailScreen, ForgotResetScreen};
use super::product_screen::ProductScreen;
use super::profile_screen::ProfileScreen;
use super::register_screen::RegisterScreen;
use super::request::{Outcome, Request, UseCases};
use super::splash_screen::SplashScreen;
use super::view::{KeyResult, RenderContext, View};
use crate::application::use_cases::RestoreSessionUseCase;
use crate::application::{ActionError, SessionContext};
use crate::domain::entities::User;
use crate::domain::guard::{AdminGuard, GuardDecision};
use crate::domain::navigation::{AdminRoute, Navigator, Route};
use crate::domain::notification::Banner;
use crate::domain::ports::{AdminPort, AuthPort, SessionStoragePort, StorefrontPort};
use crate::infrastructure::{AppConfig, FuzzySearcher};
use crate::presentation::events::{EventHandler, EventResult, GlobalKey};
use crate::presentation::theme::Theme;
use crate::presentation::widgets::{NavBar, StatusBar};

const ANIMATION_TICK_RATE: Duration = Duration::from_millis(33);

#[derive(Debug)]
enum Action {
    SessionRestored(Option<User>),
    /// A request finished. `generation` identifies the screen that was
    /// mounted when it was sent.
    Finished {
        generation: u64,
        request: &'static str,
        result: Result<Outcome, ActionError>,
    },
}

pub struct App {
    navigator: Navigator,
    screen: Box<dyn View>,
    generation: u64,
    splash: Option<SplashScreen>,
    session: SessionContext,
    use_cases: UseCases,
    restore: Arc<RestoreSessionUseCase>,
    searcher: FuzzySearcher,
    config: AppConfig,
    theme: Theme,
    banner: Option<Banner>,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
    running: bool,
}

impl App {
    #[must_use]
    pub fn new(
        auth_port: Arc<dyn AuthPort>,
        storefront_port: Arc<dyn StorefrontPort>,
        admin_port: Arc<dyn AdminPort>,
        storage_port: Arc<dyn SessionStoragePort>,
        config: AppConfig,
    ) -> Self {
        let session = SessionContext::new();
        let use_cases = UseCases::new(
            auth_port,
            storefront_port,
            admin_port,
            storage_port.clone(),
            &session,
            config.ui.related_items,
        );
        let restore = Arc::new(RestoreSessionUseCase::new(storage_port, session.clone()));
        let searcher = FuzzySearcher::new();
        let theme = Theme::new(&config.theme.accent_color);
        let (action_tx, action_rx) = mpsc::unbounded_channel();

        Self {
            navigator: Navigator::new(),
            screen: Box::new(CatalogScreen::new(CatalogMode::Home, searcher.clone())),
            generation: 0,
            splash: None,
            session,
            use_cases,
            restore,
            searcher,
            config,
            theme,
            banner: None,
            action_tx,
            action_rx,
            running: true,
        }
    }

    /// Opens `route` on top of Home once the session is ready. Admin routes
    /// still go through the guard.
    #[must_use]
    pub fn with_start_route(mut self, route: Route) -> Self {
        self.navigator.push(route);
        self
    }

    /// # Errors
    /// Returns error if drawing to the terminal fails.
    pub async fn run(mut self, terminal: &mut DefaultTerminal) -> color_eyre::Result<()> {
        let restore_enabled = self.config.restore_session;

        if self.config.ui.enable_animations {
            self.splash = Some(SplashScreen::new(self.theme.accent));
            let restore = self.restore.clone();
            let tx = self.action_tx.clone();
            tokio::spawn(async move {
                let user = restore.execute(restore_enabled).await;
                let _ = tx.send(Action::SessionRestored(user));
            });
        } else {
            let user = self.restore.execute(restore_enabled).await;
            self.on_session_restored(user);
        }

        if self.config.mouse {
            execute!(stdout(), EnableMouseCapture)?;
        }

        let result = self.run_event_loop(terminal).await;

        if self.config.mouse {
            execute!(stdout(), DisableMouseCapture)?;
        }
        info!("Application exiting normally");
        result
    }

    async fn run_event_loop(&mut self, terminal: &mut DefaultTerminal) -> color_eyre::Result<()> {
        let mut terminal_events = EventStream::new();
        let mut animation_interval = interval(ANIMATION_TICK_RATE);

        terminal.draw(|frame| self.render(frame))?;

        while self.running {
            tokio::select! {
                biased;

                Some(action) = self.action_rx.recv() => {
                    self.handle_action(action);
                    terminal.draw(|frame| self.render(frame))?;
                }

                _ = animation_interval.tick() => {
                    self.tick(ANIMATION_TICK_RATE);
                    terminal.draw(|frame| self.render(frame))?;
                }

                Some(Ok(event)) = terminal_events.next() => {
                    if self.handle_terminal_event(event) == EventResult::Exit {
                        self.running = false;
                    }
                    terminal.draw(|frame| self.render(frame))?;
                }
            }
        }

        Ok(())
    }

    fn tick(&mut self, elapsed: Duration) {
        if let Some(splash) = &mut self.splash {
            splash.tick(elapsed);
            if splash.is_finished() {
                self.splash = None;
                self.mount();
            }
            return;
        }

        self.screen.tick(elapsed);
        if self.banner.as_ref().is_some_and(Banner::is_expired) {
            self.banner = None;
        }
    }

    fn on_session_restored(&mut self, user: Option<User>) {
        if let Some(user) = &user {
            self.banner = Some(Banner::info(format!("Welcome back, {}", user.display_name())));
        }
        match &mut self.splash {
            Some(splash) => splash.set_session_ready(),
            None => self.mount(),
        }
    }

    fn handle_terminal_event(&mut self, event: Event) -> EventResult {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            _ => EventResult::Continue,
        }
    }

    /// The wheel scrolls whatever list the screen shows.
    fn handle_mouse(&mut self, mouse: MouseEvent) -> EventResult {
        let code = match mouse.kind {
            MouseEventKind::ScrollDown => KeyCode::Down,
            MouseEventKind::ScrollUp => KeyCode::Up,
            _ => return EventResult::Continue,
        };
        if self.splash.is_some() {
            return EventResult::Continue;
        }
        let result = self.screen.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
        self.handle_key_result(result)
    }

    fn handle_key(&mut self, key: KeyEvent) -> EventResult {
        if !EventHandler::is_press(&key) {
            return EventResult::Continue;
        }
        if EventHandler::is_quit_event(&key) {
            return EventResult::Exit;
        }
        if self.splash.is_some() {
            return EventResult::Continue;
        }

        let result = self.screen.handle_key(key);
        if result != KeyResult::Ignored {
            return self.handle_key_result(result);
        }

        match EventHandler::global_key(&key, self.screen.captures_text()) {
            Some(GlobalKey::Quit) => EventResult::Exit,
            Some(GlobalKey::Back) => {
                self.back();
                EventResult::Continue
            }
            Some(GlobalKey::Open(route)) => {
                if &route != self.navigator.current() {
                    self.navigate(route, false);
                }
                EventResult::Continue
            }
            None => EventResult::Continue,
        }
    }

    fn handle_key_result(&mut self, result: KeyResult) -> EventResult {
        match result {
            KeyResult::Consumed | KeyResult::Ignored => {}
            KeyResult::Quit => return EventResult::Exit,
            KeyResult::Navigate(route) => self.navigate(route, false),
            KeyResult::Redirect(route) => self.navigate(route, true),
            KeyResult::Back => self.back(),
            KeyResult::Logout => self.dispatch(Request::Logout),
            KeyResult::Request(request) => self.dispatch(request),
            KeyResult::OpenLink(url) => {
                debug!(url = %url, "Opening link");
                if let Err(e) = opener::open(&url) {
                    warn!(error = %e, url = %url, "Failed to open link");
                    self.banner = Some(Banner::error("Could not open link"));
                }
            }
        }
        EventResult::Continue
    }

    fn navigate(&mut self, route: Route, replace: bool) {
        debug!(route = %route, replace, "Navigating");
        if replace {
            self.navigator.replace(route);
        } else {
            self.navigator.push(route);
        }
        self.mount();
    }

    fn back(&mut self) {
        let route = self.navigator.back().clone();
        debug!(route = %route, "Navigating back");
        self.mount();
    }

    /// Builds the screen for the current route and starts its requests.
    /// Admin routes go through the guard first.
    fn mount(&mut self) {
        let route = self.navigator.current().clone();

        if route.is_admin() {
            let user = self.session.current();
            let decision = AdminGuard::check(user.as_ref(), &route);
            if decision != GuardDecision::Allow {
                warn!(route = %route, ?decision, "Admin route denied");
                if let Some(message) = decision.message() {
                    self.banner = Some(match decision {
                        GuardDecision::NotAuthorized { .. } => Banner::error(message),
                        _ => Banner::info(message),
                    });
                }
                if let Some(redirect) = decision.redirect() {
                    self.navigator.replace(redirect);
                    self.mount();
                }
                return;
            }
        }

        self.generation += 1;
        self.screen = self.screen_for(&route);
        for request in self.screen.load_requests() {
            self.dispatch(request);
        }
    }

    fn screen_for(&self, route: &Route) -> Box<dyn View> {
        match route {
            Route::Home => Box::new(CatalogScreen::new(CatalogMode::Home, self.searcher.clone())),
            Route::Shopping => Box::new(CatalogScreen::new(
                CatalogMode::Shopping,
                self.searcher.clone(),
            )),
            Route::Category => Box::new(CategoryScreen::new(self.searcher.clone())),
            Route::Cart => Box::new(CartScreen::new()),
            Route::Profile => Box::new(ProfileScreen::new(self.session.is_authenticated())),
            Route::About => Box::new(AboutScreen::new(self.config.api_base_url.as_str())),
            Route::ProductDetail(id) => Box::new(ProductScreen::new(id.clone())),
            Route::Login => Box::new(LoginScreen::new()),
            Route::Register => Box::new(RegisterScreen::new()),
            Route::ForgotPasswordEmail => Box::new(ForgotEmailScreen::new()),
            Route::ForgotPasswordReset { email } => Box::new(ForgotResetScreen::new(email)),
            Route::Admin(AdminRoute::Dashboard) => Box::new(AdminDashboardScreen::new()),
            Route::Admin(AdminRoute::Products) => Box::new(AdminProductsScreen::new()),
            Route::Admin(AdminRoute::Categories) => {
                Box::new(AdminCategoriesScreen::new(self.searcher.clone()))
            }
            Route::Admin(AdminRoute::Orders) => Box::new(AdminOrdersScreen::new()),
        }
    }

    fn dispatch(&self, request: Request) {
        let use_cases = self.use_cases.clone();
        let tx = self.action_tx.clone();
        let generation = self.generation;

        tokio::spawn(async move {
            let name = request.name();
            let result = use_cases.run(request).await;
            let _ = tx.send(Action::Finished {
                generation,
                request: name,
                result,
            });
        });
    }

    fn handle_action(&mut self, action: Action) {
        match action {
            Action::SessionRestored(user) => self.on_session_restored(user),
            Action::Finished {
                generation,
                request,
                result,
            } => {
                let current = generation == self.generation;
                match result {
                    Ok(outcome) => self.on_outcome(outcome, current),
                    Err(e) => {
                        warn!(request, error = %e, "Request failed");
                        self.banner = Some(Banner::error(e.message()));
                        if current {
                            self.screen.fail(&e);
                        }
                        if e.requires_login() && *self.navigator.current() != Route::Login {
                            self.navigate(Route::Login, false);
                        }
                    }
                }
            }
        }
    }

    fn on_outcome(&mut self, outcome: Outcome, current: bool) {
        match &outcome {
            Outcome::Done { message, reload } => {
                self.banner = Some(Banner::success(*message));
                if current && let Some(reload) = reload {
                    self.dispatch(reload.clone());
                }
            }
            Outcome::SignedIn(response) => {
                info!(user = %response.user.display_name(), "Signed in");
                self.banner = Some(Banner::success(format!(
                    "Signed in as {}",
                    response.user.display_name()
                )));
                if !response.session_persisted {
                    warn!("Session will not survive a restart");
                }
            }
            Outcome::SignedOut(route) => {
                self.banner = Some(Banner::info("Signed out"));
                self.navigate(route.clone(), false);
                return;
            }
            Outcome::ResetStep(step) => self.banner = Some(Banner::success(step.message)),
            _ => {}
        }

        if current {
            let result = self.screen.apply(outcome);
            self.handle_key_result(result);
        }
    }

    fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();

        if let Some(splash) = &mut self.splash {
            frame.render_widget(splash, area);
            return;
        }

        let [nav_area, body_area, status_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(area);

        let user = self.session.current();
        frame.render_widget(
            NavBar::new(self.navigator.current(), &self.theme)
                .user(user.as_ref().map(User::display_name))
                .show_admin(user.as_ref().is_some_and(User::is_admin)),
            nav_area,
        );

        let ctx = RenderContext {
            theme: &self.theme,
            currency: &self.config.ui.currency_symbol,
            user: user.as_ref(),
        };
        self.screen.render(body_area, frame.buffer_mut(), &ctx);

        if let Some(banner) = &mut self.banner {
            banner.mark_displayed();
        }
        frame.render_widget(
            &StatusBar::new(self.banner.as_ref(), self.screen.hints(), &self.theme),
            status_area,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{AuthToken, UserRole};
    use crate::domain::ports::mocks::{
        MockAdminPort, MockAuthPort, MockSessionStorage, MockStorefrontPort,
    };

    fn storefront() -> MockStorefrontPort {
        let mut storefront = MockStorefrontPort::new();
        storefront.expect_products().returning(|| Ok(Vec::new()));
        storefront.expect_categories().returning(|| Ok(Vec::new()));
        storefront
    }

    fn app() -> App {
        let config = AppConfig {
            mouse: false,
            ..AppConfig::default()
        };
        let mut app = App::new(
            Arc::new(MockAuthPort::new(true)),
            Arc::new(storefront()),
            Arc::new(MockAdminPort::new()),
            Arc::new(MockSessionStorage::new()),
            config,
        );
        app.mount();
        app
    }

    fn press(app: &mut App, c: char) -> EventResult {
        app.handle_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
    }

    fn banner(app: &App) -> Option<&str> {
        app.banner.as_ref().map(|b| b.message.as_str())
    }

    #[tokio::test]
    async fn test_starts_on_home() {
        let app = app();
        assert_eq!(app.navigator.current(), &Route::Home);
        assert_eq!(app.generation, 1);
    }

    #[tokio::test]
    async fn test_tab_shortcuts_push_routes() {
        let mut app = app();

        press(&mut app, '2');
        assert_eq!(app.navigator.current(), &Route::Category);

        app.handle_key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE));
        assert_eq!(app.navigator.current(), &Route::Home);
    }

    #[tokio::test]
    async fn test_ctrl_c_and_q_exit() {
        let mut app = app();

        assert_eq!(
            app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            EventResult::Exit
        );
        assert_eq!(press(&mut app, 'q'), EventResult::Exit);
    }

    #[tokio::test]
    async fn test_q_is_typed_on_login_screen() {
        let mut app = app();
        app.navigate(Route::Login, false);

        assert_eq!(press(&mut app, 'q'), EventResult::Continue);
        assert_eq!(app.navigator.current(), &Route::Login);
    }

    #[tokio::test]
    async fn test_admin_without_session_redirects_to_login() {
        let mut app = app();

        press(&mut app, 'a');

        assert_eq!(app.navigator.current(), &Route::Login);
        assert_eq!(banner(&app), Some("Checking authentication..."));
    }

    #[tokio::test]
    async fn test_admin_as_customer_is_not_authorized() {
        let mut app = app();
        app.session.set(User::new(
            "u1",
            "shopper",
            "shopper@shop.io",
            AuthToken::new_unchecked("tok"),
            UserRole::User,
        ));

        press(&mut app, 'a');

        assert_eq!(app.navigator.current(), &Route::Home);
        assert_eq!(banner(&app), Some("Not authorized"));
    }

    #[tokio::test]
    async fn test_login_required_error_opens_login() {
        let mut app = app();
        app.navigate(Route::Cart, false);

        app.handle_action(Action::Finished {
            generation: app.generation,
            request: "cart",
            result: Err(ActionError::LoginRequired("Please log in.".to_string())),
        });

        assert_eq!(app.navigator.current(), &Route::Login);
        assert_eq!(banner(&app), Some("Please log in."));
    }

    #[tokio::test]
    async fn test_stale_results_only_update_banner() {
        let mut app = app();
        let stale = app.generation;
        app.navigate(Route::Shopping, false);

        app.handle_action(Action::Finished {
            generation: stale,
            request: "add_to_cart",
            result: Ok(Outcome::Done {
                message: "Product added to cart!",
                reload: None,
            }),
        });

        assert_eq!(banner(&app), Some("Product added to cart!"));
        assert_eq!(app.navigator.current(), &Route::Shopping);
    }

    #[tokio::test]
    async fn test_sign_out_returns_home() {
        let mut app = app();
        app.navigate(Route::Profile, false);

        app.handle_action(Action::Finished {
            generation: app.generation,
            request: "logout",
            result: Ok(Outcome::SignedOut(Route::Home)),
        });

        assert_eq!(app.navigator.current(), &Route::Home);
        assert_eq!(banner(&app), Some("Signed out"));
    }

    #[tokio::test]
    async fn test_start_route_keeps_home_underneath() {
        let mut app = app().with_start_route(Route::from_path("/cart").unwrap_or(Route::Home));
        app.mount();

        assert_eq!(app.navigator.current(), &Route::Cart);
        app.handle_key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE));
        assert_eq!(app.navigator.current(), &Route::Home);
    }

    #[tokio::test]
    async fn test_start_route_reset_keeps_email() {
        let route = Route::from_path("/auth/ForgotPasswordReset?email=a%40b.c");
        let mut app = app().with_start_route(route.unwrap_or(Route::Home));
        app.mount();

        assert_eq!(
            app.navigator.current(),
            &Route::ForgotPasswordReset {
                email: "a@b.c".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_session_restored_without_splash_mounts_home() {
        let mut app = app();
        let before = app.generation;

        app.handle_action(Action::SessionRestored(None));

        assert_eq!(app.generation, before + 1);
        assert!(app.banner.is_none());
    }
}
