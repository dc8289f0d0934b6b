/// Menu navigation: main menu, in-game escape menu, display toggles.
///
/// Panels are pure state here; drawing them and wiring buttons is the host's
/// job. Actions that leave the menu system go through the injected
/// `SceneLoader` / `DisplayControl` collaborators.
use tracing::info;

pub const FULLSCREEN_WIDTH: u32 = 1920;
pub const FULLSCREEN_HEIGHT: u32 = 1080;

/// Scene transitions, keyed by scene name.
pub trait SceneLoader {
    fn load_scene(&mut self, name: &str);
}

/// Display/window services of the host.
pub trait DisplayControl {
    fn is_fullscreen(&self) -> bool;
    fn set_fullscreen(&mut self, width: u32, height: u32);
    fn set_windowed(&mut self);
    fn quit(&mut self);
}

/// Fullscreen forces 1920x1080; windowed keeps the current size.
pub fn toggle_fullscreen(display: &mut impl DisplayControl) {
    if !display.is_fullscreen() {
        display.set_fullscreen(FULLSCREEN_WIDTH, FULLSCREEN_HEIGHT);
        info!("fullscreen enabled at {}x{}", FULLSCREEN_WIDTH, FULLSCREEN_HEIGHT);
    } else {
        display.set_windowed();
        info!("windowed mode enabled");
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainPanel {
    Main,
    Options,
}

/// Title-screen menu.
pub struct MainMenu {
    pub panel: MainPanel,
}

impl MainMenu {
    pub fn new() -> Self {
        Self { panel: MainPanel::Main }
    }

    pub fn start_game(&mut self, loader: &mut impl SceneLoader) {
        loader.load_scene("MainGameScene");
    }

    pub fn open_options(&mut self) {
        self.panel = MainPanel::Options;
    }

    pub fn back_to_main(&mut self) {
        self.panel = MainPanel::Main;
    }

    pub fn quit_game(&mut self, display: &mut impl DisplayControl) {
        info!("quit game");
        display.quit();
    }
}

impl Default for MainMenu {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PausePanel {
    Hidden,
    Escape,
    Options,
}

/// In-game escape menu. While any panel is visible the game is paused by
/// scaling the tick delta to zero.
pub struct EscapeMenu {
    panel: PausePanel,
    time_scale: f32,
}

impl EscapeMenu {
    pub fn new() -> Self {
        Self { panel: PausePanel::Hidden, time_scale: 1.0 }
    }

    pub fn panel(&self) -> PausePanel {
        self.panel
    }

    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    pub fn is_paused(&self) -> bool {
        self.panel != PausePanel::Hidden
    }

    /// Escape walks back out of options first, then toggles the menu.
    pub fn handle_escape(&mut self) {
        match self.panel {
            PausePanel::Options => self.back_to_escape(),
            PausePanel::Escape => self.resume(),
            PausePanel::Hidden => self.open(),
        }
    }

    pub fn open(&mut self) {
        self.panel = PausePanel::Escape;
        self.time_scale = 0.0;
    }

    pub fn resume(&mut self) {
        self.panel = PausePanel::Hidden;
        self.time_scale = 1.0;
    }

    pub fn open_options(&mut self) {
        if self.panel == PausePanel::Escape {
            self.panel = PausePanel::Options;
        }
    }

    pub fn back_to_escape(&mut self) {
        self.panel = PausePanel::Escape;
    }
}

impl Default for EscapeMenu {
    fn default() -> Self {
        Self::new()
    }
}
