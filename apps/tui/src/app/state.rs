use std::time::Instant;

use color_eyre::Result;
use log::debug;
use radar_core::overlay::is_activation_key;
use radar_core::{
    render, DetailOverlay, DismissTrigger, Jitter, Legend, LegendView, ListenerGuard,
    ListenerRegistry, Marker, OverlayController, RadarConfig, Scene, StaticTheme,
};

use crate::app::input::helpers::{wrap_decrement, wrap_increment};

pub struct App {
    pub running: bool,
    pub config: RadarConfig,
    pub theme: StaticTheme,
    pub scene: Scene,
    pub legend: Legend,
    pub legend_view: LegendView,
    /// Index into `scene.markers` of the focused marker.
    pub focus: Option<usize>,
    pub overlay: OverlayController<ListenerGuard>,
    pub listeners: ListenerRegistry,
    pub show_help: bool,
    pub status_message: String,
    pub animation_counter: f64,
    pub animation_paused: bool,
    pub last_frame: Instant,
    jitter: Box<dyn Jitter>,
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("running", &self.running)
            .field("markers", &self.scene.markers.len())
            .field("focus", &self.focus)
            .field("overlay_open", &self.overlay.is_open())
            .field("legend_view", &self.legend_view)
            .finish_non_exhaustive()
    }
}

impl App {
    pub fn new(config: RadarConfig, theme: StaticTheme, mut jitter: Box<dyn Jitter>) -> Result<Self> {
        let scene = render(&config, &theme, jitter.as_mut())?;
        let legend = Legend::from_scene(&scene);
        let status_message = skipped_message(&scene);

        Ok(Self {
            running: true,
            config,
            theme,
            scene,
            legend,
            legend_view: LegendView::collapsed(),
            focus: None,
            overlay: OverlayController::new(),
            listeners: ListenerRegistry::new(),
            show_help: false,
            status_message,
            animation_counter: 0.0,
            animation_paused: false,
            last_frame: Instant::now(),
            jitter,
        })
    }

    /// Advances the sweep animation.
    pub fn update(&mut self) {
        let now = Instant::now();
        let delta = now.duration_since(self.last_frame).as_secs_f64().min(0.25);
        self.last_frame = now;
        if !self.animation_paused {
            self.animation_counter =
                (self.animation_counter + delta).rem_euclid(std::f64::consts::TAU);
        }
    }

    /// Lays the radar out again with fresh jitter. Numbering and focus are
    /// kept; an open overlay is closed since its marker moved.
    pub fn rerender(&mut self) -> Result<()> {
        let focused_number = self.focused_marker().map(Marker::number);
        self.overlay.close();

        self.scene = render(&self.config, &self.theme, self.jitter.as_mut())?;
        self.legend = Legend::from_scene(&self.scene);
        self.focus = focused_number.and_then(|number| {
            self.scene
                .markers
                .iter()
                .position(|marker| marker.number() == number)
        });
        self.status_message = format!("Re-rendered. {}", skipped_message(&self.scene));
        Ok(())
    }

    pub fn focused_marker(&self) -> Option<&Marker> {
        self.focus.and_then(|index| self.scene.markers.get(index))
    }

    pub fn focus_next(&mut self) {
        let len = self.scene.markers.len();
        if len == 0 {
            return;
        }
        self.focus = Some(self.focus.map_or(0, |index| wrap_increment(index, len)));
        self.announce_focus();
    }

    pub fn focus_prev(&mut self) {
        let len = self.scene.markers.len();
        if len == 0 {
            return;
        }
        self.focus = Some(self.focus.map_or(len - 1, |index| wrap_decrement(index, len)));
        self.announce_focus();
    }

    fn announce_focus(&mut self) {
        if let Some(marker) = self.focused_marker() {
            self.status_message = marker.accessible_name.clone();
        }
    }

    /// Opens the detail overlay for the focused marker.
    pub fn activate_focused(&mut self) -> bool {
        let Some(marker) = self.focused_marker() else {
            self.status_message = "Tab to a marker first".to_string();
            return false;
        };

        let overlay = DetailOverlay::for_marker(marker, marker.position());
        let listeners = self.listeners.clone();
        let opened = self
            .overlay
            .open(overlay, || listeners.subscribe(&DismissTrigger::ALL));
        debug!("Opened overlay for #{} {}", opened.number, opened.title);
        true
    }

    /// Keyboard activation: only Enter and Space open the overlay.
    pub fn handle_marker_key(&mut self, key: &str) -> bool {
        is_activation_key(key) && self.activate_focused()
    }

    /// Delivers a dismissal trigger to whoever is subscribed to it.
    pub fn dispatch(&mut self, trigger: DismissTrigger) -> bool {
        if self.listeners.is_listening(trigger) {
            return self.overlay.dismiss(trigger);
        }
        false
    }

    pub fn toggle_legend(&mut self) {
        self.legend_view.toggle();
        self.status_message = format!("Legend: {}", self.legend_view.button_label());
    }

    pub fn toggle_animation_pause(&mut self) {
        self.animation_paused = !self.animation_paused;
    }
}

fn skipped_message(scene: &Scene) -> String {
    if scene.skipped.is_empty() {
        format!("{} entries plotted", scene.markers.len())
    } else {
        format!(
            "{} entries plotted, {} skipped",
            scene.markers.len(),
            scene.skipped.len()
        )
    }
}
