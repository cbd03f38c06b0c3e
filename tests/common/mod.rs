#![allow(dead_code)]

use anyhow::Result;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use mediadeck::config::NavContext;
use mediadeck::nav::{Capabilities, FactoryRegistry, NavigationController, Screen, ScreenView, StateObject};
use mediadeck::playback::SimulatedPlayback;

/// Shared call log written by every fake screen
pub type CallLog = Rc<RefCell<Vec<String>>>;

pub struct FakeScreen {
    name: String,
    caps: Capabilities,
    log: CallLog,
    enabled: bool,
}

impl FakeScreen {
    pub fn new(name: &str, caps: Capabilities, log: CallLog) -> Self {
        Self { name: name.to_string(), caps, log, enabled: false }
    }

    fn record(&self, call: impl Into<String>) {
        self.log.borrow_mut().push(call.into());
    }
}

impl Screen for FakeScreen {
    fn name(&self) -> &str {
        &self.name
    }

    fn capabilities(&self) -> Capabilities {
        self.caps
    }

    fn set_current(&mut self, state: Option<StateObject>) {
        let state = state.map(|s| s.to_string()).unwrap_or_else(|| "none".to_string());
        self.record(format!("set_current:{}:{}", self.name, state));
    }

    fn restore(&mut self) {
        self.record(format!("restore:{}", self.name));
    }

    fn exit_screen(&mut self) {
        self.record(format!("exit:{}", self.name));
    }

    fn turn_page(&mut self, delta: i32) -> bool {
        self.record(format!("turn_page:{}:{}", self.name, delta));
        true
    }

    fn view(&self) -> ScreenView {
        ScreenView { title: self.name.clone(), ..ScreenView::default() }
    }

    fn enable_player_screen(&mut self, enabled: bool) {
        self.enabled = enabled;
        self.record(format!("enable:{}:{}", self.name, enabled));
    }

    fn player_screen_enabled(&self) -> bool {
        self.enabled
    }

    fn stop_timer(&mut self) {
        self.record(format!("stop_timer:{}", self.name));
    }
}

/// Factories plus counters for how often each screen got built
pub struct Harness {
    pub factories: FactoryRegistry,
    pub log: CallLog,
    pub builds: Rc<RefCell<Vec<String>>>,
}

impl Harness {
    pub fn new() -> Self {
        Self {
            factories: FactoryRegistry::new(),
            log: Rc::new(RefCell::new(Vec::new())),
            builds: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn screen(mut self, name: &'static str, caps: Capabilities) -> Self {
        let log = self.log.clone();
        let builds = self.builds.clone();
        self.factories.register(name, move |_: &mut NavigationController| -> Result<Box<dyn Screen>> {
            builds.borrow_mut().push(name.to_string());
            log.borrow_mut().push(format!("construct:{}", name));
            Ok(Box::new(FakeScreen::new(name, caps, log.clone())))
        });
        self
    }

    pub fn menu(self, name: &'static str) -> Self {
        self.screen(name, Capabilities::menu())
    }

    pub fn player(self, name: &'static str) -> Self {
        self.screen(name, Capabilities::player())
    }

    pub fn build_count(&self, name: &str) -> usize {
        self.builds.borrow().iter().filter(|b| *b == name).count()
    }

    pub fn take_log(&self) -> Vec<String> {
        std::mem::take(&mut *self.log.borrow_mut())
    }

    pub fn controller(&self, context: NavContext) -> NavigationController {
        NavigationController::new(context, self.factories.clone(), Arc::new(SimulatedPlayback::new()))
    }
}

pub fn context() -> NavContext {
    NavContext { shutdown_grace_ms: 0, ..NavContext::default() }
}
