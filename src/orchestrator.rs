//! Cooperative scheduler tying the pattern, the host registers, the
//! buttons and the sensor together.
//!
//! Every unit of work keeps its own deadline. [`Orchestrator::poll`] runs
//! whatever is due and returns the earliest next deadline; nothing in a poll
//! blocks. [`Orchestrator::run`] is the async loop around it.

use core::fmt::Write;

use embassy_time::{Duration, Instant, Timer};
use heapless::{String, Vec};

use crate::{
    LedDriver,
    config::OrchestratorConfig,
    controls::{
        BrightnessCommand, ButtonAction, ControlPin, ControlPins, OperatingMode, PowerToggle,
        PulseRequest, PulseTrain,
    },
    debounce::{EventReceiver, InputEvent},
    descriptor::PatternConfig,
    error::TransportError,
    lifecycle::{PatternTask, Phase, TaskStatus},
    pattern::PatternKind,
    sensor::{SensorPoller, TemperatureSensor},
    surface::PixelSurface,
    transport::{ControlSurface, REGISTER_CAPACITY, Register},
};

const PULSE_QUEUE_SIZE: usize = 8;

pub struct Orchestrator<'a, D, C, P, S, const N: usize, const EVENTS: usize>
where
    D: LedDriver,
    C: ControlSurface,
    P: ControlPins,
    S: TemperatureSensor,
{
    // External dependencies and configuration
    config: OrchestratorConfig,
    surface: PixelSurface<D, N>,
    controls: C,
    pins: P,
    events: EventReceiver<'a, EVENTS>,
    sensor: SensorPoller<S>,

    // Pattern hand-off
    selected: PatternConfig,
    active: PatternTask,
    pending: Option<PatternConfig>,
    deferred: Option<PatternConfig>,
    last_descriptor: Option<Vec<u8, REGISTER_CAPACITY>>,
    descriptor_oversized: bool,

    // Controls
    control_wake: Instant,
    was_connected: bool,
    mode: OperatingMode,
    power: PowerToggle,
    pulses: PulseTrain<PULSE_QUEUE_SIZE>,
    status_led: bool,
}

impl<'a, D, C, P, S, const N: usize, const EVENTS: usize> Orchestrator<'a, D, C, P, S, N, EVENTS>
where
    D: LedDriver,
    C: ControlSurface,
    P: ControlPins,
    S: TemperatureSensor,
{
    /// Build the orchestrator. The initial pattern starts on the first poll.
    pub fn new(
        surface: PixelSurface<D, N>,
        controls: C,
        pins: P,
        sensor: S,
        events: EventReceiver<'a, EVENTS>,
        config: OrchestratorConfig,
    ) -> Self {
        let start = Instant::from_ticks(0);
        let timings = config.timings;
        Self {
            surface,
            controls,
            pins,
            events,
            sensor: SensorPoller::new(sensor, timings.sensor_period, timings.sensor_conversion),
            selected: config.initial_pattern.clone(),
            active: PatternTask::new(&config.initial_pattern, start),
            pending: None,
            deferred: None,
            last_descriptor: None,
            descriptor_oversized: false,
            control_wake: start,
            was_connected: false,
            mode: OperatingMode::Soundboard,
            power: PowerToggle::new(timings.power_cooldown),
            pulses: PulseTrain::new(timings.pulse_width, timings.pulse_gap),
            status_led: false,
            config,
        }
    }

    /// Run every unit of work that is due and return the next deadline
    pub fn poll(&mut self, now: Instant) -> Instant {
        self.process_inputs(now);

        if now >= self.control_wake {
            self.control_wake = now + self.poll_controls(now);
        }

        self.poll_pattern(now);

        let pulse_wake = self.pulses.poll(now, &mut self.pins);
        let sensor_wake = self.sensor.poll(now, &mut self.controls);

        [self.active.wake_at(), pulse_wake]
            .into_iter()
            .flatten()
            .fold(self.control_wake.min(sensor_wake), Instant::min)
    }

    /// Poll forever, sleeping until the next deadline in between
    pub async fn run(&mut self) {
        loop {
            let next = self.poll(Instant::now());
            Timer::at(next).await;
        }
    }

    /// Request a switch to `config`.
    ///
    /// Ignored when `config` is already selected. While a hand-off is in
    /// progress the request is held back and applied once it completes; a
    /// newer request replaces an older held one.
    pub fn select(&mut self, config: PatternConfig, now: Instant) {
        if self.is_handing_off() {
            self.deferred = Some(config);
            return;
        }
        if config == self.selected {
            return;
        }

        log::info!(
            "switching pattern {} -> {}",
            self.selected.kind().as_str(),
            config.kind().as_str()
        );
        self.selected = config.clone();
        self.pending = Some(config);
        self.active.cancel(now);
    }

    /// A switch is underway, or the active pattern is still entering
    pub fn is_handing_off(&self) -> bool {
        self.pending.is_some() || self.active.phase() == Phase::Entering
    }

    pub fn selected(&self) -> &PatternConfig {
        &self.selected
    }

    pub fn active_kind(&self) -> PatternKind {
        self.active.kind()
    }

    pub fn active_phase(&self) -> Phase {
        self.active.phase()
    }

    pub fn operating_mode(&self) -> OperatingMode {
        self.mode
    }

    pub fn screen_powered_on(&self) -> bool {
        self.power.powered_on()
    }

    pub fn status_led(&self) -> bool {
        self.status_led
    }

    pub fn surface(&self) -> &PixelSurface<D, N> {
        &self.surface
    }

    pub fn controls(&self) -> &C {
        &self.controls
    }

    pub fn controls_mut(&mut self) -> &mut C {
        &mut self.controls
    }

    pub fn pins(&self) -> &P {
        &self.pins
    }

    pub fn sensor(&self) -> &S {
        self.sensor.sensor()
    }

    fn poll_pattern(&mut self, now: Instant) {
        if self.active.is_due(now) {
            let status = self.active.poll(now, &mut self.surface);
            if status == TaskStatus::Exited {
                if let Some(next) = self.pending.take() {
                    log::info!("pattern {} started", next.kind().as_str());
                    self.active = PatternTask::new(&next, now);
                    self.active.poll(now, &mut self.surface);
                }
            }
        }

        if !self.is_handing_off() {
            if let Some(config) = self.deferred.take() {
                self.select(config, now);
            }
        }
    }

    /// Returns the delay until the next register poll
    fn poll_controls(&mut self, now: Instant) -> Duration {
        let connected = self.controls.is_connected();
        if connected != self.was_connected {
            self.was_connected = connected;
            if connected {
                log::info!("control surface connected");
                self.publish_mode();
            } else {
                log::info!("control surface disconnected");
            }
        }
        if !connected {
            return self.config.timings.disconnected_poll;
        }

        if !self.is_handing_off() {
            self.poll_descriptor(now);
        }
        self.poll_power_button(now);
        self.poll_brightness();
        self.poll_operating_mode();

        self.config.timings.control_poll
    }

    fn read_register<'b>(
        &mut self,
        register: Register,
        buf: &'b mut [u8; REGISTER_CAPACITY],
    ) -> Option<&'b [u8]> {
        match self.controls.read(register, buf) {
            Ok(len) => buf.get(..len),
            Err(err) => {
                log::warn!("{}", err);
                None
            }
        }
    }

    fn clear_register(&mut self, register: Register) {
        if let Err(err) = self.controls.write(register, &[0]) {
            log::warn!("{}", err);
        }
    }

    fn poll_descriptor(&mut self, now: Instant) {
        let mut buf = [0u8; REGISTER_CAPACITY];
        let raw = match self.controls.read(Register::PatternDescriptor, &mut buf) {
            Ok(len) => &buf[..len.min(REGISTER_CAPACITY)],
            Err(TransportError::BufferTooSmall) => {
                // Reported once until the register holds something readable
                if !self.descriptor_oversized {
                    log::warn!("pattern descriptor exceeds {} bytes", REGISTER_CAPACITY);
                    self.descriptor_oversized = true;
                }
                return;
            }
            Err(err) => {
                log::warn!("{}", err);
                return;
            }
        };
        self.descriptor_oversized = false;
        if self.last_descriptor.as_deref() == Some(raw) {
            return;
        }
        self.last_descriptor = Vec::from_slice(raw).ok();

        match PatternConfig::from_json(raw) {
            Ok(config) => self.select(config, now),
            Err(err) => log::warn!("keeping current pattern: {}", err),
        }
    }

    fn poll_power_button(&mut self, now: Instant) {
        let mut buf = [0u8; REGISTER_CAPACITY];
        let Some(raw) = self.read_register(Register::PowerButton, &mut buf) else {
            return;
        };
        if raw == [1] {
            self.clear_register(Register::PowerButton);
            self.request_power_toggle(now);
        }
    }

    fn poll_brightness(&mut self) {
        let mut buf = [0u8; REGISTER_CAPACITY];
        let Some(raw) = self.read_register(Register::BrightnessCommand, &mut buf) else {
            return;
        };
        if raw.is_empty() || raw == [0] {
            return;
        }
        let command = BrightnessCommand::parse(raw);
        self.clear_register(Register::BrightnessCommand);

        match command {
            Some(command) => self.queue_pulses(command.pulses(self.config.brightness_levels)),
            None => log::warn!("unknown brightness command"),
        }
    }

    fn poll_operating_mode(&mut self) {
        let mut buf = [0u8; REGISTER_CAPACITY];
        let Some(mode) = self
            .read_register(Register::OperatingMode, &mut buf)
            .and_then(OperatingMode::decode)
        else {
            return;
        };
        if mode != self.mode {
            log::info!("operating mode {:?} -> {:?}", self.mode, mode);
            self.mode = mode;
            self.toggle_status_led();
        }
    }

    fn publish_mode(&mut self) {
        if let Err(err) = self.controls.write(Register::OperatingMode, &self.mode.encode()) {
            log::warn!("{}", err);
        }
    }

    fn process_inputs(&mut self, now: Instant) {
        while let Some(event) = self.events.try_receive() {
            self.handle_input(event, now);
        }
    }

    fn handle_input(&mut self, event: InputEvent, now: Instant) {
        if self.mode != OperatingMode::Light {
            self.forward_button(event);
            return;
        }

        match self.config.button_action(event.input) {
            Some(ButtonAction::PowerToggle) => self.request_power_toggle(now),
            Some(ButtonAction::BrightnessUp) => {
                self.queue_pulses(PulseRequest::new(ControlPin::BrightnessUp, 1));
            }
            Some(ButtonAction::BrightnessDown) => {
                self.queue_pulses(PulseRequest::new(ControlPin::BrightnessDown, 1));
            }
            Some(ButtonAction::ToggleStatusLed) => self.toggle_status_led(),
            Some(ButtonAction::SelectPreset(index)) => match self.config.preset(index) {
                Some(preset) => {
                    let preset = preset.clone();
                    self.select(preset, now);
                }
                None => log::warn!("no preset {}", index),
            },
            None => log::debug!("no action bound to {:?}", event.input),
        }
    }

    fn forward_button(&mut self, event: InputEvent) {
        if !self.controls.is_connected() {
            log::debug!("dropping button {:?} while disconnected", event.input);
            return;
        }
        let mut text: String<4> = String::new();
        if write!(text, "{}", event.input.0).is_err() {
            return;
        }
        if let Err(err) = self.controls.notify(Register::Buttons, text.as_bytes()) {
            log::warn!("{}", err);
        }
    }

    fn request_power_toggle(&mut self, now: Instant) {
        if self.power.try_toggle(now) {
            log::info!("power toggle, screen on: {}", self.power.powered_on());
            self.queue_pulses(PulseRequest::new(ControlPin::Power, 1));
        } else {
            log::debug!("power toggle ignored during cooldown");
        }
    }

    fn queue_pulses(&mut self, request: PulseRequest) {
        if self.pulses.push(request).is_err() {
            log::warn!("pulse queue full, dropping {:?}", request);
        }
    }

    fn toggle_status_led(&mut self) {
        self.status_led = !self.status_led;
        self.pins.set_level(ControlPin::StatusLed, self.status_led);
    }
}
