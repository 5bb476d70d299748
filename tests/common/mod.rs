//! Shared test infrastructure for phase-sequencer integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use phase_sequencer::{
    LightRenderer, Phase, PhaseSequence, RenderError, RgbLed, SequenceController, Srgb,
    TimeDuration, TimeInstant, TimeSource, colors,
};

// ============================================================================
// Mock Time Types
// ============================================================================

/// Mock duration type for testing (wraps milliseconds)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestDuration(pub u64);

impl TimeDuration for TestDuration {
    fn as_millis(&self) -> u64 {
        self.0
    }

    fn from_millis(millis: u64) -> Self {
        TestDuration(millis)
    }

    fn saturating_sub(self, other: Self) -> Self {
        TestDuration(self.0.saturating_sub(other.0))
    }
}

/// Mock instant type for testing
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestInstant(pub u64);

impl TimeInstant for TestInstant {
    type Duration = TestDuration;

    fn duration_since(&self, earlier: Self) -> Self::Duration {
        TestDuration(self.0 - earlier.0)
    }
}

// ============================================================================
// Mock Time Source
// ============================================================================

/// Mock time source with controllable time advancement
pub struct MockTimeSource {
    current_time: core::cell::Cell<TestInstant>,
}

impl MockTimeSource {
    pub fn new() -> Self {
        Self {
            current_time: core::cell::Cell::new(TestInstant(0)),
        }
    }

    /// Advance time by the given number of milliseconds
    pub fn advance(&self, millis: u64) {
        let current = self.current_time.get();
        self.current_time.set(TestInstant(current.0 + millis));
    }

    /// Current time in milliseconds
    pub fn now_millis(&self) -> u64 {
        self.current_time.get().0
    }

    /// Jump to an absolute time in milliseconds
    pub fn set_time(&self, millis: u64) {
        self.current_time.set(TestInstant(millis));
    }
}

impl TimeSource<TestInstant> for MockTimeSource {
    fn now(&self) -> TestInstant {
        self.current_time.get()
    }
}

// ============================================================================
// Recording Renderer
// ============================================================================

/// One renderer call with the time it happened at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderEvent {
    Activate(String, u64),
    Deactivate(String, u64),
}

/// Renderer that records every call, stamped with the mock clock.
pub struct RecordingRenderer<'t> {
    clock: &'t MockTimeSource,
    events: Vec<RenderEvent>,
    missing: Option<&'static str>,
    stuck: Option<&'static str>,
}

impl<'t> RecordingRenderer<'t> {
    pub fn new(clock: &'t MockTimeSource) -> Self {
        Self {
            clock,
            events: Vec::new(),
            missing: None,
            stuck: None,
        }
    }

    /// Makes every call for phase `id` fail with `TargetNotFound`.
    pub fn without_target(mut self, id: &'static str) -> Self {
        self.missing = Some(id);
        self
    }

    /// Makes only `deactivate` fail for phase `id`; it still lights normally.
    pub fn with_stuck_lamp(mut self, id: &'static str) -> Self {
        self.stuck = Some(id);
        self
    }

    pub fn events(&self) -> &[RenderEvent] {
        &self.events
    }

    pub fn activations(&self) -> Vec<(&str, u64)> {
        self.events
            .iter()
            .filter_map(|e| match e {
                RenderEvent::Activate(id, t) => Some((id.as_str(), *t)),
                RenderEvent::Deactivate(..) => None,
            })
            .collect()
    }

    pub fn deactivations(&self) -> Vec<(&str, u64)> {
        self.events
            .iter()
            .filter_map(|e| match e {
                RenderEvent::Deactivate(id, t) => Some((id.as_str(), *t)),
                RenderEvent::Activate(..) => None,
            })
            .collect()
    }

    /// Largest number of phases lit at the same time over the whole recording.
    pub fn max_lit(&self) -> usize {
        let mut lit = 0usize;
        let mut max = 0;
        for event in &self.events {
            match event {
                RenderEvent::Activate(..) => lit += 1,
                RenderEvent::Deactivate(..) => lit -= 1,
            }
            max = max.max(lit);
        }
        max
    }

    fn check<D: TimeDuration>(&self, phase: &Phase<D>) -> Result<(), RenderError> {
        match self.missing {
            Some(id) if phase.id.as_str() == id => Err(RenderError::TargetNotFound(phase.id.clone())),
            _ => Ok(()),
        }
    }
}

impl LightRenderer for RecordingRenderer<'_> {
    fn activate<D: TimeDuration>(&mut self, phase: &Phase<D>) -> Result<(), RenderError> {
        self.check(phase)?;
        let now = self.clock.now_millis();
        self.events.push(RenderEvent::Activate(phase.id.to_string(), now));
        Ok(())
    }

    fn deactivate<D: TimeDuration>(&mut self, phase: &Phase<D>) -> Result<(), RenderError> {
        self.check(phase)?;
        if self.stuck == Some(phase.id.as_str()) {
            return Err(RenderError::TargetNotFound(phase.id.clone()));
        }
        let now = self.clock.now_millis();
        self.events.push(RenderEvent::Deactivate(phase.id.to_string(), now));
        Ok(())
    }
}

// ============================================================================
// Mock LED
// ============================================================================

/// Mock LED that records all color changes for testing
pub struct MockLed {
    current_color: Srgb,
    color_history: heapless::Vec<Srgb, 32>,
}

impl MockLed {
    pub fn new() -> Self {
        Self {
            current_color: colors::OFF,
            color_history: heapless::Vec::new(),
        }
    }

    pub fn get_last_color(&self) -> Srgb {
        self.current_color
    }

    pub fn color_history(&self) -> &[Srgb] {
        &self.color_history
    }
}

impl RgbLed for MockLed {
    fn set_color(&mut self, color: Srgb) {
        self.current_color = color;
        let _ = self.color_history.push(color);
    }
}

// ============================================================================
// Fixtures
// ============================================================================

pub type TestController<'t> =
    SequenceController<'t, TestInstant, RecordingRenderer<'t>, MockTimeSource, 8>;

/// green 5000 ms, yellow 2500 ms, red 5000 ms
pub fn traffic_light() -> PhaseSequence<TestDuration, 8> {
    PhaseSequence::traffic_light().unwrap()
}

pub fn controller(clock: &MockTimeSource) -> TestController<'_> {
    SequenceController::new(traffic_light(), RecordingRenderer::new(clock), clock)
}

/// Compare two colors with floating-point tolerance
pub fn colors_equal(a: Srgb, b: Srgb) -> bool {
    const EPSILON: f32 = 0.001;
    (a.red - b.red).abs() < EPSILON
        && (a.green - b.green).abs() < EPSILON
        && (a.blue - b.blue).abs() < EPSILON
}
