//! The update loop: Initializing → Running → Draining → Stopped.
//!
//! The loop owns the panel, the fonts and the refresh dispatcher for its
//! whole lifetime. Each tick samples the clock, probes local addresses,
//! renders a frame and dispatches it. Between ticks the loop waits in
//! one-second steps so cancellation is noticed within about a second.
//!
//! Only startup is fatal. Once running, every failure degrades the tick
//! and is logged.

use std::time::Duration;

use platform::{Panel, PanelError, CLEAR_WHITE};
use tokio_util::sync::CancellationToken;

use crate::clock::{Clock, SystemClock};
use crate::config::LoopConfig;
use crate::net::{AddressProbe, AddressSource};
use crate::refresh::{DispatchOutcome, PanelDispatcher, SkipReason};
use crate::render::render_frame;

/// Granularity of the interval wait.
pub const SLEEP_STEP: Duration = Duration::from_secs(1);

/// Lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    /// Panel init and first clear in progress
    Initializing,
    /// Ticking
    Running,
    /// Cancelled, putting the panel to rest
    Draining,
    /// Terminal
    Stopped,
}

/// Fatal startup failures
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    /// `init()` failed
    #[error("panel init failed: {0}")]
    Init(#[source] PanelError),
    /// The initial full clear failed
    #[error("initial panel clear failed: {0}")]
    Clear(#[source] PanelError),
}

/// Summary of a finished run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopReport {
    /// Ticks started
    pub ticks: u64,
    /// Ticks whose frame reached the panel
    pub dispatched: u64,
    /// Ticks that left the panel unchanged
    pub skipped: u64,
    /// State at the time of the report
    pub state: LoopState,
}

/// Periodic status renderer bound to one panel.
#[derive(Debug)]
pub struct UpdateLoop<P, C = SystemClock, A = AddressProbe> {
    panel: P,
    config: LoopConfig,
    dispatcher: PanelDispatcher,
    clock: C,
    addresses: A,
    state: LoopState,
    ticks: u64,
    dispatched: u64,
    skipped: u64,
}

impl<P: Panel> UpdateLoop<P> {
    /// Initialize `panel` with the system clock and address probe.
    pub async fn start(panel: P, config: LoopConfig) -> Result<Self, StartupError> {
        Self::start_with(panel, config, SystemClock, AddressProbe::system()).await
    }
}

impl<P, C, A> UpdateLoop<P, C, A>
where
    P: Panel,
    C: Clock,
    A: AddressSource,
{
    /// Initialize `panel` with explicit clock and address sources.
    ///
    /// Runs `init()` and a full white clear, then negotiates the refresh
    /// paths once. Either panel call failing is fatal.
    pub async fn start_with(
        mut panel: P,
        config: LoopConfig,
        clock: C,
        addresses: A,
    ) -> Result<Self, StartupError> {
        let info = panel.info();
        tracing::info!(
            state = ?LoopState::Initializing,
            width = info.width,
            height = info.height,
            "initializing panel"
        );

        panel.init().await.map_err(StartupError::Init)?;
        panel
            .clear(CLEAR_WHITE)
            .await
            .map_err(StartupError::Clear)?;

        let dispatcher = PanelDispatcher::negotiate(&panel, config.partial_refresh());
        tracing::info!(
            state = ?LoopState::Running,
            interval_secs = config.interval_secs(),
            partial = dispatcher.supports_partial(),
            "panel ready"
        );

        Ok(Self {
            panel,
            config,
            dispatcher,
            clock,
            addresses,
            state: LoopState::Running,
            ticks: 0,
            dispatched: 0,
            skipped: 0,
        })
    }

    /// Render and dispatch one frame.
    pub async fn tick(&mut self) -> DispatchOutcome {
        self.ticks += 1;

        let sample = self.clock.sample(self.config.show_seconds());
        let addresses = self.addresses.probe();
        tracing::debug!(
            tick = self.ticks,
            time = sample.time(),
            date = sample.date(),
            addresses = addresses.len(),
            "tick"
        );

        let info = self.panel.info();
        let outcome = match render_frame(info, &sample, &addresses, self.config.fonts()) {
            Some(frame) => self.dispatcher.dispatch(&mut self.panel, &frame).await,
            None => DispatchOutcome::Skipped(SkipReason::RenderFailed),
        };

        if outcome.is_dispatched() {
            self.dispatched += 1;
        } else {
            self.skipped += 1;
            tracing::warn!(tick = self.ticks, ?outcome, "panel not updated this tick");
        }
        outcome
    }

    /// Tick until `shutdown` is cancelled, then drain the panel.
    pub async fn run(&mut self, shutdown: CancellationToken) -> LoopReport {
        while self.state == LoopState::Running && !shutdown.is_cancelled() {
            self.tick().await;
            self.wait_interval(&shutdown).await;
        }
        self.drain().await;
        self.report()
    }

    async fn wait_interval(&self, shutdown: &CancellationToken) {
        for _ in 0..self.config.interval_secs() {
            if shutdown.is_cancelled() {
                return;
            }
            tokio::time::sleep(SLEEP_STEP).await;
        }
    }

    /// Clear (unless disabled) and sleep the panel. Failures are logged.
    pub async fn drain(&mut self) {
        if self.state == LoopState::Stopped {
            return;
        }
        self.state = LoopState::Draining;
        tracing::info!(state = ?self.state, ticks = self.ticks, "shutting down");

        if self.config.clear_on_exit() {
            if let Err(err) = self.panel.clear(CLEAR_WHITE).await {
                tracing::warn!(%err, "panel clear on exit failed");
            }
        }
        if let Err(err) = self.panel.sleep().await {
            tracing::warn!(%err, "panel sleep failed");
        }

        self.state = LoopState::Stopped;
        tracing::info!(state = ?self.state, "stopped");
    }

    /// Counters so far.
    pub fn report(&self) -> LoopReport {
        LoopReport {
            ticks: self.ticks,
            dispatched: self.dispatched,
            skipped: self.skipped,
            state: self.state,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Resolved refresh paths.
    pub fn dispatcher(&self) -> &PanelDispatcher {
        &self.dispatcher
    }

    /// The owned panel.
    pub fn panel(&self) -> &P {
        &self.panel
    }

    /// Give the panel back.
    pub fn into_panel(self) -> P {
        self.panel
    }
}

/// Start, run until `shutdown`, drain.
pub async fn run_until<P: Panel>(
    panel: P,
    config: LoopConfig,
    shutdown: CancellationToken,
) -> Result<LoopReport, StartupError> {
    let mut update_loop = UpdateLoop::start(panel, config).await?;
    Ok(update_loop.run(shutdown).await)
}
