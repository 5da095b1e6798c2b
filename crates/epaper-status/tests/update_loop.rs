//! Update loop lifecycle against a mock panel.

#![allow(clippy::unwrap_used)]

use std::time::Duration;

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::{Point, Size};
use epaper_status::font::{Font, FontError, FontSet, Typeface};
use epaper_status::{
    AddressSource, Clock, DispatchOutcome, LoopConfig, LoopState, SkipReason, StartupError,
    UpdateLoop,
};
use platform::mocks::{MockPanel, PanelCall};
use platform::{Frame, CLEAR_WHITE};
use tokio_util::sync::CancellationToken;
use ui::{AddressList, ClockSample};

struct FixedClock;

impl Clock for FixedClock {
    fn sample(&self, show_seconds: bool) -> ClockSample {
        let time = if show_seconds { "14:05:09" } else { "14:05" };
        ClockSample::new(time, "2024-03-01")
    }
}

struct StaticAddresses(AddressList);

impl StaticAddresses {
    fn none() -> Self {
        Self(AddressList::new())
    }

    fn eth0() -> Self {
        Self(AddressList::from_candidates(vec![
            "eth0: 192.168.1.10".to_owned(),
        ]))
    }
}

impl AddressSource for StaticAddresses {
    fn probe(&self) -> AddressList {
        self.0.clone()
    }
}

/// Measures like the smallest built-in font, never draws.
#[derive(Debug)]
struct BrokenTypeface;

impl Typeface for BrokenTypeface {
    fn measure(&self, text: &str) -> Size {
        Font::builtin(12).measure(text)
    }

    fn draw(
        &self,
        _frame: &mut Frame,
        _top_left: Point,
        _text: &str,
        _color: BinaryColor,
    ) -> Result<(), FontError> {
        Err(FontError::Render("glyph cache unavailable".into()))
    }
}

fn config(interval_secs: u64) -> LoopConfig {
    LoopConfig::new(interval_secs, FontSet::builtin(48))
}

async fn start(
    panel: MockPanel,
    config: LoopConfig,
    addresses: StaticAddresses,
) -> UpdateLoop<MockPanel, FixedClock, StaticAddresses> {
    UpdateLoop::start_with(panel, config, FixedClock, addresses)
        .await
        .unwrap()
}

/// Run until `after` has elapsed, cancelling from a separate task.
async fn run_for(
    update_loop: &mut UpdateLoop<MockPanel, FixedClock, StaticAddresses>,
    after: Duration,
) -> epaper_status::LoopReport {
    let token = CancellationToken::new();
    let canceller = token.clone();
    tokio::spawn(async move {
        tokio::time::sleep(after).await;
        canceller.cancel();
    });
    update_loop.run(token).await
}

#[tokio::test]
async fn init_failure_is_fatal_before_running() {
    let result = UpdateLoop::start_with(
        MockPanel::full_only().failing_init(),
        config(1),
        FixedClock,
        StaticAddresses::none(),
    )
    .await;
    assert!(matches!(result, Err(StartupError::Init(_))));
}

#[tokio::test]
async fn run_until_reports_startup_failure() {
    let token = CancellationToken::new();
    token.cancel();
    let result =
        epaper_status::run_until(MockPanel::full_only().failing_init(), config(1), token).await;
    let err = result.unwrap_err();
    assert!(err.to_string().contains("panel init failed"));
}

#[tokio::test(start_paused = true)]
async fn tick_count_follows_elapsed_time() {
    for (interval, total) in [(1_u64, 10_u64), (3, 10), (5, 12), (60, 125), (7, 3)] {
        let mut update_loop = start(
            MockPanel::full_only(),
            config(interval),
            StaticAddresses::none(),
        )
        .await;

        let started = tokio::time::Instant::now();
        let report = run_for(&mut update_loop, Duration::from_secs(total)).await;
        let elapsed = started.elapsed();

        let expected = total / interval;
        assert!(
            report.ticks.abs_diff(expected) <= 1,
            "interval {interval}s, cancelled at {total}s: {} ticks",
            report.ticks
        );
        // cancellation observed within one sleep step
        assert!(elapsed <= Duration::from_secs(total + 1), "took {elapsed:?}");
        assert_eq!(report.state, LoopState::Stopped);
        assert_eq!(report.dispatched, report.ticks);
    }
}

#[tokio::test(start_paused = true)]
async fn draining_clears_then_sleeps() {
    let mut update_loop = start(
        MockPanel::full_only(),
        config(60),
        StaticAddresses::eth0(),
    )
    .await;
    run_for(&mut update_loop, Duration::from_secs(30)).await;

    let calls = update_loop.panel().calls();
    assert_eq!(
        &calls[calls.len() - 2..],
        &[PanelCall::Clear(CLEAR_WHITE), PanelCall::Sleep]
    );
}

#[tokio::test(start_paused = true)]
async fn no_clear_leaves_last_frame() {
    let mut update_loop = start(
        MockPanel::full_only(),
        config(60).with_clear_on_exit(false),
        StaticAddresses::eth0(),
    )
    .await;
    run_for(&mut update_loop, Duration::from_secs(30)).await;

    let calls = update_loop.panel().calls();
    assert_eq!(calls.last(), Some(&PanelCall::Sleep));
    assert!(matches!(calls[calls.len() - 2], PanelCall::Invoke(..)));
    // only the startup clear
    let clears = calls
        .iter()
        .filter(|call| matches!(call, PanelCall::Clear(_)))
        .count();
    assert_eq!(clears, 1);
}

#[tokio::test(start_paused = true)]
async fn drain_failures_are_not_fatal() {
    let mut update_loop = start(
        MockPanel::full_only().failing_sleep(),
        config(1),
        StaticAddresses::none(),
    )
    .await;
    let report = run_for(&mut update_loop, Duration::from_secs(2)).await;
    assert_eq!(report.state, LoopState::Stopped);
}

#[tokio::test]
async fn address_overlay_failure_still_updates_panel() {
    let mut fonts = FontSet::builtin(48);
    fonts.address = Box::new(BrokenTypeface);
    let mut update_loop = start(
        MockPanel::full_only(),
        LoopConfig::new(1, fonts),
        StaticAddresses::eth0(),
    )
    .await;

    assert_eq!(update_loop.tick().await, DispatchOutcome::Full("display"));
    assert_eq!(update_loop.report().skipped, 0);
}

#[tokio::test]
async fn base_text_failure_skips_tick() {
    let mut fonts = FontSet::builtin(48);
    fonts.time = Box::new(BrokenTypeface);
    let mut update_loop = start(
        MockPanel::full_only(),
        LoopConfig::new(1, fonts),
        StaticAddresses::none(),
    )
    .await;

    assert_eq!(
        update_loop.tick().await,
        DispatchOutcome::Skipped(SkipReason::RenderFailed)
    );
    assert!(update_loop.panel().invoked().is_empty());
    assert_eq!(update_loop.state(), LoopState::Running);
}

#[tokio::test]
async fn dispatch_failures_keep_loop_running() {
    let mut update_loop = start(
        MockPanel::full_only().failing_operation("display"),
        config(1),
        StaticAddresses::none(),
    )
    .await;
    for _ in 0..3 {
        assert!(!update_loop.tick().await.is_dispatched());
    }
    let report = update_loop.report();
    assert_eq!((report.ticks, report.skipped), (3, 3));
    assert_eq!(report.state, LoopState::Running);
}

#[tokio::test]
async fn partial_refresh_negotiated_once() {
    let mut update_loop = start(
        MockPanel::new(250, 122, &["display", "displayPartial"]),
        config(1).with_partial_refresh(true),
        StaticAddresses::none(),
    )
    .await;
    assert!(update_loop.dispatcher().supports_partial());

    for _ in 0..2 {
        assert_eq!(
            update_loop.tick().await,
            DispatchOutcome::Partial("displayPartial")
        );
    }
    let panel = update_loop.into_panel();
    assert_eq!(panel.invoke_count("displayPartial"), 2);
    assert_eq!(panel.invoke_count("display"), 0);
}
