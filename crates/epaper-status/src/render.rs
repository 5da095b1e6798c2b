//! Frame composition: clock, date and address overlay.

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::Size;
use platform::{DisplayInfo, Frame};
use ui::{AddressList, ClockSample, LayoutEngine};

use crate::font::{FontError, FontSet, Typeface};

/// Rendering errors
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// Time or date text failed
    #[error("base text render failed: {0}")]
    Base(#[source] FontError),
    /// An address line failed
    #[error("address overlay render failed: {0}")]
    Overlay(#[source] FontError),
}

/// Draw one status frame sized to `info`.
///
/// Time and date are always drawn; address lines are placed by
/// [`LayoutEngine`] and silently dropped once they would overflow.
pub fn render_status(
    info: DisplayInfo,
    clock: &ClockSample,
    addresses: &AddressList,
    fonts: &FontSet,
) -> Result<Frame, RenderError> {
    let mut frame = Frame::new(info.width, info.height);

    let time_extent = fonts.time.measure(clock.time());
    let date_extent = fonts.date.measure(clock.date());
    let address_extents: Vec<Size> = addresses
        .iter()
        .map(|line| fonts.address.measure(line))
        .collect();

    let layout = LayoutEngine::layout(
        Size::new(info.width, info.height),
        time_extent,
        date_extent,
        &address_extents,
    );

    fonts
        .time
        .draw(&mut frame, layout.time, clock.time(), BinaryColor::On)
        .map_err(RenderError::Base)?;
    fonts
        .date
        .draw(&mut frame, layout.date, clock.date(), BinaryColor::On)
        .map_err(RenderError::Base)?;

    for (line, position) in addresses.iter().zip(layout.addresses.iter()) {
        fonts
            .address
            .draw(&mut frame, *position, line, BinaryColor::On)
            .map_err(RenderError::Overlay)?;
    }

    Ok(frame)
}

/// Render with the degrade policy applied.
///
/// An address overlay failure re-renders the frame without addresses. A
/// time or date failure yields `None` and the tick is skipped.
pub fn render_frame(
    info: DisplayInfo,
    clock: &ClockSample,
    addresses: &AddressList,
    fonts: &FontSet,
) -> Option<Frame> {
    match render_status(info, clock, addresses, fonts) {
        Ok(frame) => Some(frame),
        Err(RenderError::Overlay(err)) => {
            tracing::warn!(%err, "address overlay failed, rendering without addresses");
            match render_status(info, clock, &AddressList::new(), fonts) {
                Ok(frame) => Some(frame),
                Err(err) => {
                    tracing::warn!(%err, "render failed, skipping tick");
                    None
                }
            }
        }
        Err(err) => {
            tracing::warn!(%err, "render failed, skipping tick");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::font::Font;
    use embedded_graphics::prelude::Point;

    /// Measures like a built-in font but refuses to draw.
    #[derive(Debug)]
    struct Refusing;

    impl Typeface for Refusing {
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
            Err(FontError::Render("refused".into()))
        }
    }

    const INFO: DisplayInfo = DisplayInfo::new(250, 122);

    fn sample() -> ClockSample {
        ClockSample::new("14:05", "2024-03-01")
    }

    fn addresses() -> AddressList {
        AddressList::from_candidates(vec!["eth0: 192.168.1.10".to_owned()])
    }

    #[test]
    fn test_frame_matches_panel_geometry() {
        let frame = render_status(INFO, &sample(), &addresses(), &FontSet::builtin(48)).unwrap();
        assert_eq!((frame.width(), frame.height()), (250, 122));
        assert!(frame.ink_count() > 0);
    }

    #[test]
    fn test_time_ink_is_centred() {
        let fonts = FontSet::builtin(48);
        let frame = render_status(INFO, &sample(), &AddressList::new(), &fonts).unwrap();
        // 10x20 font: "14:05" is 50x20, top-left (100, 41)
        assert!(frame.has_ink_in(Point::new(100, 41), Size::new(50, 20)));
        assert!(!frame.has_ink_in(Point::zero(), Size::new(250, 41)));
    }

    #[test]
    fn test_addresses_add_ink_below_date() {
        let fonts = FontSet::builtin(48);
        let bare = render_status(INFO, &sample(), &AddressList::new(), &fonts).unwrap();
        let full = render_status(INFO, &sample(), &addresses(), &fonts).unwrap();
        assert!(full.ink_count() > bare.ink_count());
    }

    #[test]
    fn test_overlay_failure_degrades_to_no_addresses() {
        let mut fonts = FontSet::builtin(48);
        fonts.address = Box::new(Refusing);

        let err = render_status(INFO, &sample(), &addresses(), &fonts).unwrap_err();
        assert!(matches!(err, RenderError::Overlay(_)));

        let degraded = render_frame(INFO, &sample(), &addresses(), &fonts).unwrap();
        let expected =
            render_status(INFO, &sample(), &AddressList::new(), &FontSet::builtin(48)).unwrap();
        assert_eq!(degraded, expected);
    }

    #[test]
    fn test_base_failure_skips_frame() {
        let mut fonts = FontSet::builtin(48);
        fonts.date = Box::new(Refusing);
        assert!(matches!(
            render_status(INFO, &sample(), &addresses(), &fonts),
            Err(RenderError::Base(_))
        ));
        assert!(render_frame(INFO, &sample(), &addresses(), &fonts).is_none());
    }
}
