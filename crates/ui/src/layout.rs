//! Fixed composition of the status panel.
//!
//! ```text
//! ┌──────────────────────────────┐
//! │          14:05               │  time: centred, top at max(2, h/2 − time_h)
//! │        2024-03-01            │  date: centred, 4 px below time
//! │     eth0: 192.168.1.10       │  addresses: centred, 6 px below date,
//! │     wlan0: 10.0.0.7          │  2 px between lines, dropped once a
//! └──────────────────────────────┘  line's bottom passes h − 2
//! ```
//!
//! Every string is centred on its own rather than left-aligned as a block.
//! Coordinates are the top-left corner of each string's extent.

use embedded_graphics::prelude::{Point, Size};

use crate::status::MAX_ADDRESSES;

/// Time never starts closer than this to the top edge.
pub const TIME_MIN_TOP: i32 = 2;
/// Gap between the time and the date.
pub const DATE_GAP: i32 = 4;
/// Gap between the date and the first address line.
pub const ADDRESS_GAP: i32 = 6;
/// Gap between consecutive address lines.
pub const ADDRESS_LINE_GAP: i32 = 2;
/// Address lines must end at least this far above the bottom edge.
pub const BOTTOM_MARGIN: i32 = 2;

/// Placement of every string on the panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLayout {
    /// Top-left of the time string
    pub time: Point,
    /// Top-left of the date string
    pub date: Point,
    /// Top-left of each address line that fits, in order
    pub addresses: heapless::Vec<Point, MAX_ADDRESSES>,
}

/// Computes [`StatusLayout`] from panel size and measured text extents.
#[derive(Debug, Clone, Copy, Default)]
pub struct LayoutEngine;

impl LayoutEngine {
    /// Place time, date and address lines on a `panel` sized canvas.
    ///
    /// `addresses` beyond [`MAX_ADDRESSES`] are ignored. Lines that would
    /// overflow the bottom margin are dropped whole, and so is every line
    /// after them.
    pub fn layout(panel: Size, time: Size, date: Size, addresses: &[Size]) -> StatusLayout {
        let time_top = (px(panel.height) / 2)
            .saturating_sub(px(time.height))
            .max(TIME_MIN_TOP);
        let time_pos = Point::new(center_x(panel.width, time.width), time_top);

        let date_top = time_top
            .saturating_add(px(time.height))
            .saturating_add(DATE_GAP);
        let date_pos = Point::new(center_x(panel.width, date.width), date_top);

        let limit = px(panel.height).saturating_sub(BOTTOM_MARGIN);
        let mut placed: heapless::Vec<Point, MAX_ADDRESSES> = heapless::Vec::new();
        let mut y = date_top
            .saturating_add(px(date.height))
            .saturating_add(ADDRESS_GAP);
        for extent in addresses.iter().take(MAX_ADDRESSES) {
            let bottom = y.saturating_add(px(extent.height));
            if bottom > limit {
                break;
            }
            if placed
                .push(Point::new(center_x(panel.width, extent.width), y))
                .is_err()
            {
                break;
            }
            y = bottom.saturating_add(ADDRESS_LINE_GAP);
        }

        StatusLayout {
            time: time_pos,
            date: date_pos,
            addresses: placed,
        }
    }
}

/// Left edge that centres `text_width` on `panel_width`.
///
/// Rounds toward negative infinity, so text wider than the panel starts
/// left of the edge and overhangs both sides evenly.
pub fn center_x(panel_width: u32, text_width: u32) -> i32 {
    px(panel_width)
        .saturating_sub(px(text_width))
        .div_euclid(2)
}

fn px(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}
