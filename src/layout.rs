//! # Face Layout
//!
//! Fixed geometry for the 144 x 168 face, plus the one piece that moves:
//! the date row, whose slots are packed left to right in the order named by
//! the active [`DateOrder`].
//!
//! ```text
//!  ┌────────┐ ┌────────┐   y = 8   hour / minute tiles
//!  │  hour  │ │ minute │
//!  └────────┘ └────────┘
//!    AM/PM                 y = 76  meridiem (no tile)
//!  ┌──────────────────┐    y = 92  weekday tile
//!  └──────────────────┘
//!  ┌──┐ ┌──┐ ┌───────┐     y = 128 date row (day-month-year shown)
//!  └──┘ └──┘ └───────┘
//! ```
//!
//! Text regions sit 2 px inside the top of their tile; [`tile_for`] maps a
//! text frame back to the tile drawn behind it.

use crate::date_order::DateOrder;
use embedded_graphics::{
    geometry::{Point, Size},
    primitives::Rectangle,
};

/// Display width in pixels
pub const SCREEN_WIDTH: u32 = 144;
/// Display height in pixels
pub const SCREEN_HEIGHT: u32 = 168;

/// Corner radius of every tile
pub const TILE_RADIUS: u32 = 4;

const ROW_LEFT: i32 = 2;
const GAP: i32 = 4;
const NARROW: u32 = 32;
const WIDE: u32 = 68;

const DATE_TEXT_Y: i32 = 130;
const DATE_TEXT_HEIGHT: u32 = 30;

pub const HOUR_FRAME: Rectangle = rect(2, 12, 68, 64);
pub const MINUTE_FRAME: Rectangle = rect(74, 12, 68, 64);
pub const WEEKDAY_FRAME: Rectangle = rect(2, 94, 140, 30);
pub const MERIDIEM_FRAME: Rectangle = rect(2, 76, 68, 16);

pub const HOUR_TILE: Rectangle = rect(2, 8, 68, 68);
pub const MINUTE_TILE: Rectangle = rect(74, 8, 68, 68);
pub const WEEKDAY_TILE: Rectangle = rect(2, 92, 140, 32);

/// Separator lines drawn across the tiles in the background colour.
pub const SEPARATORS: [(Point, Point); 3] = [
    (Point::new(2, 41), Point::new(142, 41)),
    (Point::new(2, 108), Point::new(142, 108)),
    (Point::new(2, 144), Point::new(142, 144)),
];

const fn rect(x: i32, y: i32, width: u32, height: u32) -> Rectangle {
    Rectangle::new(Point::new(x, y), Size::new(width, height))
}

/// Screen rectangles of the three date text regions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DateLayout {
    pub day: Rectangle,
    pub month: Rectangle,
    pub year: Rectangle,
}

impl DateLayout {
    /// The three frames in left-to-right order.
    pub fn frames(&self) -> [Rectangle; 3] {
        let mut frames = [self.day, self.month, self.year];
        frames.sort_by_key(|frame| frame.top_left.x);
        frames
    }
}

/// Compute the date row for `order`.
///
/// Pure: the same order always yields the same rectangles.
pub fn date_layout(order: DateOrder) -> DateLayout {
    enum Slot {
        Day,
        Month,
        Year,
    }

    let sequence = match order {
        DateOrder::DayMonthYear => [Slot::Day, Slot::Month, Slot::Year],
        DateOrder::MonthDayYear => [Slot::Month, Slot::Day, Slot::Year],
        DateOrder::YearMonthDay => [Slot::Year, Slot::Month, Slot::Day],
    };

    let mut layout = DateLayout {
        day: Rectangle::zero(),
        month: Rectangle::zero(),
        year: Rectangle::zero(),
    };

    let mut x = ROW_LEFT;
    for slot in sequence {
        let width = match slot {
            Slot::Year => WIDE,
            Slot::Day | Slot::Month => NARROW,
        };
        let frame = rect(x, DATE_TEXT_Y, width, DATE_TEXT_HEIGHT);
        match slot {
            Slot::Day => layout.day = frame,
            Slot::Month => layout.month = frame,
            Slot::Year => layout.year = frame,
        }
        x += width as i32 + GAP;
    }

    layout
}

/// Tile drawn behind a text frame: 2 px higher, 32 px tall for the date row.
pub fn tile_for(frame: Rectangle) -> Rectangle {
    Rectangle::new(
        Point::new(frame.top_left.x, frame.top_left.y - 2),
        Size::new(frame.size.width, frame.size.height + 2),
    )
}

/// Every tile for the given order, in drawing order.
pub fn tiles(order: DateOrder) -> [Rectangle; 6] {
    let date = date_layout(order).frames();
    [
        HOUR_TILE,
        MINUTE_TILE,
        WEEKDAY_TILE,
        tile_for(date[0]),
        tile_for(date[1]),
        tile_for(date[2]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn overlaps(a: &Rectangle, b: &Rectangle) -> bool {
        let a_right = a.top_left.x + a.size.width as i32;
        let b_right = b.top_left.x + b.size.width as i32;
        let a_bottom = a.top_left.y + a.size.height as i32;
        let b_bottom = b.top_left.y + b.size.height as i32;
        a.top_left.x < b_right
            && b.top_left.x < a_right
            && a.top_left.y < b_bottom
            && b.top_left.y < a_bottom
    }

    #[test]
    fn test_day_month_year_positions() {
        let layout = date_layout(DateOrder::DayMonthYear);
        assert_eq!(layout.day, rect(2, 130, 32, 30));
        assert_eq!(layout.month, rect(38, 130, 32, 30));
        assert_eq!(layout.year, rect(74, 130, 68, 30));
    }

    #[test]
    fn test_month_day_year_positions() {
        let layout = date_layout(DateOrder::MonthDayYear);
        assert_eq!(layout.month, rect(2, 130, 32, 30));
        assert_eq!(layout.day, rect(38, 130, 32, 30));
        assert_eq!(layout.year, rect(74, 130, 68, 30));
    }

    #[test]
    fn test_year_month_day_moves_year_first() {
        let layout = date_layout(DateOrder::YearMonthDay);
        assert_eq!(layout.year, rect(2, 130, 68, 30));
        assert_eq!(layout.month, rect(74, 130, 32, 30));
        assert_eq!(layout.day, rect(110, 130, 32, 30));
    }

    #[test]
    fn test_layout_is_idempotent() {
        for order in DateOrder::ALL {
            assert_eq!(date_layout(order), date_layout(order));
        }
    }

    #[test]
    fn test_date_frames_never_overlap() {
        for order in DateOrder::ALL {
            let frames = date_layout(order).frames();
            for i in 0..frames.len() {
                for j in (i + 1)..frames.len() {
                    assert!(
                        !overlaps(&frames[i], &frames[j]),
                        "{order}: {:?} overlaps {:?}",
                        frames[i],
                        frames[j]
                    );
                }
            }
        }
    }

    #[test]
    fn test_date_row_stays_on_screen() {
        for order in DateOrder::ALL {
            for frame in date_layout(order).frames() {
                let right = frame.top_left.x as u32 + frame.size.width;
                assert!(right <= SCREEN_WIDTH - 2, "{order}: right edge {right}");
            }
        }
    }

    #[test]
    fn test_tile_for_covers_date_row_tiles() {
        let layout = date_layout(DateOrder::DayMonthYear);
        assert_eq!(tile_for(layout.day), rect(2, 128, 32, 32));
        assert_eq!(tile_for(layout.year), rect(74, 128, 68, 32));
    }

    #[test]
    fn test_tiles_sorted_left_to_right_in_date_row() {
        let tiles = tiles(DateOrder::YearMonthDay);
        assert_eq!(tiles[3], rect(2, 128, 68, 32));
        assert_eq!(tiles[5], rect(110, 128, 32, 32));
    }
}
