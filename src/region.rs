//! # Text Regions
//!
//! A [`TextRegion`] is one positioned, styled piece of text on the face.
//! [`FaceWindow`] owns one region per [`Field`] for the lifetime of the
//! face; the controller only pushes text and frames into it.

use crate::layout::{DateLayout, HOUR_FRAME, MERIDIEM_FRAME, MINUTE_FRAME, WEEKDAY_FRAME};
use embedded_graphics::{
    mono_font::{
        ascii::{FONT_10X20, FONT_6X10},
        MonoFont,
    },
    pixelcolor::BinaryColor,
    primitives::Rectangle,
};

/// Colour of tiles and of text drawn directly on the background.
pub const FOREGROUND: BinaryColor = BinaryColor::On;
/// Colour of the screen, separators and text drawn on tiles.
pub const BACKGROUND: BinaryColor = BinaryColor::Off;

/// Every field displayed on the face.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    Hour,
    Minute,
    Weekday,
    Day,
    Month,
    Year,
    Meridiem,
}

impl Field {
    pub const ALL: [Field; 7] = [
        Field::Hour,
        Field::Minute,
        Field::Weekday,
        Field::Day,
        Field::Month,
        Field::Year,
        Field::Meridiem,
    ];

    fn index(self) -> usize {
        self as usize
    }
}

/// Typeface size class of a region.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FaceFont {
    /// Hour and minute digits
    Large,
    /// Weekday and date row
    Medium,
    /// AM/PM marker
    Small,
}

impl FaceFont {
    pub fn mono_font(self) -> &'static MonoFont<'static> {
        match self {
            FaceFont::Large => &profont::PROFONT_24_POINT,
            FaceFont::Medium => &FONT_10X20,
            FaceFont::Small => &FONT_6X10,
        }
    }
}

/// One piece of centred text inside a frame.
#[derive(Clone, Debug, PartialEq)]
pub struct TextRegion {
    pub frame: Rectangle,
    pub text: String,
    pub font: FaceFont,
    pub color: BinaryColor,
}

impl TextRegion {
    fn new(frame: Rectangle, font: FaceFont, color: BinaryColor) -> Self {
        Self {
            frame,
            text: String::new(),
            font,
            color,
        }
    }
}

/// The face's window: every text region plus a dirty flag the host polls
/// before redrawing.
#[derive(Debug)]
pub struct FaceWindow {
    regions: [TextRegion; 7],
    dirty: bool,
}

impl FaceWindow {
    /// Create every region, with the date row placed by `date`.
    pub fn new(date: &DateLayout) -> Self {
        let on_tile = |frame, font| TextRegion::new(frame, font, BACKGROUND);
        Self {
            regions: [
                on_tile(HOUR_FRAME, FaceFont::Large),
                on_tile(MINUTE_FRAME, FaceFont::Large),
                on_tile(WEEKDAY_FRAME, FaceFont::Medium),
                on_tile(date.day, FaceFont::Medium),
                on_tile(date.month, FaceFont::Medium),
                on_tile(date.year, FaceFont::Medium),
                TextRegion::new(MERIDIEM_FRAME, FaceFont::Small, FOREGROUND),
            ],
            dirty: true,
        }
    }

    pub fn region(&self, field: Field) -> &TextRegion {
        &self.regions[field.index()]
    }

    pub fn regions(&self) -> impl Iterator<Item = &TextRegion> {
        self.regions.iter()
    }

    pub fn set_text(&mut self, field: Field, text: &str) {
        let region = &mut self.regions[field.index()];
        if region.text != text {
            region.text.clear();
            region.text.push_str(text);
            self.dirty = true;
        }
    }

    pub fn set_frame(&mut self, field: Field, frame: Rectangle) {
        let region = &mut self.regions[field.index()];
        if region.frame != frame {
            region.frame = frame;
            self.dirty = true;
        }
    }

    /// Move the day, month and year regions.
    pub fn apply_date_layout(&mut self, date: &DateLayout) {
        self.set_frame(Field::Day, date.day);
        self.set_frame(Field::Month, date.month);
        self.set_frame(Field::Year, date.year);
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Clear the dirty flag, returning whether a redraw was pending.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::replace(&mut self.dirty, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{date_order::DateOrder, layout::date_layout};

    #[test]
    fn test_new_window_is_dirty_and_blank() {
        let window = FaceWindow::new(&date_layout(DateOrder::DayMonthYear));
        assert!(window.is_dirty());
        assert!(window.regions().all(|region| region.text.is_empty()));
        assert_eq!(window.regions().count(), Field::ALL.len());
    }

    #[test]
    fn test_set_text_marks_dirty_only_on_change() {
        let mut window = FaceWindow::new(&date_layout(DateOrder::DayMonthYear));
        assert!(window.take_dirty());

        window.set_text(Field::Minute, "07");
        assert!(window.take_dirty());
        assert_eq!(window.region(Field::Minute).text, "07");

        window.set_text(Field::Minute, "07");
        assert!(!window.is_dirty());
    }

    #[test]
    fn test_apply_date_layout_moves_date_regions() {
        let mut window = FaceWindow::new(&date_layout(DateOrder::DayMonthYear));
        let ymd = date_layout(DateOrder::YearMonthDay);
        window.take_dirty();

        window.apply_date_layout(&ymd);
        assert!(window.is_dirty());
        assert_eq!(window.region(Field::Year).frame, ymd.year);
        assert_eq!(window.region(Field::Day).frame, ymd.day);
        assert_eq!(window.region(Field::Hour).frame, HOUR_FRAME);
    }

    #[test]
    fn test_meridiem_drawn_in_foreground() {
        let window = FaceWindow::new(&date_layout(DateOrder::DayMonthYear));
        assert_eq!(window.region(Field::Meridiem).color, FOREGROUND);
        assert_eq!(window.region(Field::Hour).color, BACKGROUND);
    }
}
