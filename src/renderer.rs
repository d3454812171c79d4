//! # Face Rendering
//!
//! Draws the face onto any `embedded-graphics` target with a
//! [`BinaryColor`] palette.
//!
//! Rendering happens in two passes:
//! 1. [`draw_background`]: rounded tiles in the foreground colour, then the
//!    three separator lines in the background colour. Only the date-row
//!    tile geometry depends on state (the active [`DateOrder`]).
//! 2. [`draw_regions`]: each text region centred horizontally in its frame.
//!
//! [`draw_ascii`] renders the whole face into a [`FrameBuffer`] and returns
//! a terminal preview, used by the `--stdout` development mode.

use crate::{
    date_order::DateOrder,
    framebuffer::FrameBuffer,
    layout::{tiles, SCREEN_HEIGHT, SCREEN_WIDTH, SEPARATORS, TILE_RADIUS},
    region::{FaceWindow, TextRegion, BACKGROUND, FOREGROUND},
};
use embedded_graphics::{
    mono_font::MonoTextStyle,
    pixelcolor::BinaryColor,
    prelude::*,
    primitives::{Line, PrimitiveStyle, RoundedRectangle},
    text::{Alignment, Baseline, Text, TextStyleBuilder},
};

/// Fill the tiles and draw the separators.
pub fn draw_background<D>(target: &mut D, order: DateOrder) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    target.clear(BACKGROUND)?;

    let fill = PrimitiveStyle::with_fill(FOREGROUND);
    let corner = Size::new(TILE_RADIUS, TILE_RADIUS);
    for tile in tiles(order) {
        RoundedRectangle::with_equal_corners(tile, corner)
            .into_styled(fill)
            .draw(target)?;
    }

    let stroke = PrimitiveStyle::with_stroke(BACKGROUND, 1);
    for (start, end) in SEPARATORS {
        Line::new(start, end).into_styled(stroke).draw(target)?;
    }

    Ok(())
}

/// Draw a single region's text, centred horizontally and vertically.
pub fn draw_region<D>(target: &mut D, region: &TextRegion) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    if region.text.is_empty() {
        return Ok(());
    }

    let style = MonoTextStyle::new(region.font.mono_font(), region.color);
    let layout = TextStyleBuilder::new()
        .alignment(Alignment::Center)
        .baseline(Baseline::Middle)
        .build();

    Text::with_text_style(&region.text, region.frame.center(), style, layout).draw(target)?;
    Ok(())
}

/// Draw every region of the window.
pub fn draw_regions<D>(target: &mut D, window: &FaceWindow) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    for region in window.regions() {
        draw_region(target, region)?;
    }
    Ok(())
}

/// Full redraw: background, then text.
pub fn draw_face<D>(target: &mut D, window: &FaceWindow, order: DateOrder) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    draw_background(target, order)?;
    draw_regions(target, window)
}

/// Render the face into a fresh framebuffer.
pub fn render_frame(window: &FaceWindow, order: DateOrder) -> FrameBuffer {
    let mut frame = FrameBuffer::new(SCREEN_WIDTH, SCREEN_HEIGHT);
    draw_face(&mut frame, window, order).unwrap_or_else(|never| match never {});
    frame
}

/// Render the face as half-block text for a terminal.
pub fn draw_ascii(window: &FaceWindow, order: DateOrder) -> String {
    render_frame(window, order).to_ascii()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        layout::{date_layout, tile_for, HOUR_TILE, WEEKDAY_TILE},
        region::Field,
    };

    fn lit(frame: &FrameBuffer, x: i32, y: i32) -> bool {
        frame.pixel(x as u32, y as u32) == Some(BinaryColor::On)
    }

    #[test]
    fn test_background_fills_tile_interiors() {
        let mut frame = FrameBuffer::new(SCREEN_WIDTH, SCREEN_HEIGHT);
        draw_background(&mut frame, DateOrder::DayMonthYear).unwrap();

        let hour = HOUR_TILE.center();
        assert!(lit(&frame, hour.x, hour.y + 10));
        let weekday = WEEKDAY_TILE.center();
        assert!(lit(&frame, weekday.x, weekday.y + 5));

        // Outside every tile
        assert!(!lit(&frame, 0, 0));
        assert!(!lit(&frame, 72, 20));
    }

    #[test]
    fn test_separators_cut_through_tiles() {
        let mut frame = FrameBuffer::new(SCREEN_WIDTH, SCREEN_HEIGHT);
        draw_background(&mut frame, DateOrder::DayMonthYear).unwrap();

        for (start, end) in SEPARATORS {
            assert!(!lit(&frame, 20, start.y), "separator at y={}", start.y);
            assert!(!lit(&frame, end.x - 10, end.y));
            // Just above the line is still tile
            assert!(lit(&frame, 20, start.y - 1));
        }
    }

    #[test]
    fn test_rounded_corners_left_clear() {
        let mut frame = FrameBuffer::new(SCREEN_WIDTH, SCREEN_HEIGHT);
        draw_background(&mut frame, DateOrder::DayMonthYear).unwrap();
        assert!(!lit(&frame, HOUR_TILE.top_left.x, HOUR_TILE.top_left.y));
        assert!(lit(&frame, HOUR_TILE.top_left.x + 4, HOUR_TILE.top_left.y));
    }

    #[test]
    fn test_date_tiles_follow_order() {
        let mut dmy = FrameBuffer::new(SCREEN_WIDTH, SCREEN_HEIGHT);
        draw_background(&mut dmy, DateOrder::DayMonthYear).unwrap();
        let mut ymd = FrameBuffer::new(SCREEN_WIDTH, SCREEN_HEIGHT);
        draw_background(&mut ymd, DateOrder::YearMonthDay).unwrap();

        // x = 36 is the gap between day and month in DMY, inside the year tile in YMD
        assert!(!lit(&dmy, 36, 135));
        assert!(lit(&ymd, 36, 135));

        let ymd_day = tile_for(date_layout(DateOrder::YearMonthDay).day).center();
        assert!(lit(&ymd, ymd_day.x, ymd_day.y + 5));
    }

    #[test]
    fn test_text_is_drawn_in_region_colour() {
        let mut window = FaceWindow::new(&date_layout(DateOrder::DayMonthYear));
        let blank = render_frame(&window, DateOrder::DayMonthYear);

        window.set_text(Field::Hour, "8");
        let with_hour = render_frame(&window, DateOrder::DayMonthYear);

        // Dark digits on a lit tile turn pixels off
        assert!(with_hour.count_on() < blank.count_on());

        window.set_text(Field::Meridiem, "PM");
        let with_meridiem = render_frame(&window, DateOrder::DayMonthYear);
        assert!(with_meridiem.count_on() > with_hour.count_on());
    }

    #[test]
    fn test_ascii_preview_dimensions() {
        let window = FaceWindow::new(&date_layout(DateOrder::DayMonthYear));
        let preview = draw_ascii(&window, DateOrder::DayMonthYear);
        let lines: Vec<_> = preview.lines().collect();
        assert_eq!(lines.len(), (SCREEN_HEIGHT / 2) as usize);
        assert!(lines
            .iter()
            .all(|line| line.chars().count() == SCREEN_WIDTH as usize));
    }
}
