//! Tiny fixed bitmap font for the score overlay. Covers exactly the
//! characters the overlay can produce; anything else renders as a space.

const GLYPH_WIDTH: i32 = 3;
const GLYPH_HEIGHT: i32 = 5;
const TEXT_SCALE: i32 = 4;
pub(crate) const GLYPH_ADVANCE: i32 = (GLYPH_WIDTH + 1) * TEXT_SCALE;
pub(crate) const LINE_HEIGHT: i32 = GLYPH_HEIGHT * TEXT_SCALE;

#[derive(Debug, Clone, Copy)]
struct Glyph {
    rows: [u8; GLYPH_HEIGHT as usize],
}

const SPACE_GLYPH: Glyph = Glyph {
    rows: [0, 0, 0, 0, 0],
};

pub(crate) fn draw_text(
    frame: &mut [u8],
    width: u32,
    height: u32,
    mut x: i32,
    y: i32,
    text: &str,
    color: [u8; 4],
) {
    for ch in text.chars() {
        draw_glyph(frame, width, height, x, y, glyph_for(ch), color);
        x += GLYPH_ADVANCE;
    }
}

fn draw_glyph(
    frame: &mut [u8],
    width: u32,
    height: u32,
    x: i32,
    y: i32,
    glyph: Glyph,
    color: [u8; 4],
) {
    if width == 0 || height == 0 {
        return;
    }
    for (row_index, row_bits) in glyph.rows.iter().enumerate() {
        for col in 0..GLYPH_WIDTH {
            if (row_bits & (1 << (GLYPH_WIDTH - 1 - col))) == 0 {
                continue;
            }
            let cell_x = x + col * TEXT_SCALE;
            let cell_y = y + row_index as i32 * TEXT_SCALE;
            for sy in 0..TEXT_SCALE {
                for sx in 0..TEXT_SCALE {
                    write_pixel_clipped(frame, width, height, cell_x + sx, cell_y + sy, color);
                }
            }
        }
    }
}

fn write_pixel_clipped(frame: &mut [u8], width: u32, height: u32, x: i32, y: i32, color: [u8; 4]) {
    if x < 0 || y < 0 || x >= width as i32 || y >= height as i32 {
        return;
    }
    let offset = (y as usize * width as usize + x as usize) * 4;
    if offset + 4 > frame.len() {
        return;
    }
    frame[offset..offset + 4].copy_from_slice(&color);
}

fn glyph_for(ch: char) -> Glyph {
    match ch {
        '0' => Glyph {
            rows: [0b111, 0b101, 0b101, 0b101, 0b111],
        },
        '1' => Glyph {
            rows: [0b010, 0b110, 0b010, 0b010, 0b111],
        },
        '2' => Glyph {
            rows: [0b111, 0b001, 0b111, 0b100, 0b111],
        },
        '3' => Glyph {
            rows: [0b111, 0b001, 0b111, 0b001, 0b111],
        },
        '4' => Glyph {
            rows: [0b101, 0b101, 0b111, 0b001, 0b001],
        },
        '5' => Glyph {
            rows: [0b111, 0b100, 0b111, 0b001, 0b111],
        },
        '6' => Glyph {
            rows: [0b111, 0b100, 0b111, 0b101, 0b111],
        },
        '7' => Glyph {
            rows: [0b111, 0b001, 0b001, 0b010, 0b010],
        },
        '8' => Glyph {
            rows: [0b111, 0b101, 0b111, 0b101, 0b111],
        },
        '9' => Glyph {
            rows: [0b111, 0b101, 0b111, 0b001, 0b111],
        },
        'S' => Glyph {
            rows: [0b011, 0b100, 0b010, 0b001, 0b110],
        },
        'c' => Glyph {
            rows: [0b000, 0b011, 0b100, 0b100, 0b011],
        },
        'o' => Glyph {
            rows: [0b000, 0b111, 0b101, 0b101, 0b111],
        },
        'r' => Glyph {
            rows: [0b000, 0b101, 0b110, 0b100, 0b100],
        },
        'e' => Glyph {
            rows: [0b000, 0b111, 0b111, 0b100, 0b011],
        },
        ':' => Glyph {
            rows: [0b000, 0b010, 0b000, 0b010, 0b000],
        },
        _ => SPACE_GLYPH,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blank_frame(width: u32, height: u32) -> Vec<u8> {
        vec![0; width as usize * height as usize * 4]
    }

    fn colored_pixel_count(frame: &[u8]) -> usize {
        frame.chunks_exact(4).filter(|px| px[3] != 0).count()
    }

    #[test]
    fn digits_leave_marks_inside_the_glyph_box() {
        let mut frame = blank_frame(64, 32);
        draw_text(&mut frame, 64, 32, 0, 0, "42", [255, 165, 0, 255]);
        assert!(colored_pixel_count(&frame) > 0);
        // nothing below the line height
        let below_offset = (LINE_HEIGHT as usize) * 64 * 4;
        assert!(frame[below_offset..].iter().all(|byte| *byte == 0));
    }

    #[test]
    fn spaces_and_unknown_characters_render_nothing() {
        let mut frame = blank_frame(64, 32);
        draw_text(&mut frame, 64, 32, 0, 0, " \u{3042}~", [255, 255, 255, 255]);
        assert_eq!(colored_pixel_count(&frame), 0);
    }

    #[test]
    fn text_clips_at_frame_edges_without_panicking() {
        let mut frame = blank_frame(8, 8);
        draw_text(&mut frame, 8, 8, -6, -6, "88", [255, 255, 255, 255]);
        draw_text(&mut frame, 8, 8, 6, 6, "88", [255, 255, 255, 255]);
    }
}
