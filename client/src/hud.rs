use macroquad::prelude::*;

const CROSSHAIR_GAP: f32 = 4.0;
const CROSSHAIR_ARM: f32 = 8.0;
const CROSSHAIR_THICKNESS: f32 = 2.0;
const FONT_SIZE: f32 = 22.0;
const MARGIN: f32 = 12.0;

#[derive(Debug, Clone, Copy)]
pub struct HudStatus {
    pub frame_rate: f32,
    pub elapsed: f64,
    pub inside: bool,
    pub mouse_grabbed: bool,
}

pub fn draw(status: &HudStatus) {
    // Amber until the walker is through the gate.
    let accent = if status.inside { WHITE } else { GOLD };
    draw_crosshair(accent);

    let place = if status.inside {
        "In the maze"
    } else {
        "Outside the maze"
    };
    let mouse = if status.mouse_grabbed {
        "Esc: release mouse"
    } else {
        "Click: look with mouse, Esc: quit"
    };

    draw_text(
        &format!("{:.0} fps", status.frame_rate),
        MARGIN,
        2.0 * MARGIN,
        FONT_SIZE,
        WHITE,
    );
    draw_text(
        &format!("{place}, {:.0} s", status.elapsed),
        MARGIN,
        4.0 * MARGIN,
        FONT_SIZE,
        accent,
    );
    draw_text(
        &format!("WASD: walk, arrows: look, {mouse}"),
        MARGIN,
        screen_height() - MARGIN,
        FONT_SIZE,
        LIGHTGRAY,
    );
}

/// Four arms around an open centre, so the crosshair never hides what it
/// points at.
fn draw_crosshair(color: Color) {
    let center = vec2(screen_width(), screen_height()) / 2.0;

    for arm in [Vec2::X, Vec2::NEG_X, Vec2::Y, Vec2::NEG_Y] {
        let from = center + arm * CROSSHAIR_GAP;
        let to = center + arm * (CROSSHAIR_GAP + CROSSHAIR_ARM);
        draw_line(from.x, from.y, to.x, to.y, CROSSHAIR_THICKNESS, color);
    }
}
