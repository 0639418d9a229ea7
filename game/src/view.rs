//! Draws a `GameState` onto any `Renderer2d`.

use engine::graphics::{Color, Renderer2d, text_size};
use engine::image::{RgbImage, Sprite};
use engine::ui::{Anchor, Insets, Rect, Size};

use crate::obstacles::{FRect, Obstacle};
use crate::player::Player;
use crate::state::{GameState, Phase};

const COLOR_SKY: Color = [24, 28, 44, 255];
const COLOR_CAMERA_DIM: Color = [0, 0, 0, 255];
const CAMERA_DIM_ALPHA: u8 = 110;

const COLOR_PIPE: Color = [92, 170, 48, 255];
const COLOR_PIPE_CAP: Color = [120, 205, 64, 255];
const COLOR_PIPE_EDGE: Color = [36, 74, 18, 255];
const CAP_HEIGHT: f32 = 12.0;
const CAP_OVERHANG: f32 = 4.0;

const COLOR_HUD_TEXT: Color = [235, 235, 245, 255];
const COLOR_HUD_WARN: Color = [255, 160, 64, 255];
const HUD_SCALE: u32 = 3;
const HUD_MARGIN: u32 = 10;

const COLOR_GAME_OVER_DIM: Color = [0, 0, 0, 255];
const GAME_OVER_DIM_ALPHA: u8 = 150;
const COLOR_PANEL_BG: Color = [16, 16, 22, 255];
const COLOR_PANEL_BORDER: Color = [40, 40, 55, 255];
const COLOR_GAME_OVER_TEXT: Color = [255, 96, 96, 255];

const PLAYER_ROWS: [&str; 6] = [
    "00111100",
    "01122110",
    "11123311",
    "11111111",
    "01144410",
    "00111100",
];
const PLAYER_PALETTE: [Color; 4] = [
    [250, 204, 40, 255],
    [255, 255, 255, 255],
    [20, 20, 20, 255],
    [240, 96, 40, 255],
];

/// Pre-built sprites, sized once for the configured player.
#[derive(Debug, Clone)]
pub struct Sprites {
    player: Sprite,
}

impl Sprites {
    pub fn new(player_width: f32, player_height: f32) -> Self {
        let cols = PLAYER_ROWS[0].len() as f32;
        let rows = PLAYER_ROWS.len() as f32;
        let scale = (player_width / cols).min(player_height / rows).floor().max(1.0) as u32;
        Self {
            player: Sprite::from_palette_rows(&PLAYER_ROWS, &PLAYER_PALETTE, scale),
        }
    }

    pub fn player(&self) -> &Sprite {
        &self.player
    }
}

/// Full frame: background, obstacles, player, HUD, and the game-over panel when not running.
pub fn draw_game(
    gfx: &mut dyn Renderer2d,
    state: &GameState,
    camera: Option<&RgbImage>,
    sprites: &Sprites,
) {
    draw_background(gfx, camera);
    for o in state.track.obstacles() {
        draw_obstacle(gfx, o);
    }
    draw_player(gfx, state.player.player(), sprites);
    draw_hud(gfx, state);

    if !matches!(state.phase, Phase::Running) {
        draw_game_over(gfx, state.score());
    }
}

/// The camera frame, mirrored into a selfie view and dimmed; plain sky without a camera.
pub fn draw_background(gfx: &mut dyn Renderer2d, camera: Option<&RgbImage>) {
    let size = gfx.size();
    let full = Rect::from_size(size.width, size.height);
    match camera {
        Some(frame) if !frame.is_empty() => {
            gfx.blit_rgb(full, frame, true);
            gfx.blend_rect(full, COLOR_CAMERA_DIM, CAMERA_DIM_ALPHA);
        }
        _ => gfx.clear(COLOR_SKY),
    }
}

fn fill_clipped(gfx: &mut dyn Renderer2d, r: FRect, color: Color) -> Option<Rect> {
    let size = gfx.size();
    let rect = Rect::clip_f32(r.x, r.y, r.w, r.h, size.width, size.height)?;
    gfx.fill_rect(rect, color);
    Some(rect)
}

pub fn draw_obstacle(gfx: &mut dyn Renderer2d, o: &Obstacle) {
    let height = gfx.size().height as f32;
    let top = o.top_rect();
    let bottom = o.bottom_rect(height);

    for seg in [top, bottom] {
        if let Some(r) = fill_clipped(gfx, seg, COLOR_PIPE) {
            gfx.rect_outline(r, COLOR_PIPE_EDGE);
        }
    }

    // Caps sit on the gap side of each segment.
    let cap = |y: f32| FRect {
        x: o.x - CAP_OVERHANG,
        y,
        w: o.width + 2.0 * CAP_OVERHANG,
        h: CAP_HEIGHT,
    };
    for c in [cap(top.bottom() - CAP_HEIGHT), cap(bottom.y)] {
        if let Some(r) = fill_clipped(gfx, c, COLOR_PIPE_CAP) {
            gfx.rect_outline(r, COLOR_PIPE_EDGE);
        }
    }
}

pub fn draw_player(gfx: &mut dyn Renderer2d, player: &Player, sprites: &Sprites) {
    let sprite = sprites.player();
    let x = player.x + (player.width - sprite.width() as f32) / 2.0;
    let y = player.y + (player.height - sprite.height() as f32) / 2.0;
    gfx.draw_sprite(x.round() as i32, y.round() as i32, sprite);
}

pub fn draw_hud(gfx: &mut dyn Renderer2d, state: &GameState) {
    let size = gfx.size();
    let area = Rect::from_size(size.width, size.height).inset(Insets::all(HUD_MARGIN));

    let score = format!("SCORE {}", state.score());
    let r = area.place(text_size(&score, HUD_SCALE), Anchor::TopLeft);
    gfx.draw_text_scaled(r.x, r.y, &score, COLOR_HUD_TEXT, HUD_SCALE);

    let stage = format!("STAGE {}", state.stage());
    let r = area.place(text_size(&stage, HUD_SCALE), Anchor::TopRight);
    gfx.draw_text_scaled(r.x, r.y, &stage, COLOR_HUD_TEXT, HUD_SCALE);

    if state.is_running() && state.elapsed_ticks > 0 && state.last_sample.is_none() {
        let msg = "NO HAND";
        let r = area.place(text_size(msg, HUD_SCALE), Anchor::BottomCenter);
        gfx.draw_text_scaled(r.x, r.y, msg, COLOR_HUD_WARN, HUD_SCALE);
    }
}

pub fn draw_game_over(gfx: &mut dyn Renderer2d, score: u32) {
    let size = gfx.size();
    let full = Rect::from_size(size.width, size.height);
    gfx.blend_rect(full, COLOR_GAME_OVER_DIM, GAME_OVER_DIM_ALPHA);

    let panel = full.place(Size::new(360, 160), Anchor::Center);
    if panel.w == 0 || panel.h == 0 {
        return;
    }
    gfx.fill_rect(panel, COLOR_PANEL_BG);
    gfx.rect_outline(panel, COLOR_PANEL_BORDER);

    let content = panel.inset(Insets::all(18));
    let title = "GAME OVER";
    let r = content.place(text_size(title, 5), Anchor::TopCenter);
    gfx.draw_text_scaled(r.x, r.y, title, COLOR_GAME_OVER_TEXT, 5);

    let line = format!("SCORE {score}");
    let r = content.place(text_size(&line, 3), Anchor::BottomCenter);
    gfx.draw_text_scaled(r.x, r.y, &line, COLOR_HUD_TEXT, 3);
}
