use macroquad::prelude::*;

use crate::config::{GlobalMode, Tuning};
use crate::game::{Game, Ghost, GhostMode};
use crate::grid::Cell;
use crate::motion::{Pixel, TILE_SIZE};
use crate::session::{Screen, Session};

const PADDING: f32 = 4.0;
const HUD_HEIGHT: f32 = 40.0;
const ACTOR_RADIUS: f32 = 6.0;
const POPUP_LIFETIME: f32 = 1.0;
const BLINK_PERIOD: f32 = 0.2;

const BACKGROUND: Color = Color::new(0.0, 0.0, 0.0, 1.0);
const WALL_COLOR: Color = Color::new(0.13, 0.13, 0.87, 1.0);
const PELLET_COLOR: Color = Color::new(1.0, 0.72, 0.68, 1.0);
const PLAYER_COLOR: Color = Color::new(1.0, 1.0, 0.0, 1.0);
const FRIGHTENED_BLUE: Color = Color::new(0.13, 0.13, 1.0, 1.0);
const FRIGHTENED_BLINK: Color = Color::new(1.0, 1.0, 1.0, 1.0);
const GHOST_COLORS: [Color; 4] = [
    Color::new(1.0, 0.0, 0.0, 1.0),
    Color::new(1.0, 0.72, 1.0, 1.0),
    Color::new(1.0, 0.72, 0.32, 1.0),
    Color::new(0.0, 1.0, 1.0, 1.0),
];

/// Floating chain-bonus score shown where a ghost was eaten.
pub(crate) struct Popup {
    pub(crate) text: String,
    pub(crate) at: Pixel,
    pub(crate) age: f32,
}

impl Popup {
    pub(crate) fn new(text: String, at: Pixel) -> Self {
        Self { text, at, age: 0.0 }
    }

    pub(crate) fn expired(&self) -> bool {
        self.age >= POPUP_LIFETIME
    }
}

/// Screen-space layout of the maze: one logic pixel is `scale` screen pixels.
struct Layout {
    scale: f32,
    offset_x: f32,
    offset_y: f32,
}

impl Layout {
    fn fit(game: &Game) -> Self {
        let maze_w = game.grid.width() as f32 * TILE_SIZE;
        let maze_h = game.grid.height() as f32 * TILE_SIZE;
        let scale_w = (screen_width() - PADDING * 2.0) / maze_w;
        let scale_h = (screen_height() - HUD_HEIGHT - PADDING * 2.0) / maze_h;
        let scale = scale_w.min(scale_h).max(0.1);
        Self {
            scale,
            offset_x: (screen_width() - maze_w * scale) / 2.0,
            offset_y: HUD_HEIGHT + PADDING,
        }
    }

    fn to_screen(&self, pos: Pixel) -> Vec2 {
        vec2(
            self.offset_x + pos.x * self.scale,
            self.offset_y + pos.y * self.scale,
        )
    }

    fn tile_size(&self) -> f32 {
        TILE_SIZE * self.scale
    }
}

fn draw_centered(text: &str, y: f32, size: u16, color: Color) {
    let dims = measure_text(text, None, size, 1.0);
    draw_text(text, (screen_width() - dims.width) / 2.0, y, size as f32, color);
}

fn dim(color: Color) -> Color {
    Color::new(color.r / 3.0, color.g / 3.0, color.b / 3.0, color.a)
}

pub(crate) fn render(session: &Session, popups: &[Popup]) {
    clear_background(BACKGROUND);
    let tuning = session.tuning();
    let center_y = screen_height() / 2.0;
    match &session.screen {
        Screen::Menu { load_error } => {
            draw_centered("MAZE CHOMP", center_y - 60.0, 64, PLAYER_COLOR);
            draw_centered("Enter to start, Esc to quit", center_y + 10.0, 28, WHITE);
            draw_centered("Arrows or WASD to move, Space to pause", center_y + 45.0, 24, GRAY);
            if let Some(error) = load_error {
                draw_centered(error, center_y + 100.0, 24, RED);
            }
        }
        Screen::Playing(game) => {
            render_game(game, tuning, popups);
            if game.stats.paused {
                render_overlay("PAUSED", "Space to resume", YELLOW);
            }
        }
        Screen::Victory {
            game,
            cleared_level,
            ..
        } => {
            render_game(game, tuning, &[]);
            let title = format!("LEVEL {cleared_level} CLEAR");
            let hint = format!("Score {}  -  Enter to continue", game.stats.score);
            render_overlay(&title, &hint, GREEN);
        }
        Screen::GameOver { final_score } => {
            draw_centered("GAME OVER", center_y - 30.0, 64, RED);
            draw_centered(&format!("Final score {final_score}"), center_y + 20.0, 32, WHITE);
            draw_centered("Enter to play again, Esc for menu", center_y + 60.0, 24, GRAY);
        }
        Screen::CompleteVictory { final_score } => {
            draw_centered("YOU BEAT EVERY LEVEL", center_y - 30.0, 56, GREEN);
            draw_centered(&format!("Final score {final_score}"), center_y + 20.0, 32, WHITE);
            draw_centered("Enter to play again, Esc for menu", center_y + 60.0, 24, GRAY);
        }
        Screen::Quit => {}
    }
}

fn render_overlay(title: &str, hint: &str, color: Color) {
    draw_rectangle(
        0.0,
        0.0,
        screen_width(),
        screen_height(),
        Color::from_rgba(0, 0, 0, 180),
    );
    let center_y = screen_height() / 2.0;
    draw_centered(title, center_y, 64, color);
    draw_centered(hint, center_y + 50.0, 28, WHITE);
}

fn render_game(game: &Game, tuning: &Tuning, popups: &[Popup]) {
    let layout = Layout::fit(game);
    render_hud(game);

    let tile = layout.tile_size();
    for (pos, cell) in game.grid.entries() {
        let origin = layout.to_screen(Pixel::new(
            pos.x as f32 * TILE_SIZE,
            pos.y as f32 * TILE_SIZE,
        ));
        let center = origin + vec2(tile / 2.0, tile / 2.0);
        match cell {
            Cell::Wall => draw_rectangle(origin.x, origin.y, tile, tile, WALL_COLOR),
            Cell::Pellet => draw_circle(center.x, center.y, 1.5 * layout.scale, PELLET_COLOR),
            Cell::PowerPellet => {
                draw_circle(center.x, center.y, 4.0 * layout.scale, PELLET_COLOR)
            }
            Cell::Empty => {}
        }
    }

    let player = layout.to_screen(game.player.pos);
    let radius = ACTOR_RADIUS * layout.scale;
    draw_circle(player.x, player.y, radius, PLAYER_COLOR);
    if let Some(dir) = game.player.direction {
        let (ux, uy) = dir.unit();
        let mouth = player + vec2(ux, uy) * 4.0 * layout.scale;
        draw_circle(mouth.x, mouth.y, 2.0 * layout.scale, BACKGROUND);
    }

    for ghost in &game.ghosts {
        render_ghost(ghost, tuning, &layout);
    }

    for popup in popups {
        let at = layout.to_screen(popup.at);
        let fade = (1.0 - popup.age / POPUP_LIFETIME).clamp(0.0, 1.0);
        let rise = popup.age * 20.0 * layout.scale;
        let color = Color::new(0.0, 1.0, 1.0, fade);
        let dims = measure_text(&popup.text, None, 24, 1.0);
        draw_text(&popup.text, at.x - dims.width / 2.0, at.y - rise, 24.0, color);
    }
}

fn ghost_color(ghost: &Ghost, tuning: &Tuning) -> Color {
    let base = GHOST_COLORS[ghost.color_index % GHOST_COLORS.len()];
    match ghost.mode {
        GhostMode::Frightened => {
            let blinking = ghost.frightened_timer <= tuning.frightened_blink_last;
            if blinking && (ghost.frightened_timer / BLINK_PERIOD) as u32 % 2 == 1 {
                FRIGHTENED_BLINK
            } else {
                FRIGHTENED_BLUE
            }
        }
        GhostMode::Eaten => dim(base),
        GhostMode::Scatter | GhostMode::Chase => base,
    }
}

fn render_ghost(ghost: &Ghost, tuning: &Tuning, layout: &Layout) {
    let at = layout.to_screen(ghost.pos);
    let scale = layout.scale;
    draw_circle(at.x, at.y, ACTOR_RADIUS * scale, ghost_color(ghost, tuning));
    if ghost.mode == GhostMode::Eaten {
        return;
    }
    let (look_x, look_y) = ghost.direction.unit();
    for side in [-1.0, 1.0] {
        let eye = at + vec2(side * 2.0, -2.0) * scale;
        draw_circle(eye.x, eye.y, 2.0 * scale, WHITE);
        let pupil = eye + vec2(look_x, look_y) * 0.8 * scale;
        draw_circle(pupil.x, pupil.y, 1.0 * scale, BLACK);
    }
}

fn render_hud(game: &Game) {
    let stats = &game.stats;
    let mode = match stats.global_mode {
        GlobalMode::Scatter => "SCATTER",
        GlobalMode::Chase => "CHASE",
    };
    let left = format!("SCORE {}   LIVES {}", stats.score, stats.lives);
    let right = format!(
        "LEVEL {}   PELLETS {}   {mode}",
        stats.current_level,
        game.grid.pellets_remaining()
    );
    let baseline = HUD_HEIGHT - 12.0;
    draw_text(&left, PADDING * 2.0, baseline, 28.0, WHITE);
    let dims = measure_text(&right, None, 28, 1.0);
    draw_text(&right, screen_width() - dims.width - PADDING * 2.0, baseline, 28.0, WHITE);
}
