use std::env;
use std::path::PathBuf;

use macroquad::miniquad::date;
use macroquad::window::{Conf, next_frame};

use maze_chomp::game_app::App;

fn window_conf() -> Conf {
    Conf {
        window_title: "Maze Chomp".to_string(),
        window_width: 704,
        window_height: 616,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    let level_dir = env::args().nth(1).map(PathBuf::from);
    let seed = date::now().to_bits();
    let mut app = App::new(level_dir, seed);
    while app.tick() {
        next_frame().await;
    }
}
