mod frame;
mod hud;
mod input;
mod session;
mod walker;
mod walls;

use macroquad::prelude::*;
use thiserror::Error;
use tracing::error;

use common::{config::Config, error::MazeError};

pub use session::Session;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Maze(#[from] MazeError),
    #[error("failed to build wall renderer: {0}")]
    Renderer(String),
}

pub async fn run() {
    let session = Config::from_env()
        .map_err(StartupError::from)
        .and_then(|config| Session::start(&config));

    match session {
        Ok(mut session) => session.main_loop().await,
        Err(e) => {
            error!("startup failed: {e}");
            show_startup_error(&e).await;
        }
    }
}

async fn show_startup_error(e: &StartupError) {
    let message = e.to_string();

    loop {
        if is_key_pressed(KeyCode::Escape) {
            break;
        }

        clear_background(DARKGRAY);
        draw_text("Could not start the maze.", 40.0, 80.0, 40.0, WHITE);
        draw_text(&message, 40.0, 130.0, 24.0, ORANGE);
        draw_text("Press Escape to quit.", 40.0, 180.0, 24.0, LIGHTGRAY);

        next_frame().await;
    }
}
