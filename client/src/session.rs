use macroquad::prelude::*;
use tracing::info;

use common::{
    config::Config,
    layout::{self, DrawCall},
    maze::Maze,
    wall::WallUnit,
};

use crate::{
    StartupError,
    frame::FrameClock,
    hud::{self, HudStatus},
    input::walk_input_from_devices,
    walker::{EYE_HEIGHT, Walker},
    walls::WallRenderer,
};

const SKY: Color = Color::new(0.55, 0.7, 0.85, 1.0);
const GROUND: Color = Color::new(0.32, 0.4, 0.26, 1.0);
const GROUND_MARGIN: f32 = 8.0;

/// Everything one walk through one maze needs, from startup to quit.
pub struct Session {
    maze: Maze,
    unit: WallUnit,
    calls: Vec<DrawCall>,
    walls: WallRenderer,
    walker: Walker,
    clock: FrameClock,
    mouse_grabbed: bool,
    was_inside: bool,
}

impl Session {
    pub fn start(config: &Config) -> Result<Self, StartupError> {
        let maze = Maze::from_config(config)?;
        let unit = WallUnit::from_config(config)?;
        let calls = layout::draw_calls(&maze);
        let walls = WallRenderer::new(&unit)?;
        let walker = Walker::at_gate(&maze, unit.wall_thickness());

        info!(
            side = maze.side(),
            exit_corridor = maze.exit_corridor(),
            seed = ?config.seed,
            draw_calls = calls.len(),
            "maze ready"
        );

        Ok(Self {
            maze,
            unit,
            calls,
            walls,
            walker,
            clock: FrameClock::default(),
            mouse_grabbed: false,
            was_inside: false,
        })
    }

    pub async fn main_loop(&mut self) {
        loop {
            let dt = self.clock.tick(get_frame_time());

            if is_key_pressed(KeyCode::Escape) {
                if self.mouse_grabbed {
                    self.set_mouse_grab(false);
                } else {
                    info!("quitting");
                    break;
                }
            }
            if is_mouse_button_pressed(MouseButton::Left) && !self.mouse_grabbed {
                self.set_mouse_grab(true);
            }

            self.update(dt);
            self.draw();

            next_frame().await;
        }
    }

    fn set_mouse_grab(&mut self, grab: bool) {
        self.mouse_grabbed = grab;
        set_cursor_grab(grab);
        show_mouse(!grab);
    }

    fn update(&mut self, dt: f32) {
        let input = walk_input_from_devices(dt, self.mouse_grabbed);
        self.walker
            .update(&self.maze, self.unit.wall_thickness(), &input, dt);

        let inside = self.walker.is_inside(&self.maze);
        if inside != self.was_inside {
            let position = self.walker.position;
            if inside {
                info!(x = position.x, y = position.y, "entered the maze");
            } else {
                info!(x = position.x, y = position.y, "left the maze");
            }
            self.was_inside = inside;
        }
    }

    fn camera(&self) -> Camera3D {
        let Walker {
            position,
            yaw,
            pitch,
        } = self.walker;
        // The maze plane's north is -z in camera space.
        let eye = vec3(position.x, EYE_HEIGHT, -position.y);

        Camera3D {
            position: eye,
            target: eye
                + vec3(
                    yaw.sin() * pitch.cos(),
                    pitch.sin(),
                    -yaw.cos() * pitch.cos(),
                ),
            up: vec3(0.0, 1.0, 0.0),
            ..Default::default()
        }
    }

    fn draw(&self) {
        clear_background(SKY);

        let camera = self.camera();
        set_camera(&camera);

        let extent = self.maze.side() as f32;
        draw_plane(
            vec3(extent / 2.0, 0.0, -extent / 2.0),
            vec2(extent / 2.0 + GROUND_MARGIN, extent / 2.0 + GROUND_MARGIN),
            None,
            GROUND,
        );

        self.walls.draw(&self.calls, camera.matrix());

        set_default_camera();
        hud::draw(&HudStatus {
            frame_rate: self.clock.rate(),
            elapsed: self.clock.elapsed(),
            inside: self.walker.is_inside(&self.maze),
            mouse_grabbed: self.mouse_grabbed,
        });
    }
}
