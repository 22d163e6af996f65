//! Runs a small scene for a few seconds without a window: a walking crab
//! packed into an animation archive in memory, a textured ground plane and a
//! falling box whose bounds are checked against the ground every frame.
use std::io::Cursor;
use std::path::Path;
use std::rc::Rc;

use gs_engine::format::{parse_sequence, write_sequence};
use gs_engine::graphics::{ImageData, MemoryTextureLoader};
use gs_engine::prelude::*;

const RUN_FRAMES: u64 = 180;

struct Headless {
    device: Rc<HeadlessDevice>,
    frames: u64,
}

impl Platform for Headless {
    fn poll_events(&mut self) -> bool {
        self.frames < RUN_FRAMES
    }

    fn present(&mut self) {
        self.frames += 1;
        let draws = self.device.take_draws();
        if self.frames % 60 == 0 {
            log::info!("frame {}: {} draw calls", self.frames, draws.len());
        }
    }
}

fn crab_frame(step: f32) -> String {
    format!(
        "o Crab\n\
         v {x} 0 0\nv {x1} 0 0\nv {x} 1 0\nv {x} 1 0\nv {x1} 0 0\nv {x1} 1 0\n\
         vt 0 0\nvt 1 0\nvt 0 1\nvt 1 1\n\
         vn 0 0 1\n\
         usemtl body.png\n\
         f 1/1/1 2/2/1 3/3/1\n\
         usemtl eyes.png\n\
         f 4/3/1 5/2/1 6/4/1\n",
        x = step,
        x1 = step + 1.0
    )
}

fn main() -> anyhow::Result<()> {
    let config = EngineConfig::default();
    init_logging(config.log_level.as_deref());

    let loader = MemoryTextureLoader::default()
        .with("textures/body.png", ImageData::solid(4, 4, [200, 80, 40]))
        .with("textures/eyes.png", ImageData::solid(2, 2, [10, 10, 10]))
        .with("textures/sand.png", ImageData::solid(8, 8, [230, 210, 160]));

    let device = Rc::new(HeadlessDevice::default());
    let dyn_device: Rc<dyn GraphicsDevice> = device.clone();
    let clock: Rc<dyn Clock> = Rc::new(SystemClock::default());
    let context = config.renderer_context(dyn_device, Box::new(loader), clock);

    let camera = Camera::builder()
        .position(Vec3::new(0.0, 2.0, 8.0))
        .aspect(config.aspect_ratio())
        .build();
    let mut scene = Scene::new(camera);
    scene.light = Light::new(Vec3::new(2.0, 6.0, 4.0));

    let frames: Vec<String> = (0..8).map(|i| crab_frame(i as f32 * 0.1)).collect();
    let archive = write_sequence(&frames, Cursor::new(Vec::new()))?.into_inner();
    let sequence = Rc::new(parse_sequence(&archive)?);

    let mut crab = Model::animated_multi_material(
        &context,
        sequence,
        Path::new("textures"),
        ModelOptions::default(),
    )?;
    crab.play(true);
    scene.add_entity(Entity::new("crab").with_model(crab));

    let ground = Model::plane(
        &context,
        10.0,
        true,
        Some(Path::new("textures/sand.png")),
        ModelOptions::default().repeat(true),
    )?;
    let mut ground = Entity::new("ground").with_model(ground);
    ground.transform.rotation = Vec3::new(std::f32::consts::FRAC_PI_2, 0.0, 0.0);
    ground.set_collider(Collider::aabb(Vec3::new(10.0, 0.1, 10.0)));
    scene.add_entity(ground);

    let ball = Model::cube(
        &context,
        0.5,
        false,
        None,
        ModelOptions::default()
            .program("flat")
            .color(Vec4::new(0.2, 0.4, 1.0, 1.0)),
    )?;
    let mut ball = Entity::new("ball")
        .with_model(ball)
        .at(Vec3::new(2.0, 5.0, 0.0));
    ball.set_collider(Collider::aabb(Vec3::new(0.5, 0.5, 0.5)));
    scene.add_entity(ball);

    scene.try_add_entity(
        Model::animated_file(
            &context,
            Path::new("assets/missing.obja"),
            None,
            ModelOptions::default(),
        )
        .map(|model| Entity::new("missing").with_model(model)),
    );

    let mut engine = Engine::new(&context, scene).with_config(&config);
    let mut platform = Headless {
        device: device.clone(),
        frames: 0,
    };
    let mut landed = false;

    let mut hooks = |scene: &mut Scene, frame: &FrameInfo| {
        let grounded = match (scene.entity("ball"), scene.entity("ground")) {
            (Some(ball), Some(ground)) => ball.collide(ground).map_or(false, |hit| hit.is_hit()),
            _ => false,
        };

        if grounded {
            if !landed {
                log::info!("ball landed after {} frames", frame.frame);
                landed = true;
            }
            return;
        }

        if let Some(ball) = scene.entity_mut("ball") {
            let fall = 2.0 * frame.delta.as_secs_f32();
            let position = ball.position();
            ball.set_position(Vec3::new(position.x, position.y - fall, position.z));
        }
    };

    engine.run(&mut platform, &mut hooks);

    log::info!(
        "{} frames, {:.1} fps, {:?} per frame, {} live buffers",
        engine.frame(),
        engine.stats().fps(),
        engine.stats().average_frame_time(),
        device.live_buffers()
    );
    Ok(())
}

