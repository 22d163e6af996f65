#![allow(dead_code)]

use std::io::Cursor;
use std::rc::Rc;

use gs_engine::format::{parse_sequence, write_sequence, AnimationSequence};
use gs_engine::graphics::{GraphicsDevice, HeadlessDevice, ImageData, MemoryTextureLoader, RendererContext};
use gs_engine::prelude::{Clock, ManualClock};

pub struct Harness {
    pub context: RendererContext,
    pub device: Rc<HeadlessDevice>,
    pub clock: Rc<ManualClock>,
}

pub fn harness(loader: MemoryTextureLoader) -> Harness {
    let device = Rc::new(HeadlessDevice::default());
    let clock = Rc::new(ManualClock::default());

    let dyn_device: Rc<dyn GraphicsDevice> = device.clone();
    let dyn_clock: Rc<dyn Clock> = clock.clone();
    let context = RendererContext::new(dyn_device, Box::new(loader), dyn_clock);

    Harness {
        context,
        device,
        clock,
    }
}

pub fn crab_textures() -> MemoryTextureLoader {
    MemoryTextureLoader::default()
        .with("textures/body.png", ImageData::solid(4, 4, [200, 120, 80]))
        .with("textures/eyes.png", ImageData::solid(2, 2, [0, 0, 0]))
}

/// A frame with one triangle per material, shifted along X by `offset`.
pub fn crab_frame(offset: f32) -> String {
    format!(
        "o Crab\n\
         v {a} 0 0\nv {b} 0 0\nv {a} 1 0\nv {b} 1 0\n\
         vt 0 0\nvt 1 0\nvt 0 1\nvt 1 1\n\
         vn 0 0 1\nvn 0 0 -1\n\
         usemtl body.png\n\
         f 1/1/1 2/2/1 3/3/1\n\
         usemtl eyes.png\n\
         f 2/2/2 4/4/2 3/3/2\n",
        a = offset,
        b = offset + 1.0
    )
}

pub fn sequence(frames: &[String]) -> Rc<AnimationSequence> {
    let bytes = write_sequence(frames, Cursor::new(Vec::new()))
        .expect("Failed to write archive")
        .into_inner();
    Rc::new(parse_sequence(&bytes).expect("Failed to parse archive"))
}
