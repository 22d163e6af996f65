pub mod collision;
pub mod entity;
pub mod geometry;
pub mod light;
pub mod model;
pub mod skybox;
pub mod transform;

use std::fmt::Debug;

use log::{debug, error};

use crate::core::camera::Camera;
use crate::graphics::GraphicsResult;

use self::entity::Entity;
use self::light::Light;
use self::skybox::Skybox;

/// A flat list of entities seen through one camera and lit by one light.
pub struct Scene {
    pub camera: Camera,
    pub light: Light,
    pub skybox: Option<Skybox>,
    entities: Vec<Entity>,
}

impl Scene {
    pub fn new(camera: Camera) -> Self {
        Self {
            camera,
            light: Light::default(),
            skybox: None,
            entities: Vec::new(),
        }
    }

    pub fn add_entity(&mut self, entity: Entity) {
        debug!("Adding entity `{}`", entity.name);
        self.entities.push(entity);
    }

    /// Adds the entity if it loaded, otherwise logs the error and carries on.
    pub fn try_add_entity(&mut self, entity: GraphicsResult<Entity>) -> bool {
        match entity {
            Ok(entity) => {
                self.add_entity(entity);
                true
            }
            Err(err) => {
                error!("Skipping entity that failed to load: {}", err);
                false
            }
        }
    }

    pub fn remove_entity(&mut self, name: &str) -> Option<Entity> {
        let index = self.entities.iter().position(|e| e.name == name)?;
        Some(self.entities.remove(index))
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn entities_mut(&mut self) -> &mut [Entity] {
        &mut self.entities
    }

    pub fn entity(&self, name: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.name == name)
    }

    pub fn entity_mut(&mut self, name: &str) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.name == name)
    }

    pub fn update(&mut self) {
        profile_function!();

        if let Some(skybox) = &self.skybox {
            skybox.update(&self.camera);
        }
        for entity in &mut self.entities {
            entity.update(&self.camera, &self.light);
        }
    }

    pub fn render(&self) {
        profile_function!();

        if let Some(skybox) = &self.skybox {
            skybox.render();
        }
        for entity in &self.entities {
            entity.render();
        }
    }
}

impl Debug for Scene {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "Scene ({} entities)", self.entities.len())
    }
}
