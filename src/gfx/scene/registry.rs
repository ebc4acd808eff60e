use cgmath::Vector3;
use log::{debug, info};
use std::collections::HashMap;

use super::capability::{classify, numeric_suffix, CapabilityFlags};
use super::object::{ObjectId, SceneObject, Transform};
use crate::error::RegistryError;
use crate::gfx::picking::AABB;

/// Flat collection of the room's interactive objects.
///
/// Objects are classified once, when they are registered, and the registry
/// is frozen when asset loading completes. After that only live transforms
/// change.
#[derive(Debug, Default)]
pub struct ObjectRegistry {
    objects: Vec<SceneObject>,
    by_name: HashMap<String, ObjectId>,
    raycastable: Vec<ObjectId>,
    frozen: bool,
}

impl ObjectRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an object and classify it by name.
    ///
    /// The current transform becomes the object's initial transform. Objects
    /// revealed by the intro (books, eggs, cactus) start at zero scale.
    ///
    /// # Errors
    /// * [`RegistryError::Frozen`] once [`freeze`](Self::freeze) has been called
    /// * [`RegistryError::Duplicate`] if the name is already registered
    /// * [`RegistryError::InvalidBaseline`] for hover objects with a non-finite transform
    pub fn register(
        &mut self,
        name: impl Into<String>,
        transform: Transform,
        local_bounds: AABB,
    ) -> Result<ObjectId, RegistryError> {
        let name = name.into();
        if self.frozen {
            return Err(RegistryError::Frozen(name));
        }
        if self.by_name.contains_key(&name) {
            return Err(RegistryError::Duplicate(name));
        }

        let capabilities = classify(&name);
        if capabilities.has(CapabilityFlags::HOVER) {
            check_baseline(&name, &transform)?;
        }

        let id = ObjectId(self.objects.len());
        let mut object = SceneObject::new(id, name.clone(), transform, local_bounds, capabilities);
        if capabilities.flags.intersects(CapabilityFlags::REVEALED) {
            object.transform.scale = Vector3::new(0.0, 0.0, 0.0);
        }
        if capabilities.has(CapabilityFlags::RAYCAST) {
            self.raycastable.push(id);
        }

        debug!("registered {:?} `{}` ({:?})", id, name, capabilities.flags);
        self.by_name.insert(name, id);
        self.objects.push(object);
        Ok(id)
    }

    /// Close the registry for further registration.
    pub fn freeze(&mut self) {
        if !self.frozen {
            info!(
                "object registry frozen with {} objects ({} raycastable)",
                self.objects.len(),
                self.raycastable.len()
            );
        }
        self.frozen = true;
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn get(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.get(id.0)
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut SceneObject> {
        self.objects.get_mut(id.0)
    }

    pub fn find(&self, name: &str) -> Option<ObjectId> {
        self.by_name.get(name).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SceneObject> {
        self.objects.iter()
    }

    /// Live objects. Initial transforms stay read-only.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut SceneObject> {
        self.objects.iter_mut()
    }

    /// Ray-cast targets, in registration order.
    pub fn raycastable(&self) -> &[ObjectId] {
        &self.raycastable
    }

    /// Objects carrying `flag`, in registration order.
    pub fn ids_with(&self, flag: CapabilityFlags) -> Vec<ObjectId> {
        self.objects
            .iter()
            .filter(|object| object.has(flag))
            .map(SceneObject::id)
            .collect()
    }

    /// Most recently registered object carrying `flag`.
    pub fn last_with(&self, flag: CapabilityFlags) -> Option<ObjectId> {
        self.objects
            .iter()
            .rev()
            .find(|object| object.has(flag))
            .map(SceneObject::id)
    }

    /// Book objects in registration order.
    pub fn books(&self) -> Vec<ObjectId> {
        self.ids_with(CapabilityFlags::BOOK)
    }

    /// Egg objects ordered by the number in their name, ascending.
    ///
    /// Eggs without a number sort last, keeping registration order.
    pub fn eggs_by_number(&self) -> Vec<ObjectId> {
        let mut eggs: Vec<(Option<u32>, ObjectId)> = self
            .objects
            .iter()
            .filter(|object| object.has(CapabilityFlags::EGG))
            .map(|object| (numeric_suffix(object.name()), object.id()))
            .collect();
        eggs.sort_by_key(|(number, _)| number.unwrap_or(u32::MAX));
        eggs.into_iter().map(|(_, id)| id).collect()
    }

    /// The cactus revealed first by the intro.
    pub fn cactus(&self) -> Option<ObjectId> {
        self.last_with(CapabilityFlags::CACTUS)
    }
}

fn check_baseline(name: &str, transform: &Transform) -> Result<(), RegistryError> {
    let invalid = |field| RegistryError::InvalidBaseline {
        name: name.to_string(),
        field,
    };
    if !transform.is_finite() {
        let field = if !transform.scale.x.is_finite()
            || !transform.scale.y.is_finite()
            || !transform.scale.z.is_finite()
        {
            "scale"
        } else if !transform.rotation.x.is_finite()
            || !transform.rotation.y.is_finite()
            || !transform.rotation.z.is_finite()
        {
            "rotation"
        } else {
            "position"
        };
        return Err(invalid(field));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

    fn unit_box() -> AABB {
        AABB::new(Vector3::new(-0.5, -0.5, -0.5), Vector3::new(0.5, 0.5, 0.5))
    }

    fn scaled(scale: f32) -> Transform {
        Transform {
            scale: Vector3::new(scale, scale, scale),
            ..Transform::default()
        }
    }

    #[test]
    fn test_register_captures_initial_transform() {
        let mut registry = ObjectRegistry::new();
        let id = registry
            .register("Fish_Third_Raycaster_Hover", scaled(2.0), unit_box())
            .unwrap();
        let object = registry.get(id).unwrap();
        assert_eq!(object.initial().scale, Vector3::new(2.0, 2.0, 2.0));
        assert_eq!(registry.raycastable(), &[id]);
    }

    #[test]
    fn test_duplicate_registration_is_rejected() {
        let mut registry = ObjectRegistry::new();
        registry.register("Chair_Top", Transform::default(), unit_box()).unwrap();
        assert_eq!(
            registry.register("Chair_Top", Transform::default(), unit_box()),
            Err(RegistryError::Duplicate("Chair_Top".to_string()))
        );
    }

    #[test]
    fn test_frozen_registry_rejects_new_objects() {
        let mut registry = ObjectRegistry::new();
        registry.freeze();
        assert!(matches!(
            registry.register("Cactus", Transform::default(), unit_box()),
            Err(RegistryError::Frozen(_))
        ));
    }

    #[test]
    fn test_hover_object_without_baseline_fails_fast() {
        let mut registry = ObjectRegistry::new();
        let result = registry.register("Coffee_Hover", scaled(f32::NAN), unit_box());
        assert_eq!(
            result,
            Err(RegistryError::InvalidBaseline {
                name: "Coffee_Hover".to_string(),
                field: "scale",
            })
        );
        assert!(registry.is_empty());
    }

    #[test]
    fn test_revealed_objects_start_hidden() {
        let mut registry = ObjectRegistry::new();
        let book = registry.register("Book_1_Second", scaled(1.5), unit_box()).unwrap();
        let book = registry.get(book).unwrap();
        assert_eq!(book.transform.scale, Vector3::new(0.0, 0.0, 0.0));
        assert_eq!(book.initial().scale, Vector3::new(1.5, 1.5, 1.5));
    }

    #[test]
    fn test_eggs_sort_by_number_regardless_of_registration_order() {
        let mut names: Vec<String> = (1..=9).map(|n| format!("Egg_{n}_Fourth")).collect();
        names.shuffle(&mut StdRng::seed_from_u64(7));

        let mut registry = ObjectRegistry::new();
        for name in &names {
            registry.register(name.as_str(), Transform::default(), unit_box()).unwrap();
        }

        let ordered: Vec<u32> = registry
            .eggs_by_number()
            .into_iter()
            .map(|id| numeric_suffix(registry.get(id).unwrap().name()).unwrap())
            .collect();
        assert_eq!(ordered, (1..=9).collect::<Vec<_>>());
    }
}
