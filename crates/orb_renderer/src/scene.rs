//! Scene container and nearest-hit query.
//!
//! A scene is an ordered list of spheres, each paired with a shared
//! material. It is built once before rendering and only read afterwards, so
//! worker threads share it by reference without locking.

use std::sync::Arc;

use crate::{Hitpoint, Material, RenderResult, Sphere};
use orb_math::{Ray, Vec3};

/// One sphere and the material covering it.
#[derive(Debug, Clone)]
pub struct SceneObject {
    sphere: Sphere,
    material: Arc<Material>,
}

impl SceneObject {
    pub fn new(sphere: Sphere, material: Arc<Material>) -> Self {
        Self { sphere, material }
    }

    pub fn sphere(&self) -> &Sphere {
        &self.sphere
    }

    pub fn material(&self) -> &Material {
        &self.material
    }
}

/// An ordered, fixed collection of scene objects.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    objects: Vec<SceneObject>,
}

impl Scene {
    /// Create a new empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an object. Later objects lose exact distance ties.
    pub fn add(&mut self, object: SceneObject) {
        self.objects.push(object);
    }

    /// Validate and append a sphere with a shared material.
    pub fn add_sphere(
        &mut self,
        center: Vec3,
        radius: f64,
        material: &Arc<Material>,
    ) -> RenderResult<()> {
        let sphere = Sphere::new(center, radius)?;
        self.add(SceneObject::new(sphere, Arc::clone(material)));
        Ok(())
    }

    /// Get the number of objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Check if the scene is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    /// Find the nearest object hit by `ray`.
    ///
    /// Linear scan with a strict `<` on distance, so the first of two
    /// equidistant objects wins.
    pub fn intersect(&self, ray: &Ray) -> Option<(&SceneObject, Hitpoint)> {
        let mut nearest: Option<(&SceneObject, Hitpoint)> = None;
        let mut closest_so_far = f64::INFINITY;

        for object in &self.objects {
            if let Some(hit) = object.sphere.intersect(ray) {
                if hit.distance < closest_so_far {
                    closest_so_far = hit.distance;
                    nearest = Some((object, hit));
                }
            }
        }

        nearest
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Color, Lambertian, Lightsource};

    fn gray() -> Arc<Material> {
        Arc::new(Lambertian::new(Color::splat(0.5)).into())
    }

    #[test]
    fn test_nearest_hit_wins() {
        let near = gray();
        let far: Arc<Material> = Arc::new(Lightsource::new(Color::ONE).into());

        let mut scene = Scene::new();
        // Insert the far sphere first to make sure order does not decide
        scene.add_sphere(Vec3::new(0.0, 0.0, -10.0), 1.0, &far).unwrap();
        scene.add_sphere(Vec3::new(0.0, 0.0, -4.0), 1.0, &near).unwrap();

        let ray = Ray::new(Vec3::ZERO, -Vec3::Z).unwrap();
        let (object, hit) = scene.intersect(&ray).expect("should hit");

        assert!((hit.distance - 3.0).abs() < 1e-12);
        assert!(!object.material().is_emissive());
        assert_eq!(object.sphere().center(), Vec3::new(0.0, 0.0, -4.0));
    }

    #[test]
    fn test_miss_returns_none() {
        let mut scene = Scene::new();
        scene.add_sphere(Vec3::new(0.0, 0.0, -4.0), 1.0, &gray()).unwrap();

        let ray = Ray::new(Vec3::ZERO, Vec3::Y).unwrap();
        assert!(scene.intersect(&ray).is_none());
        assert!(Scene::new().intersect(&ray).is_none());
    }

    #[test]
    fn test_tie_goes_to_first_object() {
        let first: Arc<Material> = Arc::new(Lambertian::new(Color::splat(0.1)).into());
        let second: Arc<Material> = Arc::new(Lambertian::new(Color::splat(0.9)).into());

        let mut scene = Scene::new();
        scene.add_sphere(Vec3::new(0.0, 0.0, -4.0), 1.0, &first).unwrap();
        scene.add_sphere(Vec3::new(0.0, 0.0, -4.0), 1.0, &second).unwrap();

        let ray = Ray::new(Vec3::ZERO, -Vec3::Z).unwrap();
        let (object, _) = scene.intersect(&ray).unwrap();
        assert_eq!(object.material().reflectance(), Color::splat(0.1));
    }

    #[test]
    fn test_materials_are_shared() {
        let material = gray();
        let mut scene = Scene::new();
        scene.add_sphere(Vec3::X, 0.5, &material).unwrap();
        scene.add_sphere(-Vec3::X, 0.5, &material).unwrap();

        assert_eq!(scene.len(), 2);
        assert_eq!(Arc::strong_count(&material), 3);
    }

    #[test]
    fn test_invalid_sphere_rejected() {
        let mut scene = Scene::new();
        assert!(scene.add_sphere(Vec3::ZERO, 0.0, &gray()).is_err());
        assert!(scene.is_empty());
    }
}
