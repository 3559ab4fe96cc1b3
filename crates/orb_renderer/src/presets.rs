//! Built-in scenes, selectable at run time.
//!
//! All presets share the same room: five huge spheres acting as walls, a
//! large emissive sphere poking through the ceiling as the area light, and
//! two unit spheres on the floor. They differ in which materials they use.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::{
    Color, Glass, Lambertian, LambertianSimple, Lightsource, Material, Phong, RenderError,
    RenderResult, Scene,
};
use orb_math::Vec3;

/// Radius of the spheres standing in for planar walls.
const WALL_RADIUS: f64 = 100_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScenePreset {
    /// Diffuse room, cosine-weighted Lambertian everywhere
    #[default]
    Diffuse,
    /// Same room sampled with the uniform-hemisphere Lambertian
    DiffuseUniform,
    /// Glossy Phong floor
    Specular,
    /// Right-hand sphere made of glass
    Glass,
}

impl ScenePreset {
    pub const ALL: [ScenePreset; 4] = [
        ScenePreset::Diffuse,
        ScenePreset::DiffuseUniform,
        ScenePreset::Specular,
        ScenePreset::Glass,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ScenePreset::Diffuse => "diffuse",
            ScenePreset::DiffuseUniform => "diffuse-uniform",
            ScenePreset::Specular => "specular",
            ScenePreset::Glass => "glass",
        }
    }

    fn diffuse(&self, reflectance: Color) -> Arc<Material> {
        let material: Material = match self {
            ScenePreset::DiffuseUniform => LambertianSimple::new(reflectance).into(),
            _ => Lambertian::new(reflectance).into(),
        };
        Arc::new(material)
    }

    /// Build the scene for this preset.
    pub fn build(&self) -> RenderResult<Scene> {
        let white = self.diffuse(Color::new(0.7, 0.7, 0.7));
        let red = self.diffuse(Color::new(0.7, 0.1, 0.1));
        let green = self.diffuse(Color::new(0.1, 0.7, 0.1));
        let blue = self.diffuse(Color::new(0.1, 0.1, 0.7));
        let light: Arc<Material> = Arc::new(Lightsource::new(Color::splat(8.0)).into());

        let floor: Arc<Material> = match self {
            ScenePreset::Specular => Arc::new(Phong::new(Color::splat(0.999), 100.0).into()),
            _ => Arc::clone(&white),
        };
        let right_ball: Arc<Material> = match self {
            ScenePreset::Glass => Arc::new(Glass::new(Color::splat(0.999_999), 1.5).into()),
            _ => blue,
        };

        let mut scene = Scene::new();
        scene.add_sphere(Vec3::new(0.0, -WALL_RADIUS, 0.0), WALL_RADIUS, &floor)?;
        scene.add_sphere(Vec3::new(0.0, WALL_RADIUS + 4.0, 0.0), WALL_RADIUS, &white)?;
        scene.add_sphere(Vec3::new(-WALL_RADIUS - 3.0, 0.0, 0.0), WALL_RADIUS, &red)?;
        scene.add_sphere(Vec3::new(WALL_RADIUS + 9.0, 0.0, 0.0), WALL_RADIUS, &white)?;
        scene.add_sphere(Vec3::new(0.0, 0.0, -WALL_RADIUS - 3.0), WALL_RADIUS, &green)?;
        scene.add_sphere(Vec3::new(0.0, 103.99, 0.0), 100.0, &light)?;
        scene.add_sphere(Vec3::new(-2.0, 1.0, 0.0), 1.0, &white)?;
        scene.add_sphere(Vec3::new(2.0, 1.0, 0.0), 1.0, &right_ball)?;

        log::debug!("Built '{}' scene with {} objects", self, scene.len());
        Ok(scene)
    }
}

impl fmt::Display for ScenePreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ScenePreset {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ScenePreset::ALL
            .into_iter()
            .find(|preset| preset.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| RenderError::UnknownPreset(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orb_math::Ray;

    #[test]
    fn test_parse_round_trip() {
        for preset in ScenePreset::ALL {
            assert_eq!(preset.to_string().parse::<ScenePreset>().unwrap(), preset);
        }
        assert_eq!("  Glass ".parse::<ScenePreset>().unwrap(), ScenePreset::Glass);
    }

    #[test]
    fn test_unknown_preset() {
        let err = "cornell".parse::<ScenePreset>().unwrap_err();
        assert!(matches!(err, RenderError::UnknownPreset(ref name) if name == "cornell"));
    }

    #[test]
    fn test_all_presets_build() {
        for preset in ScenePreset::ALL {
            let scene = preset.build().unwrap();
            assert_eq!(scene.len(), 8);
            assert_eq!(
                scene.objects().iter().filter(|o| o.material().is_emissive()).count(),
                1
            );
        }
    }

    #[test]
    fn test_preset_materials() {
        let glass = ScenePreset::Glass.build().unwrap();
        assert!(matches!(glass.objects()[7].material(), Material::Glass(_)));

        let specular = ScenePreset::Specular.build().unwrap();
        assert!(matches!(specular.objects()[0].material(), Material::Phong(_)));

        let uniform = ScenePreset::DiffuseUniform.build().unwrap();
        assert!(matches!(
            uniform.objects()[0].material(),
            Material::LambertianSimple(_)
        ));
    }

    #[test]
    fn test_room_is_closed_around_light() {
        // The light only pokes through the ceiling near the room's center axis
        let scene = ScenePreset::Diffuse.build().unwrap();
        let ray = Ray::new(Vec3::new(0.0, 2.0, 0.5), Vec3::Y).unwrap();
        let (object, hit) = scene.intersect(&ray).unwrap();
        assert!(object.material().is_emissive());
        assert!(hit.distance < 2.0);

        let off_axis = Ray::new(Vec3::new(3.0, 2.0, 0.0), Vec3::Y).unwrap();
        let (object, _) = scene.intersect(&off_axis).unwrap();
        assert!(!object.material().is_emissive());
    }
}
