use crate::{
    algebra::{vec3_from_array, Color, Vec3},
    camera::Camera,
    error::{Error, Result},
    light::{Bulb, Light},
    material::Material,
    object::Object,
    renderer::resolution_ladder,
    sphere::Sphere,
};
use log::debug;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Shapes and lights for one render. Never mutated while tracing.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    pub objects: Vec<Object>,
    pub lights: Vec<Light>,
}

#[derive(Clone, Debug)]
pub struct RenderSettings {
    /// Side of the square output image.
    pub resolution: u32,
    /// Supersampling factor for the largest level.
    pub msaa_multiplier: u32,
    /// Seen by rays that leave the scene.
    pub color_on_miss: Color,
    /// Light floor applied to every shaded point.
    pub color_on_full_shade: Color,
    pub output: PathBuf,
}

/// Everything a render needs.
#[derive(Clone, Debug)]
pub struct Setup {
    pub camera: Camera,
    pub render: RenderSettings,
    pub scene: Scene,
}

impl Setup {
    /// The built-in showcase: two large mirrored walls, five spheres, two bulbs.
    pub fn reference() -> Self {
        let sphere = |c: [f32; 3], r: f32, col: [f32; 3], mirror: f32| {
            Object::from(Sphere::new(c.into(), r, Material::new(col.into(), mirror)))
        };
        let objects = vec![
            sphere([0.0, 0.0, 0.0], 5.0, [1.0, 0.5, 0.5], 0.9),
            sphere([0.0, -12.0, 0.0], 4.0, [0.5, 1.0, 0.5], 0.9),
            sphere([5.0, 8.0, 7.0], 3.0, [1.0, 1.0, 1.0], 0.5),
            sphere([7.0, 5.0, 5.0], 2.0, [0.5, 0.5, 1.0], 0.0),
            sphere([12.0, 4.0, 5.0], 1.0, [0.5, 0.5, 0.2], 0.0),
            sphere([-100.0, 0.0, -50.0], 100.0, [0.5, 0.5, 0.5], 0.4),
            sphere([-100.0, 0.0, 50.0], 100.0, [1.0, 1.0, 1.0], 0.4),
        ];
        let lights = vec![
            Light::from(Bulb::new(Vec3(-20.0, -10.0, 20.0), Vec3::ONE.scale(0.7))),
            Light::from(Bulb::new(Vec3(-20.0, -12.0, 22.0), Vec3::ONE.scale(0.7))),
        ];

        Setup {
            camera: Camera::new(Vec3(100.0, 0.0, 0.0), Vec3(-1.0, 0.0, 0.0), 30.0),
            render: RenderSettings {
                resolution: 512,
                msaa_multiplier: 2,
                color_on_miss: Vec3(0.0, 0.0, 1.0),
                color_on_full_shade: Vec3(0.1, 0.1, 0.1),
                output: PathBuf::from(DEFAULT_OUTPUT),
            },
            scene: Scene { objects, lights },
        }
    }

    /// Reject setups the tracer cannot handle before any pixel is cast.
    pub fn validate(&self) -> Result<()> {
        let cam = &self.camera;
        if !(cam.size > 0.0 && cam.size.is_finite()) {
            return Err(Error::Invalid(format!("camera size must be positive, got {}", cam.size)));
        }
        if !cam.origin.is_finite() {
            return Err(Error::Invalid("camera origin must be finite".into()));
        }

        let r = &self.render;
        if r.resolution == 0 || r.msaa_multiplier == 0 {
            return Err(Error::Invalid(format!(
                "resolution ({}) and msaa multiplier ({}) must be non-zero",
                r.resolution, r.msaa_multiplier
            )));
        }
        if resolution_ladder(r.resolution, r.msaa_multiplier).is_empty() {
            return Err(Error::Invalid(format!(
                "resolution {} x {} leaves no level above the minimum",
                r.resolution, r.msaa_multiplier
            )));
        }

        for (i, obj) in self.scene.objects.iter().enumerate() {
            match obj {
                Object::Sphere(s) => {
                    if !(s.radius > 0.0 && s.radius.is_finite()) {
                        return Err(Error::Invalid(format!("sphere {i}: radius must be positive, got {}", s.radius)));
                    }
                    if !s.center.is_finite() {
                        return Err(Error::Invalid(format!("sphere {i}: center must be finite")));
                    }
                }
            }
            let mirror = obj.material().mirror;
            if !(0.0..=1.0).contains(&mirror) {
                return Err(Error::Invalid(format!("object {i}: mirror must lie in [0, 1], got {mirror}")));
            }
        }
        Ok(())
    }

    pub fn log_summary(&self) {
        debug!(
            "camera {:?} -> {:?}, size {:.2}",
            self.camera.origin, self.camera.direction, self.camera.size
        );
        for (i, obj) in self.scene.objects.iter().enumerate() {
            match obj {
                Object::Sphere(s) => debug!(
                    " [{}] Sphere {{ center: {:?}, radius: {:.4}, color: {:?}, mirror: {:.2} }}",
                    i, s.center, s.radius, s.material.color, s.material.mirror
                ),
            }
        }
        for (i, l) in self.scene.lights.iter().enumerate() {
            debug!(" [{}] Bulb {{ center: {:?}, color: {:?} }}", i, l.center(), l.color());
        }
    }
}

pub const DEFAULT_OUTPUT: &str = "output.png";

// ── JSON scene file ─────────────────────────────────────────────────────

#[derive(Deserialize)]
struct CameraJson {
    #[serde(deserialize_with = "vec3_from_array")]
    origin: Vec3,
    #[serde(deserialize_with = "vec3_from_array")]
    direction: Vec3,
    size: f32,
}

fn default_msaa() -> u32 { 2 }
fn default_output() -> PathBuf { PathBuf::from(DEFAULT_OUTPUT) }
fn default_miss() -> [f32; 3] { [0.0, 0.0, 1.0] }
fn default_shade() -> [f32; 3] { [0.1, 0.1, 0.1] }
fn default_light_color() -> [f32; 3] { [1.0, 1.0, 1.0] }

#[derive(Deserialize)]
struct RenderJson {
    resolution: u32,
    #[serde(default = "default_msaa")]
    msaa_multiplier: u32,
    #[serde(default = "default_output")]
    output: PathBuf,
    #[serde(default = "default_miss")]
    color_on_miss: [f32; 3],
    #[serde(default = "default_shade")]
    color_on_full_shade: [f32; 3],
}

#[derive(Deserialize)]
struct SphereDesc {
    #[serde(deserialize_with = "vec3_from_array")]
    center: Vec3,
    radius: f32,
    #[serde(deserialize_with = "vec3_from_array")]
    color: Vec3,
    #[serde(default)]
    mirror: f32,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ObjectJson {
    Sphere { sphere: SphereDesc },
}

#[derive(Deserialize)]
struct BulbDesc {
    #[serde(deserialize_with = "vec3_from_array")]
    center: Vec3,
    #[serde(default = "default_light_color")]
    color: [f32; 3],
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LightJson {
    Bulb { bulb: BulbDesc },
}

#[derive(Deserialize)]
struct SceneFile {
    camera: CameraJson,
    render: RenderJson,
    #[serde(default)]
    objects: Vec<ObjectJson>,
    #[serde(default)]
    lights: Vec<LightJson>,
}

/// Parse a setup from JSON text and validate it.
pub fn parse(data: &str) -> Result<Setup> {
    let file: SceneFile = serde_json::from_str(data)?;

    if file.camera.direction.length_squared() == 0.0 || !file.camera.direction.is_finite() {
        return Err(Error::Invalid("camera direction must be a non-zero vector".into()));
    }

    let objects = file
        .objects
        .into_iter()
        .map(|o| match o {
            ObjectJson::Sphere { sphere } => Object::Sphere(Sphere::new(
                sphere.center,
                sphere.radius,
                Material::new(sphere.color, sphere.mirror),
            )),
        })
        .collect();

    let lights = file
        .lights
        .into_iter()
        .map(|l| match l {
            LightJson::Bulb { bulb } => Light::Bulb(Bulb::new(bulb.center, bulb.color.into())),
        })
        .collect();

    let setup = Setup {
        camera: Camera::new(file.camera.origin, file.camera.direction, file.camera.size),
        render: RenderSettings {
            resolution: file.render.resolution,
            msaa_multiplier: file.render.msaa_multiplier,
            color_on_miss: file.render.color_on_miss.into(),
            color_on_full_shade: file.render.color_on_full_shade.into(),
            output: file.render.output,
        },
        scene: Scene { objects, lights },
    };
    setup.validate()?;
    Ok(setup)
}

pub fn load(path: impl AsRef<Path>) -> Result<Setup> {
    let path = path.as_ref();
    let data = std::fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&data)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"{
        "camera": { "origin": [100, 0, 0], "direction": [-1, 0, 0], "size": 30 },
        "render": { "resolution": 64 },
        "objects": [
            { "sphere": { "center": [0, 0, 0], "radius": 5, "color": [1, 0.5, 0.5], "mirror": 0.3 } },
            { "sphere": { "center": [0, 8, 0], "radius": 2, "color": [0, 1, 0] } }
        ],
        "lights": [
            { "bulb": { "center": [-20, -10, 20], "color": [0.7, 0.7, 0.7] } },
            { "bulb": { "center": [-20, -12, 22] } }
        ]
    }"#;

    #[test]
    fn reference_setup_is_valid() {
        let setup = Setup::reference();
        setup.validate().expect("reference must validate");
        assert_eq!(setup.scene.objects.len(), 7);
        assert_eq!(setup.scene.lights.len(), 2);
        assert_eq!(setup.render.resolution, 512);
        assert_eq!(setup.render.output, PathBuf::from("output.png"));
    }

    #[test]
    fn parse_applies_defaults() {
        let setup = parse(MINIMAL).expect("valid scene");
        assert_eq!(setup.render.msaa_multiplier, 2);
        assert_eq!(setup.render.color_on_miss, Vec3(0.0, 0.0, 1.0));
        assert_eq!(setup.render.color_on_full_shade, Vec3(0.1, 0.1, 0.1));
        assert_eq!(setup.scene.objects[1].material().mirror, 0.0);
        assert_eq!(setup.scene.objects[0].material().mirror, 0.3);
        assert_eq!(setup.scene.lights[1].color(), Vec3::ONE);
        assert_eq!(setup.camera.direction, Vec3(-1.0, 0.0, 0.0));
    }

    #[test]
    fn parse_rejects_bad_mirror() {
        let bad = MINIMAL.replace("\"mirror\": 0.3", "\"mirror\": 1.5");
        assert!(matches!(parse(&bad), Err(Error::Invalid(_))));
    }

    #[test]
    fn parse_rejects_non_positive_radius() {
        let bad = MINIMAL.replace("\"radius\": 2", "\"radius\": 0");
        assert!(matches!(parse(&bad), Err(Error::Invalid(_))));
    }

    #[test]
    fn parse_rejects_zero_camera_direction() {
        let bad = MINIMAL.replace("[-1, 0, 0]", "[0, 0, 0]");
        assert!(matches!(parse(&bad), Err(Error::Invalid(_))));
    }

    #[test]
    fn parse_rejects_resolution_without_levels() {
        let bad = MINIMAL.replace("\"resolution\": 64", "\"resolution\": 8");
        assert!(matches!(parse(&bad), Err(Error::Invalid(_))));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(parse("{ not json"), Err(Error::Parse(_))));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, Error::Read { .. }));
    }
}
