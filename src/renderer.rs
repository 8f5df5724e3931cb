//! Multi-resolution pipeline: render the scene at each supersample level,
//! quantize, and shrink every level to the requested output size.

use crate::{
    algebra::Color,
    caster::cast,
    error::{Error, Result},
    scene::Setup,
};
use image::{imageops, imageops::FilterType, Rgb, RgbImage};
use indicatif::ProgressBar;
use log::{debug, info};
use rayon::prelude::*;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Levels at or below this side length are never rendered.
pub const MIN_LEVEL: u32 = 16;

/// Supersample sides, smallest first: `resolution · msaa` halved while
/// still above [`MIN_LEVEL`].
pub fn resolution_ladder(resolution: u32, msaa_multiplier: u32) -> Vec<u32> {
    let mut levels = Vec::new();
    let mut level = resolution.saturating_mul(msaa_multiplier);
    while level > MIN_LEVEL {
        levels.push(level);
        level /= 2;
    }
    levels.reverse();
    levels
}

/// Quantize one channel: truncate toward zero, then clamp to a byte.
#[inline]
pub fn to_rgb_component(value: f32) -> u8 {
    ((value * 255.0) as i32).clamp(0, 255) as u8
}

pub fn to_rgb(c: Color) -> [u8; 3] {
    [to_rgb_component(c.0), to_rgb_component(c.1), to_rgb_component(c.2)]
}

/// Trace one full `resolution`² image, one parallel ray per pixel.
pub fn render_level(setup: &Setup, resolution: u32, bar: Option<&ProgressBar>) -> RgbImage {
    let camera = setup.camera;
    let render = &setup.render;
    let objects = &setup.scene.objects;
    let lights = &setup.scene.lights;

    let rows: Vec<_> = (0..resolution).into_par_iter().flat_map_iter(|y| {
        let row: Vec<[u8; 3]> = (0..resolution)
            .map(|x| {
                let origin = camera.ray_origin(x, y, resolution);
                let col = cast(
                    objects,
                    lights,
                    origin,
                    camera.direction,
                    render.color_on_miss,
                    render.color_on_full_shade,
                );
                to_rgb(col)
            })
            .collect();
        if let Some(b) = bar {
            b.inc(1);
        }
        row
    }).collect();

    let mut img = RgbImage::new(resolution, resolution);
    for (pixel, rgb) in img.pixels_mut().zip(rows) {
        *pixel = Rgb(rgb);
    }
    img
}

/// Smooth resize down (or up) to the output side.
pub fn downsample(img: &RgbImage, resolution: u32) -> RgbImage {
    if img.width() == resolution && img.height() == resolution {
        return img.clone();
    }
    imageops::resize(img, resolution, resolution, FilterType::Triangle)
}

/// Total rows across all levels, for sizing a progress bar.
pub fn total_rows(setup: &Setup) -> u64 {
    resolution_ladder(setup.render.resolution, setup.render.msaa_multiplier)
        .iter()
        .map(|&l| l as u64)
        .sum()
}

/// Render every level in ladder order and hand each downsampled result to
/// `sink` together with its level. Returns the last image handed over.
pub fn render_levels<F>(setup: &Setup, bar: Option<&ProgressBar>, mut sink: F) -> Result<RgbImage>
where
    F: FnMut(u32, &RgbImage) -> Result<()>,
{
    setup.validate()?;
    let target = setup.render.resolution;
    let mut last = None;

    for level in resolution_ladder(target, setup.render.msaa_multiplier) {
        let start = Instant::now();
        let traced = render_level(setup, level, bar);
        let img = downsample(&traced, target);
        debug!("level {level}x{level} traced in {:.2?}", start.elapsed());
        sink(level, &img)?;
        last = Some(img);
    }

    last.ok_or_else(|| Error::Invalid("no resolution level to render".into()))
}

/// Path for a per-level copy: `renders/out.png` at 256 → `renders/out_256.png`.
pub fn level_path(output: &Path, level: u32) -> PathBuf {
    let stem = output.file_stem().and_then(|s| s.to_str()).unwrap_or("output");
    let name = match output.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{stem}_{level}.{ext}"),
        None => format!("{stem}_{level}"),
    };
    output.with_file_name(name)
}

/// Write `img` as an 8-bit RGB PNG tagged as linear light: gAMA 1.0 with
/// sRGB primaries in cHRM, the same values the caster produced.
pub fn save(img: &RgbImage, path: &Path) -> Result<()> {
    let encode_err = |source| Error::Encode { path: path.to_path_buf(), source };

    let file = File::create(path).map_err(|source| Error::Save {
        path: path.to_path_buf(),
        source,
    })?;
    let mut encoder = png::Encoder::new(BufWriter::new(file), img.width(), img.height());
    encoder.set_color(png::ColorType::Rgb);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_source_gamma(png::ScaledFloat::new(1.0));
    encoder.set_source_chromaticities(png::SourceChromaticities::new(
        (0.3127, 0.3290),
        (0.64, 0.33),
        (0.30, 0.60),
        (0.15, 0.06),
    ));

    let mut writer = encoder.write_header().map_err(encode_err)?;
    writer.write_image_data(img.as_raw()).map_err(encode_err)?;
    writer.finish().map_err(encode_err)
}

/// Full pipeline: each level overwrites `setup.render.output`; with
/// `keep_levels` every level is also written beside it.
pub fn render_to_file(setup: &Setup, bar: Option<&ProgressBar>, keep_levels: bool) -> Result<RgbImage> {
    let output = setup.render.output.clone();
    if let Some(dir) = output.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).map_err(|source| Error::Save {
            path: output.clone(),
            source,
        })?;
    }

    render_levels(setup, bar, |level, img| {
        save(img, &output)?;
        if keep_levels {
            save(img, &level_path(&output, level))?;
        }
        info!("level {level} saved → {}", output.display());
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        algebra::Vec3,
        camera::Camera,
        material::Material,
        object::Object,
        scene::{RenderSettings, Scene},
        sphere::Sphere,
    };

    fn small_setup(resolution: u32, msaa: u32) -> Setup {
        Setup {
            camera: Camera::new(Vec3(100.0, 0.0, 0.0), Vec3(-1.0, 0.0, 0.0), 30.0),
            render: RenderSettings {
                resolution,
                msaa_multiplier: msaa,
                color_on_miss: Vec3(0.0, 0.0, 1.0),
                color_on_full_shade: Vec3(0.1, 0.1, 0.1),
                output: PathBuf::from("unused.png"),
            },
            scene: Scene {
                objects: vec![Object::from(Sphere::new(
                    Vec3::ZERO,
                    5.0,
                    Material::new(Vec3(1.0, 0.5, 0.5), 0.0),
                ))],
                lights: vec![],
            },
        }
    }

    #[test]
    fn ladder_is_ascending_and_ends_at_full_supersample() {
        assert_eq!(resolution_ladder(512, 2), vec![32, 64, 128, 256, 512, 1024]);
        assert_eq!(resolution_ladder(100, 1), vec![25, 50, 100]);
        assert_eq!(resolution_ladder(17, 1), vec![17]);
        assert!(resolution_ladder(16, 1).is_empty());
        assert!(resolution_ladder(8, 2).is_empty());
    }

    #[test]
    fn channel_conversion_clamps() {
        assert_eq!(to_rgb_component(1.5), 255);
        assert_eq!(to_rgb_component(-0.3), 0);
        assert_eq!(to_rgb_component(0.5), 127);
        assert_eq!(to_rgb_component(1.0), 255);
        assert_eq!(to_rgb_component(f32::NAN), 0);
        assert_eq!(to_rgb(Vec3(0.1, 0.05, 2.0)), [25, 12, 255]);
    }

    #[test]
    fn level_centre_sees_sphere_and_corner_sees_sky() {
        let setup = small_setup(32, 1);
        let img = render_level(&setup, 32, None);
        assert_eq!(img.dimensions(), (32, 32));
        assert_eq!(img.get_pixel(16, 16).0, [25, 12, 12]);
        assert_eq!(img.get_pixel(0, 0).0, [0, 0, 255]);
    }

    #[test]
    fn every_level_is_downsampled_to_target() {
        let setup = small_setup(20, 4);
        let mut seen = Vec::new();
        let last = render_levels(&setup, None, |level, img| {
            assert_eq!(img.dimensions(), (20, 20));
            seen.push(level);
            Ok(())
        })
        .expect("render succeeds");
        assert_eq!(seen, vec![20, 40, 80]);
        assert_eq!(last.dimensions(), (20, 20));
    }

    #[test]
    fn sink_error_stops_rendering() {
        let setup = small_setup(20, 4);
        let mut calls = 0;
        let res = render_levels(&setup, None, |_, _| {
            calls += 1;
            Err(Error::Invalid("disk full".into()))
        });
        assert!(res.is_err());
        assert_eq!(calls, 1);
    }

    #[test]
    fn level_path_inserts_level_before_extension() {
        assert_eq!(level_path(Path::new("renders/out.png"), 256), PathBuf::from("renders/out_256.png"));
        assert_eq!(level_path(Path::new("out"), 64), PathBuf::from("out_64"));
    }

    #[test]
    fn total_rows_counts_every_level() {
        assert_eq!(total_rows(&small_setup(20, 4)), 20 + 40 + 80);
    }
}
