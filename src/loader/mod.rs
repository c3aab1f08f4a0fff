use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};

use crate::camera::{Camera, ThinLensCamera};
use crate::core::scene::Scene;
use crate::material::{Dielectric, Lambert, Material, Metal};
use crate::primitive::Sphere;
use crate::renderer::OutputConfig;

/// Renderer settings as written in the scene file; unset fields fall back to
/// CLI flags or defaults in `main`.
pub struct RenderSettings {
    pub spp: u32,
    pub max_depth: u32,
    pub threads: Option<u32>,
    pub seed: Option<u64>,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            spp: 100,
            max_depth: 50,
            threads: None,
            seed: None,
        }
    }
}

/// Everything a render run needs, built from one scene JSON.
pub struct SceneDescription {
    pub scene: Arc<Scene>,
    pub camera: Arc<Camera>,
    pub settings: RenderSettings,
    pub output: OutputConfig,
}

pub fn load<P: AsRef<Path>>(path: P) -> Result<SceneDescription> {
    let path = path.as_ref();
    let json_file = std::fs::File::open(path)
        .with_context(|| format!("can't open scene file '{}'", path.display()))?;
    let json_reader = std::io::BufReader::new(json_file);
    let json_value: serde_json::Value = serde_json::from_reader(json_reader)
        .with_context(|| format!("scene file '{}' is not valid JSON", path.display()))?;
    load_from_json(&json_value)
}

pub fn load_from_json(json_value: &serde_json::Value) -> Result<SceneDescription> {
    let output_json = json_value.get("output").context("top: no 'output' field")?;
    let output = load_output(output_json)?;
    let aspect = output.width as f32 / output.height as f32;

    let camera_json = json_value.get("camera").context("top: no 'camera' field")?;
    let camera = load_camera(camera_json, aspect)?;

    let settings = if let Some(renderer_json) = json_value.get("renderer") {
        load_settings(renderer_json)?
    } else {
        RenderSettings::default()
    };

    let materials_json = json_value
        .get("materials")
        .context("top: no 'materials' field")?;
    let materials = load_materials(materials_json)?;

    let objects_json = json_value
        .get("objects")
        .context("top: no 'objects' field")?;
    let scene = load_objects(objects_json, &materials)?;

    Ok(SceneDescription {
        scene: Arc::new(scene),
        camera: Arc::new(camera),
        settings,
        output,
    })
}

fn load_output(value: &serde_json::Value) -> Result<OutputConfig> {
    let file = get_str_field(value, "output", "file")?;
    let width = get_int_field(value, "output", "width")?;
    let height = get_int_field(value, "output", "height")?;
    if width == 0 || height == 0 {
        bail!("output: 'width' and 'height' must be positive");
    }
    Ok(OutputConfig {
        width,
        height,
        output_filename: file.to_string(),
    })
}

fn load_camera(value: &serde_json::Value, aspect: f32) -> Result<Camera> {
    let ty = get_str_field(value, "camera", "type")?;
    match ty {
        "thin_lens" => {
            let eye = get_float_array3_field(value, "camera-thin_lens", "eye")?;
            let look_at = get_float_array3_field(value, "camera-thin_lens", "look_at")?;
            let up = get_float_array3_field_or_default(
                value,
                "camera-thin_lens",
                "up",
                [0.0, 1.0, 0.0],
            )?;
            let fov = get_float_field(value, "camera-thin_lens", "fov")?;
            let aperture = get_float_field_or_default(value, "camera-thin_lens", "aperture", 0.0)?;
            let focus_distance =
                get_float_field_or_default(value, "camera-thin_lens", "focus_distance", 1.0)?;
            Ok(ThinLensCamera::new(
                eye.into(),
                look_at.into(),
                up.into(),
                fov,
                aspect,
                aperture,
                focus_distance,
            )
            .into())
        }
        _ => bail!("camera: unknown type '{}'", ty),
    }
}

fn load_settings(value: &serde_json::Value) -> Result<RenderSettings> {
    let defaults = RenderSettings::default();
    Ok(RenderSettings {
        spp: get_int_field_option(value, "renderer", "spp")?.unwrap_or(defaults.spp),
        max_depth: get_int_field_option(value, "renderer", "max_depth")?
            .unwrap_or(defaults.max_depth),
        threads: get_int_field_option(value, "renderer", "threads")?,
        seed: get_int_field_option(value, "renderer", "seed")?.map(u64::from),
    })
}

fn load_materials(value: &serde_json::Value) -> Result<HashMap<String, Material>> {
    let arr = value
        .as_array()
        .context("top: 'materials' should be an array")?;
    let mut materials = HashMap::with_capacity(arr.len());
    for mat_json in arr {
        let name = get_str_field(mat_json, "material", "name")?;
        if materials.contains_key(name) {
            bail!("material: name '{}' is duplicated", name);
        }
        let ty = get_str_field(mat_json, "material", "type")?;
        let mat = match ty {
            "lambert" => {
                let albedo = get_float_array3_field(mat_json, "material-lambert", "albedo")?;
                Lambert::new(albedo.into()).into()
            }
            "metal" => {
                let albedo = get_float_array3_field(mat_json, "material-metal", "albedo")?;
                let fuzz = get_float_field_or_default(mat_json, "material-metal", "fuzz", 0.0)?;
                Metal::new(albedo.into(), fuzz).into()
            }
            "dielectric" => {
                let ior = get_float_field(mat_json, "material-dielectric", "ior")?;
                Dielectric::new(ior).into()
            }
            _ => bail!("material: unknown type '{}'", ty),
        };
        materials.insert(name.to_owned(), mat);
    }
    Ok(materials)
}

fn load_objects(
    value: &serde_json::Value,
    materials: &HashMap<String, Material>,
) -> Result<Scene> {
    let arr = value
        .as_array()
        .context("top: 'objects' should be an array")?;
    let mut scene = Scene::new();
    for obj_json in arr {
        let ty = get_str_field(obj_json, "object", "primitive")?;
        let mat_name = get_str_field(obj_json, "object", "material")?;
        let material = *materials
            .get(mat_name)
            .with_context(|| format!("object: material '{}' not found", mat_name))?;
        match ty {
            "sphere" => {
                let center = get_float_array3_field(obj_json, "object-sphere", "center")?;
                let radius = get_float_field(obj_json, "object-sphere", "radius")?;
                scene.add(Sphere::new(center.into(), radius), material);
            }
            _ => bail!("object: unknown primitive '{}'", ty),
        }
    }
    Ok(scene)
}

fn get_str_field<'a>(value: &'a serde_json::Value, env: &str, field: &str) -> Result<&'a str> {
    let field_value = value
        .get(field)
        .with_context(|| format!("{}: no '{}' field", env, field))?;
    field_value
        .as_str()
        .with_context(|| format!("{}: '{}' should be a string", env, field))
}

fn get_float_field(value: &serde_json::Value, env: &str, field: &str) -> Result<f32> {
    let field_value = value
        .get(field)
        .with_context(|| format!("{}: no '{}' field", env, field))?;
    field_value
        .as_f64()
        .map(|f| f as f32)
        .with_context(|| format!("{}: '{}' should be a float", env, field))
}

fn get_float_field_or_default(
    value: &serde_json::Value,
    env: &str,
    field: &str,
    default: f32,
) -> Result<f32> {
    if value.get(field).is_some() {
        get_float_field(value, env, field)
    } else {
        Ok(default)
    }
}

fn get_int_field(value: &serde_json::Value, env: &str, field: &str) -> Result<u32> {
    let field_value = value
        .get(field)
        .with_context(|| format!("{}: no '{}' field", env, field))?;
    field_value
        .as_u64()
        .map(|i| i as u32)
        .with_context(|| format!("{}: '{}' should be an int", env, field))
}

fn get_int_field_option(value: &serde_json::Value, env: &str, field: &str) -> Result<Option<u32>> {
    if let Some(field_value) = value.get(field) {
        field_value
            .as_u64()
            .map(|i| Some(i as u32))
            .with_context(|| format!("{}: '{}' should be an int", env, field))
    } else {
        Ok(None)
    }
}

fn get_float_array3_field(
    value: &serde_json::Value,
    env: &str,
    field: &str,
) -> Result<[f32; 3]> {
    let field_value = value
        .get(field)
        .with_context(|| format!("{}: no '{}' field", env, field))?;
    let error_info = format!("{}: '{}' should be an array with 3 floats", env, field);
    let arr = field_value.as_array().context(error_info.clone())?;
    if arr.len() == 3 {
        let x = arr[0].as_f64().context(error_info.clone())? as f32;
        let y = arr[1].as_f64().context(error_info.clone())? as f32;
        let z = arr[2].as_f64().context(error_info)? as f32;
        Ok([x, y, z])
    } else {
        bail!(error_info)
    }
}

fn get_float_array3_field_or_default(
    value: &serde_json::Value,
    env: &str,
    field: &str,
    default: [f32; 3],
) -> Result<[f32; 3]> {
    if value.get(field).is_some() {
        get_float_array3_field(value, env, field)
    } else {
        Ok(default)
    }
}
