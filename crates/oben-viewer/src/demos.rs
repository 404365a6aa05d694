use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use oben_engine::params::{ParameterBuffer, FIRST_PARAMETER_BINDING};
use oben_engine::render::PipelineDescriptor;

/// Colors cycled with `C`: rgb + glow strength.
pub const PALETTES: [[f32; 4]; 4] = [
    [0.95, 0.45, 0.20, 0.60],
    [0.25, 0.70, 0.95, 0.80],
    [0.55, 0.95, 0.40, 0.40],
    [0.90, 0.90, 0.95, 1.00],
];

/// Major radius, minor radius, twist rate, unused.
const TORUS_SHAPE: [f32; 4] = [6.0, 1.8, 0.35, 0.0];

pub fn builtin() -> Result<Vec<PipelineDescriptor>> {
    let mut params = ParameterBuffer::new("torus params");
    params.on_ready(|p| log::debug!("{} ready with {} scalars", p.label(), p.len()));
    params.initialize(8, FIRST_PARAMETER_BINDING)?;
    params.write_range(&PALETTES[0], 0)?;
    params.write_range(&TORUS_SHAPE, 4)?;

    Ok(vec![
        PipelineDescriptor::new("gradient", include_str!("../shaders/gradient.wgsl")),
        PipelineDescriptor::new("sphere field", include_str!("../shaders/sphere.wgsl")),
        PipelineDescriptor::new("torus", include_str!("../shaders/torus.wgsl"))
            .with_parameters(params),
    ])
}

pub fn from_files(paths: &[PathBuf]) -> Result<Vec<PipelineDescriptor>> {
    paths.iter().map(|p| from_file(p)).collect()
}

fn from_file(path: &Path) -> Result<PipelineDescriptor> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("failed to read shader {}", path.display()))?;
    let label = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Ok(PipelineDescriptor::new(label, source))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_set_has_one_parameterized_pipeline() {
        let demos = builtin().unwrap();
        assert_eq!(demos.len(), 3);

        let with_params: Vec<_> = demos.iter().filter(|d| d.parameters.is_some()).collect();
        assert_eq!(with_params.len(), 1);

        let params = with_params[0].parameters.as_ref().unwrap();
        assert_eq!(params.binding(), Some(FIRST_PARAMETER_BINDING));
        assert_eq!(&params.values()[0..4], &PALETTES[0]);
        assert_eq!(&params.values()[4..8], &TORUS_SHAPE);
    }

    #[test]
    fn missing_file_is_reported_with_its_path() {
        let err = from_files(&[PathBuf::from("/nonexistent/shader.wgsl")]).unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/shader.wgsl"));
    }
}
