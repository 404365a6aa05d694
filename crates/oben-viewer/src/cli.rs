use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};

pub const USAGE: &str = "\
Usage: oben-viewer [OPTIONS] [SHADER.wgsl ...]

Renders each fragment shader on a fullscreen quad. Without shaders the
built-in demos are shown.

Options:
  --log <FILTER>     env_logger filter (overrides RUST_LOG)
  --size <WxH>       initial window size in logical pixels
  -h, --help         print this message

Keys:
  1-9    switch pipeline       R      reset camera
  [ ]    sensitivity x0.5/x2   - =    zoom step x0.5/x2
  C      cycle palette         Esc    quit";

#[derive(Debug, Default, PartialEq)]
pub struct CliOptions {
    pub shaders: Vec<PathBuf>,
    pub log_filter: Option<String>,
    pub size: Option<(f64, f64)>,
}

impl CliOptions {
    /// Returns `None` when help was requested.
    pub fn parse() -> Result<Option<Self>> {
        Self::parse_from(std::env::args().skip(1))
    }

    pub fn parse_from<I>(args: I) -> Result<Option<Self>>
    where
        I: IntoIterator<Item = String>,
    {
        let mut options = Self::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "-h" | "--help" => return Ok(None),
                "--log" => {
                    let filter = args.next().ok_or_else(|| anyhow!("--log expects a filter"))?;
                    options.log_filter = Some(filter);
                }
                "--size" => {
                    let size = args.next().ok_or_else(|| anyhow!("--size expects WxH"))?;
                    options.size = Some(parse_size(&size)?);
                }
                other if other.starts_with("--") => {
                    return Err(anyhow!("unknown option: {other}\n\n{USAGE}"));
                }
                path => options.shaders.push(PathBuf::from(path)),
            }
        }

        Ok(Some(options))
    }
}

fn parse_size(s: &str) -> Result<(f64, f64)> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| anyhow!("size must look like 1280x720, got {s:?}"))?;
    let w: f64 = w.trim().parse().with_context(|| format!("bad width in {s:?}"))?;
    let h: f64 = h.trim().parse().with_context(|| format!("bad height in {s:?}"))?;
    if w < 1.0 || h < 1.0 {
        return Err(anyhow!("size must be at least 1x1, got {s:?}"));
    }
    Ok((w, h))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Option<CliOptions>> {
        CliOptions::parse_from(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn no_arguments_means_builtin_demos() {
        let opts = parse(&[]).unwrap().unwrap();
        assert!(opts.shaders.is_empty());
        assert_eq!(opts.log_filter, None);
    }

    #[test]
    fn collects_shader_paths_and_options() {
        let opts = parse(&["a.wgsl", "--log", "debug", "b.wgsl", "--size", "800x600"])
            .unwrap()
            .unwrap();
        assert_eq!(opts.shaders, vec![PathBuf::from("a.wgsl"), PathBuf::from("b.wgsl")]);
        assert_eq!(opts.log_filter.as_deref(), Some("debug"));
        assert_eq!(opts.size, Some((800.0, 600.0)));
    }

    #[test]
    fn help_short_circuits() {
        assert_eq!(parse(&["a.wgsl", "--help", "--bogus"]).unwrap(), None);
    }

    #[test]
    fn rejects_unknown_options_and_bad_sizes() {
        assert!(parse(&["--fullscreen"]).is_err());
        assert!(parse(&["--size", "wide"]).is_err());
        assert!(parse(&["--size", "0x10"]).is_err());
        assert!(parse(&["--log"]).is_err());
    }
}
