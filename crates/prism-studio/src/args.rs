use std::path::PathBuf;

use anyhow::{bail, Context, Result};

const USAGE: &str = "usage: prism-studio [OUTPUT.png] [WIDTHxHEIGHT] [--config CONFIG.json]";

#[derive(Debug, Clone, PartialEq)]
pub struct StudioArgs {
    pub output: PathBuf,
    pub width: u32,
    pub height: u32,
    pub config: Option<PathBuf>,
}

impl Default for StudioArgs {
    fn default() -> Self {
        Self {
            output: PathBuf::from("prism.png"),
            width: 256,
            height: 256,
            config: None,
        }
    }
}

impl StudioArgs {
    pub fn parse(args: impl IntoIterator<Item = String>) -> Result<Self> {
        let mut out = Self::default();
        let mut positional = 0;
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "-h" | "--help" => bail!(USAGE),
                "--config" => {
                    let path = args.next().context("--config needs a path")?;
                    out.config = Some(PathBuf::from(path));
                }
                flag if flag.starts_with("--") => bail!("unknown flag {flag}\n{USAGE}"),
                _ => {
                    match positional {
                        0 => out.output = PathBuf::from(arg),
                        1 => (out.width, out.height) = parse_size(&arg)?,
                        _ => bail!("unexpected argument {arg}\n{USAGE}"),
                    }
                    positional += 1;
                }
            }
        }
        Ok(out)
    }
}

fn parse_size(s: &str) -> Result<(u32, u32)> {
    let (w, h) = s
        .split_once('x')
        .with_context(|| format!("size {s:?} is not WIDTHxHEIGHT"))?;
    let w: u32 = w.parse().with_context(|| format!("bad width in {s:?}"))?;
    let h: u32 = h.parse().with_context(|| format!("bad height in {s:?}"))?;
    if w == 0 || h == 0 {
        bail!("size {s:?} must be non-zero");
    }
    Ok((w, h))
}
