/// Command line configuration.
use clap::Parser;
use std::path::PathBuf;

/// GTK application id
pub const APP_ID: &str = "io.github.shading.Shading";

/// Initial window size in logical pixels
pub const WINDOW_SIZE: (i32, i32) = (800, 800);

pub const KEY_HELP: &str = "\
Keys (act on release):
  0        Toggle debug view
  1        Toggle phasor noise
             5 6 7 8  Toggle phasor function 1..4
  2        Toggle gabor noise
  9        Toggle phase field
  F B I    Select f, b or ipk
  R then X/Y/Z   Select resolution.x/y/z
  M then X/Y/Z   Select mouse.x/y/z
  RIGHT    Increase the selected value
  LEFT     Decrease the selected value
  P        Save a screenshot";

/// Interactive phasor noise, gabor noise and phase field shaders on a mesh
#[derive(Parser, Debug)]
#[command(name = "shading", version, about, after_help = KEY_HELP)]
pub struct Args {
    /// OBJ mesh to render (defaults to the built-in centred square)
    pub mesh: Option<PathBuf>,

    /// Directory screenshots are written to
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub screenshot_dir: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_is_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn mesh_is_optional() {
        let args = Args::try_parse_from(["shading"]).unwrap();
        assert_eq!(args.mesh, None);
        assert_eq!(args.screenshot_dir, PathBuf::from("."));
    }

    #[test]
    fn positional_mesh_and_dir() {
        let args =
            Args::try_parse_from(["shading", "bunny.obj", "--screenshot-dir", "/tmp"]).unwrap();
        assert_eq!(args.mesh, Some(PathBuf::from("bunny.obj")));
        assert_eq!(args.screenshot_dir, PathBuf::from("/tmp"));
    }

    #[test]
    fn second_positional_is_rejected() {
        assert!(Args::try_parse_from(["shading", "a.obj", "b.obj"]).is_err());
    }
}
