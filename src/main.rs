mod application;
mod camera;
mod config;
mod controls;
mod export;
mod gl_renderer;
mod mesh;
mod params;
mod pipeline;
mod shader;
mod shader_presets;
mod window;

use clap::Parser;
use gtk4::glib;

use application::ShadingApplication;
use config::Args;
use mesh::Mesh;

fn main() -> glib::ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    println!("{}\n", config::KEY_HELP);

    let mesh = match Mesh::load(args.mesh.as_deref()) {
        Ok(mesh) => mesh,
        Err(e) => {
            log::error!("{:#}", e);
            return glib::ExitCode::FAILURE;
        }
    };

    let app = ShadingApplication::new(config::APP_ID, mesh, args.screenshot_dir);
    app.run()
}
