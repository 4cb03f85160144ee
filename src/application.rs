use gtk4::glib;
use gtk4::prelude::*;
use libadwaita as adw;
use std::cell::Cell;
use std::path::PathBuf;
use std::rc::Rc;

use crate::mesh::Mesh;
use crate::window::ShadingWindow;

pub struct ShadingApplication {
    app: adw::Application,
    /// Set when the window gave up because GL setup failed
    failed: Rc<Cell<bool>>,
}

impl ShadingApplication {
    pub fn new(app_id: &str, mesh: Mesh, screenshot_dir: PathBuf) -> Self {
        let app = adw::Application::builder().application_id(app_id).build();
        let failed = Rc::new(Cell::new(false));

        let mesh = Rc::new(mesh);
        let screenshot_dir = Rc::new(screenshot_dir);
        let failed_activate = failed.clone();
        app.connect_activate(move |app| {
            // A second activation (e.g. relaunch while running) reuses the window.
            if let Some(window) = app.active_window() {
                window.present();
                return;
            }
            let window = ShadingWindow::new(
                app,
                mesh.clone(),
                screenshot_dir.clone(),
                failed_activate.clone(),
            );
            window.present();
        });

        Self { app, failed }
    }

    /// Run the GTK main loop. Command line arguments were already consumed
    /// by clap, so only the program name is forwarded.
    pub fn run(&self) -> glib::ExitCode {
        let argv0: Vec<String> = std::env::args().take(1).collect();
        let code = self.app.run_with_args(argv0.as_slice());
        if self.failed.get() {
            glib::ExitCode::FAILURE
        } else {
            code
        }
    }
}
